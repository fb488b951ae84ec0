use chrono::{DateTime, Utc};

use crate::profile::EntityProfile;
use crate::query::{CoarseFilter, NumericField, TagField};
use crate::types::GeoPoint;

/// Read-only view of a searchable record.
///
/// Every pipeline stage is generic over this trait; adding an entity type
/// means implementing it and supplying an [`EntityProfile`].
pub trait Candidate: Send + Sync {
    fn profile() -> &'static EntityProfile
    where
        Self: Sized;

    fn id(&self) -> &str;
    fn display_name(&self) -> &str;
    /// Fields matched by the free-text term, any one of which may match.
    fn searchable_text(&self) -> Vec<&str>;
    fn numeric(&self, field: NumericField) -> Option<f64>;
    /// Values of a multi-valued attribute. Empty when the record has none.
    fn tags(&self, field: TagField) -> &[String];
    fn coordinates(&self) -> Option<GeoPoint>;
    fn created_at(&self) -> DateTime<Utc>;
}

/// Supplies the materialized candidate set for one request.
///
/// Implementations may apply any part of `coarse` they can evaluate cheaply,
/// or none of it; the pipeline re-checks every predicate.
pub trait CandidateSource<C: Candidate>: Send + Sync {
    fn fetch(&self, coarse: &CoarseFilter<'_>) -> anyhow::Result<Vec<C>>;
}

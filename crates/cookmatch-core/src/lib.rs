//! cookmatch-core
//!
//! Domain types shared by every stage of the search pipeline: candidate
//! records, the query descriptor, per-entity profiles, the candidate source
//! seam, configuration and the JSON catalog loader.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod profile;
pub mod query;
pub mod traits;
pub mod types;

pub use profile::{EntityProfile, LISTING_PROFILE, PROVIDER_PROFILE};
pub use query::{CoarseFilter, Exclusion, GeoFilter, NumericField, NumericRange, QueryBuilder, QueryDescriptor, SortKey, TagField};
pub use traits::{Candidate, CandidateSource};
pub use types::{EntityKind, GeoPoint, Hit, ListingRecord, ProviderRecord, Ranked};

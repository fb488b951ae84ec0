//! Raw request parameters → [`QueryDescriptor`].
//!
//! Nothing here fails: input that does not parse simply contributes no
//! constraint, and an unusable sort key falls back to the profile default.

use std::collections::BTreeSet;
use tracing::debug;

use cookmatch_core::{EntityProfile, GeoPoint, QueryDescriptor, SortKey};

use crate::params::RawParams;

pub const TEXT_PARAM: &str = "q";
pub const SORT_PARAM: &str = "sort";
pub const LAT_PARAM: &str = "lat";
pub const LNG_PARAM: &str = "lng";
pub const MAX_DISTANCE_PARAM: &str = "maxDistance";

/// Parse a finite number; anything else is treated as absent.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            if !raw.is_empty() {
                debug!(value = raw, "ignoring unparseable number");
            }
            None
        }
    }
}

/// Split a comma-separated list into trimmed, non-empty tokens.
pub fn parse_list(raw: Option<&str>) -> BTreeSet<String> {
    raw.map(|s| s.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_string).collect())
        .unwrap_or_default()
}

pub fn normalize(profile: &EntityProfile, params: &RawParams) -> QueryDescriptor {
    let mut builder = QueryDescriptor::builder(profile);

    if let Some(q) = params.get(TEXT_PARAM) {
        builder = builder.text(q);
    }

    for &(name, field) in profile.categorical_params {
        builder = builder.accept(field, parse_list(params.get(name)));
    }
    for &(name, field) in profile.min_params {
        if let Some(v) = parse_number(params.get(name)) {
            builder = builder.min(field, v);
        }
    }
    for &(name, field) in profile.max_params {
        if let Some(v) = parse_number(params.get(name)) {
            builder = builder.max(field, v);
        }
    }

    if let Some((name, field)) = profile.exclusion_param {
        builder = builder.exclude(field, parse_list(params.get(name)));
    }

    match (parse_number(params.get(LAT_PARAM)), parse_number(params.get(LNG_PARAM))) {
        (Some(lat), Some(lng)) => {
            builder = builder.near(GeoPoint::new(lat, lng), parse_number(params.get(MAX_DISTANCE_PARAM)));
        }
        (None, None) => {}
        _ => debug!("geo filter needs both lat and lng; ignoring"),
    }

    if let Some(raw) = params.get(SORT_PARAM) {
        match SortKey::parse(raw) {
            Some(key) => builder = builder.sort(key),
            None => debug!(sort = raw, default = %profile.default_sort, "unknown sort key; using default"),
        }
    }

    let query = builder.build();
    debug!(kind = %query.kind(), sort = %query.sort(), geo = query.geo().is_some(), "normalized query");
    query
}

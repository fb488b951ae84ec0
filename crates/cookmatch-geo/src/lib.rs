//! cookmatch-geo
//!
//! Great-circle distances and the distance-ceiling filter.

pub mod distance;

pub use distance::{annotate, distance_km, haversine_km, round_tenth, EARTH_RADIUS_KM};

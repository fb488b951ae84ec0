use tracing::debug;

use cookmatch_core::{Candidate, GeoFilter, GeoPoint, Hit};

/// Mean Earth radius.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance in kilometres, unrounded.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // float error can push `a` just past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

pub fn round_tenth(km: f64) -> f64 { (km * 10.0).round() / 10.0 }

/// Distance as reported to callers: haversine rounded to one decimal.
pub fn distance_km(from: GeoPoint, to: GeoPoint) -> f64 { round_tenth(haversine_km(from, to)) }

/// Wrap survivors as hits, attaching distances when a geo filter is present.
///
/// Without a filter every distance is `None` and nothing is dropped. With one,
/// candidates lacking valid coordinates are kept with a `None` distance unless
/// a ceiling is set, which they can never satisfy.
pub fn annotate<'a, C: Candidate>(geo: Option<&GeoFilter>, survivors: Vec<&'a C>) -> Vec<Hit<'a, C>> {
    let Some(geo) = geo else {
        return survivors.into_iter().map(Hit::new).collect();
    };
    let input = survivors.len();
    let hits: Vec<Hit<'a, C>> = survivors
        .into_iter()
        .map(|c| {
            let point = c.coordinates().filter(|p| {
                let valid = p.is_valid();
                if !valid {
                    debug!(id = c.id(), lat = p.lat, lng = p.lng, "ignoring out-of-range coordinates");
                }
                valid
            });
            Hit::with_distance(c, point.map(|p| distance_km(geo.origin, p)))
        })
        .filter(|hit| match geo.max_distance_km {
            None => true,
            Some(max) => hit.distance.is_some_and(|d| d <= max),
        })
        .collect();
    debug!(input, kept = hits.len(), max_distance_km = ?geo.max_distance_km, "distances computed");
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lng: f64) -> GeoPoint { GeoPoint::new(lat, lng) }

    #[test]
    fn same_point_is_zero() {
        for point in [p(0.0, 0.0), p(51.5, -0.12), p(-33.9, 151.2), p(90.0, 180.0)] {
            assert_eq!(haversine_km(point, point), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric_and_non_negative() {
        let pairs = [(p(40.71, -74.0), p(34.05, -118.24)), (p(-10.0, 170.0), p(12.0, -175.0)), (p(0.0, 0.0), p(0.0, 180.0))];
        for (a, b) in pairs {
            assert_eq!(haversine_km(a, b), haversine_km(b, a));
            assert!(haversine_km(a, b) >= 0.0);
        }
    }

    #[test]
    fn one_degree_of_latitude_at_equator() {
        let d = distance_km(p(0.0, 0.0), p(1.0, 0.0));
        assert!((d - 111.2).abs() <= 0.5, "got {d}");
        assert_eq!(distance_km(p(0.0, 0.0), p(0.0, 1.0)), 111.2);
    }

    #[test]
    fn longitude_wrap_around_is_invisible() {
        assert_eq!(distance_km(p(10.0, 180.0), p(10.0, -180.0)), 0.0);
        let across = distance_km(p(0.0, 179.5), p(0.0, -179.5));
        let direct = distance_km(p(0.0, 0.0), p(0.0, 1.0));
        assert_eq!(across, direct);
    }

    #[test]
    fn antipodes_are_half_the_circumference() {
        let d = haversine_km(p(0.0, 0.0), p(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn rounding_keeps_one_decimal() {
        assert_eq!(round_tenth(111.194_926), 111.2);
        assert_eq!(round_tenth(0.04), 0.0);
        assert_eq!(round_tenth(2.25), 2.3);
    }
}

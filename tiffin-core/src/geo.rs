use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers, per the IUGG value used for haversine.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS-84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two points in kilometers, rounded to two
/// decimal places. Symmetric, non-negative, and zero for identical points.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let distance = 2.0 * EARTH_RADIUS_KM * h.sqrt().asin();

    round_2dp(distance)
}

/// Whether `point` lies within `radius_km` of `center`.
pub fn within_radius(center: GeoPoint, point: GeoPoint, radius_km: f64) -> bool {
    haversine_km(center, point) <= radius_km
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    // Zone center used across the storefront: Kurla West, Mumbai.
    const CENTER: GeoPoint = GeoPoint {
        latitude: 19.0728,
        longitude: 72.8826,
    };

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(haversine_km(CENTER, CENTER), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let other = GeoPoint::new(19.1136, 72.8697);
        assert_eq!(haversine_km(CENTER, other), haversine_km(other, CENTER));
    }

    #[test]
    fn test_known_distance_due_north() {
        // 0.01 degrees of latitude is 1.11 km of arc.
        let north = GeoPoint::new(19.0828, 72.8826);
        assert_eq!(haversine_km(CENTER, north), 1.11);

        let further = GeoPoint::new(19.1028, 72.8826);
        assert_eq!(haversine_km(CENTER, further), 2.22);
    }

    #[test]
    fn test_distance_is_non_negative() {
        let west = GeoPoint::new(19.0728, 72.8526);
        assert!(haversine_km(CENTER, west) > 0.0);
    }

    #[test]
    fn test_within_radius() {
        let north = GeoPoint::new(19.0828, 72.8826);
        assert!(within_radius(CENTER, north, 2.0));
        assert!(!within_radius(CENTER, north, 1.0));
    }
}

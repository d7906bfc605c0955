//! # Great-Circle Distance
//!
//! Haversine distance between two coordinates on a sphere of radius
//! [`EARTH_RADIUS_KM`].
//!
//! # Examples
//!
//! ```
//! use menu_finder::domain::services::distance::compute_distance;
//!
//! let d = compute_distance(Some(60.169), Some(24.938), Some(60.17), Some(24.94)).unwrap();
//! assert!(d > 0.1 && d < 0.2);
//!
//! assert!(compute_distance(None, Some(24.938), Some(60.17), Some(24.94)).is_none());
//! ```

use crate::domain::value_objects::Coordinate;

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two validated coordinates.
#[must_use]
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    haversine(from.latitude(), from.longitude(), to.latitude(), to.longitude())
}

/// Distance in kilometers from the user to a target, or `None` if any
/// coordinate is missing or not a finite number.
#[must_use]
pub fn compute_distance(
    user_lat: Option<f64>,
    user_lng: Option<f64>,
    target_lat: Option<f64>,
    target_lng: Option<f64>,
) -> Option<f64> {
    let (lat1, lng1, lat2, lng2) = (user_lat?, user_lng?, target_lat?, target_lng?);
    if ![lat1, lng1, lat2, lng2].iter().all(|v| v.is_finite()) {
        return None;
    }
    let distance = haversine(lat1, lng1, lat2, lng2);
    distance.is_finite().then_some(distance)
}

/// Distance between two optional coordinates.
#[must_use]
pub fn distance_between(user: Option<Coordinate>, target: Option<Coordinate>) -> Option<f64> {
    Some(haversine_km(user?, target?))
}

fn haversine(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

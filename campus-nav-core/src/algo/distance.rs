//! Distance helpers.
//!
//! Static edge weights use the great-circle distance. Snapping and segment
//! projection use a planar distance in degrees, which is only meaningful
//! over an area of a few kilometers.

use crate::model::Coordinate;

/// Mean earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Approximate meters per degree, used to turn planar distances into edge weights
pub const DEFAULT_DISTANCE_SCALE_FACTOR: f64 = 111_320.0;

/// Haversine distance in meters
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Haversine distance rounded to whole meters, as stored on edges
pub fn distance_rounded(a: Coordinate, b: Coordinate) -> f64 {
    distance(a, b).round()
}

/// `hypot(Δlat, Δlng)` in degrees
pub fn planar_distance(a: Coordinate, b: Coordinate) -> f64 {
    (a.lat - b.lat).hypot(a.lng - b.lng)
}

/// Converts a planar degree distance to whole meters
pub fn planar_to_meters(degrees: f64, scale_factor: f64) -> f64 {
    (degrees * scale_factor).round()
}

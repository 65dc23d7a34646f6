//! # Geographic Utilities
//!
//! Core geographic computation utilities for track compression.
//!
//! The compression filters work almost entirely in *angular* distances: the
//! great-circle separation of two points expressed in radians. Metric
//! parameters given by the user (a distance in metres, a speed in km/h) are
//! converted to and from radians using a fixed-radius sphere.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`radians_between`] | Great-circle distance between two points, in radians |
//! | [`metres_between`] | Great-circle distance between two points, in metres |
//! | [`radians_to_metres`] | Convert an angular distance to metres |
//! | [`metres_to_radians`] | Convert metres to an angular distance |
//! | [`mercator_x`] / [`mercator_y`] | Normalized Mercator coordinates in `[0, 1]` |
//! | [`project_point`] | Move along a great circle by bearing and angular distance |
//!
//! ## Example
//!
//! ```rust
//! use track_compress::{TrackPoint, geo_utils};
//!
//! let a = TrackPoint::new(47.1, 8.0);
//! let b = TrackPoint::new(47.1, 8.001);
//!
//! let metres = geo_utils::metres_between(&a, &b);
//! assert!(metres > 70.0 && metres < 80.0);
//!
//! let radians = geo_utils::radians_between(&a, &b);
//! assert!((geo_utils::radians_to_metres(radians) - metres).abs() < 1e-6);
//! ```
//!
//! ## Algorithm Notes
//!
//! Distances use the haversine formula from the `geo` crate. The radius used
//! for conversions is the same mean Earth radius `geo` uses, so a distance
//! converted to radians and back is unchanged.

use geo::{Distance, Haversine, Point};
use crate::TrackPoint;

/// Mean Earth radius in metres, as used by `geo`'s haversine metric.
pub const EARTH_RADIUS_METRES: f64 = 6_371_008.8;

// =============================================================================
// Distance Functions
// =============================================================================

/// Great-circle distance between two points in metres.
#[inline]
pub fn metres_between(p1: &TrackPoint, p2: &TrackPoint) -> f64 {
    let point1 = Point::new(p1.longitude, p1.latitude);
    let point2 = Point::new(p2.longitude, p2.latitude);
    Haversine::distance(point1, point2)
}

/// Great-circle distance between two points in radians.
///
/// This is the angular distance used by every proximity threshold in the
/// compression filters.
#[inline]
pub fn radians_between(p1: &TrackPoint, p2: &TrackPoint) -> f64 {
    metres_to_radians(metres_between(p1, p2))
}

/// Convert an angular distance in radians to metres.
#[inline]
pub fn radians_to_metres(radians: f64) -> f64 {
    radians * EARTH_RADIUS_METRES
}

/// Convert a distance in metres to an angular distance in radians.
#[inline]
pub fn metres_to_radians(metres: f64) -> f64 {
    metres / EARTH_RADIUS_METRES
}

// =============================================================================
// Projection Functions
// =============================================================================

/// Normalized Mercator x coordinate: 0 at 180°W, 1 at 180°E.
#[inline]
pub fn mercator_x(longitude: f64) -> f64 {
    (longitude + 180.0) / 360.0
}

/// Normalized Mercator y coordinate: 0 at the top of the map, 1 at the bottom.
///
/// Latitudes are clamped just short of the poles, where the projection
/// diverges.
#[inline]
pub fn mercator_y(latitude: f64) -> f64 {
    let lat_rad = latitude.clamp(-89.999, 89.999).to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0
}

/// Project a point along a great circle.
///
/// # Arguments
///
/// * `origin` - Starting point
/// * `bearing_radians` - Initial bearing, clockwise from north
/// * `distance_radians` - Angular distance to travel
///
/// # Returns
///
/// A new plain track point (no altitude, timestamp or flags) at the projected
/// position.
pub fn project_point(origin: &TrackPoint, bearing_radians: f64, distance_radians: f64) -> TrackPoint {
    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();
    let lat2 = (lat1.sin() * distance_radians.cos()
        + lat1.cos() * distance_radians.sin() * bearing_radians.cos())
    .asin();
    let lon2 = lon1
        + (bearing_radians.sin() * distance_radians.sin() * lat1.cos())
            .atan2(distance_radians.cos() - lat1.sin() * lat2.sin());
    TrackPoint::new(lat2.to_degrees(), lon2.to_degrees())
}

// =============================================================================
// Unit Tests
// =============================================================================

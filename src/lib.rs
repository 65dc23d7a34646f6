//! # Track Compress
//!
//! Composable compression filters for recorded GPS tracks.
//!
//! This library provides:
//! - Nine independent filters deciding which track points are redundant
//! - A shared [`MarkingData`] threaded through the filters so later filters
//!   see the deletions and segment breaks of earlier ones
//! - A compact settings string per filter, for persisting a filter pipeline
//!
//! Points are never removed from the [`Track`]: filters only *mark* them. The
//! caller decides what to do with the final deletion set.
//!
//! ## Features
//!
//! - **`serde`** - Serialize tracks, markings, reports and method settings
//!
//! ## Quick Start
//!
//! ```rust
//! use track_compress::{CompressionMethod, MethodList, Track, TrackPoint};
//!
//! let mut track = Track::new();
//! for i in 0..20 {
//!     let point = TrackPoint::new(47.0, 8.0 + 0.0001 * i as f64).with_segment_start(i == 0);
//!     track.append_point(point);
//!     // Every point is recorded twice
//!     track.append_point(TrackPoint::new(47.0, 8.0 + 0.0001 * i as f64));
//! }
//!
//! let mut duplicates = CompressionMethod::duplicates();
//! duplicates.set_active(true);
//! let methods = MethodList::from(vec![duplicates]);
//!
//! let report = methods.preview(&track);
//! assert_eq!(report.total_deleted, 20);
//! assert_eq!(methods.to_settings_string(), "xDUP:");
//! ```

use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod geo_utils;

// Summary statistics and the shared marking state
pub mod details;
pub use details::TrackDetails;

pub mod marking;
pub use marking::MarkingData;

// Horizontal speed estimation used by the speed filters
pub mod speed;

// Filter family and settings codec
pub mod methods;
pub use methods::{CompressionMethod, CompressionMethodType, MethodKind};

pub mod error;
pub use error::ParseMethodError;

// Default parameter values and method pipeline
pub mod config;
pub use config::ParameterValues;

pub mod pipeline;
pub use pipeline::{CompressionReport, MethodList};

#[cfg(test)]
pub(crate) mod test_utils;

// ============================================================================
// Core Types
// ============================================================================

/// A single recorded point of a track.
///
/// # Example
/// ```
/// use track_compress::TrackPoint;
/// let point = TrackPoint::new(47.1, 8.0).with_altitude(1250.0).with_segment_start(true);
/// assert!(point.has_altitude());
/// assert!(!point.is_waypoint());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude in metres
    pub altitude: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
    /// Named points are waypoints rather than track points
    pub waypoint_name: Option<String>,
    /// Whether this point starts a new track segment
    pub segment_start: bool,
    /// Whether a photo or audio clip is attached to this point
    pub has_media: bool,
}

impl TrackPoint {
    /// Create a new track point with no altitude, timestamp or flags.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            timestamp: None,
            waypoint_name: None,
            segment_start: false,
            has_media: false,
        }
    }

    pub fn with_altitude(mut self, metres: f64) -> Self {
        self.altitude = Some(metres);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_segment_start(mut self, segment_start: bool) -> Self {
        self.segment_start = segment_start;
        self
    }

    pub fn with_waypoint_name(mut self, name: impl Into<String>) -> Self {
        self.waypoint_name = Some(name.into());
        self
    }

    pub fn with_media(mut self, has_media: bool) -> Self {
        self.has_media = has_media;
        self
    }

    pub fn is_waypoint(&self) -> bool {
        self.waypoint_name.is_some()
    }

    pub fn has_altitude(&self) -> bool {
        self.altitude.is_some()
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }

    /// Whole seconds elapsed from `earlier` to this point, if both have timestamps.
    pub fn seconds_since(&self, earlier: &TrackPoint) -> Option<i64> {
        match (self.timestamp, earlier.timestamp) {
            (Some(later), Some(earlier)) => Some((later - earlier).num_seconds()),
            _ => None,
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// An ordered sequence of track points and waypoints.
///
/// The compression filters only read from a track; deletion decisions are
/// recorded separately in [`MarkingData`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    points: Vec<TrackPoint>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<TrackPoint>) -> Self {
        Self { points }
    }

    pub fn append_point(&mut self, point: TrackPoint) {
        self.points.push(point);
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the point at the given index, or `None` if out of range.
    pub fn point(&self, index: usize) -> Option<&TrackPoint> {
        self.points.get(index)
    }

    /// Mutable access, used to adjust flags after construction.
    pub fn point_mut(&mut self, index: usize) -> Option<&mut TrackPoint> {
        self.points.get_mut(index)
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    /// Normalized Mercator x of the point at `index` (0.0 if out of range).
    pub fn x(&self, index: usize) -> f64 {
        self.point(index).map_or(0.0, |p| geo_utils::mercator_x(p.longitude))
    }

    /// Normalized Mercator y of the point at `index` (0.0 if out of range).
    pub fn y(&self, index: usize) -> f64 {
        self.point(index).map_or(0.0, |p| geo_utils::mercator_y(p.latitude))
    }

    /// Extent of the Mercator x values over all points, or 0.0 for an empty track.
    pub fn x_range(&self) -> f64 {
        value_range(self.points.iter().map(|p| geo_utils::mercator_x(p.longitude)))
    }

    /// Extent of the Mercator y values over all points, or 0.0 for an empty track.
    pub fn y_range(&self) -> f64 {
        value_range(self.points.iter().map(|p| geo_utils::mercator_y(p.latitude)))
    }
}

impl From<Vec<TrackPoint>> for Track {
    fn from(points: Vec<TrackPoint>) -> Self {
        Self::from_points(points)
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> f64 {
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if max >= min { max - min } else { 0.0 }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_point_flags() {
        let point = TrackPoint::new(1.0, 2.0);
        assert!(!point.is_waypoint());
        assert!(!point.has_altitude());
        assert!(!point.has_timestamp());
        assert!(point.with_waypoint_name("summit").is_waypoint());
    }

    #[test]
    fn test_track_point_validation() {
        assert!(TrackPoint::new(51.5074, -0.1278).is_valid());
        assert!(!TrackPoint::new(91.0, 0.0).is_valid());
        assert!(!TrackPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_seconds_since() {
        use chrono::TimeZone;
        let a = TrackPoint::new(1.0, 1.0).with_timestamp(Utc.timestamp_opt(1000, 0).unwrap());
        let b = TrackPoint::new(1.0, 1.0).with_timestamp(Utc.timestamp_opt(1045, 0).unwrap());
        assert_eq!(b.seconds_since(&a), Some(45));
        assert_eq!(a.seconds_since(&b), Some(-45));
        assert_eq!(a.seconds_since(&TrackPoint::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_empty_track_ranges() {
        let track = Track::new();
        assert_eq!(track.x_range(), 0.0);
        assert_eq!(track.y_range(), 0.0);
        assert!(track.point(0).is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_track_point() {
        use chrono::TimeZone;
        let point = TrackPoint::new(46.5, 7.5)
            .with_altitude(2000.0)
            .with_timestamp(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
            .with_waypoint_name("Hut");
        let json = serde_json::to_string(&point).unwrap();
        let back: TrackPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn test_track_ranges() {
        let track = Track::from(vec![TrackPoint::new(0.0, 0.0), TrackPoint::new(0.0, 36.0)]);
        assert!((track.x_range() - 0.1).abs() < 1e-12);
        assert!(track.y_range().abs() < 1e-12);
    }
}

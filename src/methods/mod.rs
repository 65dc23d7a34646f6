//! # Compression Methods
//!
//! The family of filters deciding which points of a track can be deleted.
//!
//! Every method shares one contract:
//!
//! - [`CompressionMethod::compress`] runs the algorithm against a
//!   [`TrackDetails`] summary and a shared [`MarkingData`], marks the points it
//!   wants gone and returns how many points it newly marked.
//! - [`CompressionMethod::preview`] does the same only for active methods,
//!   after projecting the summary through the current markings so that the
//!   method sees the effect of every method run before it.
//!
//! No method ever deletes a waypoint, a point with attached media, or a point
//! already marked by an earlier method.
//!
//! | Type | Key | Parameter | Algorithm |
//! |------|-----|-----------|-----------|
//! | [`Duplicates`](CompressionMethodType::Duplicates) | `DUP` | - | [`duplicates`] |
//! | [`NearbyWithFactor`](CompressionMethodType::NearbyWithFactor) | `NEF` | span factor | [`nearby`] |
//! | [`WackyPoints`](CompressionMethodType::WackyPoints) | `WAC` | spacing factor | [`wacky`] |
//! | [`Singletons`](CompressionMethodType::Singletons) | `SIN` | spacing factor | [`singletons`] |
//! | [`DouglasPeucker`](CompressionMethodType::DouglasPeucker) | `DPC` | span factor | [`douglas_peucker`] |
//! | [`NearbyWithDistance`](CompressionMethodType::NearbyWithDistance) | `NED` | metres | [`nearby`] |
//! | [`TooSlow`](CompressionMethodType::TooSlow) | `SLO` | km/h | [`speed_limit`] |
//! | [`TooFast`](CompressionMethodType::TooFast) | `FAS` | km/h | [`speed_limit`] |
//! | [`TimeDifference`](CompressionMethodType::TimeDifference) | `TSA` | seconds | [`too_soon`] |
//! | [`SkiLifts`](CompressionMethodType::SkiLifts) | `SKI` | - | [`ski_lifts`] |

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{MarkingData, Track, TrackDetails};

pub mod douglas_peucker;
pub mod duplicates;
pub mod nearby;
pub mod settings;
pub mod singletons;
pub mod ski_lifts;
pub mod speed_limit;
pub mod too_soon;
pub mod wacky;

pub use settings::{parse_double_or_zero, parse_int_or_zero};

// ============================================================================
// Method Types
// ============================================================================

/// The closed set of compression method kinds, each with a fixed settings key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CompressionMethodType {
    Duplicates,
    NearbyWithFactor,
    WackyPoints,
    Singletons,
    DouglasPeucker,
    NearbyWithDistance,
    TooSlow,
    TooFast,
    TimeDifference,
    SkiLifts,
}

impl CompressionMethodType {
    /// All types, in the order settings strings are matched against them.
    pub const ALL: [CompressionMethodType; 10] = [
        Self::Duplicates,
        Self::NearbyWithFactor,
        Self::WackyPoints,
        Self::Singletons,
        Self::DouglasPeucker,
        Self::NearbyWithDistance,
        Self::TooSlow,
        Self::TooFast,
        Self::TimeDifference,
        Self::SkiLifts,
    ];

    /// The three-letter key identifying this type in settings strings.
    pub fn key(self) -> &'static str {
        match self {
            Self::Duplicates => "DUP",
            Self::NearbyWithFactor => "NEF",
            Self::WackyPoints => "WAC",
            Self::Singletons => "SIN",
            Self::DouglasPeucker => "DPC",
            Self::NearbyWithDistance => "NED",
            Self::TooSlow => "SLO",
            Self::TooFast => "FAS",
            Self::TimeDifference => "TSA",
            Self::SkiLifts => "SKI",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}

// ============================================================================
// Methods
// ============================================================================

/// The algorithm of a method together with its typed parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MethodKind {
    Duplicates,
    /// Threshold is the track's angular size divided by `factor`
    NearbyWithFactor { factor: i32 },
    /// Threshold is `factor` times the mean point spacing
    WackyPoints { factor: f64 },
    /// Threshold is `factor` times the mean point spacing
    Singletons { factor: f64 },
    /// Threshold is the track span divided by `factor`
    DouglasPeucker { factor: i32 },
    NearbyWithDistance { metres: f64 },
    TooSlow { limit_kmh: f64 },
    TooFast { limit_kmh: f64 },
    TooSoon { seconds: i32 },
    SkiLifts,
}

impl MethodKind {
    pub fn method_type(&self) -> CompressionMethodType {
        match self {
            Self::Duplicates => CompressionMethodType::Duplicates,
            Self::NearbyWithFactor { .. } => CompressionMethodType::NearbyWithFactor,
            Self::WackyPoints { .. } => CompressionMethodType::WackyPoints,
            Self::Singletons { .. } => CompressionMethodType::Singletons,
            Self::DouglasPeucker { .. } => CompressionMethodType::DouglasPeucker,
            Self::NearbyWithDistance { .. } => CompressionMethodType::NearbyWithDistance,
            Self::TooSlow { .. } => CompressionMethodType::TooSlow,
            Self::TooFast { .. } => CompressionMethodType::TooFast,
            Self::TooSoon { .. } => CompressionMethodType::TimeDifference,
            Self::SkiLifts => CompressionMethodType::SkiLifts,
        }
    }
}

/// A configured compression filter, active or not.
///
/// Methods are created inactive.
///
/// # Example
/// ```
/// use track_compress::{CompressionMethod, CompressionMethodType};
///
/// let mut method = CompressionMethod::douglas_peucker(2000);
/// assert!(!method.is_active());
/// method.set_active(true);
/// assert_eq!(method.method_type(), CompressionMethodType::DouglasPeucker);
/// assert_eq!(method.to_settings_string(), "xDPC:2000");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionMethod {
    active: bool,
    kind: MethodKind,
}

impl CompressionMethod {
    /// Create an inactive method of the given kind.
    pub fn new(kind: MethodKind) -> Self {
        Self { active: false, kind }
    }

    pub fn duplicates() -> Self {
        Self::new(MethodKind::Duplicates)
    }

    pub fn nearby_with_factor(factor: i32) -> Self {
        Self::new(MethodKind::NearbyWithFactor { factor })
    }

    pub fn wacky_points(factor: f64) -> Self {
        Self::new(MethodKind::WackyPoints { factor })
    }

    pub fn singletons(factor: f64) -> Self {
        Self::new(MethodKind::Singletons { factor })
    }

    pub fn douglas_peucker(factor: i32) -> Self {
        Self::new(MethodKind::DouglasPeucker { factor })
    }

    pub fn nearby_with_distance(metres: f64) -> Self {
        Self::new(MethodKind::NearbyWithDistance { metres })
    }

    pub fn too_slow(limit_kmh: f64) -> Self {
        Self::new(MethodKind::TooSlow { limit_kmh })
    }

    pub fn too_fast(limit_kmh: f64) -> Self {
        Self::new(MethodKind::TooFast { limit_kmh })
    }

    pub fn too_soon(seconds: i32) -> Self {
        Self::new(MethodKind::TooSoon { seconds })
    }

    pub fn ski_lifts() -> Self {
        Self::new(MethodKind::SkiLifts)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn kind(&self) -> &MethodKind {
        &self.kind
    }

    pub fn method_type(&self) -> CompressionMethodType {
        self.kind.method_type()
    }

    /// Preview the method by marking the points it would delete.
    ///
    /// Inactive methods do nothing and return 0. Active methods first project
    /// `details` through the existing markings, then compress.
    pub fn preview(&self, track: &Track, details: &TrackDetails, markings: &mut MarkingData) -> usize {
        if !self.active {
            return 0;
        }
        let modified = details.modify_using_markings(markings);
        self.compress(track, &modified, markings)
    }

    /// Run the algorithm regardless of the active flag.
    ///
    /// Returns the number of points newly marked for deletion.
    pub fn compress(&self, track: &Track, details: &TrackDetails, markings: &mut MarkingData) -> usize {
        let num_deleted = match self.kind {
            MethodKind::Duplicates => duplicates::compress(track, details, markings),
            MethodKind::NearbyWithFactor { factor } => {
                nearby::compress(track, details, markings, nearby::factor_threshold(details, factor))
            }
            MethodKind::WackyPoints { factor } => wacky::compress(track, details, markings, factor),
            MethodKind::Singletons { factor } => singletons::compress(track, details, markings, factor),
            MethodKind::DouglasPeucker { factor } => douglas_peucker::compress(track, details, markings, factor),
            MethodKind::NearbyWithDistance { metres } => {
                nearby::compress(track, details, markings, nearby::distance_threshold(metres))
            }
            MethodKind::TooSlow { limit_kmh } => {
                speed_limit::compress(track, details, markings, speed_limit::Limit::Minimum(limit_kmh))
            }
            MethodKind::TooFast { limit_kmh } => {
                speed_limit::compress(track, details, markings, speed_limit::Limit::Maximum(limit_kmh))
            }
            MethodKind::TooSoon { seconds } => too_soon::compress(track, details, markings, seconds),
            MethodKind::SkiLifts => ski_lifts::compress(track, markings),
        };
        debug!(
            "[Compress] {} deleted {} points ({} of {} now marked)",
            self.method_type().key(),
            num_deleted,
            markings.num_deleted(),
            track.num_points()
        );
        num_deleted
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Check whether a point is at a segment boundary.
///
/// A point is a boundary if the summary says so, or if walking back over
/// deleted points reaches one marked with a segment break, or if there is no
/// earlier surviving track point at all.
pub fn is_point_at_segment_boundary(index: usize, details: &TrackDetails, markings: &MarkingData) -> bool {
    if details.is_segment_start(index) || details.is_segment_end(index) {
        return true;
    }
    for i in (0..index).rev() {
        if markings.is_deleted(i) {
            if markings.is_segment_break(i) {
                return true;
            }
        } else if !details.is_waypoint(i) {
            // Found a surviving track point before this one
            return false;
        }
    }
    true
}

/// Index of the nearest surviving track point before `index`.
pub(crate) fn previous_track_point(track: &Track, index: usize, markings: &MarkingData) -> Option<usize> {
    (0..index)
        .rev()
        .find(|&i| is_surviving_track_point(track, i, markings))
}

/// Index of the nearest surviving track point after `index`.
pub(crate) fn next_track_point(track: &Track, index: usize, markings: &MarkingData) -> Option<usize> {
    ((index + 1)..track.num_points()).find(|&i| is_surviving_track_point(track, i, markings))
}

fn is_surviving_track_point(track: &Track, index: usize, markings: &MarkingData) -> bool {
    track
        .point(index)
        .is_some_and(|p| !p.is_waypoint() && !markings.is_deleted(index))
}

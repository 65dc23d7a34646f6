//! Removal of points recorded too slowly or too fast.
//!
//! Speeds and deletions are decided for every point before any point is
//! marked, so the decision for one point never depends on another point's
//! deletion within the same run. Each deleted point leaves a segment break behind, since the
//! track around it can no longer be trusted to be continuous.

use crate::methods::is_point_at_segment_boundary;
use crate::speed::calculate_speeds;
use crate::{MarkingData, Track, TrackDetails};

/// A speed limit in km/h.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Limit {
    /// Delete points slower than this
    Minimum(f64),
    /// Delete points faster than this
    Maximum(f64),
}

impl Limit {
    fn kmh(self) -> f64 {
        match self {
            Limit::Minimum(kmh) | Limit::Maximum(kmh) => kmh,
        }
    }

    fn is_violated_by(self, speed_kmh: f64) -> bool {
        match self {
            Limit::Minimum(kmh) => speed_kmh < kmh,
            Limit::Maximum(kmh) => speed_kmh > kmh,
        }
    }
}

pub fn compress(track: &Track, details: &TrackDetails, markings: &mut MarkingData, limit: Limit) -> usize {
    if !(limit.kmh() > 0.0) {
        return 0;
    }
    let num_already_deleted = markings.num_deleted();
    let speeds = calculate_speeds(track, details, markings);

    // Boundaries are judged against the markings on entry, not this run's breaks
    let delete_flags: Vec<bool> = track
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| {
            !markings.is_deleted(i)
                && !point.is_waypoint()
                && !point.has_media
                && !is_point_at_segment_boundary(i, details, markings)
                && speeds[i].is_some_and(|speed| limit.is_violated_by(speed))
        })
        .collect();
    markings.mark_points_with_breaks(&delete_flags, &delete_flags);

    markings.num_deleted() - num_already_deleted
}

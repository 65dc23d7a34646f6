//! Removal of points too close to the previous kept point.
//!
//! The walk keeps track of the last surviving track point. A candidate closer
//! than the threshold to it is deleted, otherwise it becomes the new last kept
//! point. Only the previous kept point is compared, never the next one.
//!
//! Two strategies produce the threshold: a fraction of the track's angular
//! size ([`factor_threshold`]) or a fixed distance ([`distance_threshold`]).

use crate::geo_utils::{metres_to_radians, radians_between};
use crate::methods::is_point_at_segment_boundary;
use crate::{MarkingData, Track, TrackDetails};

/// Threshold of `1/factor` of the track's maximum angular size.
///
/// Returns 0.0 (disabled) unless the factor is greater than 1.
pub fn factor_threshold(details: &TrackDetails, factor: i32) -> f64 {
    if factor <= 1 {
        return 0.0;
    }
    details.max_radians() / factor as f64
}

/// Threshold of a fixed distance in metres.
pub fn distance_threshold(metres: f64) -> f64 {
    metres_to_radians(metres)
}

/// Delete points closer than `threshold_radians` to the last kept point.
pub fn compress(
    track: &Track,
    details: &TrackDetails,
    markings: &mut MarkingData,
    threshold_radians: f64,
) -> usize {
    if !(threshold_radians > 0.0) {
        return 0;
    }
    let num_already_deleted = markings.num_deleted();
    let mut last_kept: Option<usize> = None;

    for (i, point) in track.points().iter().enumerate() {
        if markings.is_deleted(i) || point.is_waypoint() {
            continue;
        }
        let is_candidate = !point.has_media && !is_point_at_segment_boundary(i, details, markings);
        if let Some(kept) = last_kept.filter(|_| is_candidate) {
            if radians_between(&track.points()[kept], point) < threshold_radians {
                markings.mark_for_deletion(i);
                continue;
            }
        }
        last_kept = Some(i);
    }

    markings.num_deleted() - num_already_deleted
}

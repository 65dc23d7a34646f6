//! Removal of points recorded too soon after the previous kept point.
//!
//! Thins out tracks logged at a higher rate than needed. Points without a
//! timestamp are neither deleted nor used as a reference.

use crate::methods::is_point_at_segment_boundary;
use crate::{MarkingData, Track, TrackDetails};

pub fn compress(track: &Track, details: &TrackDetails, markings: &mut MarkingData, seconds: i32) -> usize {
    if seconds <= 0 {
        return 0;
    }
    let min_seconds = i64::from(seconds);
    let num_already_deleted = markings.num_deleted();
    let mut last_kept: Option<usize> = None;

    for (i, point) in track.points().iter().enumerate() {
        if markings.is_deleted(i) || point.is_waypoint() || !point.has_timestamp() {
            continue;
        }
        let is_candidate = !point.has_media && !is_point_at_segment_boundary(i, details, markings);
        if is_candidate {
            let elapsed = last_kept.and_then(|kept| point.seconds_since(&track.points()[kept]));
            // Out-of-order timestamps are left alone
            if elapsed.is_some_and(|s| (0..min_seconds).contains(&s)) {
                markings.mark_for_deletion(i);
                continue;
            }
        }
        last_kept = Some(i);
    }

    markings.num_deleted() - num_already_deleted
}

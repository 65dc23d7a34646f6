//! Removal of uphill ski-lift rides.
//!
//! A lift ride shows up as a straight, steadily climbing stretch of track. From
//! each timestamped point the filter looks forward [`SECONDS_TO_LOOK_FORWARD`]
//! seconds; if that window looks like a lift, the whole window is deleted with
//! segment breaks, merged with the previous window when the two join up.
//!
//! Unlike the other filters this one doesn't consult the track summary, and
//! earlier deletions don't affect which windows count as lifts. Points deleted
//! before keep their flags as they were.

use crate::geo_utils::radians_between;
use crate::{MarkingData, Track};

/// How far ahead of each point to look for a lift.
pub const SECONDS_TO_LOOK_FORWARD: i64 = 120;
/// A lift may lose less than this many metres in total.
const ALLOWED_METRES_DOWNHILL: i64 = 20;
/// A lift must climb more than this many times its descent.
const MINIMUM_ASCENT_FACTOR: i64 = 10;
/// Ratio of path length to direct distance below which a range is straight.
const STRAIGHTNESS_FACTOR: f64 = 1.02;

pub fn compress(track: &Track, markings: &mut MarkingData) -> usize {
    let num_points = track.num_points();
    let num_already_deleted = markings.num_deleted();
    let mut previous_start: Option<usize> = None;

    let mut i = 0;
    while i < num_points {
        if let Some(end) = window_end(track, i) {
            if looks_like_lift(track, Some(i), end) {
                let start = match previous_start {
                    Some(prev) if looks_like_lift(track, Some(prev), i) || looks_like_lift(track, Some(prev), end) => {
                        prev
                    }
                    _ => i,
                };
                for j in start..=end {
                    if !markings.is_deleted(j) {
                        markings.mark_for_deletion_with_break(j);
                    }
                }
                previous_start = Some(start);
                // The first half of this window has been checked already
                i = (i + end) / 2;
            }
        }
        i += 1;
    }

    markings.num_deleted() - num_already_deleted
}

/// Index one past the run of usable points within the look-ahead window.
///
/// `None` if the point at `index` has no timestamp to measure from.
fn window_end(track: &Track, index: usize) -> Option<usize> {
    let current = track.point(index).filter(|p| p.has_timestamp())?;
    let mut end = index + 1;
    while let Some(point) = track.point(end) {
        let in_window = point.has_altitude()
            && !point.is_waypoint()
            && point
                .seconds_since(current)
                .is_some_and(|s| s < SECONDS_TO_LOOK_FORWARD);
        if !in_window {
            break;
        }
        end += 1;
    }
    Some(end)
}

/// Whether the points from `start` to `end` inclusive climb steadily in a straight line.
fn looks_like_lift(track: &Track, start: Option<usize>, end: usize) -> bool {
    let Some(start) = start else {
        return false;
    };
    if end <= start {
        return false;
    }
    let Some(points) = track.points().get(start..=end) else {
        return false;
    };
    if points
        .iter()
        .any(|p| p.is_waypoint() || p.has_media || !p.has_timestamp())
    {
        return false;
    }
    let Some(altitudes) = points
        .iter()
        .map(|p| p.altitude.map(|a| a as i64))
        .collect::<Option<Vec<i64>>>()
    else {
        return false;
    };

    let (mut climb, mut descent) = (0i64, 0i64);
    for pair in altitudes.windows(2) {
        let diff = pair[1] - pair[0];
        if diff > 0 {
            climb += diff;
        } else {
            descent -= diff;
        }
    }
    if descent >= ALLOWED_METRES_DOWNHILL || climb <= descent * MINIMUM_ASCENT_FACTOR {
        return false;
    }

    let path_radians: f64 = points.windows(2).map(|pair| radians_between(&pair[0], &pair[1])).sum();
    let direct_radians = radians_between(&points[0], &points[points.len() - 1]);
    direct_radians > 0.0 && path_radians / direct_radians < STRAIGHTNESS_FACTOR
}

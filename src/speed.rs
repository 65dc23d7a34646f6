//! Horizontal speed estimation from timestamps and distances.
//!
//! The speed at a point is the distance travelled between its nearest
//! neighbours (at least one second away in time, in each direction) divided by
//! the elapsed time. Points already marked for deletion are skipped, so a
//! pipeline sees speeds as if those points had been removed.

use crate::geo_utils::{radians_between, radians_to_metres};
use crate::{MarkingData, Track, TrackDetails, TrackPoint};

/// Neighbours closer than this in time don't end the search.
const MIN_TIME_DIFFERENCE_MS: i64 = 1000;

/// Calculate the horizontal speed in km/h of every point.
///
/// Entries are `None` where no speed can be calculated: waypoints, points
/// without timestamps, deleted points, and points with no usable neighbours.
pub fn calculate_speeds(track: &Track, details: &TrackDetails, markings: &MarkingData) -> Vec<Option<f64>> {
    (0..track.num_points())
        .map(|i| calculate_speed(track, details, markings, i))
        .collect()
}

/// Calculate the horizontal speed in km/h at a single index.
pub fn calculate_speed(track: &Track, details: &TrackDetails, markings: &MarkingData, index: usize) -> Option<f64> {
    let point = track.point(index)?;
    let timestamp = point.timestamp?;
    if point.is_waypoint() || markings.is_deleted(index) {
        return None;
    }

    let mut total_radians = 0.0;
    let mut early_stamp = timestamp;
    let mut late_stamp = timestamp;

    // Count backwards to a timestamp earlier than this one
    if !details.is_segment_start(index) {
        let mut q = point;
        for i in (0..index).rev() {
            let Some(p) = usable_neighbour(track, markings, i) else {
                continue;
            };
            if let Some(t) = p.timestamp.filter(|t| *t < timestamp) {
                total_radians += radians_between(p, q);
                early_stamp = t;
            }
            q = p;
            if details.is_segment_start(i) || sufficient_time_difference(p, point) {
                break;
            }
        }
    }

    // Count forwards to a timestamp later than this one
    let mut q = point;
    for i in (index + 1)..track.num_points() {
        let Some(p) = usable_neighbour(track, markings, i) else {
            continue;
        };
        if details.is_segment_start(i) {
            break;
        }
        if let Some(t) = p.timestamp.filter(|t| *t >= timestamp) {
            total_radians += radians_between(p, q);
            late_stamp = t;
        }
        q = p;
        if sufficient_time_difference(point, p) {
            break;
        }
    }

    let milliseconds = (late_stamp - early_stamp).num_milliseconds();
    if milliseconds < MIN_TIME_DIFFERENCE_MS {
        return None;
    }
    let metres = radians_to_metres(total_radians);
    Some(metres / milliseconds as f64 * 1000.0 * 3.6)
}

/// The point at `index` if it is a track point that hasn't been deleted.
fn usable_neighbour<'a>(track: &'a Track, markings: &MarkingData, index: usize) -> Option<&'a TrackPoint> {
    track
        .point(index)
        .filter(|p| !p.is_waypoint() && !markings.is_deleted(index))
}

fn sufficient_time_difference(earlier: &TrackPoint, later: &TrackPoint) -> bool {
    match (earlier.timestamp, later.timestamp) {
        (Some(e), Some(l)) => (l - e).num_milliseconds() >= MIN_TIME_DIFFERENCE_MS,
        _ => false,
    }
}

//! Douglas-Peucker line simplification.
//!
//! Each run of surviving track points between segment starts is simplified
//! independently in normalized Mercator coordinates. A point survives if it
//! lies further than `span / factor` from the chord it would be dropped from.
//! A chord of zero length (a run ending where it started) is split at the
//! point furthest from the start instead, and that point is kept.
//!
//! The recursion is driven by an explicit work stack, so long tracks cannot
//! exhaust the call stack.

use crate::geo_utils::radians_between;
use crate::{MarkingData, Track, TrackDetails};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keep {
    /// Deleted already, or a waypoint: not part of any line
    Excluded,
    Unknown,
    Kept,
}

pub fn compress(track: &Track, details: &TrackDetails, markings: &mut MarkingData, factor: i32) -> usize {
    let factor = if factor <= 0 { 1 } else { factor };
    let threshold = details.track_span() / factor as f64;
    let num_already_deleted = markings.num_deleted();

    let mut keep: Vec<Keep> = track
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if markings.is_deleted(i) || p.is_waypoint() {
                Keep::Excluded
            } else if p.has_media {
                Keep::Kept
            } else {
                Keep::Unknown
            }
        })
        .collect();

    // Collect the runs of track points between segment starts
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut run_start: Option<usize> = None;
    let mut prev_track_point: Option<usize> = None;
    for i in 0..track.num_points() {
        if keep[i] == Keep::Excluded {
            continue;
        }
        if details.is_segment_start(i) {
            if let (Some(start), Some(prev)) = (run_start, prev_track_point) {
                runs.push((start, prev));
            }
            run_start = Some(i);
        } else if run_start.is_none() {
            run_start = Some(i);
        }
        prev_track_point = Some(i);
    }
    if let (Some(start), Some(prev)) = (run_start, prev_track_point) {
        runs.push((start, prev));
    }

    let mut stack: Vec<(usize, usize)> = Vec::with_capacity(runs.len());
    for &(start, end) in &runs {
        keep[start] = Keep::Kept;
        keep[end] = Keep::Kept;
        stack.push((start, end));
    }

    while let Some((start, end)) = stack.pop() {
        if end < start + 2 {
            continue;
        }
        if track.x(start) == track.x(end) && track.y(start) == track.y(end) {
            if let Some(index) = furthest_from_start(track, &keep, start, end) {
                keep[index] = Keep::Kept;
                stack.push((start, index));
                stack.push((index, end));
            }
            continue;
        }
        if let Some((index, distance)) = furthest_from_chord(track, &keep, start, end) {
            if distance > threshold {
                keep[index] = Keep::Kept;
                stack.push((start, index));
                stack.push((index, end));
            }
        }
    }

    for (i, k) in keep.iter().enumerate() {
        if *k == Keep::Unknown {
            markings.mark_for_deletion(i);
        }
    }

    markings.num_deleted() - num_already_deleted
}

/// The undecided point between `start` and `end` angularly furthest from `start`.
///
/// `None` if every such point coincides with the start.
fn furthest_from_start(track: &Track, keep: &[Keep], start: usize, end: usize) -> Option<usize> {
    let origin = &track.points()[start];
    let mut furthest: Option<(usize, f64)> = None;
    for i in (start + 1)..end {
        if keep[i] != Keep::Unknown {
            continue;
        }
        let distance = radians_between(origin, &track.points()[i]);
        if distance > furthest.map_or(0.0, |(_, d)| d) {
            furthest = Some((i, distance));
        }
    }
    furthest.map(|(i, _)| i)
}

/// The undecided point between `start` and `end` furthest from their chord.
fn furthest_from_chord(track: &Track, keep: &[Keep], start: usize, end: usize) -> Option<(usize, f64)> {
    let (ax, ay) = (track.x(start), track.y(start));
    let (bx, by) = (track.x(end), track.y(end));
    let (abx, aby) = (bx - ax, by - ay);
    let chord_squared = abx * abx + aby * aby;

    let mut furthest: Option<(usize, f64)> = None;
    for i in (start + 1)..end {
        if keep[i] != Keep::Unknown {
            continue;
        }
        let (px, py) = (track.x(i), track.y(i));
        let (cx, cy) = (px - ax, py - ay);
        // Position along the chord, 0 at the start and 1 at the end
        let t = if chord_squared > 0.0 {
            (abx * cx + aby * cy) / chord_squared
        } else {
            -1.0
        };
        let distance = if t < 0.0 {
            cx.hypot(cy)
        } else if t > 1.0 {
            (px - bx).hypot(py - by)
        } else {
            (abx * cy - aby * cx).abs() / chord_squared.sqrt()
        };
        if furthest.map_or(true, |(_, d)| distance > d) {
            furthest = Some((i, distance));
        }
    }
    furthest
}

//! Summary statistics of a track, as consulted by the compression filters.
//!
//! A [`TrackDetails`] is computed once from the raw track. Before each filter
//! of a pipeline runs, the summary is *projected* with
//! [`TrackDetails::modify_using_markings`] so that points deleted by earlier
//! filters, and the segment breaks they left behind, are taken into account
//! without touching the track itself.

use crate::geo_utils::radians_between;
use crate::{MarkingData, Track, TrackPoint};

/// Derived, read-only statistics over a track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackDetails {
    /// Larger of the Mercator x and y extents
    span: f64,
    /// Approximate angular size of the track between its extreme points
    max_radians: f64,
    /// Mean angular distance between consecutive points of the same segment
    mean_radians: f64,
    segment_starts: Vec<bool>,
    segment_ends: Vec<bool>,
    waypoints: Vec<bool>,
}

impl TrackDetails {
    /// Scan the track once and collect its statistics.
    ///
    /// The first track point always starts a segment, even without its
    /// segment-start flag, and the last track point of each segment ends it.
    pub fn new(track: &Track) -> Self {
        let num_points = track.num_points();
        let mut segment_starts = vec![false; num_points];
        let mut segment_ends = vec![false; num_points];
        let mut waypoints = vec![false; num_points];

        let mut prev_track_point: Option<usize> = None;
        let mut num_distances = 0usize;
        let mut total_radians = 0.0;

        for (i, point) in track.points().iter().enumerate() {
            if point.is_waypoint() {
                waypoints[i] = true;
                continue;
            }
            match prev_track_point {
                None => segment_starts[i] = true,
                Some(prev) if point.segment_start => {
                    segment_starts[i] = true;
                    segment_ends[prev] = true;
                }
                Some(prev) => {
                    num_distances += 1;
                    total_radians += radians_between(&track.points()[prev], point);
                }
            }
            prev_track_point = Some(i);
        }
        if let Some(last) = prev_track_point {
            segment_ends[last] = true;
        }

        let mean_radians = if num_distances > 0 {
            total_radians / num_distances as f64
        } else {
            0.0
        };

        Self {
            span: track.x_range().max(track.y_range()),
            max_radians: calculate_max_radians(track),
            mean_radians,
            segment_starts,
            segment_ends,
            waypoints,
        }
    }

    /// The larger of the Mercator x and y extents of the track.
    pub fn track_span(&self) -> f64 {
        self.span
    }

    /// The approximate maximum angular distance across the track.
    pub fn max_radians(&self) -> f64 {
        self.max_radians
    }

    /// The mean angular distance between adjacent track points.
    pub fn mean_radians(&self) -> f64 {
        self.mean_radians
    }

    pub fn num_points(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the point starts a segment; `false` for out-of-range indices.
    pub fn is_segment_start(&self, index: usize) -> bool {
        self.segment_starts.get(index).copied().unwrap_or(false)
    }

    /// Whether the point ends a segment; `false` for out-of-range indices.
    pub fn is_segment_end(&self, index: usize) -> bool {
        self.segment_ends.get(index).copied().unwrap_or(false)
    }

    /// Whether the point is a waypoint; `false` for out-of-range indices.
    pub fn is_waypoint(&self, index: usize) -> bool {
        self.waypoints.get(index).copied().unwrap_or(false)
    }

    /// Project this summary through the given markings.
    ///
    /// The returned summary keeps every existing boundary and adds new ones
    /// where deletions have created them: when a deleted point was a segment
    /// start or was marked with a segment break, the next surviving track
    /// point starts a new segment and the surviving point before it ends the
    /// previous one. The last surviving track point always ends a segment.
    ///
    /// Statistics (span, max and mean radians) are carried over unchanged.
    pub fn modify_using_markings(&self, markings: &MarkingData) -> TrackDetails {
        let mut modified = self.clone();
        let mut prev_track_point: Option<usize> = None;
        let mut set_next_segment = false;

        for i in 0..self.num_points() {
            if self.waypoints[i] {
                continue;
            }
            if markings.is_deleted(i) {
                set_next_segment = set_next_segment
                    || self.segment_starts[i]
                    || markings.is_segment_break(i);
                continue;
            }
            if set_next_segment || prev_track_point.is_none() {
                modified.segment_starts[i] = true;
                if let Some(prev) = prev_track_point {
                    modified.segment_ends[prev] = true;
                }
                set_next_segment = false;
            }
            prev_track_point = Some(i);
        }
        if let Some(last) = prev_track_point {
            modified.segment_ends[last] = true;
        }
        modified
    }
}

/// The larger of the north-south and east-west angular extents.
fn calculate_max_radians(track: &Track) -> f64 {
    let mut northern: Option<&TrackPoint> = None;
    let mut southern: Option<&TrackPoint> = None;
    let mut western: Option<&TrackPoint> = None;
    let mut eastern: Option<&TrackPoint> = None;

    for p in track.points().iter().filter(|p| !p.is_waypoint()) {
        if northern.map_or(true, |n| n.latitude < p.latitude) {
            northern = Some(p);
        }
        if southern.map_or(true, |s| s.latitude > p.latitude) {
            southern = Some(p);
        }
        if western.map_or(true, |w| w.longitude > p.longitude) {
            western = Some(p);
        }
        if eastern.map_or(true, |e| e.longitude < p.longitude) {
            eastern = Some(p);
        }
    }

    match (northern, southern, eastern, western) {
        (Some(n), Some(s), Some(e), Some(w)) => radians_between(n, s).max(radians_between(e, w)),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_track(num_points: usize) -> Track {
        (0..num_points)
            .map(|i| TrackPoint::new(1.0, 1.0 + 0.01 * i as f64))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_empty_track() {
        let details = TrackDetails::new(&Track::new());
        assert_eq!(details.track_span(), 0.0);
        assert_eq!(details.max_radians(), 0.0);
        assert_eq!(details.mean_radians(), 0.0);
        assert!(!details.is_segment_start(0));
        assert!(!details.is_segment_end(0));
        assert!(!details.is_waypoint(0));
    }

    #[test]
    fn test_first_and_last_are_boundaries() {
        let details = TrackDetails::new(&straight_track(5));
        assert!(details.is_segment_start(0));
        assert!(details.is_segment_end(4));
        for i in 1..4 {
            assert!(!details.is_segment_start(i));
            assert!(!details.is_segment_end(i));
        }
        // Out of range is never a boundary
        assert!(!details.is_segment_start(5));
        assert!(!details.is_segment_end(99));
    }

    #[test]
    fn test_segments_and_waypoints() {
        let mut track = straight_track(6);
        track.point_mut(3).unwrap().segment_start = true;
        track.append_point(TrackPoint::new(1.5, 1.5).with_waypoint_name("hut"));
        let details = TrackDetails::new(&track);

        assert!(details.is_segment_end(2));
        assert!(details.is_segment_start(3));
        assert!(details.is_segment_end(5));
        assert!(details.is_waypoint(6));
        assert!(!details.is_segment_end(6));
    }

    #[test]
    fn test_mean_ignores_segment_gaps() {
        let mut track = straight_track(4);
        // Far away second segment, joined by a huge gap
        track.append_point(TrackPoint::new(10.0, 10.0).with_segment_start(true));
        track.append_point(TrackPoint::new(10.0, 10.01));
        let details = TrackDetails::new(&track);

        let step = radians_between(&TrackPoint::new(1.0, 1.0), &TrackPoint::new(1.0, 1.01));
        assert!((details.mean_radians() - step).abs() < step * 0.01);
    }

    #[test]
    fn test_span_and_max_radians() {
        let details = TrackDetails::new(&straight_track(11));
        // 0.1 degrees of longitude out of 360
        assert!((details.track_span() - 0.1 / 360.0).abs() < 1e-12);
        let expected = radians_between(&TrackPoint::new(1.0, 1.0), &TrackPoint::new(1.0, 1.1));
        assert!((details.max_radians() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_projection_with_segment_break() {
        let track = straight_track(8);
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(track.num_points());
        markings.mark_for_deletion_with_break(3);
        markings.mark_for_deletion_with_break(4);

        let modified = details.modify_using_markings(&markings);
        assert!(modified.is_segment_end(2));
        assert!(modified.is_segment_start(5));
        assert!(modified.is_segment_start(0));
        assert!(modified.is_segment_end(7));

        // The source summary is untouched
        assert!(!details.is_segment_end(2));
        assert!(!details.is_segment_start(5));
    }

    #[test]
    fn test_projection_without_break() {
        let track = straight_track(8);
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(track.num_points());
        markings.mark_for_deletion(3);

        let modified = details.modify_using_markings(&markings);
        assert!(!modified.is_segment_end(2));
        assert!(!modified.is_segment_start(4));
    }

    #[test]
    fn test_projection_deleted_segment_start() {
        let track = straight_track(6);
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(track.num_points());
        markings.mark_for_deletion(0);
        markings.mark_for_deletion(5);

        let modified = details.modify_using_markings(&markings);
        assert!(modified.is_segment_start(1));
        assert!(modified.is_segment_end(4));
    }
}

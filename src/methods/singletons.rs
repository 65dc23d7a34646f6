//! Removal of isolated single-point segments.
//!
//! A singleton is a track point which both starts and ends its own segment.
//! It is deleted when it lies far from the surviving track points on both
//! sides, "far" meaning more than `factor` times the mean point spacing.

use crate::geo_utils::radians_between;
use crate::methods::{next_track_point, previous_track_point};
use crate::{MarkingData, Track, TrackDetails};

pub fn compress(track: &Track, details: &TrackDetails, markings: &mut MarkingData, factor: f64) -> usize {
    let threshold = factor * details.mean_radians();
    if !(threshold > 0.0) {
        return 0;
    }
    let num_already_deleted = markings.num_deleted();

    for (i, point) in track.points().iter().enumerate() {
        if markings.is_deleted(i)
            || point.is_waypoint()
            || point.has_media
            || !details.is_segment_start(i)
            || !details.is_segment_end(i)
        {
            continue;
        }
        // A missing neighbour counts as far away
        let is_far = |neighbour: Option<usize>| {
            neighbour.map_or(true, |n| radians_between(&track.points()[n], point) > threshold)
        };
        if is_far(previous_track_point(track, i, markings)) && is_far(next_track_point(track, i, markings)) {
            markings.mark_for_deletion(i);
        }
    }

    markings.num_deleted() - num_already_deleted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{step, straight_track};
    use crate::TrackPoint;

    #[test]
    fn test_delete_one_singleton_at_end() {
        let mut track = straight_track(14);
        track.append_point(TrackPoint::new(1.2, 1.2).with_segment_start(true));
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(track.num_points());

        // No threshold, nothing to compare against
        assert_eq!(compress(&track, &details, &mut markings, 0.0), 0);
        assert_eq!(compress(&track, &details, &mut markings, 0.001), 1);
        for i in 0..15 {
            assert_eq!(markings.is_deleted(i), i == 14, "point {i}");
            assert!(!markings.is_segment_break(i));
        }
    }

    #[test]
    fn test_delete_one_of_two_singletons() {
        let mut track = Track::new();
        for i in 0..14 {
            let point = TrackPoint::new(1.0, 1.0 + 0.01 * i as f64).with_segment_start(i == 0 || i == 7);
            track.append_point(point.clone());
            if i == 6 {
                // One singleton close by, one far away
                track.append_point(step(&point, 20.0, 40.0).with_segment_start(true));
                track.append_point(step(&point, 30.0, 400.0).with_segment_start(true));
            }
        }
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(track.num_points());

        assert_eq!(compress(&track, &details, &mut markings, 0.1), 1);
        for i in 0..16 {
            assert_eq!(markings.is_deleted(i), i == 8, "point {i}");
            assert!(!markings.is_segment_break(i));
        }
    }

    #[test]
    fn test_waypoints_and_media_kept() {
        let mut track = straight_track(6);
        track.append_point(TrackPoint::new(5.0, 5.0).with_segment_start(true).with_media(true));
        track.append_point(TrackPoint::new(6.0, 6.0).with_waypoint_name("summit"));
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(track.num_points());

        assert_eq!(compress(&track, &details, &mut markings, 0.5), 0);
    }

    #[test]
    fn test_singleton_created_by_earlier_breaks() {
        let track = straight_track(11);
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(11);
        // Point 5 is left alone between two deleted stretches
        for i in [2, 3, 4, 6, 7, 8] {
            markings.mark_for_deletion_with_break(i);
        }
        let projected = details.modify_using_markings(&markings);
        assert!(projected.is_segment_start(5) && projected.is_segment_end(5));

        // Neighbours 1 and 9 are 4 spacings away, so a factor of 3 finds it
        assert_eq!(compress(&track, &projected, &mut markings, 3.0), 1);
        assert!(markings.is_deleted(5));
        // Not isolated in the raw summary
        let mut fresh = MarkingData::new(11);
        assert_eq!(compress(&track, &details, &mut fresh, 3.0), 0);
    }
}

//! Exact duplicate removal.
//!
//! A point is a duplicate if one of the previous [`LOOK_BACK_POINTS`]
//! surviving track points has exactly the same coordinates. Segment starts are
//! kept even when duplicated, segment ends are not.

use crate::{MarkingData, Track, TrackDetails, TrackPoint};

/// How many surviving points to look back over for a duplicate.
pub const LOOK_BACK_POINTS: usize = 20;

pub fn compress(track: &Track, details: &TrackDetails, markings: &mut MarkingData) -> usize {
    let num_already_deleted = markings.num_deleted();

    for (i, point) in track.points().iter().enumerate() {
        if markings.is_deleted(i)
            || point.is_waypoint()
            || point.has_media
            || details.is_segment_start(i)
        {
            continue;
        }
        let is_duplicate = (0..i)
            .rev()
            .filter(|&j| !markings.is_deleted(j))
            .filter_map(|j| track.point(j))
            .filter(|p| !p.is_waypoint())
            .take(LOOK_BACK_POINTS)
            .any(|p| same_position(p, point));
        if is_duplicate {
            markings.mark_for_deletion(i);
        }
    }

    markings.num_deleted() - num_already_deleted
}

fn same_position(a: &TrackPoint, b: &TrackPoint) -> bool {
    a.latitude == b.latitude && a.longitude == b.longitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_one_of_two_duplicates() {
        let mut track = Track::new();
        for i in 0..14 {
            let longitude = 1.0 + 0.01 * i as f64;
            track.append_point(TrackPoint::new(1.0, longitude).with_segment_start(i == 0));
            if i == 3 {
                track.append_point(TrackPoint::new(1.0, longitude));
            } else if i == 6 {
                track.append_point(TrackPoint::new(1.0, longitude).with_segment_start(true));
            }
        }
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(track.num_points());

        assert_eq!(compress(&track, &details, &mut markings), 1);
        for i in 0..16 {
            // Duplicate at index 4 goes, the segment start duplicate at 8 stays
            assert_eq!(markings.is_deleted(i), i == 4, "point {i}");
            assert!(!markings.is_segment_break(i));
        }
    }

    #[test]
    fn test_delete_last_duplicates() {
        let mut track = Track::new();
        for i in 0..14 {
            let copies = if i < 13 { 1 } else { 4 };
            for _ in 0..copies {
                track.append_point(TrackPoint::new(1.0, 1.0 + 0.01 * i as f64).with_segment_start(i == 0));
            }
        }
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(track.num_points());

        // The duplicates at the end go, even though one of them ends the segment
        assert_eq!(compress(&track, &details, &mut markings), 3);
        for i in 0..17 {
            assert_eq!(markings.is_deleted(i), i > 13, "point {i}");
        }
    }

    #[test]
    fn test_waypoints_and_media_kept() {
        let track = Track::from(vec![
            TrackPoint::new(2.0, 2.0).with_segment_start(true),
            TrackPoint::new(2.0, 2.0).with_waypoint_name("cairn"),
            TrackPoint::new(2.0, 2.0).with_media(true),
            TrackPoint::new(2.0, 2.1),
        ]);
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(4);
        assert_eq!(compress(&track, &details, &mut markings), 0);
    }

    #[test]
    fn test_look_back_is_limited() {
        let mut track = Track::new();
        for i in 0..=LOOK_BACK_POINTS {
            track.append_point(TrackPoint::new(3.0, 3.0 + 0.001 * i as f64).with_segment_start(i == 0));
        }
        // Same as point 0, which is now 21 points back
        track.append_point(TrackPoint::new(3.0, 3.0));
        // Same as point 2, 19 points back
        let copy = track.point(2).unwrap().clone();
        track.append_point(copy);
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(track.num_points());

        assert_eq!(compress(&track, &details, &mut markings), 1);
        assert_eq!(markings.deleted_indices(), vec![LOOK_BACK_POINTS + 2]);
    }

    #[test]
    fn test_already_deleted_not_counted() {
        let track = Track::from(vec![
            TrackPoint::new(1.0, 1.0).with_segment_start(true),
            TrackPoint::new(1.0, 1.0),
            TrackPoint::new(1.0, 1.1),
        ]);
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(3);
        markings.mark_for_deletion(1);
        assert_eq!(compress(&track, &details, &mut markings), 0);
        assert_eq!(markings.num_deleted(), 1);
    }
}

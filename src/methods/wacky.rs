//! Removal of spikes ("wacky points").
//!
//! A spike is a point far away from both of its surviving neighbours while
//! those neighbours are close to each other: the track jumps out to the point
//! and straight back again. Segment boundaries are never treated as spikes.

use crate::geo_utils::radians_between;
use crate::methods::{is_point_at_segment_boundary, next_track_point, previous_track_point};
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
            || is_point_at_segment_boundary(i, details, markings)
        {
            continue;
        }
        let (Some(prev), Some(next)) = (
            previous_track_point(track, i, markings),
            next_track_point(track, i, markings),
        ) else {
            continue;
        };
        let prev = &track.points()[prev];
        let next = &track.points()[next];
        if radians_between(prev, point) > threshold
            && radians_between(point, next) > threshold
            && radians_between(prev, next) < threshold
        {
            markings.mark_for_deletion(i);
        }
    }

    markings.num_deleted() - num_already_deleted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrackPoint;

    /// Straight track with spikes after points 3 and 6, a new segment at 7.
    fn spiky_track() -> Track {
        let mut track = Track::new();
        for i in 0..44 {
            let longitude = 1.0 + 0.01 * i as f64;
            track.append_point(TrackPoint::new(1.0, longitude).with_segment_start(i == 0 || i == 7));
            if i == 3 || i == 6 {
                track.append_point(TrackPoint::new(1.1, longitude));
            }
        }
        track
    }

    #[test]
    fn test_delete_one_of_two_wacky_points() {
        let track = spiky_track();
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(track.num_points());

        // The second spike ends its segment so it stays
        assert_eq!(compress(&track, &details, &mut markings, 1.5), 1);
        for i in 0..46 {
            assert_eq!(markings.is_deleted(i), i == 4, "point {i}");
            assert!(!markings.is_segment_break(i));
        }
    }

    #[test]
    fn test_large_factor_keeps_everything() {
        let track = spiky_track();
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(track.num_points());

        // Spikes are nearer than 10 mean spacings
        assert_eq!(compress(&track, &details, &mut markings, 10.0), 0);
        assert_eq!(compress(&track, &details, &mut markings, 0.0), 0);
    }

    #[test]
    fn test_media_spike_kept() {
        let mut track = spiky_track();
        track.point_mut(4).unwrap().has_media = true;
        let details = TrackDetails::new(&track);
        let mut markings = MarkingData::new(track.num_points());

        assert_eq!(compress(&track, &details, &mut markings, 1.5), 0);
    }
}

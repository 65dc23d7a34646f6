//! Synthetic tracks shared by the unit tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::geo_utils::{metres_to_radians, project_point};
use crate::{Track, TrackPoint};

/// Timestamp `seconds` after a fixed epoch offset.
pub fn timestamp(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(123_456 + seconds, 0).unwrap()
}

/// Step along bearing `degrees` for `metres` from `point`.
pub fn step(point: &TrackPoint, degrees: f64, metres: f64) -> TrackPoint {
    project_point(point, degrees.to_radians(), metres_to_radians(metres))
}

/// Track heading 25° from near Zurich, speeding up then slowing down.
///
/// Points are 10 seconds apart. The leg leading into point `i` is
/// 10, 10, 11, 13, 16, 20, ... metres long, peaking at 92 metres around
/// point 21 and dropping back to 23 metres into point 32.
pub fn speed_track(num_points: usize) -> Track {
    let mut track = Track::new();
    let mut point = TrackPoint::new(47.1, 8.0);
    let mut leg: i64 = 10;
    for i in 0..num_points as i64 {
        point = step(&point, 25.0, leg as f64)
            .with_segment_start(i == 0)
            .with_timestamp(timestamp(10 * i));
        track.append_point(point.clone());
        leg += i - i * i / 21;
    }
    track
}

/// Straight track along the equator-ish latitude 1.0, 0.01° of longitude apart.
pub fn straight_track(num_points: usize) -> Track {
    let mut track = Track::new();
    for i in 0..num_points {
        track.append_point(TrackPoint::new(1.0, 1.0 + 0.01 * i as f64).with_segment_start(i == 0));
    }
    track
}

//! Compress a synthetic mountain track with a pipeline of filters.
//!
//! Run with: cargo run --example compress_track

use chrono::{Duration, TimeZone, Utc};
use track_compress::geo_utils::{metres_to_radians, project_point};
use track_compress::{MethodList, Track, TrackPoint};

fn main() {
    let start_time = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
    let mut track = Track::new();
    let mut point = TrackPoint::new(46.5, 7.5);
    let mut altitude = 2000.0;

    for i in 0..120 {
        let timestamp = start_time + Duration::seconds(5 * i);
        track.append_point(
            point
                .clone()
                .with_altitude(altitude)
                .with_timestamp(timestamp)
                .with_segment_start(i == 0),
        );
        // The GPS logger sometimes writes a point twice
        if i % 17 == 0 {
            track.append_point(point.clone().with_timestamp(timestamp));
        }
        let bearing = if (i / 10) % 2 == 0 { 120.0_f64 } else { 220.0 };
        point = project_point(&point, bearing.to_radians(), metres_to_radians(25.0));
        altitude -= 3.0;
    }
    track.append_point(TrackPoint::new(46.49, 7.51).with_waypoint_name("Hut"));

    let methods = MethodList::from_settings_string("xDUP:;xWAC:2.0;xDPC:2000;xTSA:10;oFAS:40");

    println!("Track Compression Example\n");
    println!("Track: {} points", track.num_points());
    println!("Methods: {}\n", methods.to_settings_string());

    let report = methods.preview(&track);
    for (method_type, deleted) in &report.per_method {
        println!("   {:<4} deleted {:>3} points", method_type.key(), deleted);
    }
    println!(
        "\nTotal: {} of {} points marked for deletion",
        report.total_deleted,
        track.num_points()
    );
}

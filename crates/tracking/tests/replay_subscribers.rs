use std::sync::{Arc, Mutex};

use tapmeasure_core::Point3;
use tapmeasure_tracking::{
    FeaturePointCloud, HitTestOptions, ReplayTracker, TrackingFrame, TrackingSource,
};

#[test]
fn subscribers_only_see_successful_frames() {
    let frames: Vec<TrackingFrame> = serde_json::from_str(
        r#"[
            {"hit": [0.0, 0.0, 0.0]},
            {},
            {"hit": [3.0, 4.0, 0.0]}
        ]"#,
    )
    .expect("frames parse");

    let mut tracker =
        ReplayTracker::new(frames, FeaturePointCloud::default(), HitTestOptions::default())
            .expect("valid trace");

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    tracker.subscribe(Box::new(move |p: Point3| sink.lock().unwrap().push(p)));

    while tracker.step().is_some() {}

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Point3::ZERO, Point3::new(3.0, 4.0, 0.0)]
    );
}

//! Replay of recorded tracking frames.

use serde::Deserialize;
use tapmeasure_camera::{Camera, CameraPose};
use tapmeasure_core::{FrameTick, Point3};
use tracing::trace;

use crate::hit_test::{hit_test, FeaturePointCloud, HitTestOptions, SCREEN_CENTER};
use crate::source::{PositionCallback, Subscribers, TrackingSource};
use crate::TraceError;

/// One recorded frame of the tracking pipeline.
///
/// A frame carries either the host's hit-test result directly (`hit`), or
/// the camera pose for that frame so the hit-test is redone against the
/// recorded feature points. A frame with neither is a failed hit-test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct TrackingFrame {
    /// Recorded hit position `[x, y, z]`.
    #[serde(default)]
    pub hit: Option<[f32; 3]>,
    /// Recorded camera pose.
    #[serde(default)]
    pub camera: Option<CameraPose>,
}

impl TrackingFrame {
    /// Frame whose hit-test produced `position`.
    pub fn hit(position: Point3) -> Self {
        Self {
            hit: Some(position.to_array()),
            camera: None,
        }
    }

    /// Frame with only a camera pose.
    pub fn pose(pose: CameraPose) -> Self {
        Self {
            hit: None,
            camera: Some(pose),
        }
    }

    /// Frame where the hit-test failed.
    pub fn miss() -> Self {
        Self::default()
    }

    fn validate(&self, frame: usize) -> Result<(), TraceError> {
        if let Some(hit) = self.hit {
            if !hit.iter().all(|v| v.is_finite()) {
                return Err(TraceError::NonFiniteFrame { frame, field: "hit" });
            }
        }
        if let Some(pose) = self.camera {
            let finite = pose.position.iter().all(|v| v.is_finite())
                && pose.yaw.is_finite()
                && pose.pitch.is_finite();
            if !finite {
                return Err(TraceError::NonFiniteFrame {
                    frame,
                    field: "camera",
                });
            }
        }
        Ok(())
    }
}

/// What happened when a frame was replayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The hit-test succeeded and `0` was delivered to subscribers.
    Hit(Point3),
    /// No position this frame.
    Miss,
}

/// Tracking source that replays recorded frames one at a time.
#[derive(Debug)]
pub struct ReplayTracker {
    frames: Vec<TrackingFrame>,
    cloud: FeaturePointCloud,
    options: HitTestOptions,
    next: usize,
    subscribers: Subscribers,
}

impl ReplayTracker {
    /// Create a tracker over `frames`, validating them up front.
    pub fn new(
        frames: Vec<TrackingFrame>,
        cloud: FeaturePointCloud,
        options: HitTestOptions,
    ) -> Result<Self, TraceError> {
        if frames.is_empty() {
            return Err(TraceError::Empty);
        }
        options.validate()?;
        for (index, frame) in frames.iter().enumerate() {
            frame.validate(index)?;
        }
        Ok(Self {
            frames,
            cloud,
            options,
            next: 0,
            subscribers: Subscribers::new(),
        })
    }

    /// Tick of the next frame to be replayed.
    pub fn tick(&self) -> FrameTick {
        FrameTick(self.next as u64)
    }

    /// Total number of recorded frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; empty traces are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether every frame has been replayed.
    pub fn is_finished(&self) -> bool {
        self.next >= self.frames.len()
    }

    /// Resolve the world position a frame reports, if any.
    pub fn resolve(&self, frame: &TrackingFrame) -> Option<Point3> {
        if let Some(hit) = frame.hit {
            return Some(Point3::from_array(hit));
        }
        let camera = Camera::from(frame.camera?);
        hit_test(&camera, SCREEN_CENTER, &self.cloud, &self.options).map(|hit| hit.position())
    }

    /// Replay the next frame. Returns `None` once the trace is exhausted.
    pub fn step(&mut self) -> Option<FrameOutcome> {
        let frame = *self.frames.get(self.next)?;
        let index = self.next;
        self.next += 1;

        match self.resolve(&frame) {
            Some(position) => {
                trace!(frame = index, ?position, "hit-test succeeded");
                self.subscribers.deliver(position);
                Some(FrameOutcome::Hit(position))
            }
            None => {
                trace!(frame = index, "hit-test found nothing; frame skipped");
                Some(FrameOutcome::Miss)
            }
        }
    }
}

impl TrackingSource for ReplayTracker {
    fn subscribe(&mut self, callback: PositionCallback) {
        self.subscribers.push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(frames: Vec<TrackingFrame>) -> ReplayTracker {
        ReplayTracker::new(frames, FeaturePointCloud::default(), HitTestOptions::default())
            .expect("valid trace")
    }

    #[test]
    fn empty_trace_is_rejected() {
        let err = ReplayTracker::new(
            Vec::new(),
            FeaturePointCloud::default(),
            HitTestOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, TraceError::Empty);
    }

    #[test]
    fn non_finite_hit_is_rejected() {
        let frames = vec![
            TrackingFrame::miss(),
            TrackingFrame {
                hit: Some([0.0, f32::INFINITY, 0.0]),
                camera: None,
            },
        ];
        let err = ReplayTracker::new(
            frames,
            FeaturePointCloud::default(),
            HitTestOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, TraceError::NonFiniteFrame { frame: 1, field: "hit" });
    }

    #[test]
    fn steps_through_frames_then_stops() {
        let mut tracker = tracker(vec![
            TrackingFrame::hit(Point3::new(1.0, 2.0, 3.0)),
            TrackingFrame::miss(),
        ]);
        assert_eq!(tracker.len(), 2);
        assert_eq!(
            tracker.step(),
            Some(FrameOutcome::Hit(Point3::new(1.0, 2.0, 3.0)))
        );
        assert_eq!(tracker.step(), Some(FrameOutcome::Miss));
        assert!(tracker.is_finished());
        assert_eq!(tracker.step(), None);
        assert_eq!(tracker.tick(), FrameTick(2));
    }

    #[test]
    fn camera_frames_are_hit_tested_against_cloud() {
        let cloud = FeaturePointCloud::from_arrays(&[[0.0, 0.0, 2.0]]).expect("cloud");
        let mut tracker = ReplayTracker::new(
            vec![
                // yaw = pi/2 looks along +Z
                TrackingFrame::pose(CameraPose {
                    position: [0.0, 0.0, 0.0],
                    yaw: std::f32::consts::FRAC_PI_2,
                    pitch: 0.0,
                }),
                // yaw = 0 looks along +X and misses
                TrackingFrame::pose(CameraPose {
                    position: [0.0, 0.0, 0.0],
                    yaw: 0.0,
                    pitch: 0.0,
                }),
            ],
            cloud,
            HitTestOptions::default(),
        )
        .expect("valid trace");

        assert_eq!(
            tracker.step(),
            Some(FrameOutcome::Hit(Point3::new(0.0, 0.0, 2.0)))
        );
        assert_eq!(tracker.step(), Some(FrameOutcome::Miss));
    }
}

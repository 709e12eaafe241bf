use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};
use tapmeasure_tracking::{FeaturePointCloud, HitTestOptions, ReplayTracker, TrackingFrame};

const DEFAULT_FPS: u32 = 30;

#[derive(Debug, Deserialize)]
struct TraceFile {
    #[serde(default = "default_fps")]
    fps: u32,
    #[serde(default)]
    feature_points: Vec<[f32; 3]>,
    frames: Vec<TraceStep>,
}

fn default_fps() -> u32 {
    DEFAULT_FPS
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct TraceStep {
    /// Measuring toggle pressed before this frame's tracking result.
    #[serde(default)]
    toggle: bool,
    #[serde(flatten)]
    frame: TrackingFrame,
}

/// Recorded session: UI toggles interleaved with tracking frames.
pub struct Trace {
    pub fps: u32,
    toggles: Vec<bool>,
    tracker: ReplayTracker,
}

impl Trace {
    pub fn from_path(path: &Path, options: HitTestOptions) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read trace {}", path.display()))?;
        Self::from_json(&contents, options)
            .with_context(|| format!("invalid trace {}", path.display()))
    }

    pub fn from_json(contents: &str, options: HitTestOptions) -> Result<Self> {
        let file: TraceFile = serde_json::from_str(contents)?;
        if file.fps == 0 {
            anyhow::bail!("trace fps must be positive");
        }
        let cloud = FeaturePointCloud::from_arrays(&file.feature_points)?;
        let toggles = file.frames.iter().map(|step| step.toggle).collect();
        let frames = file.frames.into_iter().map(|step| step.frame).collect();
        let tracker = ReplayTracker::new(frames, cloud, options)?;
        Ok(Self {
            fps: file.fps,
            toggles,
            tracker,
        })
    }

    /// Whether the toggle is pressed before frame `index`.
    pub fn toggles_at(&self, index: usize) -> bool {
        self.toggles.get(index).copied().unwrap_or(false)
    }

    pub fn tracker_mut(&mut self) -> &mut ReplayTracker {
        &mut self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapmeasure_tracking::FrameOutcome;

    #[test]
    fn parses_toggles_hits_and_poses() {
        let mut trace = Trace::from_json(
            r#"{
                "fps": 60,
                "feature_points": [[2.0, 0.0, 0.0]],
                "frames": [
                    {"toggle": true},
                    {"hit": [1.0, 1.0, 1.0]},
                    {"camera": {"position": [0.0, 0.0, 0.0]}}
                ]
            }"#,
            HitTestOptions::default(),
        )
        .expect("trace parses");

        assert_eq!(trace.fps, 60);
        assert!(trace.toggles_at(0));
        assert!(!trace.toggles_at(1));
        assert!(!trace.toggles_at(99));

        let tracker = trace.tracker_mut();
        assert_eq!(tracker.step(), Some(FrameOutcome::Miss));
        assert!(matches!(tracker.step(), Some(FrameOutcome::Hit(_))));
        // Default camera pose looks along +X at the feature point.
        assert!(matches!(tracker.step(), Some(FrameOutcome::Hit(p)) if p.x == 2.0));
    }

    #[test]
    fn empty_trace_is_an_error() {
        assert!(Trace::from_json(r#"{"frames": []}"#, HitTestOptions::default()).is_err());
    }

    #[test]
    fn zero_fps_is_an_error() {
        assert!(Trace::from_json(r#"{"fps": 0, "frames": [{}]}"#, HitTestOptions::default()).is_err());
    }
}

#![warn(missing_docs)]
//! Tracking collaborator seam.
//!
//! The host AR pipeline is opaque: all the measurement engine sees is a
//! stream of world-space positions, one per frame whose centre-screen
//! hit-test succeeded. This crate defines that seam and a replay
//! implementation driven by recorded frames.

mod error;
pub mod replay;
mod source;

pub use error::TraceError;
pub use hit_test::{hit_test, FeaturePointCloud, HitTestOptions, HitTestResult, SCREEN_CENTER};
pub use replay::{FrameOutcome, ReplayTracker, TrackingFrame};
pub use source::{PositionCallback, Subscribers, TrackingSource};

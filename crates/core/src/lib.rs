#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod length;

use serde::{Deserialize, Serialize};

pub use length::{Length, LengthFormatter, UnitStyle, UnknownUnitStyle};

/// A position in the tracking world frame, in metres.
pub type Point3 = glam::Vec3;

/// Euclidean distance between two world positions.
pub fn distance(a: Point3, b: Point3) -> Length {
    Length::from_meters(f64::from(a.distance(b)))
}

/// Frame counter (one tick per tracking frame).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct FrameTick(pub u64);

impl FrameTick {
    /// First frame of any session.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` frames.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

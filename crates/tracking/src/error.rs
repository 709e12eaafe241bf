use thiserror::Error;

/// Reasons a recorded tracking trace is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    /// The trace has no frames.
    #[error("tracking trace contains no frames")]
    Empty,
    /// A frame carries NaN or infinite coordinates.
    #[error("frame {frame} has a non-finite {field}")]
    NonFiniteFrame {
        /// Zero-based frame index.
        frame: usize,
        /// Which field was invalid (`hit` or `camera`).
        field: &'static str,
    },
    /// A feature point carries NaN or infinite coordinates.
    #[error("feature point {index} is not finite")]
    NonFiniteFeaturePoint {
        /// Zero-based index into the cloud.
        index: usize,
    },
    /// Hit-test tolerance or range is not a positive finite number.
    #[error("invalid hit-test options: tolerance={tolerance}, max_range={max_range}")]
    InvalidOptions {
        /// Configured perpendicular tolerance.
        tolerance: f32,
        /// Configured maximum range.
        max_range: f32,
    },
}

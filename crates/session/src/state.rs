use tapmeasure_core::Point3;

/// Where a measurement is in its lifecycle.
///
/// An end point can only exist alongside a start point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MeasurementState {
    /// Not measuring; no points.
    #[default]
    Idle,
    /// Measuring, waiting for the first position.
    AwaitingStart,
    /// Measuring with the start point captured.
    HasStart {
        /// First captured position.
        start: Point3,
    },
    /// Measuring with both points captured. `end` follows the latest position.
    Complete {
        /// First captured position.
        start: Point3,
        /// Most recent position.
        end: Point3,
    },
}

impl MeasurementState {
    /// Whether measurement mode is on.
    pub fn is_measuring(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Captured start point, if any.
    pub fn start(&self) -> Option<Point3> {
        match *self {
            Self::HasStart { start } | Self::Complete { start, .. } => Some(start),
            Self::Idle | Self::AwaitingStart => None,
        }
    }

    /// Captured end point, if any.
    pub fn end(&self) -> Option<Point3> {
        match *self {
            Self::Complete { end, .. } => Some(end),
            _ => None,
        }
    }

    /// Both points, once the measurement is complete.
    pub fn endpoints(&self) -> Option<(Point3, Point3)> {
        match *self {
            Self::Complete { start, end } => Some((start, end)),
            _ => None,
        }
    }

    /// State after the user flips the measuring toggle.
    ///
    /// Turning measuring off drops both points.
    pub fn toggled(self) -> Self {
        match self {
            Self::Idle => Self::AwaitingStart,
            Self::AwaitingStart | Self::HasStart { .. } | Self::Complete { .. } => Self::Idle,
        }
    }

    /// State after the tracking source reports `position`.
    pub fn with_candidate(self, position: Point3) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::AwaitingStart => Self::HasStart { start: position },
            Self::HasStart { start } | Self::Complete { start, .. } => Self::Complete {
                start,
                end: position,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_ignores_candidates() {
        let state = MeasurementState::Idle.with_candidate(Point3::ONE);
        assert_eq!(state, MeasurementState::Idle);
    }

    #[test]
    fn first_candidate_sets_start_then_end_follows() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let c = Point3::new(3.0, 0.0, 0.0);

        let state = MeasurementState::Idle.toggled();
        assert_eq!(state, MeasurementState::AwaitingStart);

        let state = state.with_candidate(a);
        assert_eq!(state.start(), Some(a));
        assert_eq!(state.end(), None);

        let state = state.with_candidate(b).with_candidate(c);
        assert_eq!(state.endpoints(), Some((a, c)));
    }

    #[test]
    fn toggling_off_clears_points() {
        let state = MeasurementState::Complete {
            start: Point3::ZERO,
            end: Point3::ONE,
        }
        .toggled();
        assert_eq!(state, MeasurementState::Idle);
        assert!(!state.is_measuring());
        assert_eq!(state.start(), None);
        assert_eq!(state.end(), None);
    }
}

use std::sync::mpsc::{self, Receiver, Sender};

use tapmeasure_core::{distance, FrameTick, Length, LengthFormatter, Point3};
use tracing::debug;

use crate::{MeasurementState, ToggleControl};

/// Text shown while there is nothing to measure.
pub const PLACEHOLDER_TEXT: &str = "Distance: --";

const DISTANCE_PREFIX: &str = "Distance: ";

/// Which operation produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The user flipped the measuring toggle.
    Toggle,
    /// The tracking source reported a position.
    Candidate,
}

impl ChangeKind {
    /// Stable label used in event logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::Candidate => "candidate",
        }
    }
}

/// Copy of the session published to observers after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Frame the change happened on.
    pub tick: FrameTick,
    /// What caused the change.
    pub kind: ChangeKind,
    /// State after the change.
    pub state: MeasurementState,
    /// Display text after the change.
    pub distance_text: String,
}

impl SessionSnapshot {
    /// Whether measuring was on after the change.
    pub fn is_measuring(&self) -> bool {
        self.state.is_measuring()
    }
}

/// Tracks the measuring flag and up to two captured points.
#[derive(Debug, Default)]
pub struct MeasurementSession {
    state: MeasurementState,
    formatter: LengthFormatter,
    tick: FrameTick,
    observers: Vec<Sender<SessionSnapshot>>,
}

impl MeasurementSession {
    /// Create an idle session with the default `0.00 m` formatting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle session that renders distances with `formatter`.
    pub fn with_formatter(formatter: LengthFormatter) -> Self {
        Self {
            formatter,
            ..Self::default()
        }
    }

    /// Flip measuring on or off. Turning it off drops both points.
    pub fn toggle_measuring(&mut self) {
        let next = self.state.toggled();
        debug!(
            tick = self.tick.0,
            measuring = next.is_measuring(),
            "measuring toggled"
        );
        self.state = next;
        self.publish(ChangeKind::Toggle);
    }

    /// Feed a position from the tracking source.
    ///
    /// Ignored while not measuring. The first position becomes the start
    /// point; every later one replaces the end point.
    pub fn on_candidate_position(&mut self, position: Point3) {
        let next = self.state.with_candidate(position);
        if next == self.state {
            return;
        }
        if self.state.start().is_none() {
            debug!(tick = self.tick.0, ?position, "start point captured");
        }
        self.state = next;
        self.publish(ChangeKind::Candidate);
    }

    /// Distance text for display, e.g. `Distance: 5.00 m`.
    ///
    /// A non-finite distance shows the placeholder rather than a number.
    pub fn current_distance_text(&self) -> String {
        match self.distance() {
            Some(length) if length.is_finite() => {
                format!("{DISTANCE_PREFIX}{}", self.formatter.format(length))
            }
            _ => PLACEHOLDER_TEXT.to_string(),
        }
    }

    /// Whether measurement mode is on.
    pub fn is_measuring(&self) -> bool {
        self.state.is_measuring()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MeasurementState {
        self.state
    }

    /// Captured start point.
    pub fn start(&self) -> Option<Point3> {
        self.state.start()
    }

    /// Captured end point.
    pub fn end(&self) -> Option<Point3> {
        self.state.end()
    }

    /// Distance between start and end, once both are captured.
    pub fn distance(&self) -> Option<Length> {
        self.state
            .endpoints()
            .map(|(start, end)| distance(start, end))
    }

    /// Presentation of the measuring toggle.
    pub fn toggle_control(&self) -> ToggleControl {
        ToggleControl::for_measuring(self.is_measuring())
    }

    /// Formatter used for distance text.
    pub fn formatter(&self) -> LengthFormatter {
        self.formatter
    }

    /// Frame stamped onto subsequent snapshots.
    pub fn tick(&self) -> FrameTick {
        self.tick
    }

    /// Set the frame stamped onto subsequent snapshots.
    pub fn advance_tick(&mut self, tick: FrameTick) {
        self.tick = tick;
    }

    /// Receive a snapshot after every change to the session.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<SessionSnapshot> {
        let (tx, rx) = mpsc::channel();
        self.observers.push(tx);
        rx
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn snapshot(&self, kind: ChangeKind) -> SessionSnapshot {
        SessionSnapshot {
            tick: self.tick,
            kind,
            state: self.state,
            distance_text: self.current_distance_text(),
        }
    }

    fn publish(&mut self, kind: ChangeKind) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot(kind);
        self.observers
            .retain(|observer| observer.send(snapshot.clone()).is_ok());
    }
}

use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tapmeasure_core::{FrameTick, Point3};

use crate::{MeasurementSession, MeasurementState, SessionSnapshot, ToggleControl};

/// Session shared between a tracking thread and a UI thread.
///
/// Every operation takes the lock once, so the flag and both points always
/// change together.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<MeasurementSession>>,
}

impl SharedSession {
    /// Wrap an existing session.
    pub fn new(session: MeasurementSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    // Every mutation is a single state assignment, so a panic elsewhere
    // cannot leave the session half-updated.
    fn lock(&self) -> MutexGuard<'_, MeasurementSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`MeasurementSession::toggle_measuring`].
    pub fn toggle_measuring(&self) {
        self.lock().toggle_measuring();
    }

    /// See [`MeasurementSession::on_candidate_position`].
    pub fn on_candidate_position(&self, position: Point3) {
        self.lock().on_candidate_position(position);
    }

    /// See [`MeasurementSession::current_distance_text`].
    pub fn current_distance_text(&self) -> String {
        self.lock().current_distance_text()
    }

    /// See [`MeasurementSession::is_measuring`].
    pub fn is_measuring(&self) -> bool {
        self.lock().is_measuring()
    }

    /// See [`MeasurementSession::state`].
    pub fn state(&self) -> MeasurementState {
        self.lock().state()
    }

    /// See [`MeasurementSession::toggle_control`].
    pub fn toggle_control(&self) -> ToggleControl {
        self.lock().toggle_control()
    }

    /// See [`MeasurementSession::advance_tick`].
    pub fn advance_tick(&self, tick: FrameTick) {
        self.lock().advance_tick(tick);
    }

    /// See [`MeasurementSession::subscribe`].
    pub fn subscribe(&self) -> Receiver<SessionSnapshot> {
        self.lock().subscribe()
    }

    /// Closure suitable for a tracking source's `subscribe`.
    pub fn position_sink(&self) -> impl FnMut(Point3) + Send + 'static {
        let shared = self.clone();
        move |position: Point3| shared.on_candidate_position(position)
    }
}

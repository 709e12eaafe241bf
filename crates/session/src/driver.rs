use std::sync::mpsc::{self, Receiver, SendError, SyncSender, TrySendError};

use tapmeasure_core::{FrameTick, Point3};
use tracing::warn;

use crate::MeasurementSession;

/// Bounded so a stalled owner cannot grow the queue without limit.
const COMMAND_QUEUE: usize = 256;

/// Work sent to the thread that owns the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionCommand {
    /// Flip the measuring toggle.
    Toggle,
    /// Position reported by the tracking source.
    Candidate(Point3),
    /// A new frame started.
    Tick(FrameTick),
}

/// Sending half handed to tracking and UI threads.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: SyncSender<SessionCommand>,
}

impl SessionHandle {
    /// Queue a toggle. Waits for room; toggles are never dropped.
    pub fn toggle(&self) -> Result<(), SendError<SessionCommand>> {
        self.tx.send(SessionCommand::Toggle)
    }

    /// Queue a tracking position without blocking.
    ///
    /// Returns false when the queue is full or the owner has gone away; the
    /// position is then dropped like a frame without a hit.
    pub fn candidate(&self, position: Point3) -> bool {
        match self.tx.try_send(SessionCommand::Candidate(position)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("session command queue full; dropping tracking position");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Queue a frame tick without blocking.
    ///
    /// Returns false when the queue is full or the owner has gone away.
    /// Snapshots keep the previous frame number until a later tick lands.
    pub fn tick(&self, tick: FrameTick) -> bool {
        match self.tx.try_send(SessionCommand::Tick(tick)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(tick = tick.0, "session command queue full; dropping frame tick");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Single owner of a [`MeasurementSession`] fed through a channel.
#[derive(Debug)]
pub struct SessionDriver {
    session: MeasurementSession,
    rx: Receiver<SessionCommand>,
}

impl SessionDriver {
    /// Take ownership of `session` and return the driver plus a handle.
    pub fn new(session: MeasurementSession) -> (Self, SessionHandle) {
        let (tx, rx) = mpsc::sync_channel(COMMAND_QUEUE);
        (Self { session, rx }, SessionHandle { tx })
    }

    /// Owned session.
    pub fn session(&self) -> &MeasurementSession {
        &self.session
    }

    /// Mutable access to the owned session, e.g. to subscribe.
    pub fn session_mut(&mut self) -> &mut MeasurementSession {
        &mut self.session
    }

    /// Apply every queued command without waiting. Returns how many ran.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.rx.try_recv() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    /// Apply commands until every handle is dropped, then return the session.
    pub fn run(mut self) -> MeasurementSession {
        while let Ok(command) = self.rx.recv() {
            self.apply(command);
        }
        self.session
    }

    fn apply(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Toggle => self.session.toggle_measuring(),
            SessionCommand::Candidate(position) => self.session.on_candidate_position(position),
            SessionCommand::Tick(tick) => self.session.advance_tick(tick),
        }
    }
}

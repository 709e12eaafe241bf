#![warn(missing_docs)]
//! Point-to-point measurement session.
//!
//! The session holds at most two captured world positions and renders the
//! distance between them for display. Positions arrive from a tracking
//! source; measuring is switched on and off by a single UI toggle.

mod control;
mod driver;
mod session;
mod shared;
mod state;

pub use control::{ControlColor, ToggleControl};
pub use driver::{SessionCommand, SessionDriver, SessionHandle};
pub use session::{ChangeKind, MeasurementSession, SessionSnapshot, PLACEHOLDER_TEXT};
pub use shared::SharedSession;
pub use state::MeasurementState;

use tapmeasure_core::Point3;

/// Callback invoked with each successfully hit-tested world position.
pub type PositionCallback = Box<dyn FnMut(Point3) + Send>;

/// Anything that produces per-frame world positions.
///
/// Implementations call every subscribed callback once per frame whose
/// hit-test succeeded. Frames without a hit are skipped silently.
pub trait TrackingSource {
    /// Register a callback for future positions.
    fn subscribe(&mut self, callback: PositionCallback);
}

/// Registered position callbacks.
#[derive(Default)]
pub struct Subscribers {
    callbacks: Vec<PositionCallback>,
}

impl Subscribers {
    /// Create an empty subscriber list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a callback.
    pub fn push(&mut self, callback: PositionCallback) {
        self.callbacks.push(callback);
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Invoke every callback with `position`, in registration order.
    pub fn deliver(&mut self, position: Point3) {
        for callback in &mut self.callbacks {
            callback(position);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.callbacks.len())
            .finish()
    }
}

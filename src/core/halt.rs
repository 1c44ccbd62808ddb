//! Cooperative halt signal shared between the loop and whoever stops it

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

struct HaltState {
    requested: AtomicBool,
    wake: Notify,
}

/// Cloneable halt request.
///
/// Any clone may call [`request_halt`](Self::request_halt) from any thread;
/// the polling loop observes it before its next tick and is woken from its
/// inter-tick sleep. Only one task is expected to wait on [`halted`](Self::halted).
#[derive(Clone)]
pub struct HaltHandle {
    state: Arc<HaltState>,
}

impl HaltHandle {
    pub fn new() -> Self {
        Self {
            state: Arc::new(HaltState {
                requested: AtomicBool::new(false),
                wake: Notify::new(),
            }),
        }
    }

    pub fn request_halt(&self) {
        self.state.requested.store(true, Ordering::Release);
        // Stores a permit if the loop is not waiting yet
        self.state.wake.notify_one();
    }

    pub fn is_halt_requested(&self) -> bool {
        self.state.requested.load(Ordering::Acquire)
    }

    /// Resolves once a halt has been requested
    pub async fn halted(&self) {
        while !self.is_halt_requested() {
            self.state.wake.notified().await;
        }
    }
}

impl Default for HaltHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HaltHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HaltHandle")
            .field("requested", &self.is_halt_requested())
            .finish()
    }
}

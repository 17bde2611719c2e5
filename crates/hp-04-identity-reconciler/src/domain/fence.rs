//! # Logout Fence
//!
//! While a user-initiated logout is in flight, identity events other than
//! "signed out" are stale by definition and must be ignored.
//!
//! ```text
//!   [Idle] ──begin_logout──→ [LoggingOut]
//!     ↑                           │
//!     └──── end_logout ───────────┘   (SignedOut event, or sign-out failure)
//! ```
//!
//! Shared through `Arc` between the reconciler's logout path and the event
//! path. Transitions are synchronous so a logout begun on one task is visible
//! to the next check on any other.

use parking_lot::Mutex;
use std::time::Instant;
use tracing::debug;

/// Fence state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceState {
    Idle,
    LoggingOut { since: Instant },
}

#[derive(Debug)]
pub struct LogoutFence {
    state: Mutex<FenceState>,
}

impl Default for LogoutFence {
    fn default() -> Self {
        Self::new()
    }
}

impl LogoutFence {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FenceState::Idle),
        }
    }

    /// Raise the fence. Returns `false` if it was already raised.
    pub fn begin_logout(&self) -> bool {
        let mut state = self.state.lock();
        match *state {
            FenceState::Idle => {
                *state = FenceState::LoggingOut {
                    since: Instant::now(),
                };
                debug!("Logout fence raised");
                true
            }
            FenceState::LoggingOut { .. } => false,
        }
    }

    /// Lower the fence. Returns `false` if it was not raised.
    pub fn end_logout(&self) -> bool {
        let mut state = self.state.lock();
        match *state {
            FenceState::LoggingOut { since } => {
                *state = FenceState::Idle;
                debug!(held_ms = since.elapsed().as_millis() as u64, "Logout fence released");
                true
            }
            FenceState::Idle => false,
        }
    }

    pub fn is_logging_out(&self) -> bool {
        matches!(*self.state.lock(), FenceState::LoggingOut { .. })
    }

    pub fn state(&self) -> FenceState {
        *self.state.lock()
    }
}

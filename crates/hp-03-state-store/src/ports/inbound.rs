//! Inbound ports (Driving ports) for the state store.

use shared_types::User;

use crate::domain::{Action, AppState};

/// Primary API of the state container.
///
/// Dispatch is synchronous and serialized: transitions are applied in call
/// order and never interleave.
pub trait StateStoreApi: Send + Sync {
    /// Apply `action`. Returns whether the state changed.
    fn dispatch(&self, action: Action) -> bool;

    /// Copy of the current state.
    fn snapshot(&self) -> AppState;

    /// Copy of the current user, if any.
    fn current_user(&self) -> Option<User> {
        self.snapshot().user
    }
}

//! Inbound ports (Driving ports) for the identity reconciler.

use async_trait::async_trait;
use shared_bus::IdentityEvent;

use crate::domain::ReconcileOutcome;
use crate::error::ReconcileResult;

/// Primary API of the identity reconciler.
#[async_trait]
pub trait IdentityReconcilerApi: Send + Sync {
    /// Decide and apply the effect of one identity event.
    async fn handle_event(&self, event: IdentityEvent) -> ReconcileOutcome;

    /// User-initiated logout.
    ///
    /// The session is cleared locally before the provider is contacted, so a
    /// provider failure still leaves the user logged out.
    async fn logout(&self) -> ReconcileResult<()>;
}

//! Inbound ports (Driving ports) for the session hydrator.

use async_trait::async_trait;

use crate::domain::HydrationReport;
use crate::error::HydrationResult;

#[async_trait]
pub trait SessionHydratorApi: Send + Sync {
    /// Restore the session and load initial data.
    ///
    /// Only the first call does any work; later calls return
    /// `HydrationError::AlreadyRan`.
    async fn run(&self) -> HydrationResult<HydrationReport>;
}

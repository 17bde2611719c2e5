//! Error types for the identity reconciler

use shared_types::GatewayError;
use thiserror::Error;

/// Reconciler errors.
///
/// Lookup failures never surface here: they fall through to the salvage
/// chain. Only the user-initiated sign-out can fail visibly.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The provider refused or failed the sign-out call
    #[error("Provider sign-out failed: {0}")]
    SignOutFailed(#[source] GatewayError),
}

/// Result type for reconciler operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;

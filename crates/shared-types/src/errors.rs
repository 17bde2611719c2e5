//! # Error Types
//!
//! Errors shared across subsystems. Each subsystem wraps these in its own
//! error enum.

use thiserror::Error;

/// Failure reported by an external gateway (identity provider, backend, URL).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The remote call did not complete.
    #[error("Gateway unavailable: {0}")]
    Unavailable(String),

    /// The remote returned data that could not be decoded.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The caller is not allowed to perform the operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// Result alias for gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

//! Error types for session hydration

use shared_types::GatewayError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HydrationError {
    /// Hydration runs once per application lifetime.
    #[error("Session hydration already ran")]
    AlreadyRan,

    /// A backend lookup failed; the fallback chain continued without it.
    #[error("Backend lookup failed during hydration: {0}")]
    Lookup(#[from] GatewayError),
}

pub type HydrationResult<T> = Result<T, HydrationError>;

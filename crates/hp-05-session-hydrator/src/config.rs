//! Hydration configuration.

use std::time::Duration;

/// Deadline for each remote session check during boot.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HydrationConfig {
    /// A session check slower than this resolves to "no session".
    pub session_timeout: Duration,
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self {
            session_timeout: DEFAULT_SESSION_TIMEOUT,
        }
    }
}

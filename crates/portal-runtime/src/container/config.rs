//! # Runtime Configuration
//!
//! Unified configuration for the session engine.
//!
//! Every section has a sane default. `load_config()` applies environment
//! overrides on top:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `HP_DATA_DIR` | `storage.data_dir` |
//! | `HP_SESSION_TIMEOUT_MS` | `session.timeout_ms` |
//! | `HP_SUPER_USERS` | `access.super_users` (comma-separated) |
//! | `HP_START_URL` | `ui.start_url` |

use std::path::PathBuf;
use std::time::Duration;

use shared_types::SuperUserPolicy;
use tracing::{info, warn};

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Local cache configuration.
    pub storage: StorageConfig,
    /// Session restoration configuration.
    pub session: SessionConfig,
    /// Privileged accounts.
    pub access: AccessConfig,
    /// Address bar the runtime starts from.
    pub ui: UiConfig,
}

impl RuntimeConfig {
    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.timeout_ms == 0 {
            return Err(ConfigError::ZeroSessionTimeout);
        }
        Ok(())
    }

    /// Built-in super users plus the configured extras.
    pub fn super_user_policy(&self) -> SuperUserPolicy {
        self.access
            .super_users
            .iter()
            .fold(SuperUserPolicy::default(), |policy, entry| policy.with(entry))
    }
}

/// Configuration errors.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The session deadline would expire immediately.
    ZeroSessionTimeout,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroSessionTimeout => write!(
                f,
                "Session timeout must be greater than zero. \
                 Unset HP_SESSION_TIMEOUT_MS to use the default."
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the local cache file.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Deadline for each remote session check during boot.
    pub timeout_ms: u64,
}

impl SessionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { timeout_ms: 8_000 }
    }
}

/// Access configuration.
#[derive(Debug, Clone, Default)]
pub struct AccessConfig {
    /// Extra super-user ids or contacts.
    pub super_users: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub start_url: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_url: "http://localhost:3000/".to_string(),
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load configuration from the environment.
pub fn load_config() -> RuntimeConfig {
    let mut config = RuntimeConfig::default();

    if let Ok(dir) = std::env::var("HP_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(dir);
    }

    if let Ok(timeout) = std::env::var("HP_SESSION_TIMEOUT_MS") {
        match timeout.parse() {
            Ok(ms) => config.session.timeout_ms = ms,
            Err(_) => warn!(value = %timeout, "HP_SESSION_TIMEOUT_MS is not a number, ignored"),
        }
    }

    if let Ok(list) = std::env::var("HP_SUPER_USERS") {
        config.access.super_users = parse_list(&list);
        info!(count = config.access.super_users.len(), "Loaded extra super users from environment");
    }

    if let Ok(url) = std::env::var("HP_START_URL") {
        config.ui.start_url = url;
    }

    config
}

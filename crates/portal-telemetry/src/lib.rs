//! # Portal Telemetry
//!
//! Observability for the heritage portal engine.
//!
//! ## Components
//!
//! - **Logs**: `tracing` subscriber with env filter, console or JSON output
//! - **Metrics**: Prometheus counters in a process-wide registry
//!
//! ## Usage
//!
//! ```rust,ignore
//! use portal_telemetry::{init_telemetry, TelemetryConfig};
//!
//! init_telemetry(&TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HP_SERVICE_NAME` | `heritage-portal` | Service name in logs |
//! | `HP_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `HP_JSON_LOGS` | `false` | Emit JSON logs |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, ACTIONS_DISPATCHED, CACHE_CORRUPTIONS,
    HYDRATION_DURATION, HYDRATION_OUTCOMES, RECONCILER_DECISIONS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Register metrics and install the logging subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)?;
    Ok(())
}

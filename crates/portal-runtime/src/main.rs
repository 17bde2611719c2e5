//! # Heritage Portal Session Engine
//!
//! Boots the session engine against the local cache and in-memory remote
//! adapters, then keeps the identity listener running until Ctrl+C.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (logging + metrics)
//! 2. Load and validate configuration (from env)
//! 3. Build the engine container
//! 4. Start the identity listener and hydrate the session
//! 5. Wait for Ctrl+C, then shut down gracefully

use anyhow::{Context, Result};
use tracing::info;

use portal_runtime::{load_config, PortalRuntime};
use portal_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry(&TelemetryConfig::from_env()).context("Failed to initialize telemetry")?;

    let config = load_config();
    config.validate().context("Invalid configuration")?;
    info!(data_dir = ?config.storage.data_dir, "Configuration loaded");

    let runtime = PortalRuntime::new(config)?;
    runtime.start().await?;

    info!("Session engine is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    runtime.shutdown().await;

    Ok(())
}

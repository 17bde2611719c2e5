//! # Portal Runtime
//!
//! ## Startup Sequence
//!
//! 1. Subscribe the realtime listener before anything else, so no
//!    notification emitted during boot is missed
//! 2. Run the one-shot session hydration
//! 3. Keep the listener alive until shutdown

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use hp_04_identity_reconciler::{
    IdentityProvider, IdentityReconcilerApi, ListenerStats, RealtimeEventListener,
};
use hp_05_session_hydrator::{HydrationReport, SessionHydratorApi};

use crate::container::{PortalContainer, RuntimeConfig};

/// How long `shutdown` waits for the listener to drain.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// The runtime orchestrating the engine components.
pub struct PortalRuntime {
    container: Arc<PortalContainer>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    listener: Mutex<Option<JoinHandle<ListenerStats>>>,
}

impl PortalRuntime {
    /// Create a runtime backed by the file cache in `config.storage.data_dir`.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let container = PortalContainer::new(config).context("Failed to open local cache")?;
        Ok(Self::from_container(Arc::new(container)))
    }

    pub fn from_container(container: Arc<PortalContainer>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container,
            shutdown_tx,
            shutdown_rx,
            listener: Mutex::new(None),
        }
    }

    /// Start the listener and hydrate the session.
    pub async fn start(&self) -> Result<HydrationReport> {
        info!("===========================================");
        info!("  Heritage Portal Session Engine v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        self.start_listener();

        let report = self
            .container
            .hydrator
            .run()
            .await
            .context("Session hydration failed")?;

        info!(
            source = report.source.label(),
            user_id = ?report.user_id,
            "Session engine ready"
        );
        Ok(report)
    }

    fn start_listener(&self) {
        let mut slot = self.listener.lock();
        if slot.is_some() {
            warn!("Identity listener already running");
            return;
        }

        let reconciler: Arc<dyn IdentityReconcilerApi> = self.container.reconciler.clone();
        let subscription = self.container.provider.subscribe_to_session_changes();
        let listener = RealtimeEventListener::new(reconciler, subscription);
        *slot = Some(tokio::spawn(listener.run(self.shutdown_rx.clone())));
        debug!("Identity listener spawned");
    }

    /// Shutdown the runtime gracefully.
    ///
    /// Returns the listener's counters when it stopped within the grace
    /// period.
    pub async fn shutdown(&self) -> Option<ListenerStats> {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let handle = self.listener.lock().take();
        let stats = match handle {
            Some(handle) => match tokio::time::timeout(SHUTDOWN_GRACE, handle).await {
                Ok(Ok(stats)) => Some(stats),
                Ok(Err(e)) => {
                    error!(error = %e, "Identity listener task failed");
                    None
                }
                Err(_) => {
                    warn!("Identity listener did not stop within the grace period");
                    None
                }
            },
            None => None,
        };

        match portal_telemetry::encode_metrics() {
            Ok(metrics) => debug!(%metrics, "Final metrics"),
            Err(e) => warn!(error = %e, "Failed to encode metrics"),
        }

        info!(?stats, "Shutdown complete");
        stats
    }

    pub fn container(&self) -> Arc<PortalContainer> {
        Arc::clone(&self.container)
    }
}

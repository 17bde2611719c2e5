//! # Engine Container
//!
//! Builds every engine component once and hands out shared handles.
//!
//! ```text
//! FileLocalStore ─→ PersistenceCache ─→ StateStore
//!                                          │
//! InMemoryEventBus ─→ IdentityProvider     │
//!                          │               │
//!                          ▼               ▼
//!                   IdentityReconciler ◄── SessionPorts ──► SessionHydrator
//!                          │                                     │
//!                          └──────── shared LogoutFence ─────────┘
//! ```

pub mod config;

use std::sync::Arc;

use hp_01_persistence_cache::{CacheResult, FileLocalStore, PersistenceCache};
use hp_03_state_store::{AppState, StateStore};
use hp_04_identity_reconciler::{
    InMemoryBackend, InMemoryIdentityProvider, InMemoryUrlBar, IdentityReconciler, SessionPorts,
};
use hp_05_session_hydrator::{HydrationConfig, SessionHydrator};
use shared_bus::InMemoryEventBus;
use tracing::info;

pub use config::{load_config, ConfigError, RuntimeConfig};

pub struct PortalContainer {
    pub config: RuntimeConfig,
    pub event_bus: Arc<InMemoryEventBus>,
    pub provider: Arc<InMemoryIdentityProvider>,
    pub backend: Arc<InMemoryBackend>,
    pub url: Arc<InMemoryUrlBar>,
    pub cache: Arc<PersistenceCache>,
    pub store: Arc<StateStore>,
    pub reconciler: Arc<IdentityReconciler>,
    pub hydrator: Arc<SessionHydrator>,
}

impl PortalContainer {
    /// Build the engine on top of the file-backed local cache.
    pub fn new(config: RuntimeConfig) -> CacheResult<Self> {
        let local = FileLocalStore::open(&config.storage.data_dir)?;
        info!(path = %local.data_path().display(), "Local cache opened");
        let cache = Arc::new(PersistenceCache::new(Arc::new(local)));
        Ok(Self::with_cache(config, cache))
    }

    pub fn with_cache(config: RuntimeConfig, cache: Arc<PersistenceCache>) -> Self {
        let event_bus = Arc::new(InMemoryEventBus::new());
        let provider = Arc::new(InMemoryIdentityProvider::new(Arc::clone(&event_bus)));
        let backend = Arc::new(InMemoryBackend::new());
        let url = Arc::new(InMemoryUrlBar::new(config.ui.start_url.clone()));

        let store = Arc::new(
            StateStore::new(AppState::new(config.super_user_policy()))
                .with_cache(Arc::clone(&cache)),
        );

        let ports = SessionPorts {
            store: store.clone(),
            provider: provider.clone(),
            backend: backend.clone(),
            url: url.clone(),
            cache: Some(Arc::clone(&cache)),
        };
        let reconciler = Arc::new(IdentityReconciler::new(ports.clone()));
        let hydrator = Arc::new(
            SessionHydrator::new(
                ports,
                HydrationConfig {
                    session_timeout: config.session.timeout(),
                },
            )
            .with_fence(reconciler.fence()),
        );

        Self {
            config,
            event_bus,
            provider,
            backend,
            url,
            cache,
            store,
            reconciler,
            hydrator,
        }
    }
}

//! # State Store Service
//!
//! Serializes dispatches behind one lock, publishes each new state on a
//! `watch` channel, and runs the write-through persistence effect after every
//! transition that changed something.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};

use hp_01_persistence_cache::{CacheView, PersistenceCache};
use portal_telemetry::ACTIONS_DISPATCHED;

use crate::domain::{reduce, Action, AppState};
use crate::ports::StateStoreApi;

pub struct StateStore {
    state: Mutex<AppState>,
    snapshots: watch::Sender<AppState>,
    cache: Option<Arc<PersistenceCache>>,
}

impl StateStore {
    pub fn new(initial: AppState) -> Self {
        let (snapshots, _) = watch::channel(initial.clone());
        Self {
            state: Mutex::new(initial),
            snapshots,
            cache: None,
        }
    }

    /// Mirror user, settings and catalog changes into `cache`.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<PersistenceCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Receive every committed state.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.snapshots.subscribe()
    }

    fn persist(&self, prev: &AppState, next: &AppState) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(e) = cache.sync(&cache_view(prev), &cache_view(next)) {
            warn!(error = %e, "Write-through to local cache failed");
        }
    }
}

fn cache_view(state: &AppState) -> CacheView<'_> {
    CacheView {
        user: state.user.as_ref(),
        settings: &state.settings,
        products: &state.products,
        palm_types: &state.palm_types,
    }
}

impl StateStoreApi for StateStore {
    fn dispatch(&self, action: Action) -> bool {
        let name = action.name();
        ACTIONS_DISPATCHED.with_label_values(&[name]).inc();

        let mut guard = self.state.lock();
        let prev = std::mem::take(&mut *guard);
        let next = reduce(prev.clone(), action);

        if next == prev {
            *guard = prev;
            debug!(action = name, "Action left state unchanged");
            return false;
        }

        self.persist(&prev, &next);
        *guard = next.clone();
        self.snapshots.send_replace(next);
        drop(guard);

        debug!(action = name, "Action applied");
        true
    }

    fn snapshot(&self) -> AppState {
        self.state.lock().clone()
    }
}

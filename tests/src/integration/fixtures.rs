//! # Test Fixtures
//!
//! A fully wired engine over in-memory adapters, built through the same
//! container the runtime binary uses.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use hp_01_persistence_cache::{InMemoryLocalStore, PersistenceCache};
use hp_03_state_store::{AppState, StateStore, StateStoreApi};
use portal_runtime::{PortalContainer, PortalRuntime, RuntimeConfig};
use shared_types::{Session, User};

pub struct Engine {
    pub local: Arc<InMemoryLocalStore>,
    pub container: Arc<PortalContainer>,
    pub runtime: PortalRuntime,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_local(Arc::new(InMemoryLocalStore::new()))
    }

    /// A fresh engine over an existing local store, as after a page reload.
    pub fn with_local(local: Arc<InMemoryLocalStore>) -> Self {
        Self::build(local, RuntimeConfig::default())
    }

    pub fn with_start_url(url: &str) -> Self {
        let mut config = RuntimeConfig::default();
        config.ui.start_url = url.to_string();
        Self::build(Arc::new(InMemoryLocalStore::new()), config)
    }

    fn build(local: Arc<InMemoryLocalStore>, config: RuntimeConfig) -> Self {
        let cache = Arc::new(PersistenceCache::new(local.clone()));
        let container = Arc::new(PortalContainer::with_cache(config, cache));
        let runtime = PortalRuntime::from_container(container.clone());
        Self {
            local,
            container,
            runtime,
        }
    }

    pub fn state(&self) -> AppState {
        self.container.store.snapshot()
    }

    pub fn store(&self) -> &StateStore {
        &self.container.store
    }

    /// Poll the store until `predicate` holds, yielding to spawned tasks.
    pub async fn wait_until(&self, predicate: impl Fn(&AppState) -> bool) {
        for _ in 0..200 {
            if predicate(&self.state()) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("store never reached the expected state: {:?}", self.state());
    }

    /// Poll until the logout fence is down.
    pub async fn wait_fence_released(&self) {
        let fence = self.container.reconciler.fence();
        for _ in 0..200 {
            if !fence.is_logging_out() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("logout fence never released");
    }
}

/// A rich profile: named, with a point balance.
pub fn sara() -> User {
    let mut user = User::new("u1").named("Sara A.");
    user.email = Some("sara@example.com".into());
    user.points = 250;
    user
}

pub fn sara_session() -> Session {
    Session::with_email("u1", "sara@example.com")
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
}

/// A bare store with write-through caching, for reducer-level scenarios.
pub fn store_with_cache() -> (Arc<StateStore>, Arc<PersistenceCache>) {
    let cache = Arc::new(PersistenceCache::new(Arc::new(InMemoryLocalStore::new())));
    let store = Arc::new(StateStore::new(AppState::default()).with_cache(cache.clone()));
    (store, cache)
}

/// True when the current user is signed in.
pub fn signed_in(state: &AppState) -> bool {
    state.is_authenticated && state.user.is_some()
}

/// The store's current user, panicking when logged out.
pub fn current(store: &StateStore) -> User {
    store.current_user().expect("a signed-in user")
}

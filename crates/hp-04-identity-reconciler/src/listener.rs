//! # Realtime Event Listener
//!
//! Feeds provider notifications to the reconciler for the lifetime of the
//! application.
//!
//! ```text
//! Identity provider
//!       │ session changed
//!       ▼
//! ┌─────────────────┐
//! │  Event Bus      │
//! └─────────────────┘
//!       │ Subscription
//!       ▼
//! ┌─────────────────────────────┐
//! │  RealtimeEventListener      │ ──→ IdentityReconciler::handle_event
//! │  - one event at a time      │
//! │  - stops on shutdown/close  │
//! └─────────────────────────────┘
//! ```
//!
//! Events are handled strictly one after another, so two decisions never
//! interleave inside the reconciler.

use std::sync::Arc;

use shared_bus::{Received, Subscription};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

use crate::ports::IdentityReconcilerApi;

/// Counters reported when the listener stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    /// Events passed to the reconciler.
    pub handled: u64,
    /// Events dropped because the listener fell behind.
    pub lagged: u64,
}

pub struct RealtimeEventListener {
    reconciler: Arc<dyn IdentityReconcilerApi>,
    subscription: Subscription,
}

impl RealtimeEventListener {
    pub fn new(reconciler: Arc<dyn IdentityReconcilerApi>, subscription: Subscription) -> Self {
        Self {
            reconciler,
            subscription,
        }
    }

    /// Run until `shutdown` flips to `true` or the bus closes.
    ///
    /// Should be spawned as a background task. Dropping the listener drops
    /// its subscription.
    #[instrument(skip_all, name = "identity_listener")]
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> ListenerStats {
        info!("[IdentityListener] Started listening for session changes");
        let mut stats = ListenerStats::default();

        loop {
            tokio::select! {
                received = self.subscription.recv_or_lag() => match received {
                    Some(Received::Event(event)) => {
                        let outcome = self.reconciler.handle_event(event).await;
                        stats.handled += 1;
                        debug!(outcome = outcome.label(), "Session change handled");
                    }
                    Some(Received::Lagged(n)) => {
                        warn!("[IdentityListener] Lagged by {} messages", n);
                        stats.lagged += n;
                    }
                    None => {
                        error!("[IdentityListener] Event bus closed, shutting down");
                        break;
                    }
                },
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("[IdentityListener] Shutdown requested");
                        break;
                    }
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryBackend, InMemoryIdentityProvider, InMemoryUrlBar};
    use crate::ports::IdentityProvider;
    use crate::service::{IdentityReconciler, SessionPorts};
    use hp_03_state_store::{AppState, StateStore, StateStoreApi};
    use shared_bus::{EventFilter, InMemoryEventBus};
    use shared_types::{Session, User};
    use std::time::Duration;

    struct Fixture {
        store: Arc<StateStore>,
        provider: Arc<InMemoryIdentityProvider>,
        reconciler: Arc<IdentityReconciler>,
    }

    fn fixture() -> Fixture {
        let bus = Arc::new(InMemoryEventBus::new());
        let store = Arc::new(StateStore::new(AppState::default()));
        let provider = Arc::new(InMemoryIdentityProvider::new(bus));
        let backend = Arc::new(InMemoryBackend::new());
        backend.insert_user(User::new("u1").named("Sara A."));
        let reconciler = Arc::new(IdentityReconciler::new(SessionPorts {
            store: store.clone(),
            provider: provider.clone(),
            backend,
            url: Arc::new(InMemoryUrlBar::new("https://portal.example/")),
            cache: None,
        }));
        Fixture {
            store,
            provider,
            reconciler,
        }
    }

    async fn wait_for(store: &StateStore, predicate: impl Fn(&AppState) -> bool) {
        for _ in 0..100 {
            if predicate(&store.snapshot()) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("state never reached the expected shape");
    }

    #[tokio::test]
    async fn test_sign_in_then_out() {
        let f = fixture();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let listener =
            RealtimeEventListener::new(f.reconciler.clone(), f.provider.subscribe_to_session_changes());
        let task = tokio::spawn(listener.run(shutdown_rx));

        f.provider.sign_in(Session::with_email("u1", "sara@example.com")).await;
        wait_for(&f.store, |s| s.is_authenticated).await;
        assert_eq!(f.store.current_user().unwrap().full_name, "Sara A.");

        f.reconciler.logout().await.unwrap();
        wait_for(&f.store, |s| !s.is_authenticated).await;
        // SignedOut from the provider releases the fence.
        for _ in 0..100 {
            if !f.reconciler.fence().is_logging_out() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(!f.reconciler.fence().is_logging_out());

        shutdown_tx.send(true).unwrap();
        let stats = task.await.unwrap();
        assert_eq!(stats.handled, 2);
    }

    #[tokio::test]
    async fn test_stops_when_bus_closes() {
        let f = fixture();
        let bus = InMemoryEventBus::new();
        let subscription = bus.subscribe(EventFilter::all());
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let listener = RealtimeEventListener::new(f.reconciler.clone(), subscription);
        let task = tokio::spawn(listener.run(shutdown_rx));

        drop(bus);
        let stats = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("listener stopped")
            .unwrap();
        assert_eq!(stats, ListenerStats::default());
    }
}

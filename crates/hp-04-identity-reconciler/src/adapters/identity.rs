//! In-memory identity provider backed by the shared identity bus.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use shared_bus::{EventFilter, EventPublisher, IdentityEvent, InMemoryEventBus, Subscription};
use shared_types::{GatewayError, GatewayResult, Session};

use crate::ports::IdentityProvider;

pub struct InMemoryIdentityProvider {
    bus: Arc<InMemoryEventBus>,
    session: RwLock<Option<Session>>,
    /// Artificial latency of `get_current_session`.
    session_delay: RwLock<Option<Duration>>,
    fail_session: AtomicBool,
    fail_sign_out: AtomicBool,
    sign_out_calls: AtomicU64,
}

impl InMemoryIdentityProvider {
    pub fn new(bus: Arc<InMemoryEventBus>) -> Self {
        Self {
            bus,
            session: RwLock::new(None),
            session_delay: RwLock::new(None),
            fail_session: AtomicBool::new(false),
            fail_sign_out: AtomicBool::new(false),
            sign_out_calls: AtomicU64::new(0),
        }
    }

    /// Start with a restored session.
    #[must_use]
    pub fn with_session(self, session: Session) -> Self {
        *self.session.write() = Some(session);
        self
    }

    /// Replace the stored session without notifying anyone.
    pub fn set_session(&self, session: Option<Session>) {
        *self.session.write() = session;
    }

    pub fn set_session_delay(&self, delay: Option<Duration>) {
        *self.session_delay.write() = delay;
    }

    pub fn set_fail_session(&self, fail: bool) {
        self.fail_session.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    pub fn sign_out_calls(&self) -> u64 {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    /// Complete a fresh sign-in and notify subscribers.
    pub async fn sign_in(&self, session: Session) {
        *self.session.write() = Some(session.clone());
        self.bus.publish(IdentityEvent::signed_in(session)).await;
    }

    /// Refresh the current session's token and notify subscribers.
    pub async fn refresh(&self) {
        let current = self.session.read().clone();
        if let Some(session) = current {
            self.bus.publish(IdentityEvent::token_refreshed(session)).await;
        }
    }

    /// Deliver an arbitrary, possibly stale, notification.
    pub async fn emit(&self, event: IdentityEvent) {
        self.bus.publish(event).await;
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn get_current_session(&self) -> GatewayResult<Option<Session>> {
        let delay = *self.session_delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_session.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("identity provider offline".into()));
        }
        Ok(self.session.read().clone())
    }

    fn subscribe_to_session_changes(&self) -> Subscription {
        self.bus.subscribe(EventFilter::all())
    }

    async fn sign_out(&self) -> GatewayResult<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("sign-out rejected".into()));
        }
        *self.session.write() = None;
        let receivers = self.bus.publish(IdentityEvent::signed_out()).await;
        debug!(receivers, "Provider session ended");
        Ok(())
    }
}

//! In-memory backend gateway.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use shared_types::{GatewayError, GatewayResult, Order, User};

use crate::ports::BackendGateway;

#[derive(Default)]
pub struct InMemoryBackend {
    users: RwLock<HashMap<String, User>>,
    orders: RwLock<HashMap<String, Vec<Order>>>,
    marker: RwLock<Option<String>>,
    lookup_delay: RwLock<Option<Duration>>,
    failing: AtomicBool,
    lookups: AtomicU64,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, user: User) {
        self.users.write().insert(user.id.clone(), user);
    }

    pub fn insert_orders(&self, user_id: &str, orders: Vec<Order>) {
        self.orders.write().insert(user_id.to_string(), orders);
    }

    /// Make every call fail with `Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Artificial latency of profile lookups.
    pub fn set_lookup_delay(&self, delay: Option<Duration>) {
        *self.lookup_delay.write() = delay;
    }

    pub fn marker(&self) -> Option<String> {
        self.marker.read().clone()
    }

    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> GatewayResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("backend offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl BackendGateway for InMemoryBackend {
    async fn get_user_by_id(&self, user_id: &str) -> GatewayResult<Option<User>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let delay = *self.lookup_delay.read();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_available()?;
        Ok(self.users.read().get(user_id).cloned())
    }

    async fn get_orders_for_user(&self, user_id: &str) -> GatewayResult<Vec<Order>> {
        self.check_available()?;
        Ok(self.orders.read().get(user_id).cloned().unwrap_or_default())
    }

    async fn set_current_user_id_marker(&self, user_id: Option<&str>) -> GatewayResult<()> {
        self.check_available()?;
        *self.marker.write() = user_id.map(str::to_string);
        Ok(())
    }

    async fn get_current_user_id_marker(&self) -> GatewayResult<Option<String>> {
        self.check_available()?;
        Ok(self.marker.read().clone())
    }
}

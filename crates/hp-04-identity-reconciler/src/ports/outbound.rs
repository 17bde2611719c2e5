//! Outbound ports (Driven ports) for the identity reconciler.
//!
//! The hydrator drives the same ports during boot.

use async_trait::async_trait;
use shared_bus::Subscription;
use shared_types::{GatewayResult, Order, Session, User};

/// Remote identity provider. Its protocol (OAuth, OTP) is opaque.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Session restored from the provider's own storage, if any.
    async fn get_current_session(&self) -> GatewayResult<Option<Session>>;

    /// Stream of session-changed notifications. Dropping it unsubscribes.
    fn subscribe_to_session_changes(&self) -> Subscription;

    /// End the provider session. A `SignedOut` notification follows.
    async fn sign_out(&self) -> GatewayResult<()>;
}

/// Remote profile and order storage.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Rich profile for `user_id`. `Ok(None)` when unknown.
    async fn get_user_by_id(&self, user_id: &str) -> GatewayResult<Option<User>>;

    async fn get_orders_for_user(&self, user_id: &str) -> GatewayResult<Vec<Order>>;

    /// Remember (or forget, with `None`) which user this client belongs to.
    async fn set_current_user_id_marker(&self, user_id: Option<&str>) -> GatewayResult<()>;

    async fn get_current_user_id_marker(&self) -> GatewayResult<Option<String>>;
}

/// The address bar.
pub trait UrlSideChannel: Send + Sync {
    fn current_url(&self) -> String;

    /// Replace the visible URL without reloading.
    fn replace_url(&self, url: &str);
}

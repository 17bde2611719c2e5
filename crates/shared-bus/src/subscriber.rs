//! # Event Subscriber
//!
//! Defines the subscription side of the identity event bus.

use crate::events::{EventFilter, IdentityEvent};
use tokio::sync::broadcast;
use tracing::debug;

/// Result of waiting for the next event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// A matching event.
    Event(IdentityEvent),
    /// The subscriber fell behind and `n` events were dropped.
    Lagged(u64),
}

/// A subscription handle for receiving identity events.
///
/// Dropping it is the unsubscribe operation.
pub struct Subscription {
    receiver: broadcast::Receiver<IdentityEvent>,
    filter: EventFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<IdentityEvent>, filter: EventFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next matching event, skipping over lag.
    ///
    /// Returns `None` once the bus is dropped.
    pub async fn recv(&mut self) -> Option<IdentityEvent> {
        loop {
            match self.recv_or_lag().await? {
                Received::Event(event) => return Some(event),
                Received::Lagged(_) => continue,
            }
        }
    }

    /// Receive the next matching event, surfacing lag to the caller.
    pub async fn recv_or_lag(&mut self) -> Option<Received> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, identity events dropped");
                    return Some(Received::Lagged(count));
                }
            };

            if self.filter.matches(&event) {
                return Some(Received::Event(event));
            }
        }
    }
}

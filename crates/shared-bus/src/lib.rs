//! # Shared Bus - Identity Event Stream
//!
//! Carries the identity provider's "session changed" notifications to every
//! interested subsystem for the lifetime of the application.
//!
//! ```text
//! ┌───────────────────┐                    ┌──────────────────────┐
//! │ Identity provider │    publish()       │ Realtime listener    │
//! │ adapter           │ ──────┐            │ (hp-04)              │
//! └───────────────────┘       │            └──────────────────────┘
//!                             ▼                    ↑
//!                       ┌──────────────┐          │
//!                       │  Event Bus   │ ─────────┘
//!                       └──────────────┘  subscribe()
//! ```
//!
//! Delivery is unordered with respect to the real world: a stale "signed in"
//! may arrive after a "signed out". Consumers must not assume otherwise.

#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{AuthEventKind, EventFilter, IdentityEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Received, Subscription};

/// Maximum events to buffer per subscriber before lag.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

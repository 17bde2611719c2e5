//! # Identity Reconciler (hp-04)
//!
//! Reconciles identity provider notifications with application state.
//!
//! ## Responsibilities
//!
//! | Concern | Where |
//! |---------|-------|
//! | Logout fence | `domain::fence` |
//! | Profile precedence and salvage | `service::IdentityReconciler` |
//! | Auth artifacts in the address bar | `domain::url_artifacts`, `service::scrub_url` |
//! | Long-lived subscription | `listener::RealtimeEventListener` |
//!
//! ## Profile precedence
//!
//! A backend profile beats a rich in-memory user, which beats a rich cache
//! snapshot, which beats a skeleton built from the session. Skeletons are
//! only created for fresh sign-ins, never for token refreshes.
//!
//! ## Logout
//!
//! Local state is cleared before the provider is told, and the fence stays
//! raised until the provider confirms with `SignedOut`. Any stale sign-in
//! that arrives in between is ignored.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod listener;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryBackend, InMemoryIdentityProvider, InMemoryUrlBar};
pub use domain::{
    strip_auth_artifacts, FenceState, IgnoreReason, LogoutFence, ReconcileOutcome, SalvageSource,
    StrippedUrl,
};
pub use error::{ReconcileError, ReconcileResult};
pub use listener::{ListenerStats, RealtimeEventListener};
pub use ports::{BackendGateway, IdentityProvider, IdentityReconcilerApi, UrlSideChannel};
pub use service::{scrub_url, IdentityReconciler, SessionPorts};

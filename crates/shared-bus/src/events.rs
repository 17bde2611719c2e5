//! # Identity Events
//!
//! Defines the notifications the identity provider emits for the lifetime of
//! the application. Arrival order is not guaranteed to match real-world
//! order; consumers rely on the reconciler's fence and precedence rules.

use serde::{Deserialize, Serialize};
use shared_types::entities::Session;

/// Kind of identity change reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEventKind {
    /// Session restored when the subscription is first established.
    InitialSession,
    /// Explicit, fresh sign-in.
    SignedIn,
    /// Access token refreshed for an existing session.
    TokenRefreshed,
    /// Provider-side profile attributes changed.
    UserUpdated,
    /// Sign-out confirmed by the provider.
    SignedOut,
}

impl AuthEventKind {
    /// Only an explicit sign-in may install a skeleton profile.
    #[must_use]
    pub fn is_fresh_sign_in(self) -> bool {
        matches!(self, Self::SignedIn)
    }

    #[must_use]
    pub fn is_sign_out(self) -> bool {
        matches!(self, Self::SignedOut)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialSession => "initial_session",
            Self::SignedIn => "signed_in",
            Self::TokenRefreshed => "token_refreshed",
            Self::UserUpdated => "user_updated",
            Self::SignedOut => "signed_out",
        }
    }
}

/// One `(kind, session|null)` notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityEvent {
    pub kind: AuthEventKind,
    pub session: Option<Session>,
}

impl IdentityEvent {
    #[must_use]
    pub fn new(kind: AuthEventKind, session: Option<Session>) -> Self {
        Self { kind, session }
    }

    #[must_use]
    pub fn signed_in(session: Session) -> Self {
        Self::new(AuthEventKind::SignedIn, Some(session))
    }

    #[must_use]
    pub fn token_refreshed(session: Session) -> Self {
        Self::new(AuthEventKind::TokenRefreshed, Some(session))
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self::new(AuthEventKind::SignedOut, None)
    }

    /// Id of the session carried by the event, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.id.as_str())
    }
}

/// Filter for subscribing to specific event kinds.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Kinds to include. Empty means all kinds.
    pub kinds: Vec<AuthEventKind>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific kinds.
    #[must_use]
    pub fn kinds(kinds: Vec<AuthEventKind>) -> Self {
        Self { kinds }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &IdentityEvent) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&event.kind)
    }
}

//! # Identity Reconciler Service
//!
//! Turns identity notifications into store actions.
//!
//! ## Precedence
//!
//! ```text
//! fence raised ─────────────────────────────→ ignore (SignedOut releases)
//! SignedOut ────────────────────────────────→ clear markers, LOGOUT
//! session ──→ backend profile found ────────→ LOGIN_SUCCESS(profile, orders)
//!         └─→ rich user in memory ──────────→ LOGIN_SUCCESS(that user)
//!         └─→ rich cache snapshot ──────────→ LOGIN_SUCCESS(snapshot)
//!         └─→ SignedIn ─────────────────────→ LOGIN_SUCCESS(skeleton)
//!         └─→ refresh-like ─────────────────→ no-op
//! ```
//!
//! The fence is re-checked after every await: a logout that starts while a
//! lookup is pending always wins.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use hp_01_persistence_cache::PersistenceCache;
use hp_03_state_store::{Action, LoginPayload, StateStoreApi};
use portal_telemetry::RECONCILER_DECISIONS;
use shared_bus::{AuthEventKind, IdentityEvent};
use shared_types::{Session, User};

use crate::domain::{
    strip_auth_artifacts, IgnoreReason, LogoutFence, ReconcileOutcome, SalvageSource, StrippedUrl,
};
use crate::error::{ReconcileError, ReconcileResult};
use crate::ports::{BackendGateway, IdentityProvider, IdentityReconcilerApi, UrlSideChannel};

/// Remove authentication artifacts from the address bar, if any.
pub fn scrub_url(channel: &dyn UrlSideChannel) -> Option<StrippedUrl> {
    let stripped = strip_auth_artifacts(&channel.current_url())?;
    channel.replace_url(&stripped.url);
    debug!(redirect = stripped.redirect_detected, "Authentication artifacts removed from URL");
    Some(stripped)
}

/// External collaborators shared by the reconciler and the boot hydrator.
#[derive(Clone)]
pub struct SessionPorts {
    pub store: Arc<dyn StateStoreApi>,
    pub provider: Arc<dyn IdentityProvider>,
    pub backend: Arc<dyn BackendGateway>,
    pub url: Arc<dyn UrlSideChannel>,
    pub cache: Option<Arc<PersistenceCache>>,
}

pub struct IdentityReconciler {
    deps: SessionPorts,
    fence: Arc<LogoutFence>,
}

impl IdentityReconciler {
    pub fn new(deps: SessionPorts) -> Self {
        Self::with_fence(deps, Arc::new(LogoutFence::new()))
    }

    pub fn with_fence(deps: SessionPorts, fence: Arc<LogoutFence>) -> Self {
        Self { deps, fence }
    }

    pub fn fence(&self) -> Arc<LogoutFence> {
        Arc::clone(&self.fence)
    }

    fn fenced(&self) -> bool {
        self.fence.is_logging_out()
    }

    async fn decide(&self, event: IdentityEvent) -> ReconcileOutcome {
        if event.kind.is_sign_out() {
            if self.fence.end_logout() {
                info!("Sign-out confirmed, logout fence released");
            }
            self.finish_logout().await;
            return ReconcileOutcome::LoggedOut;
        }

        if self.fenced() {
            return ReconcileOutcome::Ignored(IgnoreReason::LogoutInProgress);
        }

        match event.session {
            Some(session) => self.sign_in(event.kind, session).await,
            None => ReconcileOutcome::Ignored(IgnoreReason::NoSession),
        }
    }

    async fn sign_in(&self, kind: AuthEventKind, session: Session) -> ReconcileOutcome {
        let user_id = session.id.clone();

        if let Err(e) = self
            .deps
            .backend
            .set_current_user_id_marker(Some(&user_id))
            .await
        {
            warn!(user_id = %user_id, error = %e, "Failed to persist user id marker");
        }
        if self.fenced() {
            return ReconcileOutcome::Ignored(IgnoreReason::SupersededByLogout);
        }

        scrub_url(self.deps.url.as_ref());

        let profile = match self.deps.backend.get_user_by_id(&user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Profile lookup failed, trying local sources");
                None
            }
        };
        if self.fenced() {
            return ReconcileOutcome::Ignored(IgnoreReason::SupersededByLogout);
        }

        if let Some(user) = profile {
            let orders = match self.deps.backend.get_orders_for_user(&user_id).await {
                Ok(orders) => Some(orders),
                Err(e) => {
                    warn!(user_id = %user_id, error = %e, "Order lookup failed");
                    None
                }
            };
            if self.fenced() {
                return ReconcileOutcome::Ignored(IgnoreReason::SupersededByLogout);
            }

            self.deps.store.dispatch(Action::LoginSuccess(LoginPayload {
                user,
                orders,
                keep_open: false,
            }));
            return ReconcileOutcome::Backend;
        }

        if let Some((user, source)) = self.salvage(&user_id) {
            self.deps
                .store
                .dispatch(Action::LoginSuccess(LoginPayload::new(user)));
            return ReconcileOutcome::Salvaged(source);
        }

        if kind.is_fresh_sign_in() {
            self.deps
                .store
                .dispatch(Action::LoginSuccess(LoginPayload::new(
                    User::skeleton_from_session(&session),
                )));
            return ReconcileOutcome::Skeleton;
        }

        ReconcileOutcome::Ignored(IgnoreReason::NoProfile)
    }

    /// A previously known rich profile for `user_id`.
    fn salvage(&self, user_id: &str) -> Option<(User, SalvageSource)> {
        if let Some(user) = self.deps.store.current_user() {
            if user.id == user_id && user.is_rich() {
                return Some((user, SalvageSource::InMemory));
            }
        }
        self.deps
            .cache
            .as_ref()
            .and_then(|cache| cache.load_user(user_id))
            .filter(User::is_rich)
            .map(|user| (user, SalvageSource::Cache))
    }

    /// Clear every "who is this client" marker and the session.
    async fn finish_logout(&self) {
        self.deps.store.dispatch(Action::Logout);
        self.clear_markers().await;
    }

    async fn clear_markers(&self) {
        if let Err(e) = self.deps.backend.set_current_user_id_marker(None).await {
            warn!(error = %e, "Failed to clear user id marker");
        }
        if let Some(cache) = &self.deps.cache {
            if let Err(e) = cache.clear_last_active_user_id() {
                warn!(error = %e, "Failed to clear last active user marker");
            }
        }
    }
}

#[async_trait]
impl IdentityReconcilerApi for IdentityReconciler {
    async fn handle_event(&self, event: IdentityEvent) -> ReconcileOutcome {
        let kind = event.kind;
        let user_id = event.user_id().map(str::to_owned);

        let outcome = self.decide(event).await;

        RECONCILER_DECISIONS
            .with_label_values(&[outcome.label()])
            .inc();
        debug!(
            event_kind = kind.as_str(),
            user_id = ?user_id,
            outcome = outcome.label(),
            "Identity event reconciled"
        );
        outcome
    }

    async fn logout(&self) -> ReconcileResult<()> {
        self.fence.begin_logout();
        self.deps.store.dispatch(Action::Logout);
        self.clear_markers().await;

        match self.deps.provider.sign_out().await {
            Ok(()) => {
                info!("Logout requested, awaiting provider confirmation");
                Ok(())
            }
            Err(e) => {
                self.fence.end_logout();
                warn!(error = %e, "Provider sign-out failed, fence released locally");
                Err(ReconcileError::SignOutFailed(e))
            }
        }
    }
}

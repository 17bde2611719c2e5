//! # Session Hydrator Service
//!
//! ## Boot sequence
//!
//! ```text
//! get_current_session() ──(deadline)──→ session?
//!        │ yes: install skeleton right away
//!        ▼
//! user id ← session | backend marker | cache last-active | second check
//!        │
//!        ▼
//! profile ← backend | cache snapshot | skeleton
//! catalogs ← non-empty cache slot | bundled defaults
//!        │
//!        ▼
//! LOAD_INITIAL_DATA ──→ scrub URL ──→ SET_VIEW(ProfileCompletion) on redirect
//! ```
//!
//! The realtime listener runs alongside and may overwrite whatever the
//! hydrator installs. A skeleton never replaces a full profile the listener
//! put in place first. A raised logout fence suppresses the user.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use hp_01_persistence_cache::PersistenceCache;
use hp_03_state_store::{Action, InitialData, StateStoreApi, View};
use hp_04_identity_reconciler::{scrub_url, LogoutFence, SessionPorts};
use portal_telemetry::{HistogramTimer, HYDRATION_DURATION, HYDRATION_OUTCOMES};
use shared_types::{
    bundled_palm_types, bundled_products, Order, PalmType, Product, Session, User, UserId,
};

use crate::config::HydrationConfig;
use crate::domain::{HydrationReport, IdSource, ProfileSource};
use crate::error::{HydrationError, HydrationResult};
use crate::ports::SessionHydratorApi;

pub struct SessionHydrator {
    ports: SessionPorts,
    config: HydrationConfig,
    fence: Option<Arc<LogoutFence>>,
    ran: AtomicBool,
}

impl SessionHydrator {
    pub fn new(ports: SessionPorts, config: HydrationConfig) -> Self {
        Self {
            ports,
            config,
            fence: None,
            ran: AtomicBool::new(false),
        }
    }

    /// Share the reconciler's logout fence.
    #[must_use]
    pub fn with_fence(mut self, fence: Arc<LogoutFence>) -> Self {
        self.fence = Some(fence);
        self
    }

    pub fn has_run(&self) -> bool {
        self.ran.load(Ordering::SeqCst)
    }

    fn logging_out(&self) -> bool {
        self.fence.as_ref().is_some_and(|f| f.is_logging_out())
    }

    fn cache(&self) -> Option<&PersistenceCache> {
        self.ports.cache.as_deref()
    }

    /// One bounded remote session check. Timeouts and provider errors both
    /// resolve to "no session".
    async fn check_session(&self, report: &mut HydrationReport) -> Option<Session> {
        match timeout(
            self.config.session_timeout,
            self.ports.provider.get_current_session(),
        )
        .await
        {
            Ok(Ok(session)) => session,
            Ok(Err(e)) => {
                warn!(error = %e, "Session check failed, continuing without session");
                None
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.session_timeout.as_millis() as u64,
                    "Session check timed out, continuing without session"
                );
                report.session_timed_out = true;
                None
            }
        }
    }

    async fn resolve_user_id(
        &self,
        session: &mut Option<Session>,
        report: &mut HydrationReport,
    ) -> Option<(UserId, IdSource)> {
        if let Some(session) = session.as_ref() {
            return Some((session.id.clone(), IdSource::Session));
        }

        match self.ports.backend.get_current_user_id_marker().await {
            Ok(Some(id)) => return Some((id, IdSource::BackendMarker)),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Backend id marker unavailable"),
        }

        if let Some(id) = self.cache().and_then(PersistenceCache::last_active_user_id) {
            return Some((id, IdSource::CacheLastActive));
        }

        let second = self.check_session(report).await?;
        let id = second.id.clone();
        *session = Some(second);
        Some((id, IdSource::SecondSessionCheck))
    }

    async fn fetch_profile(
        &self,
        user_id: &str,
    ) -> HydrationResult<Option<(User, Option<Vec<Order>>)>> {
        let Some(user) = self.ports.backend.get_user_by_id(user_id).await? else {
            return Ok(None);
        };
        let orders = match self.ports.backend.get_orders_for_user(user_id).await {
            Ok(orders) => Some(orders),
            Err(e) => {
                warn!(user_id, error = %e, "Order history unavailable");
                None
            }
        };
        Ok(Some((user, orders)))
    }

    fn load_catalogs(&self) -> (shared_types::AppSettings, Vec<Product>, Vec<PalmType>) {
        let cache = self.cache();
        let settings = cache
            .and_then(PersistenceCache::load_settings)
            .filter(|s| !s.is_empty())
            .unwrap_or_default();
        let products = cache
            .and_then(PersistenceCache::load_products)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(bundled_products);
        let palm_types = cache
            .and_then(PersistenceCache::load_palm_types)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(bundled_palm_types);
        (settings, products, palm_types)
    }

    async fn hydrate(&self) -> HydrationReport {
        let mut report = HydrationReport::default();
        let store = &self.ports.store;

        let mut session = self.check_session(&mut report).await;
        let skeleton = session.as_ref().map(User::skeleton_from_session);

        if let Some(skeleton) = &skeleton {
            let already_installed = store.current_user().is_some_and(|u| u.id == skeleton.id);
            if !already_installed && !self.logging_out() {
                debug!(user_id = %skeleton.id, "Installing session skeleton");
                store.dispatch(Action::SetUser(Some(skeleton.clone())));
            }
        }

        let mut user = None;
        let mut orders = None;

        if let Some((user_id, id_source)) = self.resolve_user_id(&mut session, &mut report).await {
            debug!(user_id = %user_id, ?id_source, "Current user id resolved");
            report.user_id = Some(user_id.clone());
            report.id_source = Some(id_source);

            match self.fetch_profile(&user_id).await {
                Ok(Some((profile, history))) => {
                    report.source = ProfileSource::Backend;
                    user = Some(profile);
                    orders = history;
                }
                Ok(None) => {}
                Err(e) => {
                    error!(
                        user_id = %user_id,
                        error = %e,
                        "Profile lookup failed, falling back to cache"
                    );
                    report.error = Some(e.to_string());
                }
            }

            if user.is_none() {
                // A bare snapshot adds nothing over the session's own skeleton.
                let snapshot = self
                    .cache()
                    .and_then(|c| c.load_user(&user_id))
                    .filter(|u| u.is_rich() || session.is_none());
                if let Some(snapshot) = snapshot {
                    report.source = ProfileSource::Cache;
                    user = Some(snapshot);
                }
            }
        }

        if user.is_none() {
            // A session found only by the second check has no skeleton yet.
            let fallback = skeleton.or_else(|| session.as_ref().map(User::skeleton_from_session));
            if let Some(fallback) = fallback {
                report.user_id = Some(fallback.id.clone());
                let installed = store
                    .current_user()
                    .is_some_and(|u| u.id == fallback.id && u.is_rich());
                if installed {
                    debug!(user_id = %fallback.id, "Listener already installed a full profile");
                    report.source = ProfileSource::Realtime;
                } else {
                    report.source = ProfileSource::Skeleton;
                    user = Some(fallback);
                }
            }
        }

        if self.logging_out() {
            info!("Logout in progress, hydration leaves the session empty");
            user = None;
            orders = None;
            report.source = ProfileSource::None;
        }

        let (settings, products, palm_types) = self.load_catalogs();
        store.dispatch(Action::LoadInitialData(InitialData {
            user,
            orders,
            settings: Some(settings),
            products: Some(products),
            palm_types: Some(palm_types),
            all_users: None,
        }));

        if let Some(stripped) = scrub_url(self.ports.url.as_ref()) {
            if stripped.redirect_detected {
                report.redirect_detected = true;
                store.dispatch(Action::SetView(View::ProfileCompletion));
            }
        }

        report
    }
}

#[async_trait]
impl SessionHydratorApi for SessionHydrator {
    async fn run(&self) -> HydrationResult<HydrationReport> {
        if self.ran.swap(true, Ordering::SeqCst) {
            return Err(HydrationError::AlreadyRan);
        }

        let _timer = HistogramTimer::new(&HYDRATION_DURATION);
        let report = self.hydrate().await;

        HYDRATION_OUTCOMES
            .with_label_values(&[report.source.label()])
            .inc();
        info!(
            source = report.source.label(),
            user_id = ?report.user_id,
            timed_out = report.session_timed_out,
            redirect = report.redirect_detected,
            "Session hydration complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hp_01_persistence_cache::InMemoryLocalStore;
    use hp_03_state_store::{AppState, StateStore};
    use hp_04_identity_reconciler::{
        BackendGateway, InMemoryBackend, InMemoryIdentityProvider, InMemoryUrlBar,
    };
    use shared_bus::InMemoryEventBus;
    use shared_types::{AppSettings, Session};
    use std::time::Duration;

    struct Harness {
        store: Arc<StateStore>,
        provider: Arc<InMemoryIdentityProvider>,
        backend: Arc<InMemoryBackend>,
        url: Arc<InMemoryUrlBar>,
        cache: Arc<PersistenceCache>,
    }

    impl Harness {
        fn new(start_url: &str) -> Self {
            let cache = Arc::new(PersistenceCache::new(Arc::new(InMemoryLocalStore::new())));
            Self {
                store: Arc::new(StateStore::new(AppState::default()).with_cache(cache.clone())),
                provider: Arc::new(InMemoryIdentityProvider::new(Arc::new(
                    InMemoryEventBus::new(),
                ))),
                backend: Arc::new(InMemoryBackend::new()),
                url: Arc::new(InMemoryUrlBar::new(start_url)),
                cache,
            }
        }

        fn ports(&self, cache: Option<Arc<PersistenceCache>>) -> SessionPorts {
            SessionPorts {
                store: self.store.clone(),
                provider: self.provider.clone(),
                backend: self.backend.clone(),
                url: self.url.clone(),
                cache,
            }
        }

        fn hydrator(&self) -> SessionHydrator {
            SessionHydrator::new(self.ports(Some(self.cache.clone())), HydrationConfig::default())
        }
    }

    fn session() -> Session {
        Session::with_email("u1", "sara@example.com")
    }

    #[tokio::test]
    async fn test_runs_once() {
        let h = Harness::new("https://portal.example/");
        let hydrator = h.hydrator();
        hydrator.run().await.unwrap();
        assert!(matches!(hydrator.run().await, Err(HydrationError::AlreadyRan)));
        assert!(hydrator.has_run());
    }

    #[tokio::test]
    async fn test_backend_profile_from_session() {
        let h = Harness::new("https://portal.example/");
        h.provider.set_session(Some(session()));
        h.backend.insert_user(User::new("u1").named("Sara A."));

        let report = h.hydrator().run().await.unwrap();

        assert_eq!(report.source, ProfileSource::Backend);
        assert_eq!(report.id_source, Some(IdSource::Session));
        let state = h.store.snapshot();
        assert_eq!(state.user.unwrap().full_name, "Sara A.");
        assert!(!state.products.is_empty());
        assert!(!state.palm_types.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back_to_cache_snapshot() {
        let h = Harness::new("https://portal.example/");
        h.provider.set_session(Some(session()));
        h.provider.set_session_delay(Some(Duration::from_secs(30)));
        let mut cached = User::new("u1").named("Sara A.");
        cached.points = 250;
        h.cache.save_user(&cached).unwrap();
        h.cache.set_last_active_user_id("u1").unwrap();
        h.backend.set_failing(true);

        let report = h.hydrator().run().await.unwrap();

        assert!(report.session_timed_out);
        assert_eq!(report.id_source, Some(IdSource::CacheLastActive));
        assert_eq!(report.source, ProfileSource::Cache);
        assert!(report.error.is_some());
        let state = h.store.snapshot();
        assert!(state.is_authenticated);
        let user = state.user.unwrap();
        assert_eq!(user.points, 250);
        assert_eq!(user.full_name, "Sara A.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_sources_stays_anonymous() {
        let h = Harness::new("https://portal.example/");
        h.provider.set_session_delay(Some(Duration::from_secs(30)));

        let report = h.hydrator().run().await.unwrap();

        assert_eq!(report.source, ProfileSource::None);
        assert!(!h.store.snapshot().is_authenticated);
    }

    #[tokio::test]
    async fn test_skeleton_when_backend_and_cache_empty() {
        let h = Harness::new("https://portal.example/");
        h.provider.set_session(Some(session()));

        let report = h.hydrator().run().await.unwrap();

        assert_eq!(report.source, ProfileSource::Skeleton);
        let user = h.store.snapshot().user.unwrap();
        assert_eq!(user.email.as_deref(), Some("sara@example.com"));
    }

    #[tokio::test]
    async fn test_backend_marker_resolves_id() {
        let h = Harness::new("https://portal.example/");
        h.backend.insert_user(User::new("u2").named("Omar B."));
        h.backend.set_current_user_id_marker(Some("u2")).await.unwrap();

        let report = h.hydrator().run().await.unwrap();

        assert_eq!(report.id_source, Some(IdSource::BackendMarker));
        assert_eq!(h.store.snapshot().user.unwrap().id, "u2");
    }

    #[tokio::test]
    async fn test_cached_settings_preferred() {
        let h = Harness::new("https://portal.example/");
        let settings = AppSettings {
            daily_chest_amount: 25,
            ..AppSettings::default()
        };
        h.cache.save_settings(&settings).unwrap();
        h.cache.save_products(&[]).unwrap();

        h.hydrator().run().await.unwrap();

        let state = h.store.snapshot();
        assert_eq!(state.settings.daily_chest_amount, 25);
        assert_eq!(state.products, bundled_products());
    }

    #[tokio::test]
    async fn test_redirect_opens_profile_completion() {
        let h = Harness::new("https://portal.example/?code=abc&state=1");
        h.provider.set_session(Some(session()));

        let report = h.hydrator().run().await.unwrap();

        assert!(report.redirect_detected);
        assert_eq!(h.store.snapshot().ui.view, View::ProfileCompletion);
        assert_eq!(h.url.replacements(), vec!["https://portal.example/?state=1".to_string()]);
    }

    #[tokio::test]
    async fn test_fence_suppresses_user() {
        let h = Harness::new("https://portal.example/");
        h.provider.set_session(Some(session()));
        h.backend.insert_user(User::new("u1").named("Sara A."));
        let fence = Arc::new(LogoutFence::new());
        fence.begin_logout();

        let report = h.hydrator().with_fence(fence).run().await.unwrap();

        assert_eq!(report.source, ProfileSource::None);
        assert!(h.store.snapshot().user.is_none());
    }

    #[tokio::test]
    async fn test_claimed_name_session_restores_cached_ledger() {
        let h = Harness::new("https://portal.example/");
        let mut claimed = session();
        claimed.claims.display_name = Some("Sara Google".into());
        h.provider.set_session(Some(claimed));
        let mut cached = User::new("u1").named("Sara A.");
        cached.points = 250;
        h.cache.save_user(&cached).unwrap();
        h.backend.set_failing(true);

        let report = h.hydrator().run().await.unwrap();

        assert_eq!(report.source, ProfileSource::Cache);
        let user = h.store.snapshot().user.unwrap();
        assert_eq!(user.points, 250);
        assert_eq!(user.full_name, "Sara A.");
        assert_eq!(h.cache.load_user("u1").unwrap().points, 250);
    }

    #[tokio::test]
    async fn test_skeleton_does_not_replace_listener_profile() {
        let h = Harness::new("https://portal.example/");
        h.provider.set_session(Some(session()));
        let mut live = User::new("u1").named("Sara A.");
        live.points = 900;
        h.store.dispatch(Action::SetUser(Some(live)));

        let hydrator = SessionHydrator::new(h.ports(None), HydrationConfig::default());
        let report = hydrator.run().await.unwrap();

        assert_eq!(report.source, ProfileSource::Realtime);
        assert_eq!(report.user_id.as_deref(), Some("u1"));
        let user = h.store.snapshot().user.unwrap();
        assert_eq!(user.points, 900);
        assert_eq!(user.full_name, "Sara A.");
    }
}

//! # Boot Hydration Scenarios
//!
//! The hydrator runs against a real container with the listener already
//! subscribed, exactly as the binary starts.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use hp_01_persistence_cache::PersistenceCache;
    use hp_03_state_store::View;
    use hp_04_identity_reconciler::IdentityReconcilerApi;
    use hp_05_session_hydrator::{IdSource, ProfileSource};
    use shared_types::{bundled_palm_types, bundled_products, Order};

    use crate::integration::fixtures::{day, sara, sara_session, signed_in, Engine};

    // =============================================================================
    // SESSION TIMEOUT + CACHE
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_session_restores_cached_snapshot() {
        let engine = Engine::new();
        let cache = PersistenceCache::new(engine.local.clone());
        cache.save_user(&sara()).unwrap();
        cache.set_last_active_user_id("u1").unwrap();

        engine.container.provider.set_session(Some(sara_session()));
        engine
            .container
            .provider
            .set_session_delay(Some(Duration::from_secs(60)));

        let report = engine.runtime.start().await.unwrap();

        assert!(report.session_timed_out);
        assert_eq!(report.id_source, Some(IdSource::CacheLastActive));
        assert_eq!(report.source, ProfileSource::Cache);

        let state = engine.state();
        assert!(state.is_authenticated);
        let user = state.user.unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.points, 250);
        assert_eq!(user.full_name, "Sara A.");
        assert_eq!(state.products, bundled_products());
        assert_eq!(state.palm_types, bundled_palm_types());

        engine.runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_provider_display_name_does_not_erase_cached_ledger() {
        let engine = Engine::new();
        let cache = PersistenceCache::new(engine.local.clone());
        cache.save_user(&sara()).unwrap();

        let mut session = sara_session();
        session.claims.display_name = Some("Sara Google".into());
        engine.container.provider.set_session(Some(session));
        engine.container.backend.set_failing(true);

        let report = engine.runtime.start().await.unwrap();

        assert_eq!(report.source, ProfileSource::Cache);
        let user = engine.state().user.unwrap();
        assert_eq!(user.points, 250);
        assert_eq!(user.full_name, "Sara A.");
        assert_eq!(cache.load_user("u1").unwrap().points, 250);

        engine.runtime.shutdown().await;
    }

    // =============================================================================
    // BACKEND PROFILE
    // =============================================================================

    #[tokio::test]
    async fn test_session_restores_backend_profile_and_orders() {
        let engine = Engine::new();
        engine.container.provider.set_session(Some(sara_session()));
        engine.container.backend.insert_user(sara());
        engine
            .container
            .backend
            .insert_orders("u1", vec![Order::from_cart("o1", "u1", &[], day(3))]);

        let report = engine.runtime.start().await.unwrap();

        assert_eq!(report.source, ProfileSource::Backend);
        let state = engine.state();
        assert_eq!(state.user.unwrap().full_name, "Sara A.");
        assert_eq!(state.orders.len(), 1);

        engine.runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_oauth_redirect_opens_profile_completion() {
        let engine = Engine::with_start_url("https://portal.example/#access_token=t&type=bearer");
        engine.container.provider.set_session(Some(sara_session()));

        let report = engine.runtime.start().await.unwrap();

        assert!(report.redirect_detected);
        assert_eq!(report.source, ProfileSource::Skeleton);
        assert_eq!(engine.state().ui.view, View::ProfileCompletion);
        assert_eq!(engine.container.url.replacements(), vec!["https://portal.example/".to_string()]);

        engine.runtime.shutdown().await;
    }

    // =============================================================================
    // RELOAD
    // =============================================================================

    #[tokio::test]
    async fn test_reload_restores_until_logout() {
        let first = Engine::new();
        first.container.backend.insert_user(sara());
        first.runtime.start().await.unwrap();
        first.container.provider.sign_in(sara_session()).await;
        first.wait_until(signed_in).await;
        first.runtime.shutdown().await;

        // Identity provider unreachable after reload: the cache carries the session.
        let reloaded = Engine::with_local(first.local.clone());
        let report = reloaded.runtime.start().await.unwrap();
        assert_eq!(report.source, ProfileSource::Cache);
        assert_eq!(reloaded.state().user.unwrap().full_name, "Sara A.");

        reloaded.container.reconciler.logout().await.unwrap();
        assert!(!reloaded.state().is_authenticated);
        reloaded.runtime.shutdown().await;

        let after_logout = Engine::with_local(Arc::clone(&first.local));
        let report = after_logout.runtime.start().await.unwrap();
        assert_eq!(report.source, ProfileSource::None);
        assert!(!after_logout.state().is_authenticated);
        after_logout.runtime.shutdown().await;
    }
}

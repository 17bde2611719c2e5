//! # Profile Precedence Scenarios
//!
//! backend > rich in-memory user > rich cache snapshot > skeleton, with
//! skeletons reserved for fresh sign-ins.

#[cfg(test)]
mod tests {
    use hp_01_persistence_cache::PersistenceCache;
    use hp_03_state_store::{Action, StateStoreApi};
    use hp_04_identity_reconciler::{
        IdentityReconcilerApi, IgnoreReason, ReconcileOutcome, SalvageSource,
    };
    use shared_bus::IdentityEvent;
    use shared_types::DEFAULT_DISPLAY_NAME;

    use crate::integration::fixtures::{current, sara, sara_session, Engine};

    #[tokio::test]
    async fn test_refresh_with_backend_down_keeps_in_memory_user() {
        let engine = Engine::new();
        engine.container.backend.insert_user(sara());
        let reconciler = &engine.container.reconciler;
        reconciler
            .handle_event(IdentityEvent::signed_in(sara_session()))
            .await;

        engine.container.backend.set_failing(true);
        let outcome = reconciler
            .handle_event(IdentityEvent::token_refreshed(sara_session()))
            .await;

        assert_eq!(outcome, ReconcileOutcome::Salvaged(SalvageSource::InMemory));
        assert_eq!(current(engine.store()).points, 250);
    }

    #[tokio::test]
    async fn test_refresh_with_empty_memory_uses_cache() {
        let engine = Engine::new();
        PersistenceCache::new(engine.local.clone())
            .save_user(&sara())
            .unwrap();
        engine.container.backend.set_failing(true);

        let outcome = engine
            .container
            .reconciler
            .handle_event(IdentityEvent::token_refreshed(sara_session()))
            .await;

        assert_eq!(outcome, ReconcileOutcome::Salvaged(SalvageSource::Cache));
        assert_eq!(current(engine.store()).full_name, "Sara A.");
    }

    #[tokio::test]
    async fn test_skeleton_never_downgrades_on_refresh() {
        let engine = Engine::new();
        let reconciler = &engine.container.reconciler;

        let refreshed = reconciler
            .handle_event(IdentityEvent::token_refreshed(sara_session()))
            .await;
        assert_eq!(refreshed, ReconcileOutcome::Ignored(IgnoreReason::NoProfile));
        assert!(engine.state().user.is_none());

        let fresh = reconciler
            .handle_event(IdentityEvent::signed_in(sara_session()))
            .await;
        assert_eq!(fresh, ReconcileOutcome::Skeleton);
        assert_eq!(current(engine.store()).full_name, DEFAULT_DISPLAY_NAME);

        // The backend catches up; the next refresh upgrades the skeleton.
        engine.container.backend.insert_user(sara());
        let upgraded = reconciler
            .handle_event(IdentityEvent::token_refreshed(sara_session()))
            .await;
        assert_eq!(upgraded, ReconcileOutcome::Backend);
        assert_eq!(current(engine.store()).full_name, "Sara A.");
    }

    #[tokio::test]
    async fn test_in_memory_user_for_other_id_is_not_salvaged() {
        let engine = Engine::new();
        let mut other = sara();
        other.id = "u2".into();
        engine.store().dispatch(Action::SetUser(Some(other)));
        engine.container.backend.set_failing(true);

        let outcome = engine
            .container
            .reconciler
            .handle_event(IdentityEvent::token_refreshed(sara_session()))
            .await;

        assert_eq!(outcome, ReconcileOutcome::Ignored(IgnoreReason::NoProfile));
        assert_eq!(current(engine.store()).id, "u2");
    }
}

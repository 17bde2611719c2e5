//! # Logout Fence Scenarios
//!
//! A logout must win against every sign-in notification that was already in
//! flight when it started.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hp_04_identity_reconciler::{
        IdentityReconcilerApi, IgnoreReason, ReconcileError, ReconcileOutcome,
    };
    use shared_bus::IdentityEvent;

    use crate::integration::fixtures::{sara, sara_session, signed_in, Engine};

    #[tokio::test]
    async fn test_fence_sequence() {
        let engine = Engine::new();
        engine.container.backend.insert_user(sara());
        let reconciler = &engine.container.reconciler;

        let outcome = reconciler
            .handle_event(IdentityEvent::signed_in(sara_session()))
            .await;
        assert_eq!(outcome, ReconcileOutcome::Backend);
        assert!(signed_in(&engine.state()));

        reconciler.logout().await.unwrap();
        assert!(!engine.state().is_authenticated);
        assert!(reconciler.fence().is_logging_out());

        // A sign-in emitted before the provider processed the logout.
        let stale = reconciler
            .handle_event(IdentityEvent::signed_in(sara_session()))
            .await;
        assert_eq!(stale, ReconcileOutcome::Ignored(IgnoreReason::LogoutInProgress));
        assert!(engine.state().user.is_none());

        let confirmed = reconciler.handle_event(IdentityEvent::signed_out()).await;
        assert_eq!(confirmed, ReconcileOutcome::LoggedOut);
        assert!(!reconciler.fence().is_logging_out());

        // After the fence drops, a genuine sign-in works again.
        let again = reconciler
            .handle_event(IdentityEvent::signed_in(sara_session()))
            .await;
        assert_eq!(again, ReconcileOutcome::Backend);
        assert!(signed_in(&engine.state()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_during_slow_lookup_through_listener() {
        let engine = Engine::new();
        engine.container.backend.insert_user(sara());
        engine.runtime.start().await.unwrap();
        engine
            .container
            .backend
            .set_lookup_delay(Some(Duration::from_secs(3)));

        engine.container.provider.sign_in(sara_session()).await;
        // Let the listener pick the event up and block on the lookup.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(engine.container.backend.lookups(), 1);

        engine.container.reconciler.logout().await.unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        engine.wait_fence_released().await;

        let state = engine.state();
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert_eq!(engine.container.backend.marker(), None);

        let stats = engine.runtime.shutdown().await.unwrap();
        assert_eq!(stats.handled, 2);
    }

    #[tokio::test]
    async fn test_failed_sign_out_still_logs_out_locally() {
        let engine = Engine::new();
        engine.container.backend.insert_user(sara());
        let reconciler = &engine.container.reconciler;
        reconciler
            .handle_event(IdentityEvent::signed_in(sara_session()))
            .await;
        engine.container.provider.set_fail_sign_out(true);

        let result = reconciler.logout().await;

        assert!(matches!(result, Err(ReconcileError::SignOutFailed(_))));
        assert!(!engine.state().is_authenticated);
        assert!(!reconciler.fence().is_logging_out());
        assert_eq!(engine.container.provider.sign_out_calls(), 1);
    }
}

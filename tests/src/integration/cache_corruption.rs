//! # Cache Corruption Scenarios
//!
//! A corrupt slot is discarded and the next source in the chain is used.

#[cfg(test)]
mod tests {
    use hp_01_persistence_cache::domain::{
        user_backup_key, CacheSlot, LAST_ACTIVE_USER_KEY, PRODUCT_CATALOG_KEY,
    };
    use hp_01_persistence_cache::PersistenceCache;
    use hp_05_session_hydrator::ProfileSource;
    use portal_telemetry::CACHE_CORRUPTIONS;
    use shared_types::bundled_products;

    use crate::integration::fixtures::{sara, sara_session, Engine};

    #[tokio::test]
    async fn test_corrupt_snapshot_is_discarded_at_boot() {
        let engine = Engine::new();
        engine
            .local
            .insert_raw(user_backup_key("u1"), "{\"id\": \"u1\", \"points\": ");
        engine.local.insert_raw(LAST_ACTIVE_USER_KEY, "u1");
        let before = CACHE_CORRUPTIONS
            .with_label_values(&[CacheSlot::UserBackup.label()])
            .get();

        let report = engine.runtime.start().await.unwrap();

        assert_eq!(report.source, ProfileSource::None);
        assert!(!engine.state().is_authenticated);
        assert!(!engine.local.contains(&user_backup_key("u1")));
        let after = CACHE_CORRUPTIONS
            .with_label_values(&[CacheSlot::UserBackup.label()])
            .get();
        assert!(after > before);

        engine.runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_falls_back_to_skeleton() {
        let engine = Engine::new();
        engine.local.insert_raw(user_backup_key("u1"), "not json");
        engine.container.provider.set_session(Some(sara_session()));

        let report = engine.runtime.start().await.unwrap();

        assert_eq!(report.source, ProfileSource::Skeleton);
        assert_eq!(engine.state().user.unwrap().id, "u1");

        engine.runtime.shutdown().await;
    }

    #[tokio::test]
    async fn test_snapshot_under_wrong_id_is_discarded() {
        let engine = Engine::new();
        let mut foreign = sara();
        foreign.id = "u2".into();
        engine.local.insert_raw(
            user_backup_key("u1"),
            serde_json::to_string(&foreign).unwrap(),
        );

        let cache = PersistenceCache::new(engine.local.clone());
        assert!(cache.load_user("u1").is_none());
        assert!(!engine.local.contains(&user_backup_key("u1")));
    }

    #[tokio::test]
    async fn test_corrupt_catalog_uses_bundled() {
        let engine = Engine::new();
        engine.local.insert_raw(PRODUCT_CATALOG_KEY, "[{\"id\": 1");

        engine.runtime.start().await.unwrap();

        assert_eq!(engine.state().products, bundled_products());
        // The write-through replaced the corrupt slot with the bundled catalog.
        let cache = PersistenceCache::new(engine.local.clone());
        assert_eq!(cache.load_products(), Some(bundled_products()));

        engine.runtime.shutdown().await;
    }
}

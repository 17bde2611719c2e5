//! # Persistence Cache Service
//!
//! Typed access to the local store. Never authoritative: every read is a
//! fallback and every unreadable slot is dropped so it cannot poison the
//! next boot.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use portal_telemetry::CACHE_CORRUPTIONS;
use shared_types::{AppSettings, PalmType, Product, User};

use crate::domain::{
    user_backup_key, CacheError, CacheResult, CacheSlot, APP_SETTINGS_KEY, LAST_ACTIVE_USER_KEY,
    PALM_TYPE_CATALOG_KEY, PRODUCT_CATALOG_KEY,
};
use crate::ports::LocalStore;

/// The slices of application state that are mirrored to the cache.
#[derive(Debug, Clone, Copy)]
pub struct CacheView<'a> {
    pub user: Option<&'a User>,
    pub settings: &'a AppSettings,
    pub products: &'a [Product],
    pub palm_types: &'a [PalmType],
}

pub struct PersistenceCache {
    store: Arc<dyn LocalStore>,
}

impl PersistenceCache {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    // USER SNAPSHOTS
    // =========================================================================

    /// Last snapshot written for `user_id`.
    ///
    /// A snapshot recorded under the wrong id counts as corrupt.
    pub fn load_user(&self, user_id: &str) -> Option<User> {
        let key = user_backup_key(user_id);
        let user: User = self.read_slot(&key, CacheSlot::UserBackup)?;
        if user.id != user_id {
            self.discard(&key, CacheSlot::UserBackup, "snapshot id mismatch");
            return None;
        }
        Some(user)
    }

    fn has_user(&self, user_id: &str) -> bool {
        matches!(self.store.get(&user_backup_key(user_id)), Ok(Some(_)))
    }

    pub fn save_user(&self, user: &User) -> CacheResult<()> {
        self.write_slot(&user_backup_key(&user.id), user)
    }

    // =========================================================================
    // LAST ACTIVE MARKER
    // =========================================================================

    pub fn last_active_user_id(&self) -> Option<String> {
        match self.store.get(LAST_ACTIVE_USER_KEY) {
            Ok(value) => value.filter(|id| !id.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read last active user marker");
                None
            }
        }
    }

    pub fn set_last_active_user_id(&self, user_id: &str) -> CacheResult<()> {
        self.store.set(LAST_ACTIVE_USER_KEY, user_id.to_string())
    }

    /// Forget the marker. Snapshots are kept for later salvage.
    pub fn clear_last_active_user_id(&self) -> CacheResult<()> {
        self.store.remove(LAST_ACTIVE_USER_KEY)
    }

    // =========================================================================
    // SETTINGS AND CATALOGS
    // =========================================================================

    pub fn load_settings(&self) -> Option<AppSettings> {
        self.read_slot(APP_SETTINGS_KEY, CacheSlot::AppSettings)
    }

    pub fn save_settings(&self, settings: &AppSettings) -> CacheResult<()> {
        self.write_slot(APP_SETTINGS_KEY, settings)
    }

    pub fn load_products(&self) -> Option<Vec<Product>> {
        self.read_slot(PRODUCT_CATALOG_KEY, CacheSlot::ProductCatalog)
    }

    pub fn save_products(&self, products: &[Product]) -> CacheResult<()> {
        self.write_slot(PRODUCT_CATALOG_KEY, &products)
    }

    pub fn load_palm_types(&self) -> Option<Vec<PalmType>> {
        self.read_slot(PALM_TYPE_CATALOG_KEY, CacheSlot::PalmTypeCatalog)
    }

    pub fn save_palm_types(&self, palm_types: &[PalmType]) -> CacheResult<()> {
        self.write_slot(PALM_TYPE_CATALOG_KEY, &palm_types)
    }

    // =========================================================================
    // WRITE-THROUGH
    // =========================================================================

    /// Mirror the slices that changed between two states.
    ///
    /// A user going away (logout) writes nothing: snapshots outlive sessions.
    /// A skeleton or a provisional user built from provider claims never
    /// overwrites an existing snapshot.
    pub fn sync(&self, prev: &CacheView<'_>, next: &CacheView<'_>) -> CacheResult<()> {
        if let Some(user) = next.user {
            if prev.user != Some(user) && (user.is_rich() || !self.has_user(&user.id)) {
                self.save_user(user)?;
            }
            if prev.user.map(|u| u.id.as_str()) != Some(user.id.as_str()) {
                self.set_last_active_user_id(&user.id)?;
            }
        }
        if prev.settings != next.settings {
            self.save_settings(next.settings)?;
        }
        if prev.products != next.products {
            self.save_products(next.products)?;
        }
        if prev.palm_types != next.palm_types {
            self.save_palm_types(next.palm_types)?;
        }
        Ok(())
    }

    // =========================================================================
    // SLOT HELPERS
    // =========================================================================

    fn read_slot<T: DeserializeOwned>(&self, key: &str, slot: CacheSlot) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read cache slot");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key, "Cache slot read");
                Some(value)
            }
            Err(e) => {
                self.discard(key, slot, &e.to_string());
                None
            }
        }
    }

    fn write_slot<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> CacheResult<()> {
        let encoded = serde_json::to_string(value).map_err(|e| CacheError::Encode {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.store.set(key, encoded)
    }

    fn discard(&self, key: &str, slot: CacheSlot, reason: &str) {
        warn!(key, reason, "Discarding corrupt cache slot");
        CACHE_CORRUPTIONS.with_label_values(&[slot.label()]).inc();
        if let Err(e) = self.store.remove(key) {
            warn!(key, error = %e, "Failed to remove corrupt cache slot");
        }
    }
}

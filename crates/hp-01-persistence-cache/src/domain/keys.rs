//! Storage keys.
//!
//! The key names are part of the on-disk format and must stay stable across
//! releases so that snapshots written by an older build remain readable.

/// Prefix of per-user snapshot keys.
pub const USER_BACKUP_PREFIX: &str = "user_backup_";

/// Id of the most recently active user.
pub const LAST_ACTIVE_USER_KEY: &str = "last_active_user_id";

/// Last-known global settings.
pub const APP_SETTINGS_KEY: &str = "app_settings_cache";

/// Last-known product catalog.
pub const PRODUCT_CATALOG_KEY: &str = "product_catalog_cache";

/// Last-known palm-type catalog.
pub const PALM_TYPE_CATALOG_KEY: &str = "palm_type_catalog_cache";

/// Key of the snapshot slot for `user_id`.
pub fn user_backup_key(user_id: &str) -> String {
    format!("{USER_BACKUP_PREFIX}{user_id}")
}

/// Slot family, used as the metric label for corruption counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSlot {
    UserBackup,
    LastActiveUser,
    AppSettings,
    ProductCatalog,
    PalmTypeCatalog,
}

impl CacheSlot {
    pub fn label(self) -> &'static str {
        match self {
            Self::UserBackup => "user_backup",
            Self::LastActiveUser => "last_active_user",
            Self::AppSettings => "app_settings",
            Self::ProductCatalog => "product_catalog",
            Self::PalmTypeCatalog => "palm_type_catalog",
        }
    }
}

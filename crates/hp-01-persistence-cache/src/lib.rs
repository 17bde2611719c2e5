//! # Persistence Cache Subsystem
//!
//! **Subsystem ID:** hp-01
//!
//! ## Purpose
//!
//! Durable local fallback for the portal state: per-user snapshots, the
//! last-active user marker, and the last-known settings and catalogs. The
//! cache is never authoritative. It is written on every change to the
//! mirrored slices and read only at boot and when salvaging a profile.
//!
//! ## Slots
//!
//! | Key | Contents |
//! |-----|----------|
//! | `user_backup_<id>` | JSON `User` snapshot |
//! | `last_active_user_id` | Id of the most recent user |
//! | `app_settings_cache` | JSON `AppSettings` |
//! | `product_catalog_cache` | JSON `[Product]` |
//! | `palm_type_catalog_cache` | JSON `[PalmType]` |
//!
//! A slot that fails to decode is removed, logged at `warn` and counted in
//! `hp_cache_corruptions_total`, then treated as absent.
//!
//! ## Module Structure
//!
//! ```text
//! adapters/  - InMemoryLocalStore, FileLocalStore (fs2-locked JSON file)
//! ports/     - LocalStore trait
//! domain/    - slot keys, CacheError
//! service.rs - PersistenceCache (typed slots, write-through sync)
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FileLocalStore, InMemoryLocalStore};
pub use domain::{CacheError, CacheResult, CacheSlot};
pub use ports::LocalStore;
pub use service::{CacheView, PersistenceCache};

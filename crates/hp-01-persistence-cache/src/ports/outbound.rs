//! Outbound ports (Driven ports) for the persistence cache.

use crate::domain::CacheResult;

/// Durable string key-value store, synchronous like browser local storage.
///
/// Implementations must be safe to share between the store's write-through
/// effect, the hydrator and the reconciler.
pub trait LocalStore: Send + Sync {
    /// Read a slot. `Ok(None)` when absent.
    fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Write a slot, replacing any previous value.
    fn set(&self, key: &str, value: String) -> CacheResult<()>;

    /// Delete a slot. Deleting an absent slot is not an error.
    fn remove(&self, key: &str) -> CacheResult<()>;
}

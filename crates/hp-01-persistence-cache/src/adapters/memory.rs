//! In-memory local store for tests and ephemeral sessions.

use crate::domain::CacheResult;
use crate::ports::LocalStore;
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct InMemoryLocalStore {
    slots: RwLock<BTreeMap<String, String>>,
}

impl InMemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw slot, bypassing any encoding. Used to plant corrupt data.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.slots.write().insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}

impl LocalStore for InMemoryLocalStore {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.slots.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> CacheResult<()> {
        self.slots.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        self.slots.write().remove(key);
        Ok(())
    }
}

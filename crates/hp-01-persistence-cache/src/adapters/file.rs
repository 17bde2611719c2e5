//! # File-Backed Local Store
//!
//! Keeps every slot in one JSON object on disk. The whole map is held in
//! memory; each mutation rewrites the file under an exclusive `fs2` lock so
//! two processes sharing a data directory never interleave writes.
//!
//! ```text
//! <data_dir>/
//!   portal-cache.json   {"user_backup_u1": "{...}", "last_active_user_id": "u1"}
//!   portal-cache.lock   held exclusively while the JSON file is replaced
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::domain::{CacheError, CacheResult};
use crate::ports::LocalStore;

const DATA_FILE: &str = "portal-cache.json";
const LOCK_FILE: &str = "portal-cache.lock";
const TEMP_FILE: &str = "portal-cache.json.tmp";

pub struct FileLocalStore {
    dir: PathBuf,
    slots: RwLock<BTreeMap<String, String>>,
}

impl FileLocalStore {
    /// Open (or create) the store in `dir`.
    ///
    /// An unreadable data file is treated as empty and overwritten by the
    /// next write.
    pub fn open(dir: impl AsRef<Path>) -> CacheResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| CacheError::io(&dir, e))?;

        let data_path = dir.join(DATA_FILE);
        let slots = match fs::read_to_string(&data_path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %data_path.display(), error = %e, "Discarding unreadable cache file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(CacheError::io(&data_path, e)),
        };

        debug!(path = %data_path.display(), slots = slots.len(), "File local store opened");

        Ok(Self {
            dir,
            slots: RwLock::new(slots),
        })
    }

    pub fn data_path(&self) -> PathBuf {
        self.dir.join(DATA_FILE)
    }

    /// Rewrite the data file from `slots`.
    fn flush(&self, slots: &BTreeMap<String, String>) -> CacheResult<()> {
        let lock_path = self.dir.join(LOCK_FILE);
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| CacheError::io(&lock_path, e))?;
        lock.lock_exclusive()
            .map_err(|e| CacheError::io(&lock_path, e))?;

        let result = self.write_atomically(slots);

        #[allow(clippy::incompatible_msrv)]
        let _ = lock.unlock();
        result
    }

    fn write_atomically(&self, slots: &BTreeMap<String, String>) -> CacheResult<()> {
        let encoded = serde_json::to_vec(slots).map_err(|e| CacheError::Encode {
            key: DATA_FILE.to_string(),
            reason: e.to_string(),
        })?;

        let temp_path = self.dir.join(TEMP_FILE);
        let mut temp = File::create(&temp_path).map_err(|e| CacheError::io(&temp_path, e))?;
        temp.write_all(&encoded)
            .and_then(|()| temp.sync_all())
            .map_err(|e| CacheError::io(&temp_path, e))?;
        drop(temp);

        let data_path = self.data_path();
        fs::rename(&temp_path, &data_path).map_err(|e| CacheError::io(&data_path, e))
    }
}

impl LocalStore for FileLocalStore {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.slots.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> CacheResult<()> {
        let mut slots = self.slots.write();
        if slots.get(key) == Some(&value) {
            return Ok(());
        }
        let previous = slots.insert(key.to_string(), value);
        self.flush(&slots).inspect_err(|_| restore(&mut slots, key, previous))
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        let mut slots = self.slots.write();
        let Some(previous) = slots.remove(key) else {
            return Ok(());
        };
        self.flush(&slots)
            .inspect_err(|_| restore(&mut slots, key, Some(previous)))
    }
}

/// Put a slot back the way it was before a write the disk refused.
fn restore(slots: &mut BTreeMap<String, String>, key: &str, previous: Option<String>) {
    warn!(key, "Cache file write failed, in-memory slot rolled back");
    match previous {
        Some(value) => slots.insert(key.to_string(), value),
        None => slots.remove(key),
    };
}

//! In-memory address bar.

use parking_lot::RwLock;

use crate::ports::UrlSideChannel;

pub struct InMemoryUrlBar {
    current: RwLock<String>,
    replacements: RwLock<Vec<String>>,
}

impl InMemoryUrlBar {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            current: RwLock::new(url.into()),
            replacements: RwLock::new(Vec::new()),
        }
    }

    /// Every URL passed to `replace_url`, oldest first.
    pub fn replacements(&self) -> Vec<String> {
        self.replacements.read().clone()
    }
}

impl UrlSideChannel for InMemoryUrlBar {
    fn current_url(&self) -> String {
        self.current.read().clone()
    }

    fn replace_url(&self, url: &str) {
        *self.current.write() = url.to_string();
        self.replacements.write().push(url.to_string());
    }
}

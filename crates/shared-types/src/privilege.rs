//! # Super-User Policy
//!
//! A fixed allow-list of ids and contacts (email or phone) that are always
//! administrators. Matching users get `is_admin = true` on every transition
//! that constructs or patches them, and nothing clears the flag afterwards.

use crate::entities::User;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ids and contacts built into every deployment.
pub const BUILTIN_SUPER_USERS: &[&str] = &["admin@barkat.app", "+989120000001"];

/// Allow-list of super users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperUserPolicy {
    entries: BTreeSet<String>,
}

impl Default for SuperUserPolicy {
    fn default() -> Self {
        Self::new(BUILTIN_SUPER_USERS.iter().copied())
    }
}

impl SuperUserPolicy {
    /// Build a policy from ids and/or contacts. Contacts compare case-insensitively.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|e| normalize(e.as_ref()))
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Policy with no super users.
    pub fn empty() -> Self {
        Self {
            entries: BTreeSet::new(),
        }
    }

    /// Extend the allow-list.
    #[must_use]
    pub fn with(mut self, entry: &str) -> Self {
        let entry = normalize(entry);
        if !entry.is_empty() {
            self.entries.insert(entry);
        }
        self
    }

    /// Whether `user` matches by id or by any contact.
    pub fn is_super_user(&self, user: &User) -> bool {
        self.entries.contains(&normalize(&user.id))
            || user.contacts().any(|c| self.entries.contains(&normalize(c)))
    }

    /// Force the admin flag for super users. Never clears it.
    pub fn escalate(&self, user: &mut User) {
        if !user.is_admin && self.is_super_user(user) {
            user.is_admin = true;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(entry: &str) -> String {
    entry.trim().to_lowercase()
}

//! Credential storage
//!
//! In-memory mapping from username to its stored credential record.
//! Records are created once and never updated or removed.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{PoisonError, RwLock};

/// Stored pairing of a username and its password digest.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    username: String,
    password_hash: String,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Self-describing digest (algorithm, cost and salt included).
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Thread-safe credential store keyed by exact (case-sensitive) username.
#[derive(Debug, Default)]
pub struct CredentialStore {
    records: RwLock<HashMap<String, CredentialRecord>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exists(&self, username: &str) -> bool {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(username)
    }

    /// Inserts the record unless its username is already present.
    ///
    /// The presence check and the insert happen under one write lock.
    /// Returns `false` and leaves the existing record untouched on conflict.
    pub fn insert(&self, record: CredentialRecord) -> bool {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        match records.entry(record.username.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    pub fn get(&self, username: &str) -> Option<CredentialRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(username)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

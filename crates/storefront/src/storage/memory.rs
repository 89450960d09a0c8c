//! In-memory store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::KeyValueStore;

/// A store held entirely in memory.
///
/// Serializes as a flat JSON object, which is how the HTTP server keeps one
/// browser's storage inside its server-side session and how [`super::FileStore`]
/// lays out its file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore(BTreeMap<String, String>);

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.0.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.0.remove(key);
    }
}

//! Local cache store
//!
//! A narrow key → string capability standing in for browser-style local
//! storage. Values are whole JSON documents; every write overwrites the key
//! completely, so readers never observe a half-written mapping.
//!
//! ```text
//! dt_projects          → [ProjectRecord, ...]        (read-only here)
//! learningHubSections  → { key: SectionEntry, ... }
//! learningHubPathways  → { key: PathwayEntry, ... }
//! ```

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use serde::{de::DeserializeOwned, Serialize};

/// Cached project list written by the project-creation flow
pub const PROJECTS_KEY: &str = "dt_projects";
/// Learning hub sections mapping
pub const SECTIONS_KEY: &str = "learningHubSections";
/// Learning hub pathways mapping
pub const PATHWAYS_KEY: &str = "learningHubPathways";

/// Persisted key/value storage surviving restarts.
///
/// Implementations must make `set` a full replacement of the key's value.
pub trait LocalStore: Send + Sync {
    /// Read the raw value under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the value under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Read and deserialize a JSON value.
///
/// Absent keys and malformed JSON both come back as `None`; the caller
/// decides what the empty/default value is.
pub fn read_json<T: DeserializeOwned>(store: &dyn LocalStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring malformed cached JSON");
            None
        }
    }
}

/// Serialize `value` and write it under `key` in one operation
pub fn write_json<T: Serialize + ?Sized>(store: &dyn LocalStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Store whose writes always fail, for exercising persistence errors
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ReadOnlyStore {
    pub(crate) inner: MemoryStore,
}

#[cfg(test)]
impl LocalStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(crate::error::HubError::Storage("disk full".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_read_only_store_rejects_writes() {
        let store = ReadOnlyStore {
            inner: MemoryStore::with_entries([(PATHWAYS_KEY, "{}")]),
        };
        assert_eq!(store.get(PATHWAYS_KEY).as_deref(), Some("{}"));
        assert!(write_json(&store, PATHWAYS_KEY, &BTreeMap::<String, u8>::new()).is_err());
        assert_eq!(store.get(PATHWAYS_KEY).as_deref(), Some("{}"));
    }

    #[test]
    fn test_read_json_degrades_on_malformed() {
        let store = MemoryStore::new();
        store.set(PROJECTS_KEY, "{not json").unwrap();

        let parsed: Option<Vec<serde_json::Value>> = read_json(&store, PROJECTS_KEY);
        assert!(parsed.is_none());

        let missing: Option<Vec<serde_json::Value>> = read_json(&store, "absent");
        assert!(missing.is_none());
    }

    #[test]
    fn test_write_then_read() {
        let store = MemoryStore::new();
        let mut value = BTreeMap::new();
        value.insert("a".to_string(), vec![1, 2, 3]);

        write_json(&store, SECTIONS_KEY, &value).unwrap();
        let back: BTreeMap<String, Vec<i32>> = read_json(&store, SECTIONS_KEY).unwrap();
        assert_eq!(back, value);
    }
}

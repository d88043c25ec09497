//! Content Store - local-first editable hub mappings
//!
//! Each [`ContentStore`] owns one mapping (sections or pathways) and its cache
//! key. The in-memory mapping is the only read path; every mutation writes
//! the entire mapping back to the cache before returning.

use super::model::{HubEntry, PathwayEntry, SectionEntry};
use crate::error::{HubError, Result};
use crate::storage::{read_json, write_json, LocalStore};
use chrono::Utc;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Editable, persisted mapping of `key → E`
pub struct ContentStore<E: HubEntry> {
    entries: IndexMap<String, E>,
    cache: Arc<dyn LocalStore>,
}

pub type SectionStore = ContentStore<SectionEntry>;
pub type PathwayStore = ContentStore<PathwayEntry>;

impl<E: HubEntry> ContentStore<E> {
    /// Hydrate from the cache.
    ///
    /// A cached mapping replaces the built-in defaults entirely; the two are
    /// never merged. Missing or malformed cache data falls back to defaults.
    pub fn load(cache: Arc<dyn LocalStore>) -> Self {
        let entries = match read_json::<IndexMap<String, E>>(cache.as_ref(), E::STORAGE_KEY) {
            Some(cached) => {
                info!(kind = E::KIND, count = cached.len(), "Hydrated hub content from cache");
                cached
            }
            None => {
                debug!(kind = E::KIND, "No cached hub content, using defaults");
                E::defaults()
            }
        };
        Self { entries, cache }
    }

    pub fn get(&self, key: &str) -> Option<&E> {
        self.entries.get(key)
    }

    /// Every entry in display order
    pub fn list_all(&self) -> &IndexMap<String, E> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shallow-merge `patch` into `key` (creating it if absent) and persist
    /// the whole mapping.
    ///
    /// The in-memory mapping only changes once the write succeeds; on error
    /// it still matches what the cache holds.
    pub fn update(&mut self, key: &str, patch: E::Patch) -> Result<&E> {
        let mut next = self.entries.clone();
        next.entry(key.to_string())
            .or_default()
            .merge(patch, Utc::now());
        write_json(self.cache.as_ref(), E::STORAGE_KEY, &next)?;
        self.entries = next;
        debug!(kind = E::KIND, key, "Updated hub entry");
        self.entries
            .get(key)
            .ok_or_else(|| self.unknown(key))
    }

    /// Append `value` to the entry's items unless it is blank.
    ///
    /// Returns whether anything changed.
    pub fn add_item(&mut self, key: &str, value: &str) -> Result<bool> {
        if value.trim().is_empty() {
            return Ok(false);
        }
        let mut items = self.items_of(key)?;
        items.push(value.to_string());
        self.update(key, E::items_patch(items))?;
        Ok(true)
    }

    /// Overwrite the item at `index`. Out-of-range indices change nothing.
    pub fn replace_item_at(&mut self, key: &str, index: usize, value: &str) -> Result<bool> {
        let mut items = self.items_of(key)?;
        let Some(slot) = items.get_mut(index) else {
            return Ok(false);
        };
        *slot = value.to_string();
        self.update(key, E::items_patch(items))?;
        Ok(true)
    }

    /// Delete the item at `index`, shifting later items down by one
    pub fn remove_item_at(&mut self, key: &str, index: usize) -> Result<bool> {
        let mut items = self.items_of(key)?;
        if index >= items.len() {
            return Ok(false);
        }
        items.remove(index);
        self.update(key, E::items_patch(items))?;
        Ok(true)
    }

    fn items_of(&self, key: &str) -> Result<Vec<String>> {
        self.entries
            .get(key)
            .map(|e| e.items().to_vec())
            .ok_or_else(|| self.unknown(key))
    }

    fn unknown(&self, key: &str) -> HubError {
        HubError::UnknownEntry {
            kind: E::KIND,
            key: key.to_string(),
        }
    }
}

/// Both hub mappings, hydrated from the same cache
pub struct HubContentStore {
    pub sections: SectionStore,
    pub pathways: PathwayStore,
}

impl HubContentStore {
    pub fn load(cache: Arc<dyn LocalStore>) -> Self {
        Self {
            sections: SectionStore::load(cache.clone()),
            pathways: PathwayStore::load(cache),
        }
    }
}

//! Learning hub entries and their partial updates

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::storage::{PATHWAYS_KEY, SECTIONS_KEY};

const UNTITLED: &str = "Untitled";

/// Long-form, independently editable document attached to a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailDocument {
    #[serde(default)]
    pub title: String,
    /// Rich text, kept opaque
    #[serde(default)]
    pub body: String,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl DetailDocument {
    pub fn new(title: impl Into<String>, body: impl Into<String>, last_updated: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            last_updated,
        }
    }

    /// Document derived from a section's summary fields
    pub fn synthesize(title: &str, description: &str, now: DateTime<Utc>) -> Self {
        let title = if title.is_empty() { UNTITLED } else { title };
        Self::new(title, description, now)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<DetailDocument>,
}

impl SectionEntry {
    /// The attached detail document, or one synthesized from the summary
    pub fn detail_or_synthesized(&self, now: DateTime<Utc>) -> DetailDocument {
        self.content
            .clone()
            .unwrap_or_else(|| DetailDocument::synthesize(&self.title, &self.description, now))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Fields to shallow-merge into a section; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub items: Option<Vec<String>>,
    pub content: Option<DetailDocument>,
}

impl SectionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn items(mut self, items: Vec<String>) -> Self {
        self.items = Some(items);
        self
    }

    pub fn content(mut self, content: DetailDocument) -> Self {
        self.content = Some(content);
        self
    }
}

/// Fields to shallow-merge into a pathway
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathwayPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub items: Option<Vec<String>>,
}

impl PathwayPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn items(mut self, items: Vec<String>) -> Self {
        self.items = Some(items);
        self
    }
}

/// An entry kind held in a [`ContentStore`](super::ContentStore).
///
/// Each kind owns one cache key and is always persisted as a whole mapping.
pub trait HubEntry: Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync {
    type Patch: Clone + Default;

    /// Human-readable kind, used in errors and logs
    const KIND: &'static str;

    /// Local cache key holding the whole mapping
    const STORAGE_KEY: &'static str;

    /// Shallow-merge `patch`; list fields are replaced, never appended
    fn merge(&mut self, patch: Self::Patch, now: DateTime<Utc>);

    fn items(&self) -> &[String];

    /// Patch that replaces only the item list
    fn items_patch(items: Vec<String>) -> Self::Patch;

    /// Built-in mapping used when nothing is cached
    fn defaults() -> IndexMap<String, Self>;
}

impl HubEntry for SectionEntry {
    type Patch = SectionPatch;
    const KIND: &'static str = "section";
    const STORAGE_KEY: &'static str = SECTIONS_KEY;

    fn merge(&mut self, patch: SectionPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(items) = patch.items {
            self.items = items;
        }
        if let Some(content) = patch.content {
            self.content = Some(content);
        }
        if self.content.is_none() {
            self.content = Some(DetailDocument::synthesize(&self.title, &self.description, now));
        }
    }

    fn items(&self) -> &[String] {
        &self.items
    }

    fn items_patch(items: Vec<String>) -> SectionPatch {
        SectionPatch::new().items(items)
    }

    fn defaults() -> IndexMap<String, Self> {
        super::defaults::default_sections()
    }
}

impl HubEntry for PathwayEntry {
    type Patch = PathwayPatch;
    const KIND: &'static str = "pathway";
    const STORAGE_KEY: &'static str = PATHWAYS_KEY;

    fn merge(&mut self, patch: PathwayPatch, _now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(items) = patch.items {
            self.items = items;
        }
    }

    fn items(&self) -> &[String] {
        &self.items
    }

    fn items_patch(items: Vec<String>) -> PathwayPatch {
        PathwayPatch::new().items(items)
    }

    fn defaults() -> IndexMap<String, Self> {
        super::defaults::default_pathways()
    }
}

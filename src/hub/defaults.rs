//! Built-in learning hub content

use super::model::{PathwayEntry, SectionEntry};
use indexmap::IndexMap;
use serde::Deserialize;
use std::sync::OnceLock;

const HUB_DEFAULTS: &str = include_str!("../../data/hub_defaults.json");

#[derive(Debug, Default, Deserialize)]
struct HubDefaults {
    sections: IndexMap<String, SectionEntry>,
    pathways: IndexMap<String, PathwayEntry>,
}

fn bundled() -> &'static HubDefaults {
    static DEFAULTS: OnceLock<HubDefaults> = OnceLock::new();
    DEFAULTS.get_or_init(|| {
        serde_json::from_str(HUB_DEFAULTS).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Bundled hub defaults are invalid, starting empty");
            HubDefaults::default()
        })
    })
}

pub fn default_sections() -> IndexMap<String, SectionEntry> {
    bundled().sections.clone()
}

pub fn default_pathways() -> IndexMap<String, PathwayEntry> {
    bundled().pathways.clone()
}

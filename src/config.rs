//! Hub configuration

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Where the local cache lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding one JSON file per cache key
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Remote project database connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the REST endpoint (e.g. "https://xyz.supabase.co")
    #[serde(default)]
    pub base_url: Option<String>,

    /// Anonymous API key sent with every request
    #[serde(default)]
    pub api_key: Option<String>,

    /// Table holding project rows
    #[serde(default = "default_table")]
    pub table: String,

    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            table: default_table(),
            timeout_secs: None,
        }
    }
}

impl RemoteConfig {
    /// Both the URL and the key must be present and non-empty
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.base_url) && present(&self.api_key)
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".twinhub")
}
fn default_table() -> String {
    "projects".to_string()
}

impl HubConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

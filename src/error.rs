//! Error types for twinhub

use thiserror::Error;

/// Result type for twinhub operations
pub type Result<T> = std::result::Result<T, HubError>;

/// twinhub error types
///
/// Expected misses (a project absent from a tier, malformed cache data) are
/// not errors; they degrade to empty values. Only failures a caller can act on
/// surface here.
#[derive(Error, Debug)]
pub enum HubError {
    /// Network error talking to the remote gateway
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Local cache read/write failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No section or pathway under this key
    #[error("Unknown {kind} entry: {key}")]
    UnknownEntry { kind: &'static str, key: String },

    /// Overlay action not valid in the current state
    #[error("Invalid overlay transition: cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

#[cfg(feature = "remote")]
impl From<reqwest::Error> for HubError {
    fn from(err: reqwest::Error) -> Self {
        HubError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        HubError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for HubError {
    fn from(err: std::io::Error) -> Self {
        HubError::Storage(err.to_string())
    }
}

impl From<toml::de::Error> for HubError {
    fn from(err: toml::de::Error) -> Self {
        HubError::Config(err.to_string())
    }
}

//! Remote project lookup gateway
//!
//! The resolver only needs two capabilities from the shared project
//! database: whether it is configured at all, and a single-record fetch.

#[cfg(feature = "remote")]
mod http;

#[cfg(feature = "remote")]
pub use http::HttpGateway;

use crate::catalog::ProjectRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Optional network-backed project lookup.
///
/// `fetch_by_id` returns `Ok(None)` for "no such project" and reserves `Err`
/// for transport or decoding failures.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Whether connection settings are present. Pure and cheap.
    fn is_configured(&self) -> bool;

    /// Fetch one project by (string-normalized) id
    async fn fetch_by_id(&self, id: &str) -> Result<Option<ProjectRecord>>;
}

/// Gateway used when no remote database is set up
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredGateway;

#[async_trait]
impl RemoteGateway for UnconfiguredGateway {
    fn is_configured(&self) -> bool {
        false
    }

    async fn fetch_by_id(&self, _id: &str) -> Result<Option<ProjectRecord>> {
        Ok(None)
    }
}

//! Project Resolution - tiered lookup across catalog, remote and local cache
//!
//! ## Architecture
//!
//! ```text
//! resolve(id) → Static Catalog (bundled, immutable)
//!                  ↓ miss
//!               Remote Gateway (only if configured; failures are misses)
//!                  ↓ miss
//!               Local Cache ("dt_projects" JSON list)
//!                  ↓ miss
//!               NotFound
//! ```
//!
//! Tiers are tried strictly in order and the first hit wins. Nothing is
//! written to any tier during resolution, and no failure escapes to the
//! caller: a project that cannot be found anywhere is `Resolution::NotFound`.
//!
//! ```rust,ignore
//! let resolver = ProjectResolver::new(remote, cache);
//!
//! match resolver.resolve("1001").await {
//!     Resolution::Found { record, tier } => render(record, tier),
//!     Resolution::NotFound => render_not_found(),
//! }
//! ```

mod guard;
mod preview;
mod view;

pub use guard::{ResolveGuard, ResolveTicket};
pub use preview::{preview_image_url, repo_coordinates};
pub use view::{project_image, NotFoundView, PageState, ProjectPage, ProjectView};

use crate::catalog::{ProjectId, ProjectRecord, StaticCatalog};
use crate::remote::RemoteGateway;
use crate::storage::{read_json, LocalStore, PROJECTS_KEY};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

// =============================================================================
// Resolution Result Types
// =============================================================================

/// Project sources, in resolution priority order.
///
/// Lower value = higher authority (tried first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    /// Bundled static catalog
    Catalog = 0,
    /// Shared remote database
    Remote = 1,
    /// Locally cached project list
    LocalCache = 2,
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Catalog => "catalog",
            Self::Remote => "remote",
            Self::LocalCache => "local_cache",
        })
    }
}

/// Outcome of a single pass through the cascade
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found {
        record: ProjectRecord,
        tier: ResolutionTier,
    },
    NotFound,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn record(&self) -> Option<&ProjectRecord> {
        match self {
            Self::Found { record, .. } => Some(record),
            Self::NotFound => None,
        }
    }

    pub fn tier(&self) -> Option<ResolutionTier> {
        match self {
            Self::Found { tier, .. } => Some(*tier),
            Self::NotFound => None,
        }
    }

    pub fn into_record(self) -> Option<ProjectRecord> {
        match self {
            Self::Found { record, .. } => Some(record),
            Self::NotFound => None,
        }
    }
}

/// Resolution statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolutionStats {
    /// Total resolve calls
    pub resolution_count: u64,
    /// Hits served by the static catalog
    pub catalog_hits: u64,
    /// Hits served by the remote gateway
    pub remote_hits: u64,
    /// Remote fetches that failed and fell through
    pub remote_failures: u64,
    /// Hits served by the local cache
    pub local_cache_hits: u64,
    /// Ids found in no tier
    pub not_found: u64,
}

// =============================================================================
// Project Resolver
// =============================================================================

/// Resolves project ids across the three tiers with fixed precedence
pub struct ProjectResolver {
    catalog: Arc<StaticCatalog>,
    remote: Arc<dyn RemoteGateway>,
    cache: Arc<dyn LocalStore>,
    stats: RwLock<ResolutionStats>,
}

impl ProjectResolver {
    /// Resolver over the bundled catalog
    pub fn new(remote: Arc<dyn RemoteGateway>, cache: Arc<dyn LocalStore>) -> Self {
        Self::with_catalog(StaticCatalog::bundled(), remote, cache)
    }

    pub fn with_catalog(
        catalog: Arc<StaticCatalog>,
        remote: Arc<dyn RemoteGateway>,
        cache: Arc<dyn LocalStore>,
    ) -> Self {
        debug!(
            catalog_size = catalog.len(),
            remote = remote.is_configured(),
            "ProjectResolver initialized"
        );
        Self {
            catalog,
            remote,
            cache,
            stats: RwLock::new(ResolutionStats::default()),
        }
    }

    pub fn catalog(&self) -> &StaticCatalog {
        &self.catalog
    }

    /// Resolve `id`, short-circuiting on the first tier that has it
    pub async fn resolve(&self, id: &str) -> Resolution {
        self.resolve_inner(id, None).await.unwrap_or(Resolution::NotFound)
    }

    /// Resolve on behalf of a ticketed request.
    ///
    /// Returns `None` when the ticket went stale before the cascade finished;
    /// later tiers are skipped as soon as staleness is noticed.
    pub async fn resolve_for(
        &self,
        id: &str,
        guard: &ResolveGuard,
        ticket: ResolveTicket,
    ) -> Option<Resolution> {
        self.resolve_inner(id, Some((guard, ticket))).await
    }

    async fn resolve_inner(
        &self,
        id: &str,
        ticket: Option<(&ResolveGuard, ResolveTicket)>,
    ) -> Option<Resolution> {
        let stale = || ticket.is_some_and(|(guard, t)| !guard.is_current(t));
        if stale() {
            return None;
        }
        self.bump(|s| s.resolution_count += 1);

        if let Some(record) = self.lookup_catalog(id) {
            return Some(self.found(id, record, ResolutionTier::Catalog));
        }

        if let Some(record) = self.lookup_remote(id).await {
            if stale() {
                debug!(id, "Discarding stale remote resolution");
                return None;
            }
            return Some(self.found(id, record, ResolutionTier::Remote));
        }
        if stale() {
            return None;
        }

        if let Some(record) = self.lookup_local_cache(id) {
            return Some(self.found(id, record, ResolutionTier::LocalCache));
        }

        debug!(id, "Project not found in any tier");
        self.bump(|s| s.not_found += 1);
        Some(Resolution::NotFound)
    }

    /// Tier 1: bundled catalog
    pub fn lookup_catalog(&self, id: &str) -> Option<ProjectRecord> {
        self.catalog.get(id).cloned()
    }

    /// Tier 2: remote gateway. Transport failures are logged and become misses.
    pub async fn lookup_remote(&self, id: &str) -> Option<ProjectRecord> {
        if !self.remote.is_configured() {
            return None;
        }
        match self.remote.fetch_by_id(id).await {
            Ok(record) => record,
            Err(e) => {
                warn!(id, error = %e, "Remote project lookup failed, falling back to local cache");
                self.bump(|s| s.remote_failures += 1);
                None
            }
        }
    }

    /// Tier 3: locally cached project list.
    ///
    /// A missing key, malformed JSON, or a non-list value all read as an empty
    /// list. Only the matching entry has to be a well-formed record.
    pub fn lookup_local_cache(&self, id: &str) -> Option<ProjectRecord> {
        let stored: Vec<serde_json::Value> =
            read_json(self.cache.as_ref(), PROJECTS_KEY).unwrap_or_default();

        let entry = stored.into_iter().find(|entry| {
            entry
                .get("id")
                .and_then(|raw| serde_json::from_value::<ProjectId>(raw.clone()).ok())
                .is_some_and(|pid| pid.matches(id))
        })?;

        match serde_json::from_value(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(id, error = %e, "Cached project entry is malformed");
                None
            }
        }
    }

    /// Snapshot of resolution counters
    pub fn stats(&self) -> ResolutionStats {
        self.stats
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn found(&self, id: &str, record: ProjectRecord, tier: ResolutionTier) -> Resolution {
        debug!(id, %tier, "Project resolved");
        self.bump(|s| match tier {
            ResolutionTier::Catalog => s.catalog_hits += 1,
            ResolutionTier::Remote => s.remote_hits += 1,
            ResolutionTier::LocalCache => s.local_cache_hits += 1,
        });
        Resolution::Found { record, tier }
    }

    fn bump(&self, f: impl FnOnce(&mut ResolutionStats)) {
        f(&mut self.stats.write().unwrap_or_else(PoisonError::into_inner));
    }
}

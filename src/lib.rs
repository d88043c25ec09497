//! twinhub - Digital twin project catalog and learning hub
//!
//! # Architecture
//!
//! Two largely independent halves share one local key-value cache:
//! - **Project resolution**: an id is looked up in the bundled catalog, then
//!   the shared remote database (when configured), then the locally cached
//!   project list. The first hit wins; misses everywhere yield a not-found view.
//! - **Learning hub**: editable sections and pathways, seeded from built-in
//!   defaults and persisted wholesale on every change, plus a detail overlay
//!   for viewing and editing a section's long-form document.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use twinhub::{FileStore, LearningHub, ProjectResolver, UnconfiguredGateway};
//!
//! let cache = Arc::new(FileStore::open(".twinhub")?);
//!
//! let resolver = ProjectResolver::new(Arc::new(UnconfiguredGateway), cache.clone());
//! let resolution = resolver.resolve("2").await;
//!
//! let mut hub = LearningHub::load(cache);
//! hub.open_detail("videos")?;
//! ```

// Bundled project records
pub mod catalog;

// Runtime settings
pub mod config;

// Error types
pub mod error;

// Sections, pathways and the detail overlay
pub mod hub;

// Shared project database
pub mod remote;

// Tiered project lookup and page state
pub mod resolution;

// Local key-value cache
pub mod storage;

pub use catalog::{ProjectId, ProjectRecord, ProjectStatus, ProjectType, StaticCatalog};
pub use config::{HubConfig, RemoteConfig, StorageSettings};
pub use error::{HubError, Result};
pub use hub::{
    ClickTarget, DetailDocument, DetailOverlay, HubContentStore, LearningHub, OverlayState,
    PathwayEntry, PathwayPatch, PathwayStore, SectionEntry, SectionPatch, SectionStore,
};
pub use remote::{RemoteGateway, UnconfiguredGateway};
pub use resolution::{
    NotFoundView, PageState, ProjectPage, ProjectResolver, ProjectView, Resolution,
    ResolutionStats, ResolutionTier, ResolveGuard, ResolveTicket,
};
pub use storage::{FileStore, LocalStore, MemoryStore};

#[cfg(feature = "remote")]
pub use remote::HttpGateway;

//! Static project catalog
//!
//! The bundled list of known projects. Immutable for the life of the
//! process and always consulted first by the resolver.

mod record;

pub use record::{
    DataProfile, Impact, ProjectHealth, ProjectId, ProjectModule, ProjectRecord, ProjectStatus,
    ProjectType, RoadmapPhase, Team, TeamMember, TeamRole,
};

use crate::error::{HubError, Result};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

const BUNDLED_CATALOG: &str = include_str!("../../data/projects_catalog.json");

/// Immutable, in-process list of project records with unique identifiers
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    records: Vec<ProjectRecord>,
}

impl StaticCatalog {
    /// Build a catalog, rejecting duplicate identifiers
    pub fn from_records(records: Vec<ProjectRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id.normalized()) {
                return Err(HubError::Config(format!(
                    "duplicate project id in catalog: {}",
                    record.id
                )));
            }
        }
        Ok(Self { records })
    }

    /// The catalog shipped with the crate, parsed once and shared
    pub fn bundled() -> Arc<StaticCatalog> {
        static BUNDLED: OnceLock<Arc<StaticCatalog>> = OnceLock::new();
        BUNDLED
            .get_or_init(|| {
                match serde_json::from_str::<Vec<ProjectRecord>>(BUNDLED_CATALOG)
                    .map_err(HubError::from)
                    .and_then(StaticCatalog::from_records)
                {
                    Ok(catalog) => Arc::new(catalog),
                    Err(e) => {
                        tracing::error!(error = %e, "Bundled project catalog is invalid, using empty catalog");
                        Arc::new(StaticCatalog::default())
                    }
                }
            })
            .clone()
    }

    /// Find a project by string-normalized id
    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.records.iter().find(|p| p.id.matches(id))
    }

    /// All projects in catalog order
    pub fn all(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = StaticCatalog::bundled();
        assert_eq!(catalog.len(), 9);

        let user = catalog.get("1001").unwrap();
        assert_eq!(user.title, "User Project");
        assert_eq!(user.project_type, Some(ProjectType::User));

        let usgbc = catalog.get("2").unwrap();
        assert_eq!(usgbc.roadmap.as_ref().map(Vec::len), Some(3));
        assert_eq!(usgbc.health.as_ref().map(|h| h.open_issues), Some(5));
    }

    #[test]
    fn test_bundled_catalog_is_shared() {
        assert!(Arc::ptr_eq(&StaticCatalog::bundled(), &StaticCatalog::bundled()));
    }

    #[test]
    fn test_lookup_is_string_normalized() {
        let catalog = StaticCatalog::from_records(vec![
            ProjectRecord::new(7u64, "Numeric"),
            ProjectRecord::new("abc", "Text"),
        ])
        .unwrap();

        assert_eq!(catalog.get("7").unwrap().title, "Numeric");
        assert_eq!(catalog.get("abc").unwrap().title, "Text");
        assert!(catalog.get("07").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = StaticCatalog::from_records(vec![
            ProjectRecord::new(7u64, "Numeric"),
            ProjectRecord::new("7", "Text"),
        ]);
        assert!(matches!(result, Err(HubError::Config(_))));
    }
}

//! Project record types
//!
//! Field names follow the persisted JSON form (camelCase). Every field except
//! the identifier is optional on the wire so that sparse records written by
//! other tools (e.g. `{"id":"42","title":"Cached"}`) still deserialize.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Project identifier.
///
/// Identifiers arrive as either JSON numbers (bundled catalog) or strings
/// (remote rows, cached records). Equality across tiers is always on the
/// string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Number(serde_json::Number),
    Text(String),
}

impl ProjectId {
    /// String-normalized form used for all lookups
    pub fn normalized(&self) -> String {
        self.to_string()
    }

    /// Check whether this id equals `other` once both are normalized
    pub fn matches(&self, other: &str) -> bool {
        match self {
            Self::Text(s) => s == other,
            Self::Number(n) => n.to_string() == other,
        }
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ProjectId {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Project lifecycle status.
///
/// Free text on the wire; the three conventional values get their own
/// variants and everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    Idea,
    InProgress,
    Completed,
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Idea => "Idea",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ProjectStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Idea" => Self::Idea,
            "In Progress" => Self::InProgress,
            "Completed" => Self::Completed,
            _ => Self::Other(s),
        }
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who created a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Curated showcase project
    Flagship,
    /// Project created by a hub user
    User,
}

/// Team member contact, stored flat on the record as `teamMember*` fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(rename = "teamMemberFirstName", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "teamMemberLastName", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "teamMemberRole", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "teamMemberDescription", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TeamMember {
    /// A team member is only shown when a first name is present
    pub fn is_present(&self) -> bool {
        self.first_name.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// "First Last", tolerating a missing last name
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or_default();
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", first, last),
            _ => first.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectModule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub components: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    #[serde(default, deserialize_with = "null_as_default")]
    pub phase: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRole {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<TeamRole>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collaboration: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHealth {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_deployed: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub open_issues: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub test_coverage: String,
}

/// A digital twin project as stored in any tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: ProjectId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(flatten)]
    pub team_member: TeamMember,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<IndexMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<IndexMap<String, ProjectModule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DataProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roadmap: Option<Vec<RoadmapPhase>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<ProjectHealth>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub repo_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,

    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl ProjectRecord {
    /// Minimal record with only an id and title; everything else empty
    pub fn new(id: impl Into<ProjectId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: String::new(),
            owner: String::new(),
            team_member: TeamMember::default(),
            goal: String::new(),
            summary: None,
            description: None,
            tech_stack: None,
            features: None,
            modules: None,
            impact: None,
            data: None,
            roadmap: None,
            team: None,
            health: None,
            repo_url: String::new(),
            image: String::new(),
            status: None,
            project_type: None,
            tags: Vec::new(),
            license: None,
            documentation: None,
            demo_url: None,
            last_updated: None,
        }
    }

    /// Team member sub-record, if one is set
    pub fn team_member(&self) -> Option<&TeamMember> {
        self.team_member.is_present().then_some(&self.team_member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_record_deserializes() {
        let record: ProjectRecord =
            serde_json::from_str(r#"{"id":"42","title":"Cached"}"#).unwrap();
        assert_eq!(record.id, ProjectId::Text("42".into()));
        assert_eq!(record.title, "Cached");
        assert!(record.status.is_none());
        assert!(record.team_member().is_none());
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let record: ProjectRecord = serde_json::from_str(
            r#"{"id":"42","title":"Cached","image":null,"repoUrl":null,"goal":null,"tags":null,"status":null}"#,
        )
        .unwrap();
        assert_eq!(record.title, "Cached");
        assert!(record.image.is_empty());
        assert!(record.repo_url.is_empty());
        assert!(record.tags.is_empty());
        assert!(record.status.is_none());

        let health: ProjectHealth =
            serde_json::from_str(r#"{"status":null,"openIssues":null}"#).unwrap();
        assert_eq!(health.open_issues, 0);
    }

    #[test]
    fn test_numeric_and_text_ids_normalize_alike() {
        let numeric: ProjectId = serde_json::from_str("1001").unwrap();
        let text: ProjectId = serde_json::from_str(r#""1001""#).unwrap();
        assert_eq!(numeric.normalized(), text.normalized());
        assert!(numeric.matches("1001"));
        assert!(!numeric.matches("1002"));
    }

    #[test]
    fn test_status_round_trips_free_text() {
        let status: ProjectStatus = serde_json::from_str(r#""In Progress""#).unwrap();
        assert_eq!(status, ProjectStatus::InProgress);

        let status: ProjectStatus = serde_json::from_str(r#""Planned""#).unwrap();
        assert_eq!(status, ProjectStatus::Other("Planned".into()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""Planned""#);
    }

    #[test]
    fn test_flat_team_member_fields() {
        let record: ProjectRecord = serde_json::from_str(
            r#"{"id":4,"teamMemberFirstName":"Omid","teamMemberLastName":"Ahmadi","teamMemberRole":"Software Engineer"}"#,
        )
        .unwrap();
        let member = record.team_member().unwrap();
        assert_eq!(member.full_name(), "Omid Ahmadi");
        assert_eq!(member.role.as_deref(), Some("Software Engineer"));
    }
}

//! Project detail view model and the page controller that feeds it

use super::guard::{ResolveGuard, ResolveTicket};
use super::preview::preview_image_url;
use super::{ProjectResolver, Resolution, ResolutionTier};
use crate::catalog::ProjectRecord;
use serde::Serialize;

const UNTITLED_PROJECT: &str = "Untitled Project";
const LISTING_PATH: &str = "/projects";

/// Display-ready projection of a resolved project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectView {
    pub record: ProjectRecord,
    pub tier: ResolutionTier,
    pub title: String,
    /// Summary, else the first line of the goal
    pub headline: Option<String>,
    /// "category • owner • status" with absent parts left out
    pub byline: String,
    /// Explicit image, else one derived from the repository URL, else ""
    pub image_url: String,
    /// Long description, else goal, else "-"
    pub body: String,
}

impl ProjectView {
    pub fn new(record: ProjectRecord, tier: ResolutionTier) -> Self {
        let title = non_empty(&record.title).unwrap_or(UNTITLED_PROJECT).to_string();

        let headline = record
            .summary
            .as_deref()
            .and_then(non_empty)
            .or_else(|| record.goal.lines().next().and_then(non_empty))
            .map(str::to_string);

        let status = record.status.as_ref().map(|s| s.as_str()).unwrap_or_default();
        let byline = [record.category.as_str(), record.owner.as_str(), status]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" • ");

        let image_url = project_image(&record);

        let body = record
            .description
            .as_deref()
            .and_then(non_empty)
            .or_else(|| non_empty(&record.goal))
            .unwrap_or("-")
            .to_string();

        Self {
            record,
            tier,
            title,
            headline,
            byline,
            image_url,
            body,
        }
    }
}

/// Image shown for a project: the explicit one wins over a derived preview
pub fn project_image(record: &ProjectRecord) -> String {
    if !record.image.is_empty() {
        return record.image.clone();
    }
    if record.repo_url.is_empty() {
        return String::new();
    }
    preview_image_url(&record.repo_url)
}

/// Empty state for an id no tier knows about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundView {
    pub id: String,
    pub heading: &'static str,
    pub message: &'static str,
    pub back_label: &'static str,
    pub back_link: &'static str,
}

impl NotFoundView {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            heading: "Project not found",
            message: "We couldn't find a project with this ID. It may have been deleted or not saved yet.",
            back_label: "Back to Projects",
            back_link: LISTING_PATH,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    /// Nothing requested yet, or the page was unmounted
    Idle,
    Loading { id: String },
    Loaded(Box<ProjectView>),
    NotFound(NotFoundView),
}

/// Project detail page controller.
///
/// Each navigation issues a fresh ticket; results for older tickets are
/// dropped so only the latest requested id is ever displayed.
#[derive(Debug)]
pub struct ProjectPage {
    guard: ResolveGuard,
    state: PageState,
}

impl Default for ProjectPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectPage {
    pub fn new() -> Self {
        Self {
            guard: ResolveGuard::new(),
            state: PageState::Idle,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn guard(&self) -> &ResolveGuard {
        &self.guard
    }

    /// Begin showing `id`; earlier in-flight results become stale
    pub fn navigate(&mut self, id: &str) -> ResolveTicket {
        self.state = PageState::Loading { id: id.to_string() };
        self.guard.issue()
    }

    /// Apply a finished resolution if `ticket` is still the latest.
    ///
    /// Returns whether the state changed.
    pub fn apply(&mut self, ticket: ResolveTicket, resolution: Resolution) -> bool {
        if !self.guard.is_current(ticket) {
            tracing::debug!(generation = ticket.generation(), "Ignoring stale project resolution");
            return false;
        }
        let id = match &self.state {
            PageState::Loading { id } => id.clone(),
            _ => return false,
        };
        self.state = match resolution {
            Resolution::Found { record, tier } => {
                PageState::Loaded(Box::new(ProjectView::new(record, tier)))
            }
            Resolution::NotFound => PageState::NotFound(NotFoundView::new(id)),
        };
        true
    }

    /// Tear down: drop any in-flight result
    pub fn unmount(&mut self) {
        self.guard.cancel();
        self.state = PageState::Idle;
    }

    /// Navigate to `id` and resolve it in one step
    pub async fn load(&mut self, resolver: &ProjectResolver, id: &str) -> &PageState {
        let ticket = self.navigate(id);
        if let Some(resolution) = resolver.resolve_for(id, &self.guard, ticket).await {
            self.apply(ticket, resolution);
        }
        &self.state
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.trim().is_empty()).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProjectStatus, StaticCatalog};
    use crate::remote::UnconfiguredGateway;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn resolver() -> ProjectResolver {
        ProjectResolver::new(Arc::new(UnconfiguredGateway), Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_view_fallbacks() {
        let mut record = ProjectRecord::new("9", "");
        record.goal = "First line\nSecond line".into();
        record.category = "Architecture".into();
        record.status = Some(ProjectStatus::Idea);

        let view = ProjectView::new(record, ResolutionTier::LocalCache);
        assert_eq!(view.title, "Untitled Project");
        assert_eq!(view.headline.as_deref(), Some("First line"));
        assert_eq!(view.byline, "Architecture • Idea");
        assert_eq!(view.body, "First line\nSecond line");
        assert_eq!(view.image_url, "");
    }

    #[test]
    fn test_explicit_image_beats_derived() {
        let mut record = ProjectRecord::new("9", "T");
        record.repo_url = "https://github.com/acme/widget".into();
        assert_eq!(
            project_image(&record),
            "https://opengraph.githubassets.com/1/acme/widget"
        );

        record.image = "https://cdn.example.com/pic.png".into();
        assert_eq!(project_image(&record), "https://cdn.example.com/pic.png");
    }

    #[test]
    fn test_catalog_pages_url_gets_preview() {
        let catalog = StaticCatalog::bundled();
        let record = catalog.get("4").unwrap();
        assert_eq!(
            project_image(record),
            "https://opengraph.githubassets.com/1/digitaltwinshub/Baldwin"
        );
    }

    #[tokio::test]
    async fn test_load_found_and_not_found() {
        let resolver = resolver();
        let mut page = ProjectPage::new();

        match page.load(&resolver, "1").await {
            PageState::Loaded(view) => assert_eq!(view.title, "Jira Digital Twin"),
            other => panic!("unexpected state: {:?}", other),
        }

        match page.load(&resolver, "missing").await {
            PageState::NotFound(view) => {
                assert_eq!(view.id, "missing");
                assert_eq!(view.back_link, "/projects");
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_older_result_cannot_overwrite_newer() {
        let resolver = resolver();
        let mut page = ProjectPage::new();

        let first = page.navigate("1");
        let second = page.navigate("3");

        let newer = resolver.resolve("3").await;
        let older = resolver.resolve("1").await;

        assert!(page.apply(second, newer));
        assert!(!page.apply(first, older));

        match page.state() {
            PageState::Loaded(view) => assert_eq!(view.title, "Alpha Earth Sandbox"),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unmount_drops_in_flight_result() {
        let resolver = resolver();
        let mut page = ProjectPage::new();

        let ticket = page.navigate("1");
        page.unmount();

        assert!(!page.apply(ticket, resolver.resolve("1").await));
        assert_eq!(page.state(), &PageState::Idle);
    }
}

//! Detail overlay state machine
//!
//! ```text
//!            open                 begin_edit (edit mode on)
//!  Closed ─────────▶ Viewing ─────────────────────────▶ Editing
//!    ▲                 │  ▲                                │
//!    │      close      │  └──────────── cancel_edit ───────┤
//!    ├─────────────────┘                                   │
//!    └──────────────────────── save (persists) ────────────┘
//! ```
//!
//! At most one overlay is open. Opening another section replaces the current
//! one without saving its draft.

use super::model::{DetailDocument, SectionPatch};
use super::store::SectionStore;
use crate::error::{HubError, Result};
use chrono::Utc;
use tracing::debug;

/// Kind of element a click passed through on its way up to the section card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The card itself or static content inside it
    Card,
    Text,
    Button,
    Input,
    /// The rich-text editor's container
    RichTextEditor,
}

impl ClickTarget {
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Button | Self::Input | Self::RichTextEditor)
    }
}

/// Whether a click on a section card should open its detail.
///
/// `path` lists the elements from the click target up to the card; a click
/// that started inside any interactive control does not open the overlay.
pub fn click_opens_detail(path: &[ClickTarget]) -> bool {
    !path.iter().any(|t| t.is_interactive())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Closed,
    Viewing {
        section: String,
        content: DetailDocument,
    },
    Editing {
        section: String,
        content: DetailDocument,
        draft: DetailDocument,
    },
}

impl OverlayState {
    fn name(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Viewing { .. } => "viewing",
            Self::Editing { .. } => "editing",
        }
    }
}

/// Presents one section's detail document at a time
#[derive(Debug, Default)]
pub struct DetailOverlay {
    state: OverlayState,
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, OverlayState::Closed)
    }

    /// Section whose detail is shown
    pub fn section(&self) -> Option<&str> {
        match &self.state {
            OverlayState::Closed => None,
            OverlayState::Viewing { section, .. } | OverlayState::Editing { section, .. } => {
                Some(section)
            }
        }
    }

    /// Committed snapshot being shown
    pub fn content(&self) -> Option<&DetailDocument> {
        match &self.state {
            OverlayState::Closed => None,
            OverlayState::Viewing { content, .. } | OverlayState::Editing { content, .. } => {
                Some(content)
            }
        }
    }

    pub fn draft(&self) -> Option<&DetailDocument> {
        match &self.state {
            OverlayState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Show `key`'s detail, synthesizing one from the section summary if it
    /// has none yet. Any open overlay is discarded unsaved.
    ///
    /// Returns a snapshot of the document now on display.
    pub fn open(&mut self, sections: &SectionStore, key: &str) -> Result<DetailDocument> {
        let entry = sections.get(key).ok_or_else(|| HubError::UnknownEntry {
            kind: "section",
            key: key.to_string(),
        })?;
        if self.is_open() {
            debug!(previous = ?self.section(), "Replacing open detail overlay");
        }
        let content = entry.detail_or_synthesized(Utc::now());
        self.state = OverlayState::Viewing {
            section: key.to_string(),
            content: content.clone(),
        };
        Ok(content)
    }

    /// Open from a card click unless it came from an interactive control.
    ///
    /// Returns whether the overlay opened.
    pub fn open_from_click(
        &mut self,
        sections: &SectionStore,
        key: &str,
        path: &[ClickTarget],
    ) -> Result<bool> {
        if !click_opens_detail(path) {
            return Ok(false);
        }
        self.open(sections, key)?;
        Ok(true)
    }

    /// Viewing → Editing. Requires the hub's edit mode.
    pub fn begin_edit(&mut self, edit_mode: bool) -> Result<&mut DetailDocument> {
        if !matches!(self.state, OverlayState::Viewing { .. }) {
            return Err(invalid("edit", &self.state));
        }
        if !edit_mode {
            return Err(HubError::InvalidTransition {
                action: "edit",
                state: "edit mode is off",
            });
        }
        if let OverlayState::Viewing { section, content } = std::mem::take(&mut self.state) {
            let draft = content.clone();
            self.state = OverlayState::Editing {
                section,
                content,
                draft,
            };
        }
        self.draft_mut()
    }

    /// Mutable access to the draft while editing
    pub fn draft_mut(&mut self) -> Result<&mut DetailDocument> {
        match &mut self.state {
            OverlayState::Editing { draft, .. } => Ok(draft),
            other => Err(HubError::InvalidTransition {
                action: "change draft",
                state: other.name(),
            }),
        }
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.draft_mut()?.title = title.into();
        Ok(())
    }

    pub fn set_draft_body(&mut self, body: impl Into<String>) -> Result<()> {
        self.draft_mut()?.body = body.into();
        Ok(())
    }

    /// Editing → Viewing, discarding the draft
    pub fn cancel_edit(&mut self) -> Result<()> {
        let state = std::mem::take(&mut self.state);
        match state {
            OverlayState::Editing {
                section, content, ..
            } => {
                self.state = OverlayState::Viewing { section, content };
                Ok(())
            }
            other => {
                let err = invalid("cancel", &other);
                self.state = other;
                Err(err)
            }
        }
    }

    /// Editing → Closed, committing the draft to `sections` with a fresh
    /// `lastUpdated`. On a persistence failure the overlay stays in Editing.
    pub fn save(&mut self, sections: &mut SectionStore) -> Result<()> {
        let (section, content, draft) = match std::mem::take(&mut self.state) {
            OverlayState::Editing {
                section,
                content,
                draft,
            } => (section, content, draft),
            other => {
                let err = invalid("save", &other);
                self.state = other;
                return Err(err);
            }
        };

        let committed = DetailDocument {
            last_updated: Utc::now(),
            ..draft.clone()
        };
        match sections.update(&section, SectionPatch::new().content(committed)) {
            Ok(_) => {
                debug!(section = %section, "Saved detail document");
                Ok(())
            }
            Err(e) => {
                self.state = OverlayState::Editing {
                    section,
                    content,
                    draft,
                };
                Err(e)
            }
        }
    }

    /// Close without persisting; an open draft is discarded
    pub fn close(&mut self) {
        self.state = OverlayState::Closed;
    }
}

fn invalid(action: &'static str, state: &OverlayState) -> HubError {
    HubError::InvalidTransition {
        action,
        state: state.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::model::SectionEntry;
    use crate::storage::{read_json, LocalStore, MemoryStore, ReadOnlyStore, SECTIONS_KEY};
    use indexmap::IndexMap;
    use std::sync::Arc;

    fn sections() -> (Arc<MemoryStore>, SectionStore) {
        let cache = Arc::new(MemoryStore::new());
        (cache.clone(), SectionStore::load(cache))
    }

    #[test]
    fn test_click_exclusion() {
        assert!(click_opens_detail(&[ClickTarget::Text, ClickTarget::Card]));
        assert!(!click_opens_detail(&[ClickTarget::Button, ClickTarget::Card]));
        assert!(!click_opens_detail(&[
            ClickTarget::Text,
            ClickTarget::RichTextEditor,
            ClickTarget::Card
        ]));
    }

    #[test]
    fn test_open_synthesizes_from_summary() {
        let (cache, store) = sections();
        let mut overlay = DetailOverlay::new();

        let doc = overlay.open(&store, "videos").unwrap();
        assert_eq!(doc.title, "Video lessons");
        assert_eq!(doc.body, store.get("videos").unwrap().description);
        // Opening never persists
        assert!(cache.get(SECTIONS_KEY).is_none());
    }

    #[test]
    fn test_open_unknown_section() {
        let (_cache, store) = sections();
        let mut overlay = DetailOverlay::new();
        assert!(overlay.open(&store, "nope").is_err());
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_click_from_button_does_not_open() {
        let (_cache, store) = sections();
        let mut overlay = DetailOverlay::new();

        let opened = overlay
            .open_from_click(&store, "labs", &[ClickTarget::Input, ClickTarget::Card])
            .unwrap();
        assert!(!opened);
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_edit_requires_edit_mode() {
        let (_cache, store) = sections();
        let mut overlay = DetailOverlay::new();
        overlay.open(&store, "labs").unwrap();

        assert!(overlay.begin_edit(false).is_err());
        assert!(matches!(overlay.state(), OverlayState::Viewing { .. }));
    }

    #[test]
    fn test_cancel_discards_draft() {
        let (cache, store) = sections();
        let mut overlay = DetailOverlay::new();
        overlay.open(&store, "labs").unwrap();
        overlay.begin_edit(true).unwrap();
        overlay.set_draft_body("scratch").unwrap();

        overlay.cancel_edit().unwrap();
        assert_eq!(overlay.content().unwrap().body, store.get("labs").unwrap().description);
        assert!(overlay.draft().is_none());
        assert!(cache.get(SECTIONS_KEY).is_none());
    }

    #[test]
    fn test_save_persists_and_closes() {
        let (cache, mut store) = sections();
        let mut overlay = DetailOverlay::new();

        let opened_at = overlay.open(&store, "videos").unwrap().last_updated;
        overlay.begin_edit(true).unwrap();
        overlay.set_draft_body("<p>Full video guide</p>").unwrap();
        overlay.save(&mut store).unwrap();

        assert!(!overlay.is_open());
        let persisted: IndexMap<String, SectionEntry> = read_json(&*cache, SECTIONS_KEY).unwrap();
        let content = persisted["videos"].content.as_ref().unwrap();
        assert_eq!(content.body, "<p>Full video guide</p>");
        assert!(content.last_updated >= opened_at);
    }

    #[test]
    fn test_failed_save_stays_editing() {
        let mut store = SectionStore::load(Arc::new(ReadOnlyStore::default()));
        let mut overlay = DetailOverlay::new();
        let opened = overlay.open(&store, "videos").unwrap();
        overlay.begin_edit(true).unwrap();
        overlay.set_draft_body("<p>Unsaved guide</p>").unwrap();

        let err = overlay.save(&mut store).unwrap_err();
        assert!(matches!(err, HubError::Storage(_)));

        assert_eq!(overlay.section(), Some("videos"));
        assert_eq!(overlay.content(), Some(&opened));
        assert_eq!(overlay.draft().unwrap().body, "<p>Unsaved guide</p>");
        assert!(store.get("videos").unwrap().content.is_none());

        // Draft is intact, so cancelling still works
        overlay.cancel_edit().unwrap();
        assert!(matches!(overlay.state(), OverlayState::Viewing { .. }));
    }

    #[test]
    fn test_open_replaces_without_saving() {
        let (cache, store) = sections();
        let mut overlay = DetailOverlay::new();
        overlay.open(&store, "labs").unwrap();
        overlay.begin_edit(true).unwrap();
        overlay.set_draft_body("unsaved").unwrap();

        overlay.open(&store, "courses").unwrap();
        assert_eq!(overlay.section(), Some("courses"));
        assert!(overlay.draft().is_none());
        assert!(cache.get(SECTIONS_KEY).is_none());
    }

    #[test]
    fn test_invalid_transitions_keep_state() {
        let (_cache, mut store) = sections();
        let mut overlay = DetailOverlay::new();

        assert!(overlay.save(&mut store).is_err());
        assert!(overlay.cancel_edit().is_err());
        assert!(overlay.set_draft_body("x").is_err());
        assert_eq!(overlay.state(), &OverlayState::Closed);

        overlay.open(&store, "labs").unwrap();
        assert!(overlay.save(&mut store).is_err());
        assert!(matches!(overlay.state(), OverlayState::Viewing { .. }));
    }
}

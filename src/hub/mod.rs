//! Learning hub content
//!
//! Editable sections and pathways persisted to the local cache, plus the
//! detail overlay used to read and edit a section's long-form document.
//!
//! ```rust,ignore
//! let mut hub = LearningHub::load(cache);
//!
//! hub.set_edit_mode(true);
//! hub.sections_mut()?.add_item("labs", "Lab: Map noise levels")?;
//!
//! hub.open_detail("videos")?;
//! hub.begin_edit()?;
//! hub.overlay_mut().set_draft_body("<p>Full guide</p>")?;
//! hub.save_detail()?;
//! ```

mod defaults;
mod model;
mod overlay;
mod store;

pub use defaults::{default_pathways, default_sections};
pub use model::{
    DetailDocument, HubEntry, PathwayEntry, PathwayPatch, SectionEntry, SectionPatch,
};
pub use overlay::{click_opens_detail, ClickTarget, DetailOverlay, OverlayState};
pub use store::{ContentStore, HubContentStore, PathwayStore, SectionStore};

use crate::error::{HubError, Result};
use crate::storage::LocalStore;
use std::sync::Arc;

/// Hub session: content, the detail overlay and the global edit-mode flag
pub struct LearningHub {
    content: HubContentStore,
    overlay: DetailOverlay,
    edit_mode: bool,
}

impl LearningHub {
    pub fn load(cache: Arc<dyn LocalStore>) -> Self {
        Self {
            content: HubContentStore::load(cache),
            overlay: DetailOverlay::new(),
            edit_mode: false,
        }
    }

    pub fn sections(&self) -> &SectionStore {
        &self.content.sections
    }

    pub fn pathways(&self) -> &PathwayStore {
        &self.content.pathways
    }

    /// Section editing is only available in edit mode
    pub fn sections_mut(&mut self) -> Result<&mut SectionStore> {
        self.require_edit_mode()?;
        Ok(&mut self.content.sections)
    }

    /// Pathway editing is only available in edit mode
    pub fn pathways_mut(&mut self) -> Result<&mut PathwayStore> {
        self.require_edit_mode()?;
        Ok(&mut self.content.pathways)
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.set_edit_mode(!self.edit_mode);
        self.edit_mode
    }

    /// Leaving edit mode drops any open draft (the overlay stays on view)
    pub fn set_edit_mode(&mut self, enabled: bool) {
        self.edit_mode = enabled;
        if !enabled && self.overlay.draft().is_some() {
            tracing::debug!("Edit mode disabled, discarding open draft");
            // Only fails when not editing, which was just ruled out
            let _ = self.overlay.cancel_edit();
        }
    }

    pub fn overlay(&self) -> &DetailOverlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut DetailOverlay {
        &mut self.overlay
    }

    pub fn open_detail(&mut self, key: &str) -> Result<DetailDocument> {
        self.overlay.open(&self.content.sections, key)
    }

    /// Card click; ignored when it originated in an interactive control
    pub fn click_section(&mut self, key: &str, path: &[ClickTarget]) -> Result<bool> {
        self.overlay
            .open_from_click(&self.content.sections, key, path)
    }

    pub fn begin_edit(&mut self) -> Result<&mut DetailDocument> {
        self.overlay.begin_edit(self.edit_mode)
    }

    pub fn cancel_edit(&mut self) -> Result<()> {
        self.overlay.cancel_edit()
    }

    pub fn save_detail(&mut self) -> Result<()> {
        self.overlay.save(&mut self.content.sections)
    }

    pub fn close_detail(&mut self) {
        self.overlay.close();
    }

    fn require_edit_mode(&self) -> Result<()> {
        if self.edit_mode {
            Ok(())
        } else {
            Err(HubError::InvalidTransition {
                action: "edit content",
                state: "edit mode is off",
            })
        }
    }
}

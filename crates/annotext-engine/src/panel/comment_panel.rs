use crate::editing::commands::Cmd;
use crate::editing::editor::Editor;
use crate::editing::leaf::Mark;
use crate::editing::patch::Patch;
use crate::panel::policy::{PanelState, decide_visibility};

/// Buttons the panel offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelButtons {
    /// Selection is not fully commented: "Comment"
    #[default]
    Comment,
    /// Selection is a comment: "Update" and "Cancel"
    UpdateOrCancel,
}

/// What a front end needs to draw the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelProps {
    pub visible: bool,
    pub comment_text: String,
    pub buttons: PanelButtons,
}

/// State behind the floating comment panel.
///
/// Call [`CommentPanel::refresh`] after every selection, focus or document
/// change. The draft follows the comment under the selection: whenever that
/// comment's text changes (including moving onto another comment or off all
/// comments) the draft is reset to it, otherwise user edits to the draft are
/// kept.
#[derive(Debug, Clone, Default)]
pub struct CommentPanel {
    state: PanelState,
    draft: String,
    /// Comment text the draft was last reset from
    synced: Option<String>,
    commented: bool,
}

impl CommentPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&mut self, editor: &Editor) -> PanelState {
        self.state = decide_visibility(&editor.selection_snapshot());
        self.commented = editor.is_mark_active(Mark::Comment);

        let data = editor.comment_data();
        if data != self.synced {
            self.draft = data.clone().unwrap_or_default();
            self.synced = data;
        }

        self.state
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    pub fn buttons(&self) -> PanelButtons {
        if self.commented {
            PanelButtons::UpdateOrCancel
        } else {
            PanelButtons::Comment
        }
    }

    pub fn props(&self) -> PanelProps {
        PanelProps {
            visible: self.is_visible(),
            comment_text: self.draft.clone(),
            buttons: self.buttons(),
        }
    }

    /// "Comment" or "Update": write the draft onto the selection. Does
    /// nothing while the panel is hidden.
    pub fn apply(&mut self, editor: &mut Editor) -> Option<Patch> {
        if !self.is_visible() {
            return None;
        }

        let text = self.draft.clone();
        let cmd = match self.buttons() {
            PanelButtons::Comment => Cmd::ApplyComment { text },
            PanelButtons::UpdateOrCancel => Cmd::UpdateComment { text },
        };
        log::info!("comment panel: {cmd:?}");

        let patch = editor.apply(cmd);
        self.refresh(editor);
        Some(patch)
    }

    /// "Cancel": remove the comment under the selection. Only offered while
    /// a comment is selected; otherwise does nothing.
    pub fn cancel(&mut self, editor: &mut Editor) -> Option<Patch> {
        if !self.is_visible() || self.buttons() != PanelButtons::UpdateOrCancel {
            return None;
        }

        log::info!("comment panel: clearing comment");
        let patch = editor.apply(Cmd::ClearComment);
        self.refresh(editor);
        Some(patch)
    }
}

use crate::editing::document::Document;
use crate::editing::selection::Range;

/// Whether the comment panel is shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Hidden,
    Visible,
}

impl PanelState {
    pub fn is_visible(self) -> bool {
        self == PanelState::Visible
    }
}

/// Selection state sampled on every selection, focus or document change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub has_selection: bool,
    pub is_focused: bool,
    /// Caret rather than a range
    pub is_collapsed: bool,
    pub selected_text: String,
    /// The leaf under the selection anchor is part of a comment
    pub anchor_inside_comment: bool,
}

impl SelectionSnapshot {
    pub fn capture(document: &Document, selection: Option<&Range>, focused: bool) -> Self {
        let Some(range) = selection else {
            return Self {
                is_focused: focused,
                ..Self::default()
            };
        };

        Self {
            has_selection: true,
            is_focused: focused,
            is_collapsed: range.is_collapsed(),
            selected_text: document.string(range),
            anchor_inside_comment: document
                .leaf_at(range.anchor)
                .is_some_and(|leaf| leaf.comment),
        }
    }
}

/// Decide whether the comment panel shows. First matching rule wins:
///
/// 1. no selection: hidden
/// 2. anchor inside a comment: visible, even for a caret or without focus,
///    so an existing comment can be edited
/// 3. only whitespace selected: hidden
/// 4. anything else: visible
///
/// Focus never hides the panel on its own: losing focus with nothing
/// selected is already covered by rules 1 and 3, and with text selected the
/// panel has to stay up while its input takes focus.
pub fn decide_visibility(snapshot: &SelectionSnapshot) -> PanelState {
    if !snapshot.has_selection {
        PanelState::Hidden
    } else if snapshot.anchor_inside_comment {
        PanelState::Visible
    } else if snapshot.selected_text.trim().is_empty() {
        PanelState::Hidden
    } else {
        PanelState::Visible
    }
}

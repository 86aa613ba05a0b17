use crate::editing::comments;
use crate::editing::document::Document;
use crate::editing::leaf::Mark;
use crate::editing::marks;
use crate::editing::selection::{Point, Range};

/// Edit commands. Each acts on the editor's current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    ToggleMark { mark: Mark },
    /// Toggle the comment mark, attaching `text` when it gets set
    ToggleComment { text: String },
    /// Comment the selection with `text` (the panel's "Comment" button)
    ApplyComment { text: String },
    /// Replace the text of the selected comment (the panel's "Update" button)
    UpdateComment { text: String },
    /// Remove the selected comment (the panel's "Cancel" button)
    ClearComment,
    /// Type or paste at the selection, replacing an expanded range
    InsertText { text: String },
    DeleteBackward,
    DeleteForward,
    /// Enter: split the block at the caret
    SplitBlock,
}

impl Cmd {
    /// Typing commands share an undo entry with the typing just before them
    pub(crate) fn merges_with(&self, previous: Option<&Cmd>) -> bool {
        matches!(
            (self, previous),
            (Cmd::InsertText { .. }, Some(Cmd::InsertText { .. }))
        )
    }
}

/// Run `cmd` against `document`, returning the selection after the edit.
/// Commands without a selection to act on leave the document untouched.
pub(crate) fn execute(document: &mut Document, selection: Option<Range>, cmd: &Cmd) -> Option<Range> {
    let range = selection?;

    match cmd {
        Cmd::ToggleMark { mark } => {
            marks::toggle_mark_in_place(document, Some(&range), *mark, None);
            Some(range)
        }
        Cmd::ToggleComment { text } => {
            marks::toggle_mark_in_place(document, Some(&range), Mark::Comment, Some(text));
            Some(range)
        }
        Cmd::ApplyComment { text } | Cmd::UpdateComment { text } => {
            comments::apply_comment_in_place(document, Some(&range), text);
            Some(range)
        }
        Cmd::ClearComment => {
            comments::clear_comment_in_place(document, Some(&range));
            Some(range)
        }
        Cmd::InsertText { text } => {
            let caret = collapse(document, range);
            Some(Range::caret(document.insert_text(caret, text)))
        }
        Cmd::DeleteBackward => {
            let caret = if range.is_expanded() {
                document.delete_range(&range)
            } else {
                document.delete_backward(range.anchor)
            };
            Some(Range::caret(caret))
        }
        Cmd::DeleteForward => {
            let caret = if range.is_expanded() {
                document.delete_range(&range)
            } else {
                document.delete_forward(range.anchor)
            };
            Some(Range::caret(caret))
        }
        Cmd::SplitBlock => {
            let caret = collapse(document, range);
            Some(Range::caret(document.split_block(caret)))
        }
    }
}

/// Delete an expanded range and return the caret left behind
fn collapse(document: &mut Document, range: Range) -> Point {
    if range.is_expanded() {
        document.delete_range(&range)
    } else {
        range.anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::leaf::Leaf;
    use crate::tests::{doc, plain};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_commands_without_selection_do_nothing() {
        let mut document = doc(vec![vec![plain("abc")]]);
        let before = document.clone();

        for cmd in [
            Cmd::ToggleMark { mark: Mark::Bold },
            Cmd::InsertText {
                text: "x".to_string(),
            },
            Cmd::DeleteBackward,
            Cmd::SplitBlock,
        ] {
            assert_eq!(execute(&mut document, None, &cmd), None);
        }
        assert_eq!(document, before);
    }

    #[test]
    fn test_insert_replaces_expanded_selection() {
        let mut document = doc(vec![vec![plain("hello world")]]);

        let selection = execute(
            &mut document,
            Some(Range::within(0, 6, 11)),
            &Cmd::InsertText {
                text: "there".to_string(),
            },
        );
        document.normalize();

        assert_eq!(document.text(), "hello there");
        assert_eq!(selection, Some(Range::caret(Point::new(0, 11))));
    }

    #[test]
    fn test_delete_backward_removes_expanded_selection_only() {
        let mut document = doc(vec![vec![plain("abcdef")]]);

        let selection = execute(
            &mut document,
            Some(Range::within(0, 4, 2)),
            &Cmd::DeleteBackward,
        );
        document.normalize();

        assert_eq!(document.text(), "abef");
        assert_eq!(selection, Some(Range::caret(Point::new(0, 2))));
    }

    #[test]
    fn test_update_comment_keeps_selection() {
        let mut document = doc(vec![vec![Leaf::new("ab").with_comment("old")]]);
        let caret = Range::caret(Point::new(0, 1));

        let selection = execute(
            &mut document,
            Some(caret),
            &Cmd::UpdateComment {
                text: "new".to_string(),
            },
        );

        assert_eq!(selection, Some(caret));
        assert_eq!(document.blocks()[0].children[0].data.as_deref(), Some("new"));
    }

    #[test]
    fn test_toggle_comment_sets_then_clears() {
        let mut document = doc(vec![vec![plain("abc")]]);
        let range = Some(Range::within(0, 0, 3));
        let cmd = Cmd::ToggleComment {
            text: "why".to_string(),
        };

        execute(&mut document, range, &cmd);
        assert_eq!(
            document.blocks()[0].children,
            vec![Leaf::new("abc").with_comment("why")]
        );

        execute(&mut document, range, &cmd);
        assert_eq!(document.blocks()[0].children, vec![plain("abc")]);
    }

    #[test]
    fn test_only_typing_merges_with_typing() {
        let typing = Cmd::InsertText {
            text: "a".to_string(),
        };

        assert!(typing.merges_with(Some(&typing)));
        assert!(!typing.merges_with(None));
        assert!(!typing.merges_with(Some(&Cmd::SplitBlock)));
        assert!(!Cmd::DeleteBackward.merges_with(Some(&typing)));
    }
}

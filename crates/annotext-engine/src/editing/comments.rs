//! Inline comments: the `comment` mark plus its free-text `data` payload.

use crate::editing::document::Document;
use crate::editing::leaf::Mark;
use crate::editing::marks::{self, MarkChange};
use crate::editing::selection::Range;

/// Mark the selection as commented with `text`, replacing any existing
/// comment text. Idempotent.
pub fn apply_comment(document: &Document, selection: Option<&Range>, text: &str) -> Document {
    let mut next = document.clone();
    apply_comment_in_place(&mut next, selection, text);
    next.normalize();
    next
}

/// Same as [`apply_comment`]. Updating a comment is a single apply, not a
/// clear-then-set pair.
pub fn update_comment(document: &Document, selection: Option<&Range>, text: &str) -> Document {
    apply_comment(document, selection, text)
}

/// Remove the comment mark and its text from the selection
pub fn clear_comment(document: &Document, selection: Option<&Range>) -> Document {
    let mut next = document.clone();
    clear_comment_in_place(&mut next, selection);
    next.normalize();
    next
}

pub(crate) fn apply_comment_in_place(
    document: &mut Document,
    selection: Option<&Range>,
    text: &str,
) -> bool {
    selection.is_some_and(|range| {
        marks::set_mark(
            document,
            range,
            Mark::Comment,
            MarkChange::Set { data: Some(text) },
        )
    })
}

pub(crate) fn clear_comment_in_place(document: &mut Document, selection: Option<&Range>) -> bool {
    selection
        .is_some_and(|range| marks::set_mark(document, range, Mark::Comment, MarkChange::Clear))
}

/// Comment text of the first commented leaf the selection touches. A caret
/// inside a comment reads that comment. A comment without text yields `""`.
pub fn comment_data(document: &Document, selection: Option<&Range>) -> Option<String> {
    let range = selection?;
    let target = marks::target_range(document, range, Mark::Comment)?;
    document
        .leaves_in(&target)
        .into_iter()
        .find(|leaf| leaf.comment)
        .map(|leaf| leaf.data.clone().unwrap_or_default())
}

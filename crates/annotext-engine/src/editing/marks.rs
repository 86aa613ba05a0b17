//! Mark toggling over a selection.
//!
//! A mark is active when every leaf the selection touches carries it.
//! Toggling an inactive mark sets it on all of them; toggling an active one
//! clears it. Leaves straddling the selection edges are split first, so the
//! marked text is always made of whole leaves.

use crate::editing::document::Document;
use crate::editing::leaf::{Leaf, Mark};
use crate::editing::selection::Range;

/// What to do with a mark on every targeted leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkChange<'a> {
    /// Set the mark. For `Comment`, `data` replaces the payload when given.
    Set { data: Option<&'a str> },
    /// Clear the mark, and the payload for `Comment`
    Clear,
}

/// True when the selection touches at least one leaf and all touched leaves
/// carry `mark`
pub fn is_mark_active(document: &Document, selection: Option<&Range>, mark: Mark) -> bool {
    let Some(range) = selection else {
        return false;
    };
    let target = target_range(document, range, mark).unwrap_or(*range);
    let leaves = document.leaves_in(&target);
    !leaves.is_empty() && leaves.iter().all(|leaf| leaf.has(mark))
}

/// Toggle `mark` over the selection and return the resulting document.
///
/// `data` is only meaningful for [`Mark::Comment`]. Without a selection the
/// document comes back unchanged.
pub fn toggle_mark(
    document: &Document,
    selection: Option<&Range>,
    mark: Mark,
    data: Option<&str>,
) -> Document {
    let mut next = document.clone();
    toggle_mark_in_place(&mut next, selection, mark, data);
    next.normalize();
    next
}

pub(crate) fn toggle_mark_in_place(
    document: &mut Document,
    selection: Option<&Range>,
    mark: Mark,
    data: Option<&str>,
) -> bool {
    let Some(range) = selection else {
        return false;
    };
    let change = if is_mark_active(document, Some(range), mark) {
        MarkChange::Clear
    } else {
        MarkChange::Set { data }
    };
    set_mark(document, range, mark, change)
}

/// Apply `change` to every leaf covered by `range`. Returns whether any leaf
/// changed.
pub(crate) fn set_mark(
    document: &mut Document,
    range: &Range,
    mark: Mark,
    change: MarkChange<'_>,
) -> bool {
    let Some(target) = target_range(document, range, mark) else {
        return false;
    };
    if target.is_collapsed() {
        return false;
    }

    let mut changed = false;
    for (block, span) in document.split_range(&target) {
        for leaf in &mut document.blocks[block].children[span] {
            changed |= apply_change(leaf, mark, change);
        }
    }
    changed
}

/// Range a mark operation acts on. Expanded selections act on themselves.
/// A caret only reaches a comment: the whole comment run around it, so a
/// comment can be edited or removed without reselecting it.
pub(crate) fn target_range(document: &Document, range: &Range, mark: Mark) -> Option<Range> {
    let range = document.clamp_range(*range);
    if range.is_expanded() {
        return Some(range);
    }
    match mark {
        Mark::Comment => document.comment_run(range.anchor),
        _ => None,
    }
}

fn apply_change(leaf: &mut Leaf, mark: Mark, change: MarkChange<'_>) -> bool {
    let before = leaf.clone();
    match change {
        MarkChange::Set { data } => {
            leaf.set(mark, true);
            if let (Mark::Comment, Some(data)) = (mark, data) {
                leaf.data = Some(data.to_string());
            }
        }
        MarkChange::Clear => leaf.set(mark, false),
    }
    *leaf != before
}

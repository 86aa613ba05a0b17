use crate::editing::document::Document;
use crate::editing::selection::Range;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Document and selection as they were before an edit
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry {
    pub(crate) document: Document,
    pub(crate) selection: Option<Range>,
}

/// Bounded undo/redo stacks of whole-document states.
///
/// A run of consecutive typing commands shares one undo entry, so undo
/// removes a typed word rather than a single character.
#[derive(Debug, Clone)]
pub struct History {
    undos: Vec<Entry>,
    redos: Vec<Entry>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// `limit` of 0 disables history
    pub fn new(limit: usize) -> Self {
        Self {
            undos: Vec::new(),
            redos: Vec::new(),
            limit,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undos.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redos.is_empty()
    }

    /// Remember the state preceding an edit. With `merge`, the edit joins the
    /// previous entry instead of opening a new one.
    pub(crate) fn record(&mut self, entry: Entry, merge: bool) {
        self.redos.clear();
        if self.limit == 0 || (merge && self.can_undo()) {
            return;
        }
        self.undos.push(entry);
        if self.undos.len() > self.limit {
            self.undos.remove(0);
        }
    }

    pub(crate) fn undo(&mut self, current: Entry) -> Option<Entry> {
        let previous = self.undos.pop()?;
        self.redos.push(current);
        Some(previous)
    }

    pub(crate) fn redo(&mut self, current: Entry) -> Option<Entry> {
        let next = self.redos.pop()?;
        self.undos.push(current);
        Some(next)
    }
}

use crate::editing::commands::{self, Cmd};
use crate::editing::comments;
use crate::editing::document::{Block, Document};
use crate::editing::history::{Entry, History};
use crate::editing::leaf::Mark;
use crate::editing::marks;
use crate::editing::patch::Patch;
use crate::editing::selection::{Direction, Point, Range};
use crate::panel::SelectionSnapshot;

/// An editing session: the document plus everything that changes while a
/// user works on it (selection, focus, version, undo history).
///
/// All edits go through [`Editor::apply`]; the document is normalized after
/// every command so neighbouring leaves with equal marks never linger.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    selection: Option<Range>,
    focused: bool,
    version: u64,
    history: History,
    /// Last applied command, for grouping typing into one undo step
    last_cmd: Option<Cmd>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Document::new())
    }
}

impl Editor {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: None,
            focused: false,
            version: 0,
            history: History::default(),
            last_cmd: None,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = History::new(limit);
        self
    }

    /// Open a document stored as JSON
    pub fn from_json_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(crate::io::parse_document(text)?))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Option<Range> {
        self.selection
    }

    /// Replace the selection; points are clamped into the document
    pub fn select(&mut self, selection: Option<Range>) {
        self.selection = selection.map(|range| self.document.clamp_range(range));
        self.last_cmd = None;
    }

    pub fn select_all(&mut self) {
        self.select(Some(Range::new(Point::default(), self.document.end())));
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply a command to the document and selection
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let before = Entry {
            document: self.document.clone(),
            selection: self.selection,
        };

        let selection = commands::execute(&mut self.document, self.selection, &cmd);
        self.document.normalize();
        self.selection = selection.map(|range| self.document.clamp_range(range));

        let changed = changed_blocks(&before.document.blocks, &self.document.blocks);
        if self.document != before.document {
            let merge = cmd.merges_with(self.last_cmd.as_ref());
            self.history.record(before, merge);
        }

        self.version += 1;
        log::debug!(
            "applied {cmd:?}: version {}, changed blocks {changed:?}",
            self.version
        );
        self.last_cmd = Some(cmd);

        Patch {
            changed,
            new_selection: self.selection,
            version: self.version,
        }
    }

    /// Restore the state before the last recorded edit
    pub fn undo(&mut self) -> Option<Patch> {
        let current = self.entry();
        let previous = self.history.undo(current)?;
        Some(self.restore(previous))
    }

    pub fn redo(&mut self) -> Option<Patch> {
        let current = self.entry();
        let next = self.history.redo(current)?;
        Some(self.restore(next))
    }

    /// Move the caret one step. With `extend` the anchor stays put and only
    /// the focus moves; without it an expanded selection collapses toward
    /// the direction of travel.
    pub fn move_caret(&mut self, direction: Direction, extend: bool) {
        let range = self
            .selection
            .unwrap_or_else(|| Range::caret(Point::default()));

        let next = if extend {
            Range::new(range.anchor, self.document.step(range.focus, direction))
        } else if range.is_expanded() && direction == Direction::Left {
            Range::caret(range.start())
        } else if range.is_expanded() && direction == Direction::Right {
            Range::caret(range.end())
        } else {
            Range::caret(self.document.step(range.focus, direction))
        };

        self.select(Some(next));
    }

    pub fn selected_text(&self) -> String {
        self.selection
            .map(|range| self.document.string(&range))
            .unwrap_or_default()
    }

    pub fn is_mark_active(&self, mark: Mark) -> bool {
        marks::is_mark_active(&self.document, self.selection.as_ref(), mark)
    }

    pub fn comment_data(&self) -> Option<String> {
        comments::comment_data(&self.document, self.selection.as_ref())
    }

    /// Inputs for the comment panel visibility decision
    pub fn selection_snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot::capture(&self.document, self.selection.as_ref(), self.focused)
    }

    fn entry(&self) -> Entry {
        Entry {
            document: self.document.clone(),
            selection: self.selection,
        }
    }

    fn restore(&mut self, entry: Entry) -> Patch {
        let changed = changed_blocks(&self.document.blocks, &entry.document.blocks);
        self.document = entry.document;
        self.selection = entry.selection;
        self.version += 1;
        self.last_cmd = None;
        log::debug!("restored history entry: version {}", self.version);

        Patch {
            changed,
            new_selection: self.selection,
            version: self.version,
        }
    }
}

/// Span of blocks in `after` that differ from `before`, found by trimming
/// the common prefix and suffix
fn changed_blocks(before: &[Block], after: &[Block]) -> std::ops::Range<usize> {
    let prefix = before
        .iter()
        .zip(after)
        .take_while(|(old, new)| old == new)
        .count();
    let suffix = before
        .iter()
        .rev()
        .zip(after.iter().rev())
        .take_while(|(old, new)| old == new)
        .count()
        .min(before.len().min(after.len()) - prefix);
    prefix..after.len() - suffix
}

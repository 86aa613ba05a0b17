/*!
 * # Editing Core Module
 *
 * This module implements the rich-text model and every operation that
 * changes it.
 *
 * ## Architecture Overview
 *
 * ### 1. Document Model: Blocks of Marked Leaves
 * - A **`Document`** is an ordered list of **`Block`**s (paragraphs)
 * - Each block is an ordered list of **`Leaf`**s: text plus boolean marks
 *   (`bold`, `italic`, `underlined`, `comment`) and an optional comment
 *   payload (`data`)
 * - Documents are always **normalized**: neighbouring leaves with equal marks
 *   are merged and empty leaves dropped, but every block keeps one leaf
 *
 * ### 2. Block-Level Points
 * - A **`Point`** is a block index plus a character offset into that block's
 *   text, so points stay valid when leaves are split or merged
 * - A **`Range`** has an anchor (where the gesture started) and a focus; the
 *   editor selection is `Option<Range>`
 *
 * ### 3. Marks and Comments
 * - **`marks`**: toggling a mark over a selection. The mark is active when
 *   every touched leaf carries it; leaves are split at the selection edges so
 *   marked text is always whole leaves
 * - **`comments`**: the comment mark with its text payload (apply, update,
 *   clear, read)
 *
 * ### 4. Command-Based Editing
 * - All edits are **`Cmd`**s applied through **`Editor::apply`**, which
 *   normalizes, records undo history and returns a **`Patch`**
 * - Consecutive typing shares one undo step
 *
 * ## Module Structure
 *
 * - **`leaf`**: `Leaf`, `Mark`, `Decoration`
 * - **`selection`**: `Point`, `Range`, `Direction`
 * - **`document`**: `Document`/`Block`, queries, splitting, text edits
 * - **`marks`** / **`comments`**: the toggler and the comment annotator
 * - **`commands`**: `Cmd` and its execution against a document
 * - **`editor`**: the `Editor` session
 * - **`history`**: bounded undo/redo
 * - **`input`**: `formatBold`-style input types to commands
 * - **`patch`**: edit result metadata
 *
 * ## Usage Pattern
 *
 * ```rust
 * use annotext_engine::editing::*;
 *
 * let mut editor = Editor::new(Document::sample());
 * editor.set_focused(true);
 *
 * // Select "bold" in the first paragraph and toggle it off
 * editor.select(Some(Range::within(0, 110, 114)));
 * let patch = editor.apply(Cmd::ToggleMark { mark: Mark::Bold });
 * assert_eq!(patch.changed, 0..1);
 * assert!(!editor.is_mark_active(Mark::Bold));
 *
 * // Undo brings it back
 * editor.undo();
 * assert!(editor.is_mark_active(Mark::Bold));
 * ```
 */

pub mod commands;
pub mod comments;
pub mod document;
pub mod editor;
pub mod history;
pub mod input;
pub mod leaf;
pub mod marks;
pub mod patch;
pub mod selection;

// Public API re-exports
pub use commands::Cmd;
pub use document::{Block, BlockKind, Document};
pub use editor::Editor;
pub use history::{DEFAULT_HISTORY_LIMIT, History};
pub use input::FormatInput;
pub use leaf::{Decoration, Leaf, Mark, UnknownMark};
pub use patch::Patch;
pub use selection::{Direction, Point, Range};

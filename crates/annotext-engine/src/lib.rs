pub mod editing;
pub mod io;
pub mod panel;
pub mod render;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{comments::*, marks::*};
pub use editing::{
    Block, BlockKind, Cmd, DEFAULT_HISTORY_LIMIT, Decoration, Direction, Document, Editor,
    FormatInput, History, Leaf, Mark, Patch, Point, Range, UnknownMark,
};
pub use io::*;
pub use panel::*;

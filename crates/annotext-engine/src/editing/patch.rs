use crate::editing::selection::Range;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Block indices in the new document whose content changed. Empty when
    /// blocks were only removed.
    pub changed: std::ops::Range<usize>,
    pub new_selection: Option<Range>,
    pub version: u64,
}

use serde::{Deserialize, Serialize};

/// Position in a document: block index plus character offset into the
/// block's concatenated text.
///
/// Offsets are block-level rather than leaf-level so a point stays valid when
/// leaves are split by marking or merged by normalization.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Point {
    pub block: usize,
    pub offset: usize,
}

impl Point {
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

/// A selection range. `anchor` is where the gesture started, `focus` where it
/// currently ends; the focus may precede the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub anchor: Point,
    pub focus: Point,
}

impl Range {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// Collapsed range (a caret)
    pub fn caret(point: Point) -> Self {
        Self::new(point, point)
    }

    /// Convenience for single-block ranges
    pub fn within(block: usize, start: usize, end: usize) -> Self {
        Self::new(Point::new(block, start), Point::new(block, end))
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn is_expanded(&self) -> bool {
        !self.is_collapsed()
    }

    pub fn is_backward(&self) -> bool {
        self.focus < self.anchor
    }

    pub fn start(&self) -> Point {
        self.anchor.min(self.focus)
    }

    pub fn end(&self) -> Point {
        self.anchor.max(self.focus)
    }
}

/// Caret movement directions used by keyboard navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_order_by_block_then_offset() {
        assert!(Point::new(0, 9) < Point::new(1, 0));
        assert!(Point::new(1, 2) < Point::new(1, 3));
    }

    #[test]
    fn test_backward_range_orders_endpoints() {
        let range = Range::new(Point::new(2, 1), Point::new(0, 4));

        assert!(range.is_backward());
        assert_eq!(range.start(), Point::new(0, 4));
        assert_eq!(range.end(), Point::new(2, 1));
    }

    #[test]
    fn test_caret_is_collapsed() {
        let caret = Range::caret(Point::new(0, 3));
        assert!(caret.is_collapsed());
        assert!(!caret.is_expanded());
        assert!(!Range::within(0, 1, 2).is_collapsed());
    }
}

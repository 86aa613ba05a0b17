use serde::{Deserialize, Serialize};

use crate::editing::leaf::{Leaf, Mark, byte_offset};
use crate::editing::selection::{Direction, Point, Range};

/// Block types. Only paragraphs exist today; the tag is kept so stored
/// documents carry `"type": "paragraph"` like the editor writes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Paragraph,
}

/// Ordered run of text leaves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type", default)]
    pub kind: BlockKind,
    #[serde(default)]
    pub children: Vec<Leaf>,
}

impl Block {
    pub fn paragraph(children: Vec<Leaf>) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            children,
        }
    }

    /// Concatenated text of all leaves
    pub fn text(&self) -> String {
        self.children.iter().map(|leaf| leaf.text.as_str()).collect()
    }

    pub fn char_len(&self) -> usize {
        self.children.iter().map(Leaf::char_len).sum()
    }

    /// Character offset at which the leaf at `index` starts
    pub fn leaf_start(&self, index: usize) -> usize {
        self.children[..index.min(self.children.len())]
            .iter()
            .map(Leaf::char_len)
            .sum()
    }

    /// Index of the leaf holding `offset`. On a boundary between two leaves
    /// the preceding leaf wins; offset 0 selects the first leaf.
    pub fn leaf_index_at(&self, offset: usize) -> Option<usize> {
        if self.children.is_empty() {
            return None;
        }
        if offset == 0 {
            return Some(0);
        }

        let mut start = 0;
        for (index, leaf) in self.children.iter().enumerate() {
            let end = start + leaf.char_len();
            if start < offset && offset <= end {
                return Some(index);
            }
            start = end;
        }

        Some(self.children.len() - 1)
    }

    /// Make `offset` a leaf boundary, splitting the leaf that straddles it.
    /// Returns the index of the first leaf starting at or after `offset`.
    pub(crate) fn split_at(&mut self, offset: usize) -> usize {
        let mut start = 0;
        for index in 0..self.children.len() {
            if offset <= start {
                return index;
            }
            let len = self.children[index].char_len();
            if offset < start + len {
                let tail = self.children[index].split_off(offset - start);
                self.children.insert(index + 1, tail);
                return index + 1;
            }
            start += len;
        }
        self.children.len()
    }

    /// Merge neighbours with identical marks and drop empty leaves, keeping
    /// at least one leaf so the block stays addressable
    fn normalize(&mut self) {
        let mut merged: Vec<Leaf> = Vec::with_capacity(self.children.len());
        for leaf in std::mem::take(&mut self.children) {
            if leaf.text.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.same_marks(&leaf) => last.text.push_str(&leaf.text),
                _ => merged.push(leaf),
            }
        }
        if merged.is_empty() {
            merged.push(Leaf::default());
        }
        self.children = merged;
    }
}

/// A rich-text document: blocks of marked text leaves.
///
/// Every constructor normalizes, so a document always has at least one
/// block and every block at least one leaf. Serializes as the bare block
/// array (`[{"type": "paragraph", "children": [...]}]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    pub(crate) blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self::from_blocks(Vec::new())
    }
}

impl Document {
    /// Empty document: one paragraph with one empty leaf
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut document = Self { blocks };
        document.normalize();
        document
    }

    /// Demo content shown when no document file exists yet
    pub fn sample() -> Self {
        Self::from_blocks(vec![
            Block::paragraph(vec![
                Leaf::new(
                    "This example shows how you can make a hovering menu appear above your content, which you can use to make text ",
                ),
                Leaf::new("bold").with(Mark::Bold),
                Leaf::new(", "),
                Leaf::new("italic").with(Mark::Italic),
                Leaf::new(" "),
                Leaf::new("or comment").with_comment(" comment text"),
                Leaf::new(", or anything else you might want to do!"),
            ]),
            Block::paragraph(vec![
                Leaf::new("Try it out yourself! Just "),
                Leaf::new("select any piece of text and the menu will appear").with(Mark::Bold),
                Leaf::new("."),
            ]),
        ])
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// True for a single empty paragraph
    pub fn is_empty(&self) -> bool {
        self.blocks.len() == 1 && self.blocks[0].char_len() == 0
    }

    /// Plain text, one line per block
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn end(&self) -> Point {
        let last = self.blocks.len().saturating_sub(1);
        Point::new(last, self.blocks.get(last).map(Block::char_len).unwrap_or(0))
    }

    /// Clamp a point into the document. Stale points never panic.
    pub fn clamp_point(&self, point: Point) -> Point {
        let block = point.block.min(self.blocks.len().saturating_sub(1));
        let len = self.blocks.get(block).map(Block::char_len).unwrap_or(0);
        Point::new(block, point.offset.min(len))
    }

    pub fn clamp_range(&self, range: Range) -> Range {
        Range::new(self.clamp_point(range.anchor), self.clamp_point(range.focus))
    }

    /// Text covered by `range`, blocks separated by newlines
    pub fn string(&self, range: &Range) -> String {
        let range = self.clamp_range(*range);
        let (start, end) = (range.start(), range.end());

        let mut parts = Vec::new();
        for index in start.block..=end.block {
            let text = self.blocks[index].text();
            let from = if index == start.block { start.offset } else { 0 };
            let to = if index == end.block {
                end.offset
            } else {
                text.chars().count()
            };
            parts.push(text[byte_offset(&text, from)..byte_offset(&text, to)].to_string());
        }
        parts.join("\n")
    }

    pub fn leaf_at(&self, point: Point) -> Option<&Leaf> {
        let point = self.clamp_point(point);
        let block = self.blocks.get(point.block)?;
        block
            .leaf_index_at(point.offset)
            .map(|index| &block.children[index])
    }

    /// Leaves intersecting `range`. An expanded range yields every leaf it
    /// overlaps with positive width; a caret yields the leaf at the caret.
    pub fn leaves_in(&self, range: &Range) -> Vec<&Leaf> {
        let range = self.clamp_range(*range);
        if range.is_collapsed() {
            return self.leaf_at(range.anchor).into_iter().collect();
        }

        let (start, end) = (range.start(), range.end());
        let mut leaves = Vec::new();
        for index in start.block..=end.block {
            let block = &self.blocks[index];
            let from = if index == start.block { start.offset } else { 0 };
            let to = if index == end.block {
                end.offset
            } else {
                block.char_len()
            };

            let mut position = 0;
            for leaf in &block.children {
                let len = leaf.char_len();
                if len > 0 && position < to && position + len > from {
                    leaves.push(leaf);
                }
                position += len;
            }
        }
        leaves
    }

    /// Range of the contiguous comment around `point`: neighbouring comment
    /// leaves sharing the same payload, within one block
    pub fn comment_run(&self, point: Point) -> Option<Range> {
        let point = self.clamp_point(point);
        let block = self.blocks.get(point.block)?;
        let index = block.leaf_index_at(point.offset)?;
        let leaf = &block.children[index];
        if !leaf.comment {
            return None;
        }

        let same_comment = |other: &Leaf| other.comment && other.data == leaf.data;
        let mut first = index;
        while first > 0 && same_comment(&block.children[first - 1]) {
            first -= 1;
        }
        let mut last = index;
        while last + 1 < block.children.len() && same_comment(&block.children[last + 1]) {
            last += 1;
        }

        let start = block.leaf_start(first);
        let end = block.leaf_start(last) + block.children[last].char_len();
        Some(Range::within(point.block, start, end))
    }

    /// Where the caret lands after one keyboard step from `point`
    pub fn step(&self, point: Point, direction: Direction) -> Point {
        let point = self.clamp_point(point);
        let len_of = |block: usize| self.blocks[block].char_len();
        let last_block = self.blocks.len() - 1;

        match direction {
            Direction::Left if point.offset > 0 => Point::new(point.block, point.offset - 1),
            Direction::Left if point.block > 0 => Point::new(point.block - 1, len_of(point.block - 1)),
            Direction::Right if point.offset < len_of(point.block) => {
                Point::new(point.block, point.offset + 1)
            }
            Direction::Right if point.block < last_block => Point::new(point.block + 1, 0),
            Direction::Up if point.block > 0 => {
                Point::new(point.block - 1, point.offset.min(len_of(point.block - 1)))
            }
            Direction::Up => Point::new(0, 0),
            Direction::Down if point.block < last_block => {
                Point::new(point.block + 1, point.offset.min(len_of(point.block + 1)))
            }
            Direction::Down | Direction::LineEnd => Point::new(point.block, len_of(point.block)),
            Direction::LineStart => Point::new(point.block, 0),
            Direction::Left | Direction::Right => point,
        }
    }

    /// Split leaves at the boundaries of `range` so it is covered by whole
    /// leaves. Returns, per touched block, the index span of covered leaves.
    pub(crate) fn split_range(&mut self, range: &Range) -> Vec<(usize, std::ops::Range<usize>)> {
        let range = self.clamp_range(*range);
        let (start, end) = (range.start(), range.end());

        let mut spans = Vec::new();
        for index in start.block..=end.block {
            let block = &mut self.blocks[index];
            let from = if index == start.block { start.offset } else { 0 };
            let to = if index == end.block {
                end.offset
            } else {
                block.char_len()
            };
            if to <= from {
                continue;
            }
            let first = block.split_at(from);
            let last = block.split_at(to);
            spans.push((index, first..last));
        }
        spans
    }

    /// Merge equal neighbours, drop empty leaves, restore the
    /// one-block/one-leaf minimum. Text and therefore points are unchanged.
    pub fn normalize(&mut self) {
        for block in &mut self.blocks {
            block.normalize();
        }
        if self.blocks.is_empty() {
            self.blocks.push(Block::paragraph(vec![Leaf::default()]));
        }
    }

    /// Insert text at `point`, inheriting the marks of the leaf there.
    /// Newlines split the block. Returns the caret after the insertion.
    pub fn insert_text(&mut self, point: Point, text: &str) -> Point {
        let mut point = self.clamp_point(point);
        for (line_index, line) in text.split('\n').enumerate() {
            if line_index > 0 {
                point = self.split_block(point);
            }
            let line = line.trim_end_matches('\r');
            if !line.is_empty() {
                point = self.insert_in_block(point, line);
            }
        }
        point
    }

    fn insert_in_block(&mut self, point: Point, text: &str) -> Point {
        let block = &mut self.blocks[point.block];
        if block.children.is_empty() {
            block.children.push(Leaf::default());
        }
        let index = block.leaf_index_at(point.offset).unwrap_or(0);
        let local = point.offset - block.leaf_start(index);
        let leaf = &mut block.children[index];
        let byte = byte_offset(&leaf.text, local);
        leaf.text.insert_str(byte, text);
        Point::new(point.block, point.offset + text.chars().count())
    }

    /// Split the block at `point`; the caret moves to the start of the new
    /// block
    pub fn split_block(&mut self, point: Point) -> Point {
        let point = self.clamp_point(point);
        let block = &mut self.blocks[point.block];
        let at = block.split_at(point.offset);
        let mut tail = block.children.split_off(at);
        if block.children.is_empty() {
            block.children.push(Leaf::default());
        }
        if tail.is_empty() {
            tail.push(Leaf::default());
        }
        let kind = block.kind;
        self.blocks.insert(
            point.block + 1,
            Block {
                kind,
                children: tail,
            },
        );
        Point::new(point.block + 1, 0)
    }

    /// Remove the text covered by `range`, joining the first and last block
    /// when it spans several. Returns the collapsed caret.
    pub fn delete_range(&mut self, range: &Range) -> Point {
        let range = self.clamp_range(*range);
        let (start, end) = (range.start(), range.end());
        if start == end {
            return start;
        }

        if start.block == end.block {
            let block = &mut self.blocks[start.block];
            let first = block.split_at(start.offset);
            let last = block.split_at(end.offset);
            block.children.drain(first..last);
        } else {
            let tail = {
                let block = &mut self.blocks[end.block];
                let at = block.split_at(end.offset);
                block.children.split_off(at)
            };
            let block = &mut self.blocks[start.block];
            let at = block.split_at(start.offset);
            block.children.truncate(at);
            block.children.extend(tail);
            self.blocks.drain(start.block + 1..=end.block);
        }

        let block = &mut self.blocks[start.block];
        if block.children.is_empty() {
            block.children.push(Leaf::default());
        }
        start
    }

    /// Backspace at a caret: delete one character, or join with the previous
    /// block at a block start
    pub fn delete_backward(&mut self, point: Point) -> Point {
        let point = self.clamp_point(point);
        if point.offset > 0 {
            self.delete_range(&Range::new(
                Point::new(point.block, point.offset - 1),
                point,
            ))
        } else if point.block > 0 {
            let previous = Point::new(point.block - 1, self.blocks[point.block - 1].char_len());
            self.delete_range(&Range::new(previous, point))
        } else {
            point
        }
    }

    /// Delete at a caret: remove the next character, or pull the next block
    /// up at a block end
    pub fn delete_forward(&mut self, point: Point) -> Point {
        let point = self.clamp_point(point);
        if point.offset < self.blocks[point.block].char_len() {
            self.delete_range(&Range::new(
                point,
                Point::new(point.block, point.offset + 1),
            ))
        } else if point.block + 1 < self.blocks.len() {
            self.delete_range(&Range::new(point, Point::new(point.block + 1, 0)))
        } else {
            point
        }
    }
}

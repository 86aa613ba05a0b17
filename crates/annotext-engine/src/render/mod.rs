//! HTML rendering of documents.
//!
//! Each leaf is wrapped according to [`Leaf::decorations`], innermost first:
//! `<strong>`, `<em>`, `<u>`, then a comment span carrying the comment text
//! in `data-comment`. The result sits inside a plain `<span>` per leaf and a
//! `<p>` per block.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::editing::document::{Block, BlockKind, Document};
use crate::editing::leaf::{Decoration, Leaf};

/// CSS class on rendered comment spans
pub const COMMENT_CLASS: &str = "comment--text";

pub fn leaf_to_html(leaf: &Leaf) -> String {
    let mut html = encode_text(&leaf.text).into_owned();
    for decoration in leaf.decorations() {
        html = match decoration {
            Decoration::Strong => format!("<strong>{html}</strong>"),
            Decoration::Emphasis => format!("<em>{html}</em>"),
            Decoration::Underline => format!("<u>{html}</u>"),
            Decoration::Comment { data } => format!(
                "<span data-comment=\"{}\" class=\"{COMMENT_CLASS}\">{html}</span>",
                encode_double_quoted_attribute(&data)
            ),
        };
    }
    format!("<span>{html}</span>")
}

pub fn block_to_html(block: &Block) -> String {
    let inner: String = block.children.iter().map(leaf_to_html).collect();
    match block.kind {
        BlockKind::Paragraph => format!("<p>{inner}</p>"),
    }
}

/// One line per block
pub fn document_to_html(document: &Document) -> String {
    document
        .blocks()
        .iter()
        .map(block_to_html)
        .collect::<Vec<_>>()
        .join("\n")
}

// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use annotext_engine::{Block, Document, Leaf, Mark};

#[allow(dead_code)]
pub fn generate_document(paragraphs: usize) -> Document {
    let blocks = (0..paragraphs)
        .map(|index| {
            Block::paragraph(vec![
                Leaf::new(format!("Paragraph {index} opens with plain text, then ")),
                Leaf::new("some bold words").with(Mark::Bold),
                Leaf::new(", an "),
                Leaf::new("inline comment").with_comment(format!("note {index}")),
                Leaf::new(" and a plain tail."),
            ])
        })
        .collect();
    Document::from_blocks(blocks)
}

use crate::editing::document::{Block, Document};
use crate::editing::leaf::Leaf;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Build a document from leaves, one inner vec per paragraph
pub fn doc(blocks: Vec<Vec<Leaf>>) -> Document {
    Document::from_blocks(blocks.into_iter().map(Block::paragraph).collect())
}

/// Leaf without marks
pub fn plain(text: &str) -> Leaf {
    Leaf::new(text)
}

/// Create a temporary directory for document files
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content
pub fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

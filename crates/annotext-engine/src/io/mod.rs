use crate::editing::document::{Block, Document};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a document from its JSON block array. The result is normalized.
pub fn parse_document(json: &str) -> Result<Document, IoError> {
    let blocks: Vec<Block> = serde_json::from_str(json)?;
    Ok(Document::from_blocks(blocks))
}

/// Pretty-printed JSON for a document
pub fn document_to_json(document: &Document) -> Result<String, IoError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Read a document file
pub fn read_document(path: &Path) -> Result<Document, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let document = parse_document(&content)?;
    log::info!(
        "loaded {} ({} blocks)",
        path.display(),
        document.blocks().len()
    );
    Ok(document)
}

/// Read a document file, falling back to the sample document when the file
/// does not exist yet
pub fn read_document_or_sample(path: &Path) -> Result<Document, IoError> {
    match read_document(path) {
        Err(IoError::NotFound(_)) => {
            log::info!("{} not found, starting from sample", path.display());
            Ok(Document::sample())
        }
        other => other,
    }
}

/// Write a document file, creating parent directories as needed
pub fn write_document(path: &Path, document: &Document) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut json = document_to_json(document)?;
    json.push('\n');
    fs::write(path, json)?;
    log::info!("saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::leaf::{Leaf, Mark};
    use crate::tests::{create_test_dir, create_test_file, doc, plain};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_document_in_stored_shape() {
        let json = r#"[
            {
                "type": "paragraph",
                "children": [
                    { "text": "plain " },
                    { "text": "or comment", "comment": true, "data": " comment text", "isVoid": true },
                    { "text": "gone", "bold": null }
                ]
            }
        ]"#;

        let document = parse_document(json).unwrap();

        assert_eq!(
            document.blocks()[0].children,
            vec![
                plain("plain "),
                Leaf::new("or comment").with_comment(" comment text"),
                plain("gone"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_array_yields_empty_document() {
        assert!(parse_document("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let result = parse_document("{not json");
        assert!(matches!(result, Err(IoError::Json(_))));
    }

    #[test]
    fn test_document_json_omits_unset_marks() {
        let document = doc(vec![vec![plain("a"), Leaf::new("b").with(Mark::Bold)]]);

        let json = document_to_json(&document).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value,
            serde_json::json!([
                {
                    "type": "paragraph",
                    "children": [
                        { "text": "a" },
                        { "text": "b", "bold": true }
                    ]
                }
            ])
        );
    }

    #[test]
    fn test_write_then_read_document() {
        let dir = create_test_dir();
        let path = dir.path().join("nested/doc.json");
        let document = Document::sample();

        write_document(&path, &document).unwrap();
        let loaded = read_document(&path).unwrap();

        assert_eq!(loaded, document);
    }

    #[test]
    fn test_read_document_not_found() {
        let dir = create_test_dir();
        let result = read_document(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_read_document_or_sample_falls_back_only_when_missing() {
        let dir = create_test_dir();

        let sample = read_document_or_sample(&dir.path().join("missing.json")).unwrap();
        assert_eq!(sample, Document::sample());

        let broken = create_test_file(&dir, "broken.json", "[{");
        assert!(read_document_or_sample(&broken).is_err());
    }
}

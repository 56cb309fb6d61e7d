//! Loading the source document.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::config::HEXAGRAMS_FIELD;
use crate::error::{Result, SplitterError};
use crate::types::SourceDocument;

/// Read and parse the source document at `path`.
///
/// The whole file is read into memory. A missing `hexagrams` attribute
/// yields an empty document.
pub fn load_source(path: &Path) -> Result<SourceDocument> {
    let text = fs::read_to_string(path).map_err(|e| SplitterError::io(path, e))?;
    let doc = parse_source(&text, path)?;
    tracing::debug!(path = %path.display(), records = doc.len(), "Loaded source document");
    Ok(doc)
}

/// Parse source document text. `path` is only used in error messages.
pub fn parse_source(text: &str, path: &Path) -> Result<SourceDocument> {
    let value: Value = serde_json::from_str(text).map_err(|source| SplitterError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut root = match value {
        Value::Object(root) => root,
        other => {
            return Err(SplitterError::InvalidShape {
                path: path.to_path_buf(),
                reason: format!("top-level value is {}, expected an object", kind(&other)),
            })
        }
    };

    match root.remove(HEXAGRAMS_FIELD) {
        None => Ok(SourceDocument::default()),
        Some(Value::Object(hexagrams)) => Ok(SourceDocument::new(hexagrams)),
        Some(other) => Err(SplitterError::InvalidShape {
            path: path.to_path_buf(),
            reason: format!(
                "'{HEXAGRAMS_FIELD}' is {}, expected an object",
                kind(&other)
            ),
        }),
    }
}

/// Human-readable name of a JSON value's type.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn parse(text: &str) -> Result<SourceDocument> {
        parse_source(text, Path::new("takashima.json"))
    }

    #[test]
    fn test_parse_source_keeps_document_order() {
        let doc = parse(r#"{"hexagrams": {"2": {"name": "Field"}, "1": {"name": "Force"}}}"#)
            .unwrap();
        let keys: Vec<_> = doc.records().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["2", "1"]);
    }

    #[test]
    fn test_parse_source_ignores_other_attributes() {
        let doc = parse(r#"{"source": "高島易斷", "hexagrams": {"1": {}}}"#).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.hexagrams.get("1"), Some(&json!({})));
    }

    #[test]
    fn test_parse_source_missing_hexagrams() {
        let doc = parse(r#"{"title": "Takashima"}"#).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_source_malformed() {
        let err = parse(r#"{"hexagrams": {"1": "#).unwrap_err();
        assert!(matches!(err, SplitterError::JsonParse { .. }));
    }

    #[test]
    fn test_parse_source_top_level_not_object() {
        let err = parse("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, SplitterError::InvalidShape { .. }));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_parse_source_hexagrams_not_object() {
        let err = parse(r#"{"hexagrams": [1, 2]}"#).unwrap_err();
        assert!(err.to_string().contains("'hexagrams' is an array"));
    }

    #[test]
    fn test_load_source_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_source(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, SplitterError::Io { .. }));
    }

    #[test]
    fn test_load_source_reads_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("takashima.json");
        fs::write(&path, r#"{"hexagrams": {"1": {"name": "乾為天"}}}"#).unwrap();

        let doc = load_source(&path).unwrap();
        assert_eq!(doc.hexagrams.get("1"), Some(&json!({"name": "乾為天"})));
    }
}

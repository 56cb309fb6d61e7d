//! Core data types for the splitter.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::CODE_FIELD;

/// The parsed source document.
///
/// Only the record mapping is kept; every other top-level attribute is
/// dropped after loading. Records are opaque JSON and stay in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    pub hexagrams: Map<String, Value>,
}

impl SourceDocument {
    pub fn new(hexagrams: Map<String, Value>) -> Self {
        Self { hexagrams }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.hexagrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexagrams.is_empty()
    }

    /// Iterate `(key, record)` pairs in document order.
    pub fn records(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.hexagrams.iter()
    }
}

/// Get the `code` attribute of a record, if it has one.
///
/// Records that are not JSON objects never have a code.
pub fn record_code(record: &Value) -> Option<&Value> {
    record.as_object()?.get(CODE_FIELD)
}

/// Lookup from code to the key of the record carrying it.
///
/// Serializes as a flat JSON object. Insertion order is kept; overwriting an
/// existing code keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeIndex {
    entries: Map<String, Value>,
}

impl CodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `code` to `key`, returning the key it previously mapped to.
    pub fn insert(&mut self, code: impl Into<String>, key: impl Into<String>) -> Option<String> {
        self.entries
            .insert(code.into(), Value::String(key.into()))
            .and_then(|previous| previous.as_str().map(str::to_string))
    }

    /// Key of the record carrying `code`.
    pub fn key_for(&self, code: &str) -> Option<&str> {
        self.entries.get(code).and_then(Value::as_str)
    }

    /// Code of the record with `key`, if any record with that key was indexed.
    ///
    /// When several codes point at the same key the first one wins.
    pub fn code_for(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|(_, indexed_key)| *indexed_key == key)
            .map(|(code, _)| code)
    }

    /// Iterate `(code, key)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(code, key)| key.as_str().map(|k| (code.as_str(), k)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Two records carrying the same code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeCollision {
    pub code: String,
    /// Key that lost its index entry.
    pub previous_key: String,
    /// Key the index now points at.
    pub key: String,
}

/// Outcome of a successful split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    /// Number of record files written.
    pub records: usize,
    /// Number of entries in the written index.
    pub indexed: usize,
    /// Keys of records that have no code, in document order.
    pub unindexed_keys: Vec<String>,
    /// Codes shared by more than one record.
    pub collisions: Vec<CodeCollision>,
    pub output_dir: PathBuf,
    pub index_path: PathBuf,
}

impl SplitReport {
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_code() {
        assert_eq!(
            record_code(&json!({"code": "111111", "name": "Force"})),
            Some(&json!("111111"))
        );
        assert_eq!(record_code(&json!({"name": "Field"})), None);
        assert_eq!(record_code(&json!("code")), None);
        assert_eq!(record_code(&json!(["code"])), None);
    }

    #[test]
    fn test_code_index_insert_returns_previous_key() {
        let mut index = CodeIndex::new();
        assert_eq!(index.insert("111111", "1"), None);
        assert_eq!(index.insert("111111", "65"), Some("1".to_string()));
        assert_eq!(index.key_for("111111"), Some("65"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_code_index_overwrite_keeps_position() {
        let mut index = CodeIndex::new();
        index.insert("111111", "1");
        index.insert("000000", "2");
        index.insert("111111", "3");

        let order: Vec<_> = index.iter().collect();
        assert_eq!(order, vec![("111111", "3"), ("000000", "2")]);
    }

    #[test]
    fn test_code_index_code_for() {
        let mut index = CodeIndex::new();
        index.insert("111111", "1");
        index.insert("000000", "2");
        assert_eq!(index.code_for("2"), Some("000000"));
        assert_eq!(index.code_for("3"), None);
    }

    #[test]
    fn test_code_index_serializes_as_flat_object() {
        let mut index = CodeIndex::new();
        index.insert("111111", "1");
        let value = serde_json::to_value(&index).unwrap();
        assert_eq!(value, json!({"111111": "1"}));
    }

    #[test]
    fn test_source_document_missing_hexagrams_is_empty() {
        let doc: SourceDocument = serde_json::from_value(json!({"title": "易經"})).unwrap();
        assert!(doc.is_empty());
    }
}

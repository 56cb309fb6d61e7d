//! Resolving codes to records through a written index.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::{record_path, validate_record_key};
use crate::error::{Result, SplitterError};
use crate::json::read_json;
use crate::types::CodeIndex;

/// Read-side view over a split output: the code index plus the record files.
#[derive(Debug, Clone)]
pub struct RecordLookup {
    index: CodeIndex,
    output_dir: PathBuf,
}

impl RecordLookup {
    /// Load the index at `index_path`; records are read lazily from `output_dir`.
    pub fn open(index_path: &Path, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let index: CodeIndex = read_json(index_path)?;
        tracing::debug!(path = %index_path.display(), entries = index.len(), "Loaded code index");
        Ok(Self::new(index, output_dir))
    }

    pub fn new(index: CodeIndex, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            index,
            output_dir: output_dir.into(),
        }
    }

    pub fn index(&self) -> &CodeIndex {
        &self.index
    }

    /// Key of the record carrying `code`.
    pub fn key_for(&self, code: &str) -> Result<&str> {
        self.index
            .key_for(code)
            .ok_or_else(|| SplitterError::CodeNotFound(code.to_string()))
    }

    /// Code of the record stored under `key`.
    pub fn code_for(&self, key: &str) -> Option<&str> {
        self.index.code_for(key)
    }

    /// Read the record stored under `key`.
    pub fn record(&self, key: &str) -> Result<Value> {
        validate_record_key(key)?;
        read_json(&record_path(&self.output_dir, key))
    }

    /// Resolve `code` to its key and read the record.
    pub fn record_for_code(&self, code: &str) -> Result<(String, Value)> {
        let key = self.key_for(code)?.to_string();
        let record = self.record(&key)?;
        Ok((key, record))
    }
}

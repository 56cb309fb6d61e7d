//! Error types for the splitter.
//!
//! Every failure is fatal for a run. Variants carry the path or record key
//! they relate to so the message printed by the CLI points at the culprit.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// Reading, creating or writing a file or directory failed.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file did not contain well-formed JSON.
    #[error("Failed to parse JSON in {}: {source}", .path.display())]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// The document parsed but does not have the expected shape.
    #[error("Unexpected document shape in {}: {reason}", .path.display())]
    InvalidShape { path: PathBuf, reason: String },

    /// A record key cannot be used as a file name.
    #[error("Invalid record key: '{0}'. Keys must be non-empty file name stems without path separators")]
    InvalidRecordKey(String),

    /// A record carries a `code` that cannot be used as an index key.
    #[error("Record '{key}' has a non-scalar code; codes must be strings, numbers, booleans or null")]
    InvalidCode { key: String },

    /// Two records share a code and the duplicate policy forbids it.
    #[error("Duplicate code '{code}' in records '{first_key}' and '{second_key}'")]
    DuplicateCode {
        code: String,
        first_key: String,
        second_key: String,
    },

    /// The index has no entry for the requested code.
    #[error("Code '{0}' not found in index")]
    CodeNotFound(String),
}

impl SplitterError {
    /// Wrap an IO error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitterError>;

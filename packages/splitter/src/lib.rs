//! Hexagram Splitter - Split a hexagram collection into per-record JSON files.
//!
//! This crate reads a JSON document whose `hexagrams` attribute maps keys to
//! records, writes every record to `<key>.json`, and writes an index mapping
//! each record's `code` to its key.
//!
//! # Example
//!
//! ```
//! use hexagram_splitter::config;
//!
//! // Record keys become file names
//! assert!(config::validate_record_key("1").is_ok());
//! assert!(config::validate_record_key("../1").is_err());
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Default paths, run configuration and key validation
//! - [`types`]: Core data types (SourceDocument, CodeIndex, SplitReport)
//! - [`error`]: Error types and Result alias
//! - [`source`]: Source document loading
//! - [`index`]: Code index construction
//! - [`json`]: JSON output and atomic file writes
//! - [`splitter`]: The split run
//! - [`lookup`]: Code to record resolution
//! - [`reassemble`]: Merging record files back into a document
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod json;
pub mod lookup;
pub mod reassemble;
pub mod source;
pub mod splitter;
pub mod types;

// Re-export main functions
pub use reassemble::reassemble;
pub use splitter::{split, split_document};

// Re-export commonly used items
pub use config::{DuplicatePolicy, SplitConfig};
pub use error::{Result, SplitterError};
pub use lookup::RecordLookup;
pub use types::{CodeCollision, CodeIndex, SourceDocument, SplitReport};

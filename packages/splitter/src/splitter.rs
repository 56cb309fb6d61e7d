//! Main splitter service that ties all components together.

use std::fs;
use std::path::Path;

use crate::config::{validate_record_key, SplitConfig};
use crate::error::{Result, SplitterError};
use crate::index::build_index;
use crate::json::write_json;
use crate::source::load_source;
use crate::types::{SourceDocument, SplitReport};

/// Split the source document into one file per record plus a code index.
///
/// # Arguments
/// * `config` - Input path, output directory, index path and duplicate policy
///
/// # Returns
/// A `SplitReport` describing what was written
///
/// The run stops at the first error. Files written before the error are
/// left in place.
pub fn split(config: &SplitConfig) -> Result<SplitReport> {
    ensure_dir(&config.output_dir)?;

    let doc = load_source(&config.input_path)?;
    split_document(&doc, config)
}

/// Split an already loaded document according to `config`.
///
/// Keys and codes are checked before the first record file is written, so
/// an invalid key or a rejected duplicate leaves the output untouched.
pub fn split_document(doc: &SourceDocument, config: &SplitConfig) -> Result<SplitReport> {
    for key in doc.hexagrams.keys() {
        validate_record_key(key)?;
    }
    let build = build_index(doc, config.duplicate_policy)?;

    ensure_dir(&config.output_dir)?;
    for (key, record) in doc.records() {
        let path = config.record_path(key);
        write_json(&path, record)?;
        tracing::debug!(key = %key, path = %path.display(), "Wrote record");
    }

    if let Some(parent) = config.index_path.parent() {
        ensure_dir(parent)?;
    }
    write_json(&config.index_path, &build.index)?;

    tracing::info!(
        records = doc.len(),
        indexed = build.index.len(),
        collisions = build.collisions.len(),
        output_dir = %config.output_dir.display(),
        index = %config.index_path.display(),
        "Split complete"
    );

    Ok(SplitReport {
        records: doc.len(),
        indexed: build.index.len(),
        unindexed_keys: build.unindexed_keys,
        collisions: build.collisions,
        output_dir: config.output_dir.clone(),
        index_path: config.index_path.clone(),
    })
}

/// Create `dir` and any missing parents. Existing directories are fine.
fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| SplitterError::io(dir, e))
}

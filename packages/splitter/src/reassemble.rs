//! Reading split record files back into a single document.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::JSON_EXTENSION;
use crate::error::{Result, SplitterError};
use crate::json::read_json;
use crate::types::SourceDocument;

/// Read every `<key>.json` file in `dir` into a document keyed by file stem.
///
/// Files with another extension, including leftover `.<name>.json.tmp`
/// temp files, are skipped. Keys are ordered numerically where they are
/// integers, the rest follow in lexical order.
pub fn reassemble(dir: &Path) -> Result<SourceDocument> {
    let entries = fs::read_dir(dir).map_err(|e| SplitterError::io(dir, e))?;

    let mut records: Vec<(String, Value)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SplitterError::io(dir, e))?;
        let path = entry.path();

        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(JSON_EXTENSION)
        {
            continue;
        }
        let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let record: Value = read_json(&path)?;
        records.push((key.to_string(), record));
    }

    records.sort_by(|(a, _), (b, _)| compare_keys(a, b));
    tracing::debug!(dir = %dir.display(), records = records.len(), "Reassembled records");

    Ok(SourceDocument::new(records.into_iter().collect::<Map<_, _>>()))
}

/// Order keys numerically when both are integers; integers sort first.
fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

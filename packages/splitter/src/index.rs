//! Building the code index from the source records.

use serde_json::Value;

use crate::config::DuplicatePolicy;
use crate::error::{Result, SplitterError};
use crate::types::{record_code, CodeCollision, CodeIndex, SourceDocument};

/// Index built from a source document, with what it found along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexBuild {
    pub index: CodeIndex,
    /// Keys of records without a code, in document order.
    pub unindexed_keys: Vec<String>,
    /// Collisions that were resolved by overwriting.
    pub collisions: Vec<CodeCollision>,
}

/// Build the code index in a single pass over the records.
///
/// Later records overwrite earlier ones on a shared code unless `policy`
/// is [`DuplicatePolicy::Reject`].
pub fn build_index(doc: &SourceDocument, policy: DuplicatePolicy) -> Result<IndexBuild> {
    let mut build = IndexBuild::default();

    for (key, record) in doc.records() {
        let Some(code) = record_code(record) else {
            build.unindexed_keys.push(key.clone());
            continue;
        };
        let code = code_to_index_key(code)
            .ok_or_else(|| SplitterError::InvalidCode { key: key.clone() })?;

        if let Some(previous_key) = build.index.key_for(&code) {
            if policy == DuplicatePolicy::Reject {
                return Err(SplitterError::DuplicateCode {
                    code,
                    first_key: previous_key.to_string(),
                    second_key: key.clone(),
                });
            }
        }

        if let Some(previous_key) = build.index.insert(code.clone(), key.clone()) {
            tracing::warn!(
                code = %code,
                previous = %previous_key,
                key = %key,
                "Duplicate code, later record wins"
            );
            build.collisions.push(CodeCollision {
                code,
                previous_key,
                key: key.clone(),
            });
        }
    }

    Ok(build)
}

/// Render a code value as a JSON object key.
///
/// Strings are used verbatim; other scalars use their JSON text. Arrays
/// and objects have no key form and yield `None`.
pub fn code_to_index_key(code: &Value) -> Option<String> {
    match code {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

//! Configuration constants and validation functions for the splitter.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SplitterError};

/// Default source document, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "takashima.json";

/// Default directory receiving one `<key>.json` file per record.
pub const DEFAULT_OUTPUT_DIR: &str = "data/takashima";

/// Default path of the code index.
pub const DEFAULT_INDEX_PATH: &str = "data/takashima_index.json";

/// Top-level attribute holding the record mapping.
pub const HEXAGRAMS_FIELD: &str = "hexagrams";

/// Record attribute used as the index key.
pub const CODE_FIELD: &str = "code";

/// Extension of every file the splitter writes.
pub const JSON_EXTENSION: &str = "json";

/// Record key pattern: anything without path separators or NUL.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RECORD_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/\\\x00]+$").expect("valid regex"));

/// What to do when two records carry the same code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DuplicatePolicy {
    /// Keep the later record's key and report the collision.
    #[default]
    LastWins,
    /// Fail the run before any record file is written.
    Reject,
}

/// Paths and policies for a single split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub index_path: PathBuf,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl SplitConfig {
    /// Create a configuration with explicit paths and the default policy.
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        index_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            index_path: index_path.into(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    /// Root every default path under `base`.
    ///
    /// Useful for running against a project checkout other than the
    /// working directory.
    pub fn rooted_at(base: &Path) -> Self {
        Self::new(
            base.join(DEFAULT_INPUT_PATH),
            base.join(DEFAULT_OUTPUT_DIR),
            base.join(DEFAULT_INDEX_PATH),
        )
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Path of the file a record with `key` is written to.
    pub fn record_path(&self, key: &str) -> PathBuf {
        record_path(&self.output_dir, key)
    }
}

/// Path of the file a record with `key` lives in under `output_dir`.
pub fn record_path(output_dir: &Path, key: &str) -> PathBuf {
    output_dir.join(format!("{key}.{JSON_EXTENSION}"))
}

/// Validate that a record key can be used as a file name stem.
///
/// # Examples
/// ```
/// use hexagram_splitter::config::validate_record_key;
///
/// assert!(validate_record_key("1").is_ok());
/// assert!(validate_record_key("../1").is_err());
/// ```
pub fn validate_record_key(key: &str) -> Result<()> {
    if key != "." && key != ".." && RECORD_KEY_PATTERN.is_match(key) {
        Ok(())
    } else {
        Err(SplitterError::InvalidRecordKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_original_paths() {
        let config = SplitConfig::default();
        assert_eq!(config.input_path, PathBuf::from("takashima.json"));
        assert_eq!(config.output_dir, PathBuf::from("data/takashima"));
        assert_eq!(config.index_path, PathBuf::from("data/takashima_index.json"));
        assert_eq!(config.duplicate_policy, DuplicatePolicy::LastWins);
    }

    #[test]
    fn test_rooted_at() {
        let config = SplitConfig::rooted_at(Path::new("/srv/site"));
        assert_eq!(config.input_path, PathBuf::from("/srv/site/takashima.json"));
        assert_eq!(config.output_dir, PathBuf::from("/srv/site/data/takashima"));
    }

    #[test]
    fn test_record_path() {
        let config = SplitConfig::new("in.json", "out", "index.json");
        assert_eq!(config.record_path("17"), PathBuf::from("out/17.json"));
    }

    #[test]
    fn test_validate_record_key_valid() {
        assert!(validate_record_key("1").is_ok());
        assert!(validate_record_key("64").is_ok());
        assert!(validate_record_key("乾").is_ok());
        assert!(validate_record_key("extra.1").is_ok());
    }

    #[test]
    fn test_validate_record_key_invalid() {
        assert!(validate_record_key("").is_err());
        assert!(validate_record_key(".").is_err());
        assert!(validate_record_key("..").is_err());
        assert!(validate_record_key("a/b").is_err());
        assert!(validate_record_key("a\\b").is_err());
        assert!(validate_record_key("a\0b").is_err());
    }
}

//! JSON output for record and index files.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, SplitterError};

/// Serialize a value as two-space indented JSON with a trailing newline.
///
/// Non-ASCII characters are emitted literally, not as `\u` escapes.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    Ok(content)
}

/// Write a value as pretty JSON to `path`.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
/// This ensures partial writes don't corrupt existing files on crash.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = to_pretty_json(value)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    if let Err(e) = write_synced(&temp_file, content.as_bytes()) {
        let _ = fs::remove_file(&temp_file);
        return Err(SplitterError::io(&temp_file, e));
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path).map_err(|e| SplitterError::io(path, e))?;
    }

    if let Err(e) = fs::rename(&temp_file, path) {
        let _ = fs::remove_file(&temp_file);
        return Err(SplitterError::io(path, e));
    }
    Ok(())
}

/// Create `path`, write `content` and flush it to disk.
fn write_synced(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}

/// Read and parse a JSON file.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| SplitterError::io(path, e))?;
    serde_json::from_str(&text).map_err(|source| SplitterError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

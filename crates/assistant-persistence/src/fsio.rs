//! Crash-safe JSON file helpers.
//!
//! State files are written to a temp file in the target directory and
//! renamed into place, so readers only ever observe the old or the new
//! content, never a partial write.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, StoreError};

/// Serializes `value` and writes it atomically to `path`.
pub fn write_json_atomic<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    // The temp file must live in the target directory so the final
    // rename stays on one filesystem.
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|source| StoreError::WriteError {
        path: path.to_path_buf(),
        source,
    })?;

    tmp.write_all(json.as_bytes())
        .and_then(|_| tmp.flush())
        .map_err(|source| StoreError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;

    tmp.persist(path).map_err(|e| StoreError::WriteError {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

/// Reads and deserializes JSON from `path`.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|source| StoreError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&data)?)
}

/// Like [`read_json`] but returns `None` if the file does not exist.
pub fn read_json_opt<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    read_json(path).map(Some)
}

//! Atomic file writer
//!
//! Writes go to a temp file in the destination directory and are then
//! renamed over the target, so readers never observe a half-written file.

use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::error::{EnvTypesError, EnvTypesResult};

/// Write content to a file atomically
pub fn atomic_write(path: &Path, content: &str) -> EnvTypesResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| EnvTypesError::io(path, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|_| tmp.flush())
        .map_err(|e| EnvTypesError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| EnvTypesError::io(path, e.error))?;
    Ok(())
}

/// Create `dir` and any missing ancestors.
///
/// Returns `true` when the directory did not exist before.
pub fn ensure_dir(dir: &Path) -> EnvTypesResult<bool> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir).map_err(|source| EnvTypesError::DirectoryCreation {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Read a file that may not exist yet
pub fn read_optional(path: &Path) -> EnvTypesResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(EnvTypesError::io(path, e)),
    }
}

/// Compute SHA-256 hash of content
pub fn hash_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("sha256:{:x}", hasher.finalize())
}

//! Filesystem primitives for the configuration directory.
//!
//! Every failure is reported as [`ConfigError::Filesystem`] carrying the
//! path that was attempted. Nothing here retries; local disk errors are
//! deterministic.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::error::Result;

/// Returns `true` if `path` exists and is a directory.
pub fn dir_exists(path: &Path) -> bool {
    path.is_dir()
}

/// Returns `true` if `path` exists and is a regular file.
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Creates `path` and any missing parents.
///
/// Returns `(false, path)` without touching the filesystem when the
/// directory is already there.
pub fn create_dir(path: &Path) -> Result<(bool, PathBuf)> {
    if dir_exists(path) {
        return Ok((false, path.to_path_buf()));
    }

    fs::create_dir_all(path).map_err(|e| ConfigError::filesystem(path, e))?;
    tracing::debug!(path = %path.display(), "created directory");

    Ok((true, path.to_path_buf()))
}

/// Creates an empty file at `path`, truncating any existing content.
pub fn create_empty_file(path: &Path) -> Result<()> {
    fs::File::create(path).map_err(|e| ConfigError::filesystem(path, e))?;
    tracing::debug!(path = %path.display(), "created empty file");
    Ok(())
}

/// Deletes the file at `path`.
pub fn delete_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| ConfigError::filesystem(path, e))?;
    tracing::debug!(path = %path.display(), "deleted file");
    Ok(())
}

/// Returns `true` if the directory at `path` has no entries.
pub fn dir_is_empty(path: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(path).map_err(|e| ConfigError::filesystem(path, e))?;
    Ok(entries.next().is_none())
}

/// Deletes `path` and everything below it.
pub fn delete_dir_all(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|e| ConfigError::filesystem(path, e))?;
    tracing::debug!(path = %path.display(), "deleted directory");
    Ok(())
}

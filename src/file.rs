//! Atomic file I/O for config text and sidecar stores.
//!
//! Writes go through a tempfile in the target's directory, fsync, then
//! rename, so a crash leaves either the old or the new content, never a
//! torn file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("path has no parent directory: {0}")]
    NoParentDir(PathBuf),
}

/// Read a file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String, FileError> {
    Ok(fs::read_to_string(path)?)
}

/// Atomically replace `path` with `contents`.
///
/// Tempfile in the same directory (same filesystem, so the rename is
/// atomic), fsync, persist, then bump mtime so watchers notice.
pub fn write_text(path: &Path, contents: &str) -> Result<(), FileError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| FileError::NoParentDir(path.to_path_buf()))?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(contents.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    let now = filetime::FileTime::now();
    filetime::set_file_mtime(path, now)?;

    Ok(())
}

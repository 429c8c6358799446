//! File system utilities for packaging.
//!
//! Idempotent directory creation, overwriting copies and the best-effort
//! cleanup used when finalizing a signed image.

use crate::firmware::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path.
///
/// Succeeds when the directory already exists.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Copies a regular file, creating the destination's parent directories and
/// overwriting any existing destination file.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", to)
}

/// Removes a file, treating an already missing file as success.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Renames `from` to `to`, replacing `to` if it exists.
pub async fn rename_overwrite(from: &Path, to: &Path) -> Result<()> {
    // rename(2) replaces on unix but not on windows
    if cfg!(windows) {
        remove_file(to).await?;
    }
    fs::rename(from, to).await.fs_context("renaming file", from)
}

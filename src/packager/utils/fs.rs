//! File system utilities for packaging.
//!
//! Idempotent directory helpers with path context on every error.

use crate::packager::error::{ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates `path` and its parents. Returns `true` when it did not exist before.
pub async fn ensure_dir_all(path: &Path) -> Result<bool> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => return Ok(false),
        Ok(_) => {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "path exists and is not a directory",
            ))
            .fs_context("creating directory", path);
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).fs_context("checking directory", path),
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)?;
    Ok(true)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

//! Utility functions for directory provisioning and file naming

use crate::error::Result;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Create `path` and any missing parents, returning its absolute form
///
/// An existing directory is not an error. Any other filesystem failure
/// (permissions, a file in the way, invalid path) is returned to the caller.
///
/// The returned path is made absolute lexically; symlinks are not resolved.
pub async fn ensure_dir(path: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(path).await?;
    Ok(std::path::absolute(path)?)
}

/// A fresh random base name (UUID v4, hyphenated)
#[must_use]
pub fn generated_base_name() -> String {
    Uuid::new_v4().to_string()
}

/// Generated file name for a batch download
///
/// `extension` already carries its leading dot (or is empty).
#[must_use]
pub fn batch_file_name(extension: &str) -> String {
    format!("{}{}", generated_base_name(), extension)
}

/// Generated file name for a single fetch
///
/// The dot is always present, so an empty type gives a name ending in `.`.
#[must_use]
pub fn single_file_name(base_name: &str, file_type: &str) -> String {
    format!("{base_name}.{file_type}")
}

//! Archive extraction
//!
//! Only zip archives are expanded. Extraction is blocking file I/O, so the async
//! entry point hands it to the blocking thread pool.

mod zip;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use zip::ZipExtractor;

use crate::config::ExtractionConfig;
use crate::error::{ExtractionError, Result};
use std::path::{Path, PathBuf};
use tokio::task::spawn_blocking;

/// File type that triggers extraction
pub const ZIP_TYPE: &str = "zip";

/// Whether a resolved file type names a zip archive
pub fn is_zip(file_type: &str) -> bool {
    file_type == ZIP_TYPE
}

/// Extract a zip archive without blocking the async runtime
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - Files written under `dest_path`
/// * `Err(Error)` - Unreadable archive, corrupt entry, or filesystem failure
pub async fn extract_zip(
    archive_path: &Path,
    dest_path: &Path,
    config: &ExtractionConfig,
) -> Result<Vec<PathBuf>> {
    let archive_owned = archive_path.to_path_buf();
    let dest_owned = dest_path.to_path_buf();
    let config_owned = config.clone();

    spawn_blocking(move || ZipExtractor::extract(&archive_owned, &dest_owned, &config_owned))
        .await
        .map_err(|e| ExtractionError::TaskPanicked {
            archive: archive_path.to_path_buf(),
            reason: e.to_string(),
        })?
}

use crate::config::ExtractionConfig;
use crate::error::{ExtractionError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Archive extractor for ZIP files
pub struct ZipExtractor;

impl ZipExtractor {
    /// Extract every entry of `archive_path` into `dest_path`
    ///
    /// Entries are written in archive order; directories are created as they are
    /// met and parents of files are created on demand. Any unreadable entry aborts
    /// the extraction, leaving whatever was already written in place.
    ///
    /// This is blocking; async callers go through [`super::extract_zip`].
    pub fn extract(
        archive_path: &Path,
        dest_path: &Path,
        config: &ExtractionConfig,
    ) -> Result<Vec<PathBuf>> {
        debug!(?archive_path, ?dest_path, "extracting ZIP archive");

        std::fs::create_dir_all(dest_path)?;

        let file = std::fs::File::open(archive_path)?;
        let mut archive =
            zip::ZipArchive::new(file).map_err(|e| ExtractionError::InvalidArchive {
                archive: archive_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut extracted_files = Vec::new();

        for i in 0..archive.len() {
            let entry = archive
                .by_index(i)
                .map_err(|e| ExtractionError::EntryFailed {
                    archive: archive_path.to_path_buf(),
                    entry: format!("#{i}"),
                    reason: e.to_string(),
                })?;

            if let Some(path) = Self::extract_entry(entry, dest_path, archive_path, config)? {
                extracted_files.push(path);
            }
        }

        info!(
            ?archive_path,
            extracted_count = extracted_files.len(),
            "ZIP extraction successful"
        );

        Ok(extracted_files)
    }

    /// Where an entry lands under `dest_path`, or None if it must be skipped
    fn entry_target(
        entry: &zip::read::ZipFile,
        dest_path: &Path,
        config: &ExtractionConfig,
    ) -> Option<PathBuf> {
        if config.sanitize_entry_paths {
            entry.enclosed_name().map(|p| dest_path.join(p))
        } else {
            // Absolute prefixes and `..` components are dropped rather than rejected
            Some(dest_path.join(entry.mangled_name()))
        }
    }

    fn extract_entry(
        mut entry: zip::read::ZipFile,
        dest_path: &Path,
        archive_path: &Path,
        config: &ExtractionConfig,
    ) -> Result<Option<PathBuf>> {
        let Some(target) = Self::entry_target(&entry, dest_path, config) else {
            warn!(
                ?archive_path,
                entry = entry.name(),
                "skipping entry with unsafe path"
            );
            return Ok(None);
        };

        if entry.is_dir() {
            std::fs::create_dir_all(&target)?;
            return Ok(None);
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut outfile = std::fs::File::create(&target)?;
        std::io::copy(&mut entry, &mut outfile).map_err(|e| ExtractionError::EntryFailed {
            archive: archive_path.to_path_buf(),
            entry: entry.name().to_string(),
            reason: e.to_string(),
        })?;

        Ok(Some(target))
    }
}

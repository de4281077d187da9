//! Error types for job-fetch
//!
//! One error enum covers the whole pipeline. Variants are split along the lines
//! that matter to callers:
//! - transport and HTTP status failures (retried in batch mode, fatal in single mode)
//! - filesystem failures (always fatal)
//! - archive failures (always fatal, no partial-extraction recovery)

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for job-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for job-fetch
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "batch.concurrency")
        key: Option<String>,
    },

    /// Transport-level failure (connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that was requested
        url: String,
        /// The numeric HTTP status code
        status: u16,
    },

    /// The URL could not be parsed
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// I/O error (directory creation, file write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive extraction error
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Archive extraction errors
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The file is not a readable zip archive
    #[error("invalid archive {archive}: {reason}")]
    InvalidArchive {
        /// The archive that could not be opened
        archive: PathBuf,
        /// The reason it could not be read
        reason: String,
    },

    /// A single entry could not be read or written
    #[error("failed to extract entry '{entry}' from {archive}: {reason}")]
    EntryFailed {
        /// The archive being extracted
        archive: PathBuf,
        /// The entry name as stored in the archive
        entry: String,
        /// The reason the entry failed
        reason: String,
    },

    /// The blocking extraction task panicked or was cancelled
    #[error("extraction task for {archive} did not complete: {reason}")]
    TaskPanicked {
        /// The archive being extracted
        archive: PathBuf,
        /// Join error description
        reason: String,
    },
}

impl Error {
    /// Build a [`Error::Config`] for the given key
    pub fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}

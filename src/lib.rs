//! # job-fetch
//!
//! Materializes the remote files a job refers to before the job runs.
//!
//! - [`BatchFetcher`] downloads many URLs concurrently into
//!   `<root>/jobs/<job_id>/downloaded_files`, retrying transient failures. A URL
//!   that keeps failing becomes an empty slot; it never fails the batch.
//! - [`SingleFetcher`] downloads one URL into `<root>/job_files`, works out its
//!   original name and type, and expands zip archives next to it.
//!
//! Cleaning up those directories is left to whoever owns the job lifecycle.
//!
//! ## Quick Start
//!
//! ```no_run
//! use job_fetch::{BatchFetcher, Config, JobId, SingleFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         root_dir: "/var/lib/worker".into(),
//!         ..Default::default()
//!     };
//!
//!     let batch = BatchFetcher::new(config.clone())?;
//!     let paths = batch
//!         .fetch(
//!             &JobId::from("job-1"),
//!             vec!["https://example.com/a.png", "https://example.com/b.png"],
//!         )
//!         .await?;
//!     for (i, path) in paths.iter().enumerate() {
//!         match path {
//!             Some(path) => println!("input {i}: {}", path.display()),
//!             None => println!("input {i}: unavailable"),
//!         }
//!     }
//!
//!     let single = SingleFetcher::new(config)?;
//!     let file = single.fetch_one("https://example.com/dataset.zip").await?;
//!     println!("{}", serde_json::to_string_pretty(&file)?);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Zip archive extraction
pub mod extraction;
/// Batch and single-file fetchers
pub mod fetch;
/// File name and type resolution from headers and URLs
pub mod naming;
/// Retry logic with exponential backoff
pub mod retry;
/// Core types
pub mod types;
/// Directory provisioning and generated file names
pub mod utils;

// Re-export commonly used types
pub use config::{BatchConfig, Config, ExtractionConfig, RetryConfig, SingleConfig};
pub use error::{Error, ExtractionError, Result};
pub use fetch::{BatchFetcher, SingleFetcher};
pub use types::{BatchResult, DownloadedFile, JobId, UrlBatch};

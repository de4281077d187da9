//! Configuration types for job-fetch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Main configuration
///
/// Every field has a default, so `Config::default()` reproduces the historical
/// layout relative to the current directory:
///
/// ```
/// use job_fetch::Config;
///
/// let config: Config = serde_json::from_str(r#"{ "root_dir": "/var/lib/worker" }"#).unwrap();
/// assert_eq!(config.jobs_dir(), std::path::Path::new("/var/lib/worker/jobs"));
/// assert_eq!(config.batch.retry.max_attempts, 3);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Directory under which `jobs/` and `job_files/` are created (default: ".")
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Multi-URL fetch settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Single fetch-and-extract settings
    #[serde(default)]
    pub single: SingleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            batch: BatchConfig::default(),
            single: SingleConfig::default(),
        }
    }
}

impl Config {
    /// Directory holding one subdirectory per job
    pub fn jobs_dir(&self) -> PathBuf {
        self.root_dir.join("jobs")
    }

    /// Download directory for a job's batch fetches
    pub fn job_download_dir(&self, job_id: &str) -> PathBuf {
        self.jobs_dir().join(job_id).join("downloaded_files")
    }

    /// Directory for single fetches and their extracted archives
    pub fn job_files_dir(&self) -> PathBuf {
        self.root_dir.join("job_files")
    }

    /// Check settings that would otherwise fail at fetch time
    pub fn validate(&self) -> Result<()> {
        if self.batch.concurrency == Some(0) {
            return Err(Error::config("batch.concurrency", "must be at least 1"));
        }
        if self.batch.request_timeout.is_zero() {
            return Err(Error::config("batch.request_timeout", "must be non-zero"));
        }
        if self.single.request_timeout.is_zero() {
            return Err(Error::config("single.request_timeout", "must be non-zero"));
        }
        if self.batch.retry.max_attempts == 0 {
            return Err(Error::config(
                "batch.retry.max_attempts",
                "must allow at least one attempt",
            ));
        }
        if !self.batch.retry.backoff_multiplier.is_finite() {
            return Err(Error::config(
                "batch.retry.backoff_multiplier",
                "must be a finite number",
            ));
        }
        if self.batch.retry.backoff_multiplier < 1.0 {
            return Err(Error::config(
                "batch.retry.backoff_multiplier",
                format!(
                    "must be >= 1.0 so delays never shrink (got {})",
                    self.batch.retry.backoff_multiplier
                ),
            ));
        }
        Ok(())
    }
}

/// Multi-URL fetch configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Per-request timeout (default: 5 seconds)
    #[serde(default = "default_batch_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Maximum in-flight downloads per call (None = available parallelism)
    #[serde(default)]
    pub concurrency: Option<usize>,

    /// Retry policy for each URL
    #[serde(default)]
    pub retry: RetryConfig,
}

impl BatchConfig {
    /// Effective worker pool size for one batch call
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency
            .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, |n| n.get()))
            .max(1)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_batch_timeout(),
            concurrency: None,
            retry: RetryConfig::default(),
        }
    }
}

/// Retry configuration for transient failures
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of tries, the first one included (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial delay before first retry (default: 1 second)
    #[serde(default = "default_initial_delay", with = "duration_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 60 seconds)
    #[serde(default = "default_max_delay", with = "duration_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// Single fetch-and-extract configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SingleConfig {
    /// Request timeout (default: 30 seconds)
    #[serde(default = "default_single_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Zip expansion settings
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl Default for SingleConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_single_timeout(),
            extraction: ExtractionConfig::default(),
        }
    }
}

/// Archive extraction configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Skip entries whose path would land outside the extraction directory (default: true)
    ///
    /// When false, such entries are still extracted, with absolute prefixes and
    /// `..` components stripped from their names.
    #[serde(default = "default_true")]
    pub sanitize_entry_paths: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sanitize_entry_paths: true,
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_batch_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_single_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(60)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

// Durations are written as whole seconds
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

//! Retry logic with exponential backoff
//!
//! Batch downloads retry transient failures a bounded number of times. The delay
//! grows by `backoff_multiplier` after every failed try, is capped at `max_delay`,
//! and can be jittered to keep parallel workers from retrying in lockstep.
//!
//! # Example
//!
//! ```no_run
//! use job_fetch::retry::{IsRetryable, download_with_retry};
//! use job_fetch::config::RetryConfig;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     Transient,
//!     Permanent,
//! }
//!
//! impl std::fmt::Display for MyError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "{:?}", self)
//!     }
//! }
//!
//! impl IsRetryable for MyError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, MyError::Transient)
//!     }
//! }
//!
//! # async fn example() -> Result<(), MyError> {
//! let config = RetryConfig::default();
//! let result = download_with_retry(&config, || async {
//!     // Your operation here
//!     Ok::<_, MyError>(())
//! }).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::RetryConfig;
use crate::error::Error;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Trait for errors that can be classified as retryable or not
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            // Every transport failure and every non-2xx answer is worth another try
            Error::Network(_) | Error::HttpStatus { .. } => true,
            Error::Io(_) => false,
            Error::Extraction(_) => false,
            Error::InvalidUrl { .. } => false,
            Error::Config { .. } => false,
        }
    }
}

/// Execute an async operation with exponential backoff retry logic
///
/// `operation` is called at most `config.max_attempts` times (a value of 0 is
/// treated as 1). Non-retryable errors are returned immediately.
///
/// # Returns
///
/// Returns the successful result or the last error after all attempts are exhausted.
pub async fn download_with_retry<F, Fut, T, E>(
    config: &RetryConfig,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;
    let mut delay = config.initial_delay.min(config.max_delay);

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(attempts = attempt, "operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                tracing::warn!(
                    error = %e,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis(),
                    "operation failed, retrying"
                );

                let jittered_delay = if config.jitter {
                    add_jitter(delay)
                } else {
                    delay
                };
                tokio::time::sleep(jittered_delay).await;

                attempt += 1;
                delay = Duration::try_from_secs_f64(delay.as_secs_f64() * config.backoff_multiplier)
                    .unwrap_or(config.max_delay)
                    .min(config.max_delay);
            }
            Err(e) => {
                if e.is_retryable() {
                    tracing::warn!(
                        error = %e,
                        attempts = attempt,
                        "operation failed after all attempts exhausted"
                    );
                } else {
                    tracing::warn!(error = %e, "operation failed with non-retryable error");
                }
                return Err(e);
            }
        }
    }
}

/// Add random jitter to a delay
///
/// The result is uniformly distributed between `delay` and `2 * delay`, and
/// stays at `delay` when doubling would overflow.
fn add_jitter(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let jitter_factor: f64 = rng.gen_range(0.0..=1.0);
    Duration::try_from_secs_f64(delay.as_secs_f64() * (1.0 + jitter_factor)).unwrap_or(delay)
}

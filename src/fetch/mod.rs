//! Fetching job input files
//!
//! - [`BatchFetcher`]: many URLs at once, retried, failures become empty slots
//! - [`SingleFetcher`]: one URL, no retry, zip payloads are expanded

mod batch;
mod single;


pub use batch::BatchFetcher;
pub use single::SingleFetcher;

use crate::error::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Build the HTTP client shared by all requests of one fetcher
///
/// Timeouts are set per request, since batch and single fetches use different ones.
pub(crate) fn build_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("job-fetch/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// GET `url`, failing on transport errors and non-2xx statuses
pub(crate) async fn get_checked(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<reqwest::Response> {
    debug!(url, timeout_ms = timeout.as_millis(), "sending GET");

    let response = client.get(url).timeout(timeout).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}

/// The Content-Disposition header, if present and valid text
pub(crate) fn content_disposition(response: &reqwest::Response) -> Option<&str> {
    response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
}

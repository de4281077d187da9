use crate::config::Config;
use crate::error::Result;
use crate::naming::extension_from_content_disposition;
use crate::retry::download_with_retry;
use crate::types::{BatchResult, JobId, UrlBatch};
use crate::utils::{batch_file_name, ensure_dir};
use futures::{StreamExt, TryStreamExt, stream};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{build_client, content_disposition, get_checked};

/// Concurrent multi-URL downloader
///
/// Every call downloads into `<root>/jobs/<job_id>/downloaded_files`, one file per
/// successful URL, named `<uuid><extension>`. The extension comes from the
/// `Content-Disposition` filename when the server sends one.
///
/// # Example
///
/// ```no_run
/// use job_fetch::{BatchFetcher, Config, JobId};
///
/// # async fn example() -> job_fetch::Result<()> {
/// let fetcher = BatchFetcher::new(Config::default())?;
/// let paths = fetcher
///     .fetch(&JobId::from("job-1"), vec![Some("https://example.com/a.png"), None])
///     .await?;
/// assert_eq!(paths.len(), 2);
/// assert!(paths[1].is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct BatchFetcher {
    client: reqwest::Client,
    config: Config,
}

impl BatchFetcher {
    /// Create a fetcher with its own HTTP client
    pub fn new(config: Config) -> Result<Self> {
        Self::with_client(config, build_client()?)
    }

    /// Create a fetcher reusing an existing HTTP client
    pub fn with_client(config: Config, client: reqwest::Client) -> Result<Self> {
        config.validate()?;
        Ok(Self { client, config })
    }

    /// The configuration this fetcher was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Download every URL of `urls` for `job_id`
    ///
    /// The result has one slot per input slot, in input order. A slot is `None` when
    /// the input slot was `None` (no request is made) or when the URL still failed
    /// after the retry budget; the failure is logged and the other URLs carry on.
    ///
    /// Only filesystem failures (creating the download directory, writing a file)
    /// fail the whole call.
    pub async fn fetch(&self, job_id: &JobId, urls: impl Into<UrlBatch>) -> Result<BatchResult> {
        let urls = urls.into();
        let total = urls.len();

        // Created once, before any worker writes into it
        let download_dir = ensure_dir(&self.config.job_download_dir(job_id.as_str())).await?;
        let dir = download_dir.as_path();
        let concurrency = self.config.batch.effective_concurrency();

        info!(
            job_id = %job_id,
            total,
            concurrency,
            ?download_dir,
            "downloading batch"
        );

        // `buffered` yields in input order whatever the completion order
        let results: BatchResult = stream::iter(urls.into_inner())
            .map(move |slot| self.fetch_slot(job_id, dir, slot))
            .buffered(concurrency)
            .try_collect()
            .await?;

        let succeeded = results.iter().filter(|slot| slot.is_some()).count();
        info!(job_id = %job_id, succeeded, total, "batch download finished");

        Ok(results)
    }

    async fn fetch_slot(
        &self,
        job_id: &JobId,
        download_dir: &Path,
        slot: Option<String>,
    ) -> Result<Option<PathBuf>> {
        let Some(url) = slot else {
            debug!(job_id = %job_id, "skipping empty slot");
            return Ok(None);
        };

        let (body, extension) =
            match download_with_retry(&self.config.batch.retry, || self.download(&url)).await {
                Ok(downloaded) => downloaded,
                Err(e) => {
                    warn!(job_id = %job_id, url = %url, error = %e, "failed to download");
                    return Ok(None);
                }
            };

        let path = download_dir.join(batch_file_name(&extension));
        tokio::fs::write(&path, &body).await?;

        debug!(job_id = %job_id, url = %url, ?path, bytes = body.len(), "downloaded");
        Ok(Some(path))
    }

    /// One attempt: fetch the whole body and the extension to store it under
    async fn download(&self, url: &str) -> Result<(Vec<u8>, String)> {
        let response = get_checked(&self.client, url, self.config.batch.request_timeout).await?;
        let extension = extension_from_content_disposition(content_disposition(&response));
        let body = response.bytes().await?;
        Ok((body.to_vec(), extension))
    }
}

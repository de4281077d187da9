use crate::config::Config;
use crate::error::Result;
use crate::extraction::{extract_zip, is_zip};
use crate::naming::name_and_type_from_url_or_header;
use crate::types::DownloadedFile;
use crate::utils::{ensure_dir, generated_base_name, single_file_name};
use tracing::info;

use super::{build_client, content_disposition, get_checked};

/// Single-URL downloader that expands zip archives
///
/// Files land in `<root>/job_files/<uuid>.<type>`; a zip archive is additionally
/// extracted into `<root>/job_files/<uuid>/`.
#[derive(Clone, Debug)]
pub struct SingleFetcher {
    client: reqwest::Client,
    config: Config,
}

impl SingleFetcher {
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

    /// Download `url` once and materialize it on disk
    ///
    /// There is no retry: a transport failure, a non-2xx status, a write failure or
    /// a corrupt zip archive is returned as the error of this call.
    pub async fn fetch_one(&self, url: &str) -> Result<DownloadedFile> {
        let files_dir = ensure_dir(&self.config.job_files_dir()).await?;

        let response = get_checked(&self.client, url, self.config.single.request_timeout).await?;
        let (original_name, file_type) =
            name_and_type_from_url_or_header(content_disposition(&response), url)?;
        let body = response.bytes().await?;

        let base_name = generated_base_name();
        let file_path = files_dir.join(single_file_name(&base_name, &file_type));
        tokio::fs::write(&file_path, &body).await?;

        let extracted_path = if is_zip(&file_type) {
            let dest = files_dir.join(&base_name);
            extract_zip(&file_path, &dest, &self.config.single.extraction).await?;
            Some(dest)
        } else {
            None
        };

        info!(
            url,
            ?file_path,
            file_type = %file_type,
            original_name = %original_name,
            extracted = extracted_path.is_some(),
            "downloaded file"
        );

        Ok(DownloadedFile {
            file_path,
            file_type,
            original_name,
            extracted_path,
        })
    }
}

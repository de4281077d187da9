//! Core types for job-fetch

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identifier of the job that owns a batch of downloads
///
/// Job IDs are assigned by the job lifecycle outside this crate; they are used
/// verbatim as a directory name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Create a new JobId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered download results, one slot per requested URL
///
/// A slot is `Some(absolute path)` iff that URL was downloaded.
pub type BatchResult = Vec<Option<PathBuf>>;

/// URLs for one batch call
///
/// A `None` slot is skipped without a network call and yields `None` at the same
/// index of the [`BatchResult`]. A single URL is a one-slot batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlBatch(Vec<Option<String>>);

impl UrlBatch {
    /// Number of slots, skipped ones included
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no slots at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the slots in order
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.0.iter().map(|slot| slot.as_deref())
    }

    /// Consume the batch into its slots
    pub fn into_inner(self) -> Vec<Option<String>> {
        self.0
    }
}

impl From<&str> for UrlBatch {
    fn from(url: &str) -> Self {
        Self(vec![Some(url.to_string())])
    }
}

impl From<String> for UrlBatch {
    fn from(url: String) -> Self {
        Self(vec![Some(url)])
    }
}

impl From<Vec<String>> for UrlBatch {
    fn from(urls: Vec<String>) -> Self {
        Self(urls.into_iter().map(Some).collect())
    }
}

impl From<Vec<&str>> for UrlBatch {
    fn from(urls: Vec<&str>) -> Self {
        Self(urls.into_iter().map(|u| Some(u.to_string())).collect())
    }
}

impl From<&[&str]> for UrlBatch {
    fn from(urls: &[&str]) -> Self {
        Self(urls.iter().map(|u| Some((*u).to_string())).collect())
    }
}

impl From<Vec<Option<String>>> for UrlBatch {
    fn from(urls: Vec<Option<String>>) -> Self {
        Self(urls)
    }
}

impl From<Vec<Option<&str>>> for UrlBatch {
    fn from(urls: Vec<Option<&str>>) -> Self {
        Self(urls.into_iter().map(|u| u.map(str::to_string)).collect())
    }
}

impl FromIterator<Option<String>> for UrlBatch {
    fn from_iter<I: IntoIterator<Item = Option<String>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A file materialized by a single fetch
///
/// Serializes with the field names job payloads expect:
///
/// ```
/// use job_fetch::DownloadedFile;
///
/// let file = DownloadedFile {
///     file_path: "/w/job_files/0b6e.csv".into(),
///     file_type: "csv".to_string(),
///     original_name: "report.csv".to_string(),
///     extracted_path: None,
/// };
/// let json = serde_json::to_value(&file).unwrap();
/// assert_eq!(json["type"], "csv");
/// assert!(json["extracted_path"].is_null());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadedFile {
    /// Absolute path of the downloaded file
    pub file_path: PathBuf,

    /// Lowercase extension without the leading dot, empty when there is none
    #[serde(rename = "type")]
    pub file_type: String,

    /// Name suggested by the server, or the last segment of the URL path
    pub original_name: String,

    /// Absolute path of the extraction directory, set iff `file_type == "zip"`
    pub extracted_path: Option<PathBuf>,
}

impl DownloadedFile {
    /// True when the download was a zip archive that has been expanded
    pub fn is_extracted(&self) -> bool {
        self.extracted_path.is_some()
    }
}

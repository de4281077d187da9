//! Payload fixtures and a mock file host

use job_fetch::{Config, RetryConfig};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Small PNG-looking payload (magic bytes only)
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-an-image";

/// CSV payload
pub const CSV_BYTES: &[u8] = b"id,name\n1,alpha\n2,bravo\n";

/// Config rooted in a fresh temp directory with millisecond retry delays
pub fn temp_config() -> (Config, TempDir) {
    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let mut config = Config {
        root_dir: temp_dir.path().to_path_buf(),
        ..Default::default()
    };
    config.batch.retry = RetryConfig {
        max_attempts: 3,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        backoff_multiplier: 2.0,
        jitter: true,
    };
    (config, temp_dir)
}

/// Build a zip archive in memory
pub fn zip_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();
    for (name, content) in files {
        writer.start_file(*name, options).expect("start_file failed");
        writer.write_all(content).expect("write failed");
    }
    writer.finish().expect("finish failed").into_inner()
}

/// Serve `body` at `route`, optionally with a Content-Disposition header
pub async fn host_file(
    server: &MockServer,
    route: &str,
    body: &[u8],
    content_disposition: Option<&str>,
) {
    let mut template = ResponseTemplate::new(200).set_body_bytes(body.to_vec());
    if let Some(value) = content_disposition {
        template = template.insert_header("Content-Disposition", value);
    }
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Serve a status-only response at `route`
pub async fn host_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Relative paths of every regular file under `root`, sorted
pub fn files_under(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();
    files.sort();
    files
}

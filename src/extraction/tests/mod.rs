use crate::config::ExtractionConfig;
use crate::error::{Error, ExtractionError};
use crate::extraction::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a ZIP archive with the given file entries
fn create_zip_archive(archive_path: &Path, files: &[(&str, &[u8])]) {
    let file = std::fs::File::create(archive_path).unwrap();
    let mut writer = ::zip::ZipWriter::new(file);
    let options =
        ::zip::write::FileOptions::default().compression_method(::zip::CompressionMethod::Stored);
    for (name, content) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap();
}

/// Relative paths of every file under `root`, sorted
fn files_under(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

fn sanitizing() -> ExtractionConfig {
    ExtractionConfig {
        sanitize_entry_paths: true,
    }
}

fn lenient() -> ExtractionConfig {
    ExtractionConfig {
        sanitize_entry_paths: false,
    }
}

// ---------------------------------------------------------------------------
// is_zip
// ---------------------------------------------------------------------------

#[test]
fn only_lowercase_zip_type_triggers_extraction() {
    assert!(is_zip("zip"));
    assert!(!is_zip("gz"));
    assert!(!is_zip(""));
    assert!(!is_zip("zipx"));
}

// ---------------------------------------------------------------------------
// ZipExtractor::extract
// ---------------------------------------------------------------------------

#[test]
fn extracts_flat_archive() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("bundle.zip");
    create_zip_archive(&archive, &[("a.txt", b"alpha"), ("b.txt", b"bravo")]);
    let dest = temp_dir.path().join("out");

    let files = ZipExtractor::extract(&archive, &dest, &sanitizing()).unwrap();

    assert_eq!(files.len(), 2);
    assert_eq!(std::fs::read(dest.join("a.txt")).unwrap(), b"alpha");
    assert_eq!(std::fs::read(dest.join("b.txt")).unwrap(), b"bravo");
}

#[test]
fn extracts_nested_entries_and_directories() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("tree.zip");
    {
        let file = std::fs::File::create(&archive).unwrap();
        let mut writer = ::zip::ZipWriter::new(file);
        let options = ::zip::write::FileOptions::default();
        writer.add_directory("empty/", options).unwrap();
        writer.start_file("images/cats/1.png", options).unwrap();
        writer.write_all(b"png-bytes").unwrap();
        writer.start_file("readme.md", options).unwrap();
        writer.write_all(b"# hi").unwrap();
        writer.finish().unwrap();
    }
    let dest = temp_dir.path().join("out");

    let files = ZipExtractor::extract(&archive, &dest, &sanitizing()).unwrap();

    assert_eq!(files.len(), 2, "directories are not reported as files");
    assert!(dest.join("empty").is_dir());
    assert_eq!(
        files_under(&dest),
        vec![PathBuf::from("images/cats/1.png"), PathBuf::from("readme.md")]
    );
    assert_eq!(
        std::fs::read(dest.join("images/cats/1.png")).unwrap(),
        b"png-bytes"
    );
}

#[test]
fn empty_archive_creates_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("empty.zip");
    create_zip_archive(&archive, &[]);
    let dest = temp_dir.path().join("out");

    let files = ZipExtractor::extract(&archive, &dest, &sanitizing()).unwrap();

    assert!(files.is_empty());
    assert!(dest.is_dir());
}

#[test]
fn invalid_archive_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("fake.zip");
    std::fs::write(&archive, b"this is plain text, not a zip").unwrap();

    let err = ZipExtractor::extract(&archive, &temp_dir.path().join("out"), &sanitizing())
        .unwrap_err();

    assert!(
        matches!(
            err,
            Error::Extraction(ExtractionError::InvalidArchive { ref archive, .. }) if archive.ends_with("fake.zip")
        ),
        "expected InvalidArchive, got {err:?}"
    );
}

#[test]
fn missing_archive_is_io_error() {
    let temp_dir = TempDir::new().unwrap();

    let err = ZipExtractor::extract(
        &temp_dir.path().join("nope.zip"),
        &temp_dir.path().join("out"),
        &sanitizing(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn traversal_entry_is_skipped_when_sanitizing() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("evil.zip");
    create_zip_archive(
        &archive,
        &[("../escaped.txt", b"gotcha"), ("safe.txt", b"fine")],
    );
    let dest = temp_dir.path().join("out");

    let files = ZipExtractor::extract(&archive, &dest, &sanitizing()).unwrap();

    assert_eq!(files, vec![dest.join("safe.txt")]);
    assert!(
        !temp_dir.path().join("escaped.txt").exists(),
        "entry must not be written outside the destination"
    );
}

#[test]
fn traversal_entry_is_neutralized_when_lenient() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("evil.zip");
    create_zip_archive(&archive, &[("../escaped.txt", b"gotcha")]);
    let dest = temp_dir.path().join("out");

    let files = ZipExtractor::extract(&archive, &dest, &lenient()).unwrap();

    assert_eq!(files, vec![dest.join("escaped.txt")]);
    assert!(!temp_dir.path().join("escaped.txt").exists());
    assert_eq!(std::fs::read(dest.join("escaped.txt")).unwrap(), b"gotcha");
}

// ---------------------------------------------------------------------------
// extract_zip (async wrapper)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn async_wrapper_extracts_on_blocking_pool() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("bundle.zip");
    create_zip_archive(&archive, &[("data/x.csv", b"1,2,3")]);
    let dest = temp_dir.path().join("bundle");

    let files = extract_zip(&archive, &dest, &ExtractionConfig::default())
        .await
        .unwrap();

    assert_eq!(files, vec![dest.join("data/x.csv")]);
    assert!(archive.exists(), "the archive itself is left in place");
}

#[tokio::test]
async fn async_wrapper_propagates_invalid_archive() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("broken.zip");
    std::fs::write(&archive, b"PK\x03\x04 truncated").unwrap();

    let result = extract_zip(
        &archive,
        &temp_dir.path().join("broken"),
        &ExtractionConfig::default(),
    )
    .await;

    assert!(matches!(
        result,
        Err(Error::Extraction(ExtractionError::InvalidArchive { .. }))
    ));
}

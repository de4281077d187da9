//! File name and type resolution
//!
//! Downloads are stored under generated names, but the logical type of a download
//! comes from the server (`Content-Disposition`) or from the URL itself.
//!
//! The two fetch modes read the header differently:
//! - batch fetches parse it as a MIME parameter list and keep only the extension
//!   of the unquoted `filename` ([`extension_from_content_disposition`])
//! - single fetches take the raw text after `filename=` as the original name,
//!   quotes and all ([`filename_from_content_disposition_raw`])
//!
//! Callers observe the difference (`"data.json"` vs `data.json`), so both stay.

use crate::error::{Error, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static RAW_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("filename=(.+)").expect("filename pattern is valid"));

/// Longest extension (without the dot) accepted from a server-supplied name
const MAX_EXTENSION_LEN: usize = 16;

/// Extension (with leading dot) of the `filename` parameter of a
/// `Content-Disposition` header, or an empty string.
///
/// An RFC 5987 `filename*` parameter wins over a plain `filename`. Extensions
/// longer than 16 bytes or containing anything but ASCII alphanumerics are
/// dropped, so a hostile header cannot produce an unwritable file name.
///
/// # Examples
///
/// ```
/// use job_fetch::naming::extension_from_content_disposition;
///
/// assert_eq!(extension_from_content_disposition(Some(r#"attachment; filename="cat.png""#)), ".png");
/// assert_eq!(extension_from_content_disposition(Some("inline")), "");
/// assert_eq!(extension_from_content_disposition(None), "");
/// ```
pub fn extension_from_content_disposition(header_value: Option<&str>) -> String {
    let Some(filename) = header_value.and_then(disposition_filename) else {
        return String::new();
    };

    match Path::new(&filename).extension().and_then(|e| e.to_str()) {
        Some(ext) if is_safe_extension(ext) => format!(".{ext}"),
        _ => String::new(),
    }
}

fn is_safe_extension(ext: &str) -> bool {
    ext.len() <= MAX_EXTENSION_LEN && ext.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Raw text following `filename=` in a `Content-Disposition` header
///
/// The first match wins and runs to the end of the header, so surrounding
/// quotes (and any trailing parameters) are kept as-is.
pub fn filename_from_content_disposition_raw(header_value: &str) -> Option<String> {
    RAW_FILENAME
        .captures(header_value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Original name and lowercase type (extension without the dot) of a single fetch
///
/// The name comes from the header when it carries `filename=`, otherwise from the
/// last segment of the URL path. The type ignores quote characters and anything
/// after a `;` in the extension, so `filename="data.json"` has type `json` while the
/// name keeps its quotes.
///
/// # Examples
///
/// ```
/// use job_fetch::naming::name_and_type_from_url_or_header;
///
/// let (name, file_type) =
///     name_and_type_from_url_or_header(None, "http://x/y/report.CSV").unwrap();
/// assert_eq!(name, "report.CSV");
/// assert_eq!(file_type, "csv");
/// ```
pub fn name_and_type_from_url_or_header(
    header_value: Option<&str>,
    url: &str,
) -> Result<(String, String)> {
    let original_name = match header_value.and_then(filename_from_content_disposition_raw) {
        Some(name) => name,
        None => last_path_segment(url)?,
    };
    let file_type = file_type_of(&original_name);
    Ok((original_name, file_type))
}

/// Last segment of the URL path, percent-encoding untouched
fn last_path_segment(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url).map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    Ok(parsed
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string())
}

fn file_type_of(name: &str) -> String {
    let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
        return String::new();
    };

    ext.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_lowercase()
}

/// Pick the file name out of a parsed Content-Disposition parameter list
fn disposition_filename(header_value: &str) -> Option<String> {
    let params = parse_parameters(header_value);

    let extended = params
        .iter()
        .find(|(name, _)| name == "filename*")
        .and_then(|(_, value)| decode_extended_value(value));
    if extended.is_some() {
        return extended;
    }

    params
        .into_iter()
        .find(|(name, value)| name == "filename" && !value.is_empty())
        .map(|(_, value)| value)
}

/// Split `type; a=b; c="d;e"` into lowercased names and unquoted values
///
/// The leading disposition type is dropped. Semicolons inside quoted strings do
/// not split, and backslash escapes inside quotes are resolved.
fn parse_parameters(header_value: &str) -> Vec<(String, String)> {
    split_outside_quotes(header_value)
        .into_iter()
        .skip(1)
        .filter_map(|param| {
            let (name, value) = param.split_once('=')?;
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            Some((name, unquote(value.trim())))
        })
        .collect()
}

fn split_outside_quotes(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

fn unquote(value: &str) -> String {
    let Some(inner) = value.strip_prefix('"') else {
        return value.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '"' => break,
            _ => out.push(c),
        }
    }
    out
}

/// Decode `charset'language'percent-encoded` (RFC 5987)
fn decode_extended_value(value: &str) -> Option<String> {
    let mut pieces = value.splitn(3, '\'');
    let _charset = pieces.next()?;
    let _language = pieces.next()?;
    let encoded = pieces.next()?;

    let decoded = urlencoding::decode(encoded).ok()?;
    (!decoded.is_empty()).then(|| decoded.into_owned())
}

//! Input format detection.

use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Supported input tree representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// HTML page or saved article fragment
    Html,
    /// CDP `DOM.Node` JSON snapshot
    CdpJson,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Html => write!(f, "HTML"),
            InputFormat::CdpJson => write!(f, "CDP JSON"),
        }
    }
}

/// Bytes read from the head of a file for detection.
const HEADER_LEN: usize = 512;

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Detect the input format from a file path.
///
/// # Example
/// ```no_run
/// use xarticle::detect::{detect_format_from_path, InputFormat};
///
/// let format = detect_format_from_path("whole_article.html").unwrap();
/// assert_eq!(format, InputFormat::Html);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    BufReader::new(file)
        .take(HEADER_LEN as u64)
        .read_to_end(&mut header)?;
    Ok(detect_format_from_bytes(&header))
}

/// Detect the input format from the leading bytes of the content.
///
/// A JSON object (first non-whitespace byte `{`) is a CDP snapshot;
/// anything else is handed to the HTML parser, which accepts any input.
pub fn detect_format_from_bytes(data: &[u8]) -> InputFormat {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    match data.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => InputFormat::CdpJson,
        _ => InputFormat::Html,
    }
}

/// Detect the input format of already-decoded text.
pub fn detect_input_format(content: &str) -> InputFormat {
    detect_format_from_bytes(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_html() {
        assert_eq!(
            detect_format_from_bytes(b"<!DOCTYPE html><html></html>"),
            InputFormat::Html
        );
        assert_eq!(detect_input_format("  <div>"), InputFormat::Html);
        assert_eq!(detect_input_format(""), InputFormat::Html);
    }

    #[test]
    fn test_detect_cdp_json() {
        assert_eq!(
            detect_format_from_bytes(b"\n  {\"root\": {}}"),
            InputFormat::CdpJson
        );
        assert_eq!(
            detect_format_from_bytes(b"\xEF\xBB\xBF{\"nodeType\": 9}"),
            InputFormat::CdpJson
        );
    }

    #[test]
    fn test_detect_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, "{\"root\": {\"nodeType\": 9}}").unwrap();
        assert_eq!(detect_format_from_path(&path).unwrap(), InputFormat::CdpJson);

        assert!(detect_format_from_path(dir.path().join("missing.html")).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(InputFormat::CdpJson.to_string(), "CDP JSON");
    }
}

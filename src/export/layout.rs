//! Output folder naming.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::ExportPayload;

/// Folder title used when the sanitized title is empty.
pub const DEFAULT_FOLDER_TITLE: &str = "x-article";

/// Maximum length of a sanitized name, in characters.
pub const MAX_NAME_LEN: usize = 120;

/// Markdown file name inside the output folder.
pub const MARKDOWN_FILE: &str = "article.md";

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// How the export is laid out under the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderLayout {
    /// `article.md` and `images/` directly in the output directory
    #[default]
    Flat,
    /// Nested in a `<YYYY-MM-DD>-<title>` folder
    Dated,
}

/// Make a title safe to use as a file or folder name.
///
/// Filesystem-unsafe characters become `-`, whitespace runs collapse to one
/// space, and the result is trimmed and cut to [`MAX_NAME_LEN`] characters.
pub fn sanitize_title(title: &str) -> String {
    let replaced = UNSAFE_CHARS.replace_all(title, "-");
    let collapsed = WHITESPACE_RUN.replace_all(&replaced, " ");
    let trimmed = collapsed.trim();

    let name = if trimmed.is_empty() {
        DEFAULT_FOLDER_TITLE
    } else {
        trimmed
    };
    name.chars().take(MAX_NAME_LEN).collect()
}

/// Calendar date of `published_at`, or `today` when it does not parse.
///
/// Timestamps with an offset are converted to UTC first.
pub fn publish_date(published_at: &str, today: NaiveDate) -> NaiveDate {
    let value = published_at.trim();
    if value.is_empty() {
        return today;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.with_timezone(&Utc).date_naive();
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return dt.date();
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or(today)
}

/// `YYYY-MM-DD` prefix for the export folder.
pub fn date_prefix(published_at: &str, today: NaiveDate) -> String {
    publish_date(published_at, today).format("%Y-%m-%d").to_string()
}

/// `<YYYY-MM-DD>-<sanitized title>`
pub fn folder_name(payload: &ExportPayload, today: NaiveDate) -> String {
    format!(
        "{}-{}",
        date_prefix(&payload.published_at, today),
        sanitize_title(&payload.title)
    )
}

/// Today's date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

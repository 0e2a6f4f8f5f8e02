//! Text cleanup helpers.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse whitespace runs (non-breaking spaces included) to one space and trim.
pub fn clean_text(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let value = value.replace('\u{a0}', " ");
    WHITESPACE_RUN.replace_all(&value, " ").trim().to_string()
}

/// [`clean_text`] over an optional attribute value.
pub fn clean_attr(value: Option<&str>) -> String {
    value.map(clean_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Hello \n\t world  "), "Hello world");
        assert_eq!(clean_text("a\u{a0}\u{a0}b"), "a b");
        assert_eq!(clean_text(" \u{a0} "), "");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_clean_attr() {
        assert_eq!(clean_attr(None), "");
        assert_eq!(clean_attr(Some(" alt  text ")), "alt text");
    }
}

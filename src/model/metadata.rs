//! Article metadata.

use serde::{Deserialize, Serialize};

/// Metadata read from the fixed page landmarks.
///
/// Every field is a plain string; an empty string means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Article title
    pub title: String,

    /// Display name of the author
    pub author: String,

    /// Author handle, including the leading `@`
    pub handle: String,

    /// Publication timestamp (ISO-8601) as found on the page
    pub published_at: String,

    /// Permalink of the article
    pub source_url: String,
}

impl DocumentMetadata {
    /// Create metadata with only a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Title, or `default` when no title was found.
    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        if self.title.is_empty() {
            default
        } else {
            &self.title
        }
    }

    /// Whether any of author, handle, publish date or source is present.
    pub fn has_byline(&self) -> bool {
        !(self.author.is_empty()
            && self.handle.is_empty()
            && self.published_at.is_empty()
            && self.source_url.is_empty())
    }

    /// Bullet lines for the metadata section, in fixed order.
    pub fn byline_lines(&self) -> Vec<String> {
        [
            ("Author", &self.author),
            ("Handle", &self.handle),
            ("Published", &self.published_at),
            ("Source", &self.source_url),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("- {}: {}", label, value))
        .collect()
    }
}

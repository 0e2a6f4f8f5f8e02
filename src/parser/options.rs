//! Parsing options.

/// Options for parsing an article tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Address of the page the tree was taken from.
    ///
    /// Used as the last fallback for the article's source URL.
    pub page_url: Option<String>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page address.
    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.page_url = if url.trim().is_empty() { None } else { Some(url) };
        self
    }

    /// Page address, or an empty string.
    pub fn page_url(&self) -> &str {
        self.page_url.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().with_page_url("https://x.com/jack/article/1");
        assert_eq!(options.page_url(), "https://x.com/jack/article/1");

        let options = ParseOptions::new().with_page_url("  ");
        assert_eq!(options.page_url, None);
        assert_eq!(options.page_url(), "");
    }
}

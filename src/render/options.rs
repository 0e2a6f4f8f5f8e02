//! Rendering options.

/// Title used when the page has none.
pub const DEFAULT_TITLE: &str = "Untitled X Article";

/// Options for assembling the Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Title emitted when the metadata has none
    pub default_title: String,

    /// Emit the author/handle/published/source bullet section
    pub include_metadata: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback title.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Enable or disable the metadata section.
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            include_metadata: true,
        }
    }
}

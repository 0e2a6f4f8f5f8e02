//! Extraction statistics.

use serde::{Deserialize, Serialize};

/// Counters collected while parsing one article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of paragraphs emitted
    pub paragraph_count: u32,

    /// Number of headings emitted
    pub heading_count: u32,

    /// Number of blockquotes emitted
    pub block_quote_count: u32,

    /// Number of image groups emitted
    pub image_group_count: u32,

    /// Number of inline image elements rendered (before deduplication)
    pub inline_image_count: u32,

    /// Number of links rendered
    pub link_count: u32,

    /// Content-root children that matched no block shape or rendered empty
    pub dropped_block_count: u32,

    /// Approximate word count of the emitted blocks
    pub word_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment blockquote count.
    pub fn add_block_quote(&mut self) {
        self.block_quote_count += 1;
    }

    /// Increment image group count.
    pub fn add_image_group(&mut self) {
        self.image_group_count += 1;
    }

    /// Increment inline image count.
    pub fn add_inline_image(&mut self) {
        self.inline_image_count += 1;
    }

    /// Increment link count.
    pub fn add_link(&mut self) {
        self.link_count += 1;
    }

    /// Increment dropped block count.
    pub fn add_dropped_block(&mut self) {
        self.dropped_block_count += 1;
    }

    /// Add word count from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }

    /// Total number of emitted blocks.
    pub fn block_count(&self) -> u32 {
        self.paragraph_count + self.heading_count + self.block_quote_count + self.image_group_count
    }
}

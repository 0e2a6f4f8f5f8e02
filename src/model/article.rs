//! Parsed article.

use serde::{Deserialize, Serialize};

use super::{ContentBlock, DocumentMetadata, ExportPayload, ExtractionStats, ImageRef};
use crate::render::{self, RenderOptions};

/// The result of one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Metadata read from the page landmarks
    pub metadata: DocumentMetadata,

    /// Body blocks in document order
    pub blocks: Vec<ContentBlock>,

    /// Registered images in ordinal order
    pub images: Vec<ImageRef>,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl Article {
    /// Assemble the Markdown document.
    pub fn to_markdown(&self, options: &RenderOptions) -> String {
        render::to_markdown(self, options)
    }

    /// Build the export payload for the persistence layer.
    pub fn to_payload(&self, options: &RenderOptions) -> ExportPayload {
        ExportPayload {
            title: self.metadata.title_or(&options.default_title).to_string(),
            published_at: self.metadata.published_at.clone(),
            source_url: self.metadata.source_url.clone(),
            markdown: self.to_markdown(options),
            images: self.images.clone(),
        }
    }

    /// Number of distinct images referenced by the article.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Check if the article body is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

//! Top-level content blocks.

use serde::{Deserialize, Serialize};

/// One top-level block of the article body, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A paragraph of inline Markdown
    Paragraph(String),

    /// A section heading (text only)
    Heading(String),

    /// Quoted lines, without the `> ` marker
    BlockQuote(Vec<String>),

    /// Image references separated by blank lines
    ImageGroup(String),
}

impl ContentBlock {
    /// Render the block as a Markdown section.
    pub fn to_markdown(&self) -> String {
        match self {
            ContentBlock::Paragraph(text) => text.clone(),
            ContentBlock::Heading(text) => format!("## {}", text),
            ContentBlock::BlockQuote(lines) => lines
                .iter()
                .map(|line| format!("> {}", line))
                .collect::<Vec<_>>()
                .join("\n"),
            ContentBlock::ImageGroup(markdown) => markdown.clone(),
        }
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, ContentBlock::Paragraph(_))
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, ContentBlock::Heading(_))
    }

    /// Check if this block is a blockquote.
    pub fn is_block_quote(&self) -> bool {
        matches!(self, ContentBlock::BlockQuote(_))
    }

    /// Check if this block is an image group.
    pub fn is_image_group(&self) -> bool {
        matches!(self, ContentBlock::ImageGroup(_))
    }
}

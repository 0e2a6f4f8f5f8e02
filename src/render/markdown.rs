//! Markdown assembly.

use crate::model::{Article, ContentBlock, DocumentMetadata};

use super::RenderOptions;

/// Assemble the Markdown document for an article.
pub fn to_markdown(article: &Article, options: &RenderOptions) -> String {
    MarkdownRenderer::new(options.clone()).render(&article.metadata, &article.blocks)
}

/// Markdown assembler.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render metadata and blocks.
    ///
    /// Sections are the title line, the optional byline bullets and one
    /// section per block, separated by blank lines. The result ends with
    /// exactly one newline.
    pub fn render(&self, metadata: &DocumentMetadata, blocks: &[ContentBlock]) -> String {
        let mut sections = Vec::with_capacity(blocks.len() + 2);
        sections.push(format!("# {}", metadata.title_or(&self.options.default_title)));

        if self.options.include_metadata && metadata.has_byline() {
            sections.push(metadata.byline_lines().join("\n"));
        }

        sections.extend(blocks.iter().map(ContentBlock::to_markdown));

        let mut output = sections.join("\n\n").trim_end().to_string();
        output.push('\n');
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_only() {
        let metadata = DocumentMetadata::with_title("T");
        let blocks = vec![ContentBlock::Paragraph("Body".into())];
        let markdown = MarkdownRenderer::new(RenderOptions::default()).render(&metadata, &blocks);
        assert!(markdown.starts_with("# T\n\n"));
        assert!(!markdown.contains("- "));
        assert_eq!(markdown, "# T\n\nBody\n");
    }

    #[test]
    fn test_default_title_and_byline() {
        let article = Article {
            metadata: DocumentMetadata {
                author: "Jack".into(),
                source_url: "https://x.com/jack/status/20".into(),
                ..Default::default()
            },
            blocks: vec![
                ContentBlock::Heading("Intro".into()),
                ContentBlock::BlockQuote(vec!["quoted".into()]),
            ],
            ..Default::default()
        };

        assert_eq!(
            to_markdown(&article, &RenderOptions::default()),
            "# Untitled X Article\n\n\
             - Author: Jack\n- Source: https://x.com/jack/status/20\n\n\
             ## Intro\n\n\
             > quoted\n"
        );
    }

    #[test]
    fn test_without_metadata_section() {
        let article = Article {
            metadata: DocumentMetadata {
                title: "T".into(),
                handle: "@jack".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let options = RenderOptions::new().with_metadata(false);
        assert_eq!(to_markdown(&article, &options), "# T\n");
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        let metadata = DocumentMetadata::with_title("T");
        let blocks = vec![ContentBlock::ImageGroup("![Image](images/image-01.jpg)\n\n".into())];
        let markdown = MarkdownRenderer::new(RenderOptions::default()).render(&metadata, &blocks);
        assert_eq!(markdown, "# T\n\n![Image](images/image-01.jpg)\n");
    }
}

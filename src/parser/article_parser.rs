//! Article parser: locates the content root and drives extraction.

use std::path::Path;

use crate::detect::{detect_input_format, InputFormat};
use crate::dom::{self, Node};
use crate::error::{Error, Result};
use crate::model::Article;

use super::blocks::parse_blocks;
use super::context::ParseContext;
use super::metadata::extract_metadata;
use super::options::ParseOptions;

/// `data-testid` of the rich-text article view.
pub const RICH_TEXT_TEST_ID: &str = "twitterArticleRichTextView";

const MISSING_ARTICLE: &str = "Could not find article content. Open an X article page first.";
const MISSING_CONTENTS: &str = "Found article container but missing rich text contents.";

/// Long-form article parser.
///
/// One call to [`ArticleParser::parse`] is one conversion run with its own
/// image registry.
#[derive(Debug, Clone, Default)]
pub struct ArticleParser {
    options: ParseOptions,
}

impl ArticleParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a file, detecting HTML or CDP JSON from its content.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Article> {
        let content = std::fs::read_to_string(path.as_ref())?;
        self.parse_str(&content)
    }

    /// Parse HTML or CDP JSON text.
    pub fn parse_str(&self, content: &str) -> Result<Article> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let root = match detect_input_format(content) {
            InputFormat::Html => dom::parse_html(content),
            InputFormat::CdpJson => dom::parse_cdp_json(content)?,
        };
        self.parse(&root)
    }

    /// Parse an already-built tree.
    pub fn parse(&self, root: &Node) -> Result<Article> {
        let rich_root = root
            .find_self_or_first(|n| n.has_test_id(RICH_TEXT_TEST_ID))
            .ok_or_else(|| Error::missing_landmark(MISSING_ARTICLE))?;

        let content_root = rich_root
            .find_first(|n| n.is_tag("div") && n.attr("data-contents") == Some("true"))
            .ok_or_else(|| Error::missing_landmark(MISSING_CONTENTS))?;

        let mut ctx = ParseContext::new();
        let metadata = extract_metadata(root, self.options.page_url());
        let blocks = parse_blocks(content_root, &mut ctx);

        log::info!(
            "Parsed {} blocks, {} images ({} dropped)",
            blocks.len(),
            ctx.registry.len(),
            ctx.stats.dropped_block_count
        );

        Ok(Article {
            metadata,
            blocks,
            images: ctx.registry.into_images(),
            stats: ctx.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentBlock;

    fn article_tree(contents: Node) -> Node {
        Node::document().with_child(
            Node::element_with_attrs("div", &[("data-testid", "twitterArticleRichTextView")])
                .with_child(Node::element("div").with_child(contents)),
        )
    }

    #[test]
    fn test_missing_rich_text_view() {
        let err = ArticleParser::new().parse(&Node::document()).unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
        assert!(err.to_string().starts_with("Could not find article content"));
    }

    #[test]
    fn test_missing_contents() {
        let root = article_tree(Node::element("div"));
        let err = ArticleParser::new().parse(&root).unwrap_err();
        assert_eq!(err.to_string(), MISSING_CONTENTS);
    }

    #[test]
    fn test_parse_tree() {
        let contents = Node::element_with_attrs("div", &[("data-contents", "true")])
            .with_child(
                Node::element_with_attrs("div", &[("class", "longform-unstyled")])
                    .with_text("Body ")
                    .with_child(Node::element_with_attrs(
                        "img",
                        &[("src", "https://pbs.twimg.com/media/A?format=png&name=small")],
                    )),
            )
            .with_child(Node::element("section").with_child(Node::element_with_attrs(
                "img",
                &[("src", "https://pbs.twimg.com/media/A?format=png&name=large")],
            )));

        let parser = ArticleParser::with_options(ParseOptions::new().with_page_url("/i/article/1"));
        let article = parser.parse(&article_tree(contents)).unwrap();

        assert_eq!(
            article.blocks,
            vec![
                ContentBlock::Paragraph("Body ![Image](images/image-01.png)".into()),
                ContentBlock::ImageGroup("![Image](images/image-01.png)".into()),
            ]
        );
        assert_eq!(article.images.len(), 1);
        assert_eq!(article.metadata.source_url, "https://x.com/i/article/1");
        assert_eq!(article.stats.block_count(), 2);
    }

    #[test]
    fn test_parse_str_html() {
        let html = r#"<div data-testid="twitterArticleRichTextView"><div data-contents="true">
            <div class="longform-unstyled"><span style="font-weight: 700">Hi</span></div>
        </div></div>"#;
        let article = ArticleParser::new().parse_str(html).unwrap();
        assert_eq!(article.blocks, vec![ContentBlock::Paragraph("**Hi**".into())]);
    }

    #[test]
    fn test_parse_file_cdp_with_bom() {
        let snapshot = r#"{"root": {"nodeType": 9, "children": [
            {"nodeType": 1, "nodeName": "DIV", "attributes": ["data-testid", "twitterArticleRichTextView"], "children": [
                {"nodeType": 1, "nodeName": "DIV", "attributes": ["data-contents", "true"], "children": [
                    {"nodeType": 1, "nodeName": "DIV", "attributes": ["class", "longform-unstyled"], "children": [
                        {"nodeType": 3, "nodeValue": "Hi"}
                    ]}
                ]}
            ]}
        ]}}"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, format!("\u{feff}{}", snapshot)).unwrap();

        let article = ArticleParser::new().parse_file(&path).unwrap();
        assert_eq!(article.blocks, vec![ContentBlock::Paragraph("Hi".into())]);
    }
}

//! Block classifier: turns the direct children of the content root into
//! [`ContentBlock`]s.

use std::collections::HashSet;

use super::context::ParseContext;
use super::inline::{image_reference, render_children};
use super::text::clean_text;
use super::urls::{canonicalize_image_url, resolve_url};
use crate::dom::Node;
use crate::model::ContentBlock;

/// Class marking a plain paragraph block.
pub const PARAGRAPH_CLASS: &str = "longform-unstyled";

/// Class marking a blockquote block.
pub const BLOCKQUOTE_CLASS: &str = "longform-blockquote";

/// Class marking a section heading.
pub const HEADING_CLASS: &str = "longform-header-two";

/// Shape of a content-root child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    BlockQuote,
    ImageSection,
    Heading,
    /// Matches no known shape and is dropped
    Unknown,
}

/// Classify one direct child of the content root.
///
/// The checks run in priority order; the first match wins.
pub fn classify(node: &Node) -> BlockKind {
    if !node.is_element() {
        return BlockKind::Unknown;
    }
    if node.has_class(PARAGRAPH_CLASS) {
        BlockKind::Paragraph
    } else if node.is_tag("blockquote") && node.has_class(BLOCKQUOTE_CLASS) {
        BlockKind::BlockQuote
    } else if node.is_tag("section") {
        BlockKind::ImageSection
    } else if node.find_first(is_heading_marker).is_some() {
        BlockKind::Heading
    } else {
        BlockKind::Unknown
    }
}

fn is_heading_marker(node: &Node) -> bool {
    node.is_tag("h2") && node.has_class(HEADING_CLASS)
}

/// Parse every direct child of `content_root` into blocks, in document order.
pub fn parse_blocks(content_root: &Node, ctx: &mut ParseContext) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();

    for child in content_root.children() {
        let kind = classify(child);
        let block = match kind {
            BlockKind::Paragraph => parse_paragraph(child, ctx),
            BlockKind::BlockQuote => parse_block_quote(child, ctx),
            BlockKind::ImageSection => parse_image_section(child, ctx),
            BlockKind::Heading => parse_heading(child),
            BlockKind::Unknown => None,
        };

        match block {
            Some(block) => {
                record(&block, ctx);
                blocks.push(block);
            }
            None => {
                if child.is_element() {
                    log::debug!("Dropped <{}> block ({:?})", child.tag_name(), kind);
                    ctx.stats.add_dropped_block();
                }
            }
        }
    }

    blocks
}

fn record(block: &ContentBlock, ctx: &mut ParseContext) {
    match block {
        ContentBlock::Paragraph(text) => {
            ctx.stats.add_paragraph();
            ctx.stats.count_text(text);
        }
        ContentBlock::Heading(text) => {
            ctx.stats.add_heading();
            ctx.stats.count_text(text);
        }
        ContentBlock::BlockQuote(lines) => {
            ctx.stats.add_block_quote();
            for line in lines {
                ctx.stats.count_text(line);
            }
        }
        ContentBlock::ImageGroup(_) => ctx.stats.add_image_group(),
    }
}

/// Render a paragraph block; `None` when it cleans to nothing.
pub fn parse_paragraph(node: &Node, ctx: &mut ParseContext) -> Option<ContentBlock> {
    let text = clean_text(&render_children(node, ctx));
    if text.is_empty() {
        None
    } else {
        Some(ContentBlock::Paragraph(text))
    }
}

/// Render a blockquote block.
///
/// Direct `div` children each become one quoted line; without any, the
/// whole element is a single line.
pub fn parse_block_quote(node: &Node, ctx: &mut ParseContext) -> Option<ContentBlock> {
    let divs: Vec<&Node> = node.element_children().filter(|c| c.is_tag("div")).collect();

    let lines: Vec<String> = if divs.is_empty() {
        vec![clean_text(&render_children(node, ctx))]
    } else {
        divs.into_iter()
            .map(|div| clean_text(&render_children(div, ctx)))
            .collect()
    };

    let lines: Vec<String> = lines.into_iter().filter(|l| !l.is_empty()).collect();
    if lines.is_empty() {
        None
    } else {
        Some(ContentBlock::BlockQuote(lines))
    }
}

/// Render an image section as a group of image references.
pub fn parse_image_section(node: &Node, ctx: &mut ParseContext) -> Option<ContentBlock> {
    let mut seen = HashSet::new();
    let mut parts = Vec::new();

    for img in node.find_all(|n| n.is_tag("img") && n.has_attr("src")) {
        let src = img.attr("src").unwrap_or_default();
        if src.is_empty() {
            continue;
        }
        if !seen.insert(canonicalize_image_url(&resolve_url(src))) {
            continue;
        }
        if let Some(markdown) = image_reference(img, ctx) {
            parts.push(markdown);
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(ContentBlock::ImageGroup(parts.join("\n\n")))
    }
}

/// Extract a heading's text.
///
/// The block itself is used when it is the heading element, otherwise its
/// first heading descendant.
pub fn parse_heading(node: &Node) -> Option<ContentBlock> {
    let heading = node.find_self_or_first(is_heading_marker)?;
    let text = clean_text(&heading.text_content());
    if text.is_empty() {
        None
    } else {
        Some(ContentBlock::Heading(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> Node {
        Node::element_with_attrs("div", &[("class", "longform-unstyled")])
            .with_child(Node::element("span").with_text(text))
    }

    fn heading(text: &str) -> Node {
        Node::element("div").with_child(
            Node::element_with_attrs("h2", &[("class", "longform-header-two")]).with_text(text),
        )
    }

    fn img(src: &str) -> Node {
        Node::element_with_attrs("img", &[("src", src)])
    }

    #[test]
    fn test_classify_priority() {
        let both = Node::element_with_attrs("section", &[("class", "longform-unstyled")]);
        assert_eq!(classify(&both), BlockKind::Paragraph);

        let plain_quote = Node::element("blockquote");
        assert_eq!(classify(&plain_quote), BlockKind::Unknown);

        let quote = Node::element_with_attrs("blockquote", &[("class", "longform-blockquote")]);
        assert_eq!(classify(&quote), BlockKind::BlockQuote);

        assert_eq!(classify(&Node::element("section")), BlockKind::ImageSection);
        assert_eq!(classify(&heading("H")), BlockKind::Heading);
        assert_eq!(classify(&Node::text("loose")), BlockKind::Unknown);
    }

    #[test]
    fn test_bare_heading_element_is_not_a_heading_block() {
        let bare = Node::element_with_attrs("h2", &[("class", "longform-header-two")]).with_text("H");
        assert_eq!(classify(&bare), BlockKind::Unknown);
    }

    #[test]
    fn test_parse_blocks_in_order() {
        let root = Node::element("div")
            .with_child(heading(" Intro "))
            .with_child(paragraph("Hello\u{a0}\u{a0}world"))
            .with_child(Node::element("div").with_text("dropped"))
            .with_child(paragraph("   "));

        let mut ctx = ParseContext::new();
        let blocks = parse_blocks(&root, &mut ctx);
        assert_eq!(
            blocks,
            vec![
                ContentBlock::Heading("Intro".into()),
                ContentBlock::Paragraph("Hello world".into()),
            ]
        );
        assert_eq!(ctx.stats.dropped_block_count, 2);
        assert_eq!(ctx.stats.word_count, 3);
    }

    #[test]
    fn test_heading_uses_text_only() {
        let node = Node::element("div").with_child(
            Node::element_with_attrs("h2", &[("class", "longform-header-two")])
                .with_child(Node::element_with_attrs("span", &[("style", "font-weight:bold")]).with_text("Big")),
        );
        assert_eq!(parse_heading(&node), Some(ContentBlock::Heading("Big".into())));

        let empty = heading("  ");
        assert_eq!(parse_heading(&empty), None);
    }

    #[test]
    fn test_block_quote_lines() {
        let mut ctx = ParseContext::new();
        let quote = Node::element_with_attrs("blockquote", &[("class", "longform-blockquote")])
            .with_child(Node::element("div").with_text(" first "))
            .with_child(Node::element("div").with_text(""))
            .with_child(Node::element("div").with_text("second"));
        assert_eq!(
            parse_block_quote(&quote, &mut ctx),
            Some(ContentBlock::BlockQuote(vec!["first".into(), "second".into()]))
        );

        let whole = Node::element_with_attrs("blockquote", &[("class", "longform-blockquote")])
            .with_child(Node::element("span").with_text("only line"));
        assert_eq!(
            parse_block_quote(&whole, &mut ctx),
            Some(ContentBlock::BlockQuote(vec!["only line".into()]))
        );

        let empty = Node::element_with_attrs("blockquote", &[("class", "longform-blockquote")]);
        assert_eq!(parse_block_quote(&empty, &mut ctx), None);
    }

    #[test]
    fn test_image_section_dedups_locally() {
        let mut ctx = ParseContext::new();
        let section = Node::element("section")
            .with_child(img("https://pbs.twimg.com/media/A?format=jpg&name=small"))
            .with_child(Node::element("div").with_child(img(
                "https://pbs.twimg.com/media/A?format=jpg&name=large",
            )))
            .with_child(img(""))
            .with_child(Node::element_with_attrs(
                "img",
                &[("src", "https://pbs.twimg.com/media/B?format=png"), ("alt", "Diagram")],
            ));

        assert_eq!(
            parse_image_section(&section, &mut ctx),
            Some(ContentBlock::ImageGroup(
                "![Image](images/image-01.jpg)\n\n![Diagram](images/image-02.png)".into()
            ))
        );
        assert_eq!(ctx.registry.len(), 2);

        // Seen in an earlier block: reused name, still emitted here.
        let later = Node::element("section")
            .with_child(img("https://pbs.twimg.com/media/A?format=jpg&name=orig"));
        assert_eq!(
            parse_image_section(&later, &mut ctx),
            Some(ContentBlock::ImageGroup("![Image](images/image-01.jpg)".into()))
        );
        assert_eq!(parse_image_section(&Node::element("section"), &mut ctx), None);
    }

    #[test]
    fn test_nested_blocks_are_flattened() {
        let mut ctx = ParseContext::new();
        let node = Node::element_with_attrs("div", &[("class", "longform-unstyled")])
            .with_text("Outer ")
            .with_child(paragraph("inner"));
        assert_eq!(
            parse_paragraph(&node, &mut ctx),
            Some(ContentBlock::Paragraph("Outer inner".into()))
        );
    }
}

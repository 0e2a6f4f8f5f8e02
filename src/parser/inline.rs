//! Inline renderer: converts an inline subtree into Markdown text.

use once_cell::sync::Lazy;
use regex::Regex;

use super::context::ParseContext;
use super::text::clean_attr;
use super::urls::resolve_url;
use crate::dom::{Node, NodeKind};
use crate::model::image_markdown;

/// Alt text used when an image has none.
pub const DEFAULT_ALT: &str = "Image";

static BOLD_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"font-weight\s*:\s*(bold|[6-9]00)").unwrap());
static ITALIC_STYLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"font-style\s*:\s*italic").unwrap());

/// Render a node and its subtree.
pub fn render_inline(node: &Node, ctx: &mut ParseContext) -> String {
    match node.kind() {
        NodeKind::Text => node.value().to_string(),
        NodeKind::Element => render_element(node, ctx),
        NodeKind::Document => render_children(node, ctx),
        NodeKind::Comment => String::new(),
    }
}

/// Render the children of a node, concatenated.
pub fn render_children(node: &Node, ctx: &mut ParseContext) -> String {
    let mut out = String::new();
    for child in node.children() {
        out.push_str(&render_inline(child, ctx));
    }
    out
}

fn render_element(node: &Node, ctx: &mut ParseContext) -> String {
    match node.tag_name() {
        "br" => "\n".to_string(),
        "img" => render_image(node, ctx),
        "a" => render_link(node, ctx),
        "span" => {
            let content = render_children(node, ctx);
            apply_inline_style(&content, node.attr("style").unwrap_or_default())
        }
        _ => render_children(node, ctx),
    }
}

/// Register an `img` element and emit its Markdown reference.
///
/// Returns `None` when the element has no usable source.
pub fn image_reference(node: &Node, ctx: &mut ParseContext) -> Option<String> {
    let src = node.attr("src").filter(|src| !src.is_empty())?;
    let alt = image_alt(node);
    let filename = ctx.register_image(src);
    Some(image_markdown(&alt, &filename))
}

/// Cleaned alt text, defaulting to [`DEFAULT_ALT`].
pub fn image_alt(node: &Node) -> String {
    let alt = clean_attr(node.attr("alt"));
    if alt.is_empty() {
        DEFAULT_ALT.to_string()
    } else {
        alt
    }
}

fn render_image(node: &Node, ctx: &mut ParseContext) -> String {
    match image_reference(node, ctx) {
        Some(markdown) => {
            ctx.stats.add_inline_image();
            markdown
        }
        None => String::new(),
    }
}

fn render_link(node: &Node, ctx: &mut ParseContext) -> String {
    let href = resolve_url(node.attr("href").unwrap_or_default());
    let label = super::text::clean_text(&render_children(node, ctx));

    if label.is_empty() {
        return href;
    }
    if href.is_empty() {
        return label;
    }
    ctx.stats.add_link();
    format!("[{}]({})", label, href)
}

/// Wrap text in emphasis markers according to an inline `style` declaration.
///
/// Bold is `font-weight: bold` or a numeric weight of 600-900; italic is
/// `font-style: italic`. Matching is case-insensitive and substring-based.
pub fn apply_inline_style(text: &str, style: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let style = style.to_lowercase();
    let bold = BOLD_STYLE.is_match(&style);
    let italic = ITALIC_STYLE.is_match(&style);

    match (bold, italic) {
        (true, true) => format!("***{}***", text),
        (true, false) => format!("**{}**", text),
        (false, true) => format!("*{}*", text),
        (false, false) => text.to_string(),
    }
}

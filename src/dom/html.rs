//! HTML adapter.
//!
//! Parses an HTML string with `scraper` (html5ever) and converts the result
//! into the owned [`Node`] tree. Entities are decoded by the HTML parser.

use scraper::{ElementRef, Html, Node as ScraperNode};

use super::Node;

/// Parse an HTML document (or a saved page fragment) into a [`Node`] tree.
///
/// The returned node is a document root whose single child is the `html`
/// element produced by the HTML5 tree builder.
///
/// # Example
///
/// ```rust
/// use xarticle::dom::parse_html;
///
/// let root = parse_html("<p class=\"longform-unstyled\">Hi</p>");
/// let p = root.find_first(|n| n.is_tag("p")).unwrap();
/// assert_eq!(p.text_content(), "Hi");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_document(html);
    Node::document().with_child(scraper_to_node(document.root_element()))
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();
    let mut node = Node::element_with_attrs(element.value().name(), &attrs);

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}

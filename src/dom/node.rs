//! Minimal owned DOM node shared by every host adapter.
//!
//! The conversion engine only ever sees this structure. Host representations
//! (an HTML document parsed by `scraper`, a CDP `DOM.Node` snapshot taken in a
//! browser) are converted into it once, up front.

use serde::{Deserialize, Serialize};

/// Kind of a DOM node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Element node
    Element,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Document or document fragment root
    Document,
}

/// A node of the input tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    kind: NodeKind,

    /// Lower-case tag name for elements, empty otherwise
    tag_name: String,

    /// Attributes in source order
    attributes: Vec<(String, String)>,

    /// Text for text and comment nodes
    text: String,

    children: Vec<Node>,
}

impl Node {
    /// Create an element node.
    pub fn element(tag_name: &str) -> Self {
        Self {
            kind: NodeKind::Element,
            tag_name: tag_name.to_ascii_lowercase(),
            attributes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Create an element node with attributes.
    pub fn element_with_attrs(tag_name: &str, attrs: &[(&str, &str)]) -> Self {
        let mut node = Self::element(tag_name);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Create a text node.
    pub fn text(content: &str) -> Self {
        Self {
            kind: NodeKind::Text,
            tag_name: String::new(),
            attributes: Vec::new(),
            text: content.to_string(),
            children: Vec::new(),
        }
    }

    /// Create a comment node.
    pub fn comment(content: &str) -> Self {
        Self {
            kind: NodeKind::Comment,
            text: content.to_string(),
            ..Self::text("")
        }
    }

    /// Create a document root.
    pub fn document() -> Self {
        Self {
            kind: NodeKind::Document,
            ..Self::text("")
        }
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style text child append.
    pub fn with_text(self, content: &str) -> Self {
        self.with_child(Node::text(content))
    }

    /// Append a child node.
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Set an attribute, replacing an existing value with the same name.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name, value.to_string())),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Lower-case tag name; empty for non-element nodes.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Check the tag name (case-insensitive).
    pub fn is_tag(&self, tag: &str) -> bool {
        self.is_element() && self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Raw text of a text or comment node.
    pub fn value(&self) -> &str {
        &self.text
    }

    /// Get an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check if an attribute exists (even with an empty value).
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Check whether the whitespace-separated `class` list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|value| value.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Check the `data-testid` attribute.
    pub fn has_test_id(&self, test_id: &str) -> bool {
        self.attr("data-testid") == Some(test_id)
    }

    /// All attributes in source order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Direct children.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct element children.
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|n| n.is_element())
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        match self.kind {
            NodeKind::Text => self.text.clone(),
            NodeKind::Comment => String::new(),
            _ => {
                let mut out = String::new();
                self.collect_text(&mut out);
                out
            }
        }
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child.kind {
                NodeKind::Text => out.push_str(&child.text),
                NodeKind::Comment => {}
                _ => child.collect_text(out),
            }
        }
    }

    /// Pre-order iterator over all descendants, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First descendant element matching `pred`.
    pub fn find_first<P>(&self, mut pred: P) -> Option<&Node>
    where
        P: FnMut(&Node) -> bool,
    {
        self.descendants().find(|n| n.is_element() && pred(n))
    }

    /// All descendant elements matching `pred`, in document order.
    pub fn find_all<P>(&self, mut pred: P) -> Vec<&Node>
    where
        P: FnMut(&Node) -> bool,
    {
        self.descendants()
            .filter(|n| n.is_element() && pred(n))
            .collect()
    }

    /// `self` if it matches, otherwise the first matching descendant.
    pub fn find_self_or_first<P>(&self, mut pred: P) -> Option<&Node>
    where
        P: FnMut(&Node) -> bool,
    {
        if self.is_element() && pred(self) {
            return Some(self);
        }
        self.find_first(pred)
    }
}

/// Pre-order descendant iterator.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

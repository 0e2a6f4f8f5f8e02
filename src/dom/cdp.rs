//! Chrome DevTools Protocol snapshot adapter.
//!
//! Accepts the JSON form of a CDP `DOM.Node` tree, as produced by
//! `DOM.getDocument { depth: -1 }` in a live browser tab, either as a bare
//! node or wrapped in the `{"root": ...}` envelope of the command result.

use serde::Deserialize;

use super::Node;
use crate::error::{Error, Result};

/// DOM `nodeType` values understood by the adapter.
const ELEMENT_NODE: u32 = 1;
const TEXT_NODE: u32 = 3;
const CDATA_SECTION_NODE: u32 = 4;
const COMMENT_NODE: u32 = 8;
const DOCUMENT_NODE: u32 = 9;
const DOCUMENT_FRAGMENT_NODE: u32 = 11;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdpNode {
    node_type: u32,
    #[serde(default)]
    node_name: String,
    #[serde(default)]
    node_value: Option<String>,
    /// Flat `[name, value, name, value, ...]` list
    #[serde(default)]
    attributes: Vec<String>,
    #[serde(default)]
    children: Vec<CdpNode>,
    #[serde(default)]
    shadow_roots: Vec<CdpNode>,
    /// Frame document of an `iframe`
    #[serde(default)]
    content_document: Option<Box<CdpNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Envelope { root: CdpNode },
    Bare(CdpNode),
}

/// Parse a CDP `DOM.Node` JSON snapshot into a [`Node`] tree.
pub fn parse_cdp_json(json: &str) -> Result<Node> {
    let json = json.strip_prefix('\u{feff}').unwrap_or(json);
    let snapshot: Snapshot = serde_json::from_str(json)
        .map_err(|e| Error::InvalidInput(format!("not a CDP DOM snapshot: {}", e)))?;

    let root = match snapshot {
        Snapshot::Envelope { root } | Snapshot::Bare(root) => root,
    };

    convert(&root).ok_or_else(|| {
        Error::InvalidInput(format!(
            "unsupported CDP root node type {}",
            root.node_type
        ))
    })
}

fn convert(cdp: &CdpNode) -> Option<Node> {
    let mut node = match cdp.node_type {
        ELEMENT_NODE => {
            let mut element = Node::element(&cdp.node_name);
            for pair in cdp.attributes.chunks_exact(2) {
                element.set_attr(&pair[0], &pair[1]);
            }
            element
        }
        TEXT_NODE | CDATA_SECTION_NODE => {
            return Some(Node::text(cdp.node_value.as_deref().unwrap_or_default()));
        }
        COMMENT_NODE => {
            return Some(Node::comment(cdp.node_value.as_deref().unwrap_or_default()));
        }
        DOCUMENT_NODE | DOCUMENT_FRAGMENT_NODE => Node::document(),
        // doctype, processing instructions
        _ => return None,
    };

    let subtrees = cdp
        .shadow_roots
        .iter()
        .chain(cdp.content_document.as_deref())
        .chain(&cdp.children);
    for child in subtrees {
        if let Some(converted) = convert(child) {
            node.add_child(converted);
        }
    }

    Some(node)
}

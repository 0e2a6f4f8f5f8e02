//! Input tree representation.
//!
//! The engine is written once against [`Node`]; each host representation
//! gets a thin adapter that converts into it.

pub mod cdp;
pub mod html;
mod node;

pub use cdp::parse_cdp_json;
pub use html::parse_html;
pub use node::{Descendants, Node, NodeKind};

//! Article model types.
//!
//! This module defines the intermediate representation produced by the
//! parser and consumed by the Markdown assembler and the export layer.

mod article;
mod block;
mod image;
mod metadata;
mod payload;
mod stats;

pub use article::Article;
pub use block::ContentBlock;
pub use image::{image_markdown, markdown_path, ImageRef, IMAGE_DIR};
pub use metadata::DocumentMetadata;
pub use payload::ExportPayload;
pub use stats::ExtractionStats;

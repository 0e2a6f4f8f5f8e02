//! Conversion engine: URL helpers, image registry, inline and block
//! rendering, metadata extraction.

mod article_parser;
pub mod blocks;
mod context;
pub mod inline;
pub mod metadata;
mod options;
mod registry;
pub mod text;
pub mod urls;

pub use article_parser::{ArticleParser, RICH_TEXT_TEST_ID};
pub use blocks::{classify, BlockKind};
pub use context::ParseContext;
pub use inline::{apply_inline_style, render_inline};
pub use metadata::extract_metadata;
pub use options::ParseOptions;
pub use registry::ImageRegistry;
pub use text::clean_text;
pub use urls::{canonicalize_image_url, infer_extension, resolve_url};

//! # xarticle
//!
//! Export X (Twitter) long-form articles to self-contained Markdown with
//! downloaded images.
//!
//! The input is either a saved HTML page or a Chrome DevTools Protocol DOM
//! snapshot. The conversion engine reads the article's rich-text view,
//! renders each block to Markdown, assigns every distinct image a stable
//! file name, and hands an [`ExportPayload`] to the persistence layer, which
//! downloads images one at a time with a throttled, fallback-aware fetcher.
//!
//! ## Quick Start
//!
//! ```no_run
//! use xarticle::{parse_file, RenderOptions};
//!
//! fn main() -> xarticle::Result<()> {
//!     let article = parse_file("whole_article.html")?;
//!
//!     let markdown = article.to_markdown(&RenderOptions::default());
//!     println!("{}", markdown);
//!     println!("{} images to download", article.image_count());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two host trees**: HTML via `scraper`, CDP `DOM.Node` JSON snapshots
//! - **Stable image names**: canonical-URL dedup, `image-01.jpg`, `image-02.png`, ...
//! - **Polite downloads**: sequential, base delay plus jitter, primary/fallback URL
//! - **`http` feature** (default): reqwest-backed image source

pub mod detect;
pub mod dom;
pub mod error;
pub mod export;
pub mod fetch;
pub mod model;
pub mod parser;
pub mod render;
pub mod settings;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use export::{ExportReport, ExportSink, Exporter, FolderLayout, FsExporter};
pub use fetch::{FetchError, ImageFetcher, ImageSink, ImageSource, Sleeper, Throttle, TokioSleeper};
pub use model::{Article, ContentBlock, DocumentMetadata, ExportPayload, ExtractionStats, ImageRef};
pub use parser::{ArticleParser, ImageRegistry, ParseContext, ParseOptions};
pub use render::{JsonFormat, RenderOptions};
pub use settings::Settings;

#[cfg(feature = "http")]
pub use fetch::HttpImageSource;

use std::path::Path;

/// Parse an HTML page or CDP snapshot file.
///
/// # Example
///
/// ```no_run
/// use xarticle::parse_file;
///
/// let article = parse_file("whole_article.html").unwrap();
/// println!("Blocks: {}", article.blocks.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Article> {
    ArticleParser::new().parse_file(path)
}

/// Parse a file with custom options.
///
/// # Example
///
/// ```no_run
/// use xarticle::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().with_page_url("https://x.com/i/article/1");
/// let article = parse_file_with_options("snapshot.json", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Article> {
    ArticleParser::with_options(options).parse_file(path)
}

/// Parse HTML or CDP JSON text, detecting which one it is.
pub fn parse_str(content: &str) -> Result<Article> {
    ArticleParser::new().parse_str(content)
}

/// Parse HTML text.
pub fn parse_html(html: &str) -> Result<Article> {
    ArticleParser::new().parse(&dom::parse_html(html))
}

/// Convert a file to Markdown with default options.
///
/// # Example
///
/// ```no_run
/// let markdown = xarticle::to_markdown("whole_article.html").unwrap();
/// std::fs::write("article.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let article = parse_file(path)?;
    Ok(article.to_markdown(&RenderOptions::default()))
}

/// Convert a file to its export payload JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let article = parse_file(path)?;
    render::to_json(&article.to_payload(&RenderOptions::default()), format)
}

/// Builder for converting and exporting an article.
///
/// # Example
///
/// ```no_run
/// use xarticle::XArticle;
///
/// let payload = XArticle::new()
///     .with_page_url("https://x.com/i/article/1")
///     .parse("whole_article.html")?
///     .to_payload();
/// # Ok::<(), xarticle::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct XArticle {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl XArticle {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page address used as the last source-URL fallback.
    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.parse_options = self.parse_options.with_page_url(url);
        self
    }

    /// Set the title used when the page has none.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_default_title(title);
        self
    }

    /// Enable or disable the byline section.
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.render_options = self.render_options.with_metadata(include);
        self
    }

    /// Parse a file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<XArticleResult> {
        let article = ArticleParser::with_options(self.parse_options).parse_file(path)?;
        Ok(XArticleResult {
            article,
            render_options: self.render_options,
        })
    }

    /// Parse HTML or CDP JSON text.
    pub fn parse_str(self, content: &str) -> Result<XArticleResult> {
        let article = ArticleParser::with_options(self.parse_options).parse_str(content)?;
        Ok(XArticleResult {
            article,
            render_options: self.render_options,
        })
    }
}

/// A parsed article together with its render options.
#[derive(Debug, Clone)]
pub struct XArticleResult {
    /// The parsed article
    pub article: Article,
    render_options: RenderOptions,
}

impl XArticleResult {
    /// Assemble the Markdown document.
    pub fn to_markdown(&self) -> String {
        self.article.to_markdown(&self.render_options)
    }

    /// Build the export payload.
    pub fn to_payload(&self) -> ExportPayload {
        self.article.to_payload(&self.render_options)
    }

    /// Render the export payload as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.to_payload(), format)
    }

    pub fn article(&self) -> &Article {
        &self.article
    }
}

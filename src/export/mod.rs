//! Export: persistence layout and the payload-driven export run.

pub mod fs;
pub mod layout;

pub use fs::FsExporter;
pub use layout::{
    date_prefix, folder_name, sanitize_title, today_utc, FolderLayout, DEFAULT_FOLDER_TITLE,
    MARKDOWN_FILE,
};

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::fetch::{ImageFetcher, ImageSink, ImageSource, Sleeper};
use crate::model::ExportPayload;

/// Persistence collaborator for a whole export.
#[async_trait]
pub trait ExportSink: ImageSink {
    /// Persist the Markdown document.
    async fn write_markdown(&mut self, markdown: &str) -> Result<()>;

    /// Called once before the first image is stored.
    async fn prepare_images(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Summary of a finished export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    /// Number of images written
    pub image_count: usize,

    /// Effective base delay between images, in milliseconds
    pub delay_ms: u64,
}

/// Runs an export: Markdown first, then every image in order.
pub struct Exporter<S, Z> {
    fetcher: ImageFetcher<S, Z>,
}

impl<S: ImageSource, Z: Sleeper> Exporter<S, Z> {
    pub fn new(fetcher: ImageFetcher<S, Z>) -> Self {
        Self { fetcher }
    }

    /// Export `payload` into `sink`.
    ///
    /// Nothing is rolled back on failure: the Markdown file and the images
    /// stored before a fatal fetch error stay in place.
    pub async fn run<K>(&self, payload: &ExportPayload, sink: &mut K) -> Result<ExportReport>
    where
        K: ExportSink + ?Sized,
    {
        payload.validate()?;

        sink.write_markdown(&payload.markdown).await?;
        sink.prepare_images().await?;
        let image_count = self.fetcher.fetch_all(&payload.images, sink).await?;

        Ok(ExportReport {
            image_count,
            delay_ms: self.fetcher.throttle().delay_ms(),
        })
    }
}

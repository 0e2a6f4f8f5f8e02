//! Filesystem persistence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::layout::{folder_name, sanitize_title, FolderLayout, MARKDOWN_FILE};
use super::ExportSink;
use crate::error::Result;
use crate::fetch::ImageSink;
use crate::model::{ExportPayload, ImageRef, IMAGE_DIR};

/// Writes `article.md` and `images/<filename>` under a root directory.
#[derive(Debug, Clone)]
pub struct FsExporter {
    root: PathBuf,
}

impl FsExporter {
    /// Export directly into `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Export for `payload` under `out_dir`, nesting in a dated folder when
    /// the layout asks for it.
    pub fn for_payload(
        out_dir: impl AsRef<Path>,
        payload: &ExportPayload,
        layout: FolderLayout,
        today: NaiveDate,
    ) -> Self {
        let out_dir = out_dir.as_ref();
        match layout {
            FolderLayout::Flat => Self::new(out_dir),
            FolderLayout::Dated => Self::new(out_dir.join(folder_name(payload, today))),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the Markdown file.
    pub fn markdown_path(&self) -> PathBuf {
        self.root.join(MARKDOWN_FILE)
    }

    /// Directory holding downloaded images.
    pub fn image_dir(&self) -> PathBuf {
        self.root.join(IMAGE_DIR)
    }

    /// Path an image is written to.
    pub fn image_path(&self, image: &ImageRef) -> PathBuf {
        self.image_dir().join(sanitize_title(&image.filename))
    }
}

#[async_trait]
impl ExportSink for FsExporter {
    async fn write_markdown(&mut self, markdown: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.markdown_path(), markdown).await?;
        log::debug!("Wrote {}", self.markdown_path().display());
        Ok(())
    }

    async fn prepare_images(&mut self) -> Result<()> {
        tokio::fs::create_dir_all(self.image_dir()).await?;
        Ok(())
    }
}

#[async_trait]
impl ImageSink for FsExporter {
    async fn store(&mut self, image: &ImageRef, bytes: Vec<u8>) -> Result<()> {
        let path = self.image_path(image);
        tokio::fs::write(&path, bytes).await?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}

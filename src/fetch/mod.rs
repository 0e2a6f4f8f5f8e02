//! Image fetcher: sequential, throttled downloads with primary/fallback URL
//! recovery.
//!
//! The fetcher never touches the network or the filesystem itself. Bytes come
//! from an [`ImageSource`], go to an [`ImageSink`], and pauses between images
//! go through a [`Sleeper`]:
//!
//! ```text
//! ImageRef ──► ImageSource (url, then fallbackUrl) ──► ImageSink
//!                       │
//!                   Sleeper (between images)
//! ```

#[cfg(feature = "http")]
mod http;
mod throttle;

#[cfg(feature = "http")]
pub use http::HttpImageSource;
pub use throttle::{Throttle, DEFAULT_DELAY_MS, JITTER_MS};

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::{Error, Result};
use crate::model::ImageRef;

/// Failure of a single fetch attempt.
#[derive(Error, Debug)]
pub enum FetchError {
    /// No URL to fetch from.
    #[error("missing image URL")]
    MissingUrl,

    /// The server answered with a non-success status.
    #[error("HTTP {0}")]
    Status(u16),

    /// Connection, TLS or body read failure.
    #[error("{0}")]
    Transport(String),
}

/// Where image bytes come from.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch the body at `url`.
    async fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError>;
}

/// Where image bytes go.
#[async_trait]
pub trait ImageSink: Send {
    /// Persist the bytes of one image under its file name.
    async fn store(&mut self, image: &ImageRef, bytes: Vec<u8>) -> Result<()>;
}

/// Suspends the run between images.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Downloads registered images one at a time.
pub struct ImageFetcher<S, Z> {
    source: S,
    sleeper: Z,
    throttle: Throttle,
}

impl<S: ImageSource> ImageFetcher<S, TokioSleeper> {
    /// Create a fetcher that sleeps on the tokio timer.
    pub fn new(source: S, throttle: Throttle) -> Self {
        Self::with_sleeper(source, TokioSleeper, throttle)
    }
}

impl<S: ImageSource, Z: Sleeper> ImageFetcher<S, Z> {
    /// Create a fetcher with a custom sleeper.
    pub fn with_sleeper(source: S, sleeper: Z, throttle: Throttle) -> Self {
        Self {
            source,
            sleeper,
            throttle,
        }
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Fetch every image in order and hand its bytes to `sink`.
    ///
    /// Each image is tried at its canonical URL, then at its original URL.
    /// When both fail the run stops with [`Error::ImageFetch`]; images
    /// stored before that stay in the sink. Returns the number of images
    /// stored.
    pub async fn fetch_all<K>(&self, images: &[ImageRef], sink: &mut K) -> Result<usize>
    where
        K: ImageSink + ?Sized,
    {
        for (index, image) in images.iter().enumerate() {
            let bytes = self.fetch_one(image).await?;
            log::debug!("Fetched {} ({} bytes)", image.filename, bytes.len());
            sink.store(image, bytes).await?;

            if index + 1 < images.len() {
                if let Some(delay) = self.throttle.next_delay() {
                    self.sleeper.sleep(delay).await;
                }
            }
        }

        log::info!("Fetched {} images", images.len());
        Ok(images.len())
    }

    /// Fetch one image, falling back from the canonical to the original URL.
    pub async fn fetch_one(&self, image: &ImageRef) -> Result<Vec<u8>> {
        let primary = self.attempt(&image.canonical_url).await;
        let primary_err = match primary {
            Ok(bytes) => return Ok(bytes),
            Err(err) => err,
        };

        log::warn!(
            "Primary URL for {} failed ({}), trying fallback",
            image.filename,
            primary_err
        );

        self.attempt(&image.original_url)
            .await
            .map_err(|err| Error::ImageFetch {
                filename: image.filename.clone(),
                reason: err.to_string(),
            })
    }

    async fn attempt(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
        if url.is_empty() {
            return Err(FetchError::MissingUrl);
        }
        self.source.fetch(url).await
    }
}

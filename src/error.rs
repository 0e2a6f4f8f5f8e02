//! Error types for xarticle library.

use std::io;
use thiserror::Error;

/// Result type alias for xarticle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting and exporting an article.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input or persisting output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required structural landmark is missing from the input tree.
    #[error("{0}")]
    Structure(String),

    /// The export payload is missing required fields.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Both the primary and the fallback URL failed for one image.
    #[error("Failed to download {filename}: {reason}")]
    ImageFetch {
        /// File name of the image that could not be fetched
        filename: String,
        /// Failure reported by the last attempt
        reason: String,
    },

    /// The input could not be read as any supported tree representation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Settings could not be read or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Create a structural error for a missing landmark.
    pub fn missing_landmark(message: impl Into<String>) -> Self {
        Error::Structure(message.into())
    }

    /// Check whether this error came from a failed image download.
    pub fn is_image_fetch(&self) -> bool {
        matches!(self, Error::ImageFetch { .. })
    }
}

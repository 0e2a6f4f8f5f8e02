//! Image references.

use serde::{Deserialize, Deserializer, Serialize};

/// Directory (relative to the Markdown file) holding downloaded images.
pub const IMAGE_DIR: &str = "images";

/// A registered image.
///
/// Serialized in the export payload shape `{url, fallbackUrl, filename}`;
/// the ordinal is positional and not part of the wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// 1-based registration order
    #[serde(skip)]
    pub ordinal: usize,

    /// Canonical (highest-resolution) URL, the dedup key and primary fetch URL
    #[serde(rename = "url", default, deserialize_with = "null_as_empty")]
    pub canonical_url: String,

    /// Resolved original URL, used when the canonical URL fails
    #[serde(rename = "fallbackUrl", default, deserialize_with = "null_as_empty")]
    pub original_url: String,

    /// File name inside the images directory
    #[serde(default, deserialize_with = "null_as_empty")]
    pub filename: String,
}

impl ImageRef {
    /// Create an image reference, deriving the file name from ordinal and extension.
    pub fn new(
        ordinal: usize,
        canonical_url: impl Into<String>,
        original_url: impl Into<String>,
        extension: &str,
    ) -> Self {
        Self {
            ordinal,
            canonical_url: canonical_url.into(),
            original_url: original_url.into(),
            filename: Self::filename_for(ordinal, extension),
        }
    }

    /// `image-<ordinal, zero-padded to 2 digits>.<ext>`
    pub fn filename_for(ordinal: usize, extension: &str) -> String {
        format!("image-{:02}.{}", ordinal, extension)
    }

    /// Relative path used in Markdown links.
    pub fn markdown_path(&self) -> String {
        markdown_path(&self.filename)
    }
}

/// Read a JSON `null` string field as empty.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Relative Markdown path of an image file name.
pub fn markdown_path(filename: &str) -> String {
    format!("{}/{}", IMAGE_DIR, filename)
}

/// Markdown image reference `![alt](images/<filename>)`.
pub fn image_markdown(alt: &str, filename: &str) -> String {
    format!("![{}]({})", alt, markdown_path(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_padding() {
        assert_eq!(ImageRef::filename_for(1, "jpg"), "image-01.jpg");
        assert_eq!(ImageRef::filename_for(42, "png"), "image-42.png");
        assert_eq!(ImageRef::filename_for(100, "webp"), "image-100.webp");
    }

    #[test]
    fn test_markdown() {
        let image = ImageRef::new(3, "https://a/orig", "https://a/small", "png");
        assert_eq!(image.filename, "image-03.png");
        assert_eq!(image.markdown_path(), "images/image-03.png");
        assert_eq!(image_markdown("Image", &image.filename), "![Image](images/image-03.png)");
    }

    #[test]
    fn test_wire_format() {
        let image = ImageRef::new(1, "https://p/orig", "https://p/small", "jpg");
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["url"], "https://p/orig");
        assert_eq!(json["fallbackUrl"], "https://p/small");
        assert_eq!(json["filename"], "image-01.jpg");
        assert!(json.get("ordinal").is_none());
    }
}

//! Export payload handed to the persistence layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use super::image::null_as_empty;
use super::ImageRef;
use crate::error::{Error, Result};

/// The boundary record between the conversion engine and persistence.
///
/// JSON shape: `{title, publishedAt, sourceUrl, markdown, images: [{url, fallbackUrl, filename}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    /// Article title (already defaulted when the page had none)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    /// Publication timestamp, or empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub published_at: String,

    /// Article permalink, or empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source_url: String,

    /// Complete Markdown document
    pub markdown: String,

    /// Images in registration order
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

impl ExportPayload {
    /// Parse and validate a payload from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| Error::InvalidPayload(format!("not valid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Validate and convert an already-parsed JSON value.
    pub fn from_value(mut value: Value) -> Result<Self> {
        if !value.get("markdown").is_some_and(Value::is_string) {
            return Err(Error::InvalidPayload("markdown is required.".to_string()));
        }

        // A non-array `images` field means "no images".
        if let Some(object) = value.as_object_mut() {
            if !object.get("images").map_or(true, Value::is_array) {
                object.remove("images");
            }
        }

        let mut payload: ExportPayload =
            serde_json::from_value(value).map_err(|e| Error::InvalidPayload(e.to_string()))?;
        payload.normalize_images();
        payload.validate()?;
        Ok(payload)
    }

    /// Assign positional ordinals and default file names.
    fn normalize_images(&mut self) {
        for (index, image) in self.images.iter_mut().enumerate() {
            image.ordinal = index + 1;
            if image.filename.trim().is_empty() {
                image.filename = ImageRef::filename_for(index + 1, "jpg");
            }
        }
    }

    /// Check invariants the persistence layer relies on.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for image in &self.images {
            if !seen.insert(image.filename.as_str()) {
                return Err(Error::InvalidPayload(format!(
                    "duplicate image filename {}",
                    image.filename
                )));
            }
        }
        Ok(())
    }

    /// Number of images to download.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_markdown_rejected() {
        let err = ExportPayload::from_json(r#"{"title": "T", "images": []}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidPayload(_)));
        assert_eq!(err.to_string(), "Invalid payload: markdown is required.");

        assert!(ExportPayload::from_json(r#"{"markdown": 12}"#).is_err());
        assert!(ExportPayload::from_json("not json").is_err());
    }

    #[test]
    fn test_parse_payload() {
        let payload = ExportPayload::from_json(
            r##"{
                "title": "Hello",
                "publishedAt": "2024-03-05T10:00:00.000Z",
                "sourceUrl": "https://x.com/a/status/1",
                "markdown": "# Hello\n",
                "images": [
                    {"url": "https://pbs.twimg.com/media/A?format=png&name=orig",
                     "fallbackUrl": "https://pbs.twimg.com/media/A?format=png&name=small",
                     "filename": "image-01.png"},
                    {"url": "https://pbs.twimg.com/media/B"}
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(payload.published_at, "2024-03-05T10:00:00.000Z");
        assert_eq!(payload.image_count(), 2);
        assert_eq!(payload.images[0].ordinal, 1);
        assert_eq!(payload.images[0].original_url, "https://pbs.twimg.com/media/A?format=png&name=small");
        assert_eq!(payload.images[1].filename, "image-02.jpg");
        assert_eq!(payload.images[1].original_url, "");
    }

    #[test]
    fn test_images_not_array_is_empty() {
        let payload = ExportPayload::from_json(r#"{"markdown": "", "images": "nope"}"#).unwrap();
        assert!(payload.images.is_empty());
        assert!(payload.title.is_empty());
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let payload = ExportPayload::from_json(
            r#"{"title": null, "publishedAt": null, "sourceUrl": null, "markdown": "x",
                "images": [{"url": "https://p/1", "fallbackUrl": null, "filename": null}]}"#,
        )
        .unwrap();
        assert!(payload.title.is_empty());
        assert!(payload.published_at.is_empty());
        assert!(payload.source_url.is_empty());
        assert_eq!(payload.images[0].original_url, "");
        assert_eq!(payload.images[0].filename, "image-01.jpg");

        assert!(ExportPayload::from_json(r#"{"markdown": null}"#).is_err());
    }

    #[test]
    fn test_duplicate_filenames_rejected() {
        let json = r#"{"markdown": "x", "images": [{"filename": "a.jpg"}, {"filename": "a.jpg"}]}"#;
        assert!(matches!(
            ExportPayload::from_json(json),
            Err(Error::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_serialize_camel_case() {
        let payload = ExportPayload {
            title: "T".into(),
            published_at: "2024".into(),
            markdown: "# T\n".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["publishedAt"], "2024");
        assert_eq!(json["sourceUrl"], "");
        assert!(json["images"].as_array().unwrap().is_empty());
    }
}

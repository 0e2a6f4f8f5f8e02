//! JSON rendering of the export payload.

use crate::error::{Error, Result};
use crate::model::ExportPayload;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an export payload to JSON.
pub fn to_json(payload: &ExportPayload, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(payload),
        JsonFormat::Compact => serde_json::to_string(payload),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageRef;

    fn payload() -> ExportPayload {
        ExportPayload {
            title: "Test".to_string(),
            published_at: "2024-03-05T10:00:00Z".to_string(),
            markdown: "# Test\n".to_string(),
            images: vec![ImageRef::new(1, "https://p/orig", "https://p/small", "jpg")],
            ..Default::default()
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&payload(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"publishedAt\""));
        assert!(json.contains("\"fallbackUrl\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact_reparses() {
        let json = to_json(&payload(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let parsed = ExportPayload::from_json(&json).unwrap();
        assert_eq!(parsed.images[0].filename, "image-01.jpg");
        assert_eq!(parsed.images[0].ordinal, 1);
    }
}

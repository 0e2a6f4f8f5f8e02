//! URL resolution, canonicalization and extension inference.

use url::Url;

/// Origin that site-relative links are resolved against.
pub const PLATFORM_ORIGIN: &str = "https://x.com";

/// Host serving article media.
pub const MEDIA_HOST: &str = "pbs.twimg.com";

/// Query parameter selecting the media size variant.
const VARIANT_PARAM: &str = "name";

/// Variant value requesting the original upload.
const ORIGINAL_VARIANT: &str = "orig";

/// Extension used when none can be inferred.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Resolve a link or image source to an absolute URL.
///
/// Absolute `http(s)` URLs pass through, `/path` is resolved against
/// [`PLATFORM_ORIGIN`], anything else is returned unchanged.
pub fn resolve_url(href: &str) -> String {
    if href.is_empty() {
        return String::new();
    }
    if has_http_scheme(href) {
        return href.to_string();
    }
    if href.starts_with('/') {
        return format!("{}{}", PLATFORM_ORIGIN, href);
    }
    href.to_string()
}

fn has_http_scheme(href: &str) -> bool {
    let lower = href.get(..8).unwrap_or(href).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Canonical form of an image URL, used as its identity.
///
/// Media-host URLs carrying a size variant are rewritten to request the
/// original resolution. Input that does not parse is returned unchanged.
pub fn canonicalize_image_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(&resolve_url(raw)) else {
        return raw.to_string();
    };

    let is_media_host = url.host_str().is_some_and(|host| host.contains(MEDIA_HOST));
    let has_variant = url.query_pairs().any(|(key, _)| key == VARIANT_PARAM);

    if is_media_host && has_variant {
        let mut replaced = false;
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter_map(|(key, value)| {
                if key != VARIANT_PARAM {
                    return Some((key.into_owned(), value.into_owned()));
                }
                if replaced {
                    return None;
                }
                replaced = true;
                Some((key.into_owned(), ORIGINAL_VARIANT.to_string()))
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}

/// Infer an image file extension from its URL.
///
/// Prefers an alphanumeric `format` query parameter, then the extension of
/// the last path segment, then [`DEFAULT_EXTENSION`].
pub fn infer_extension(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return DEFAULT_EXTENSION.to_string();
    };

    if let Some((_, format)) = parsed.query_pairs().find(|(key, _)| key == "format") {
        if is_alphanumeric(&format) {
            return format.to_ascii_lowercase();
        }
    }

    let last_segment = parsed.path().rsplit('/').next().unwrap_or_default();
    if let Some((_, ext)) = last_segment.rsplit_once('.') {
        if is_alphanumeric(ext) {
            return ext.to_ascii_lowercase();
        }
    }

    DEFAULT_EXTENSION.to_string()
}

fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

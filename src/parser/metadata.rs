//! Metadata extractor: reads the fixed page landmarks.

use super::text::clean_text;
use super::urls::resolve_url;
use crate::dom::Node;
use crate::model::DocumentMetadata;

/// `data-testid` of the article title.
pub const TITLE_TEST_ID: &str = "twitter-article-title";

/// `data-testid` of the author-info block.
pub const USER_NAME_TEST_ID: &str = "User-Name";

/// Label of the verification badge, which is not an author name.
pub const VERIFIED_LABEL: &str = "verified account";

const PERMALINK_PATTERN: &str = "/status/";
const ANALYTICS_PATTERN: &str = "/analytics";
const ARTICLE_PATTERN: &str = "/article/";

/// Read title, byline, timestamp and permalink from anywhere in the tree.
///
/// `page_url` is the last fallback for the source URL.
pub fn extract_metadata(root: &Node, page_url: &str) -> DocumentMetadata {
    let title = root
        .find_first(|n| n.has_test_id(TITLE_TEST_ID))
        .map(|n| clean_text(&n.text_content()))
        .unwrap_or_default();

    let (author, handle) = extract_byline(root);

    let published_at = root
        .find_first(|n| n.has_attr("datetime"))
        .and_then(|n| n.attr("datetime"))
        .unwrap_or_default()
        .to_string();

    DocumentMetadata {
        title,
        author,
        handle,
        published_at,
        source_url: extract_source_url(root, page_url),
    }
}

/// Author display name and `@handle` from the author-info landmark.
fn extract_byline(root: &Node) -> (String, String) {
    let Some(user) = root.find_first(|n| n.has_test_id(USER_NAME_TEST_ID)) else {
        return (String::new(), String::new());
    };

    let mut author = String::new();
    let mut handle = String::new();

    let tokens = user
        .find_all(|n| n.is_tag("span"))
        .into_iter()
        .map(|span| clean_text(&span.text_content()))
        .filter(|token| !token.is_empty());

    for token in tokens {
        if token.starts_with('@') {
            if handle.is_empty() {
                handle = token;
            }
            continue;
        }
        if author.is_empty() && !token.eq_ignore_ascii_case(VERIFIED_LABEL) {
            author = token;
        }
    }

    (author, handle)
}

fn extract_source_url(root: &Node, page_url: &str) -> String {
    let hrefs: Vec<&str> = root
        .find_all(|n| n.is_tag("a"))
        .into_iter()
        .filter_map(|a| a.attr("href"))
        .filter(|href| !href.is_empty())
        .collect();

    let href = hrefs
        .iter()
        .find(|href| href.contains(PERMALINK_PATTERN) && !href.contains(ANALYTICS_PATTERN))
        .or_else(|| hrefs.iter().find(|href| href.contains(ARTICLE_PATTERN)))
        .copied()
        .unwrap_or(page_url);

    resolve_url(href)
}

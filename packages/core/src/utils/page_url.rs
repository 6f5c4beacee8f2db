//! Page id extraction from pasted page URLs
//!
//! Operators usually paste a browser URL rather than a bare id. The patterns
//! below cover the legacy `viewpage.action?pageId=` form and the modern
//! `/spaces/<KEY>/pages/<id>/<slug>` form.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Tried in order; the first capture wins
static PAGE_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)pageId=(\d+)").unwrap(),
        Regex::new(r"(?i)/pages/(\d+)/").unwrap(),
        Regex::new(r"(?i)/pages/(\d+)$").unwrap(),
        Regex::new(r"(?i)/spaces/[^/]+/pages/(\d+)").unwrap(),
    ]
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot parse page ID from URL.")]
pub struct PageUrlError {
    pub input: String,
}

/// Extract the numeric page id from a page URL
///
/// # Examples
///
/// ```
/// use pagetree_core::utils::extract_page_id_from_url;
///
/// let url = "https://example.atlassian.net/wiki/spaces/DOC/pages/12345/Getting+Started";
/// assert_eq!(extract_page_id_from_url(url).unwrap(), "12345");
/// ```
pub fn extract_page_id_from_url(input: &str) -> Result<String, PageUrlError> {
    PAGE_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(input))
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| PageUrlError {
            input: input.to_string(),
        })
}

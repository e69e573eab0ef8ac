//! Data models shared by the scraping, output, and query stages.
//!
//! - [`SiteProfile`]: how to locate headline nodes on one site section
//! - [`HeadlineRecord`]: one normalized `{title, link}` pair pulled from a page
//!
//! A record set is just a `Vec<HeadlineRecord>` kept in document order.

use serde::{Deserialize, Serialize};

/// A (match key, selector) pair describing one supported site section.
///
/// The registry checks `match_key` as a plain substring of the requested
/// URL, so a broad key such as `cnn.com` matches every CNN section page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SiteProfile {
    /// Substring matched against the requested URL.
    pub match_key: String,
    /// CSS selector for the headline text nodes.
    pub selector: String,
}

impl SiteProfile {
    pub fn new(match_key: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            match_key: match_key.into(),
            selector: selector.into(),
        }
    }
}

/// A single headline scraped from a section page.
///
/// Field names are the on-disk keys for both the JSON and CSV encodings.
///
/// # Fields
///
/// * `title` - The headline text with surrounding whitespace trimmed
/// * `link` - Absolute URL of the story, or an empty string when the
///   headline node has no enclosing `<a>`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeadlineRecord {
    pub title: String,
    pub link: String,
}

//! Structural URL check used before any request goes out.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?(www\.)?[a-zA-Z0-9.-]+(\.[a-zA-Z]{2,})+(/.*)?$")
        .expect("URL pattern is valid")
});

/// Returns `true` when `url` looks like `[scheme://][www.]host.tld[/path]`.
///
/// The scheme is optional and limited to `http`/`https`. The host needs at
/// least one dot and a top-level label of two or more letters. Anything
/// after the first `/` following the host is accepted as-is.
pub fn is_valid_url(url: &str) -> bool {
    URL_RE.is_match(url)
}

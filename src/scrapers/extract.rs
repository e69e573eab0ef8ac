//! Turn a downloaded section page into [`HeadlineRecord`]s.
//!
//! For every node matching the site profile's selector, in document order:
//!
//! - `title` is the node's text with leading/trailing whitespace trimmed
//! - `link` is the `href` of the nearest enclosing `<a>`, or `""` if there is none
//!
//! Root-relative hrefs (`/politics/story-1`) are resolved against the page's
//! own host. Every other href, including protocol-relative (`//host/x`) and
//! malformed ones, is kept exactly as written. Nothing is de-duplicated and
//! empty titles or links are kept.

use crate::models::{HeadlineRecord, SiteProfile};
use crate::sites::SiteRegistry;
use crate::scrapers::ScrapeError;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

/// Extracts headlines using an externally owned [`SiteRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct HeadlineExtractor<'a> {
    registry: &'a SiteRegistry,
}

impl<'a> HeadlineExtractor<'a> {
    pub fn new(registry: &'a SiteRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a SiteRegistry {
        self.registry
    }

    /// Extract headlines from `page`, which was downloaded from `requested_url`.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::UnsupportedSite`] when no profile matches the URL, and
    /// [`ScrapeError::Selector`] when the matched profile's selector does not parse.
    pub fn extract(
        &self,
        page: &[u8],
        requested_url: &str,
    ) -> Result<Vec<HeadlineRecord>, ScrapeError> {
        let url = normalize_url(requested_url);
        let profile = self
            .registry
            .resolve(&url)
            .ok_or_else(|| ScrapeError::UnsupportedSite { url: url.clone() })?;
        extract_headlines(page, profile, &page_domain(&url))
    }
}

/// Prefix `https://` when the URL has no http(s) scheme.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Host (and port, if any) of a normalized URL.
///
/// The host comes from [`Url::parse`], so it is not always the literal text
/// between `//` and the next `/`: the host is lowercased, IDN hosts become
/// punycode, `user@` userinfo is dropped, and a port equal to the scheme's
/// default (`:443` for https) is omitted. Resolved links still point at the
/// same server.
///
/// Falls back to the text between `//` and the next `/` when the URL does
/// not parse.
pub fn page_domain(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        if let Some(host) = parsed.host_str() {
            return match parsed.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            };
        }
    }

    let after_scheme = url.split("//").last().unwrap_or(url);
    after_scheme.split('/').next().unwrap_or_default().to_string()
}

/// Resolve a root-relative href against `domain`; pass anything else through.
pub fn absolutize_link(href: &str, domain: &str) -> String {
    if href.starts_with('/') && !href.starts_with("//") {
        format!("https://{domain}{href}")
    } else {
        href.to_string()
    }
}

/// Select `profile.selector` in `page` and build one record per match.
#[instrument(level = "debug", skip(page, profile), fields(selector = %profile.selector, bytes = page.len()))]
pub fn extract_headlines(
    page: &[u8],
    profile: &SiteProfile,
    domain: &str,
) -> Result<Vec<HeadlineRecord>, ScrapeError> {
    let selector = Selector::parse(&profile.selector).map_err(|e| ScrapeError::Selector {
        selector: profile.selector.clone(),
        reason: e.to_string(),
    })?;

    let html = String::from_utf8_lossy(page);
    let document = Html::parse_document(&html);

    let records: Vec<HeadlineRecord> = document
        .select(&selector)
        .map(|node| HeadlineRecord {
            title: node.text().collect::<String>().trim().to_string(),
            link: enclosing_href(node)
                .map(|href| absolutize_link(href, domain))
                .unwrap_or_default(),
        })
        .collect();

    debug!(count = records.len(), "Selector matched");
    Ok(records)
}

/// `href` of the closest `<a>` strictly above `node`.
fn enclosing_href<'a>(node: ElementRef<'a>) -> Option<&'a str> {
    node.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
        .and_then(|anchor| anchor.value().attr("href"))
}

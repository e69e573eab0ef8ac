//! Headline scraping: fetch a section page and pull `{title, link}` records out of it.
//!
//! The work is split in two so the parsing half can run on fixture HTML:
//!
//! 1. **Fetching** ([`fetch`]): a [`PageFetcher`] downloads the raw page bytes.
//!    [`fetch::HttpFetcher`] is the `reqwest` implementation used by the CLI.
//! 2. **Extracting** ([`extract`]): the page is parsed with `scraper`, the
//!    site profile's selector picks the headline nodes, and each node becomes
//!    a [`HeadlineRecord`].
//!
//! # Outcomes
//!
//! [`fetch_headlines`] never panics on a bad page or a dead network. Callers
//! get one of:
//!
//! | Result | Meaning |
//! |--------|---------|
//! | `Ok(records)` (non-empty) | Headlines found |
//! | `Ok(vec![])` | Page parsed, selector matched nothing |
//! | `Err(ScrapeError::UnsupportedSite)` | No site profile for the URL |
//! | `Err(ScrapeError::InvalidUrl)` | URL failed the structural check; nothing was requested |
//! | `Err(ScrapeError::Transport / Status)` | Request failed or returned non-2xx |

pub mod extract;
pub mod fetch;

use crate::models::HeadlineRecord;
use crate::utils::truncate_for_log;
use crate::validate::is_valid_url;
use extract::normalize_url;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

pub use extract::HeadlineExtractor;
pub use fetch::{FetchConfig, HttpFetcher};

/// Why a scrape produced no records.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("website not supported for scraping: {url}")]
    UnsupportedSite { url: String },

    #[error("not a valid URL: {url}")]
    InvalidUrl { url: String },

    #[error("failed to fetch news from {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch news from {url}: HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid headline selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("fetch of {url} cancelled")]
    Cancelled { url: String },
}

impl ScrapeError {
    /// Site-profile misses are expected for arbitrary URLs; everything else
    /// points at a real problem.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ScrapeError::UnsupportedSite { .. })
    }
}

/// Source of raw page bytes.
///
/// Any transport failure or non-success status must come back as an `Err`;
/// an `Ok` body is handed straight to the extractor.
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ScrapeError>;
}

/// Fetch one section page and extract its headlines.
///
/// The URL gets an `https://` prefix when it has no scheme, is checked with
/// [`is_valid_url`], and is matched against the extractor's site registry
/// before any request is made.
///
/// # Arguments
///
/// * `fetcher` - Transport used to download the page
/// * `extractor` - Holds the site registry used for selector lookup
/// * `url` - Section page to scrape, with or without a scheme
///
/// # Returns
///
/// The page's headlines in document order (possibly empty), or the
/// [`ScrapeError`] explaining why nothing could be extracted.
#[instrument(level = "info", skip(fetcher, extractor))]
pub async fn fetch_headlines<F: PageFetcher>(
    fetcher: &F,
    extractor: &HeadlineExtractor<'_>,
    url: &str,
) -> Result<Vec<HeadlineRecord>, ScrapeError> {
    let target = normalize_url(url);
    info!(url = %target, "Fetching news");

    if !is_valid_url(&target) {
        return Err(ScrapeError::InvalidUrl { url: target });
    }

    let profile = extractor
        .registry()
        .resolve(&target)
        .ok_or_else(|| ScrapeError::UnsupportedSite {
            url: target.clone(),
        })?;

    let page = fetcher.fetch(&target).await?;
    debug!(bytes = page.len(), "Downloaded page");

    let records = extractor.extract(&page, &target)?;
    if records.is_empty() {
        debug!(
            selector = %profile.selector,
            preview = %truncate_for_log(&String::from_utf8_lossy(&page), 300),
            "Selector matched nothing"
        );
    }
    info!(count = records.len(), "Found headlines");
    Ok(records)
}

/// Race `scrape` against a cancellation signal such as `tokio::signal::ctrl_c()`.
///
/// # Arguments
///
/// * `scrape` - The in-flight [`fetch_headlines`] future
/// * `cancel` - Resolves `Ok(())` when the user asks to stop
/// * `url` - Page being fetched, reported in [`ScrapeError::Cancelled`]
///
/// # Returns
///
/// The scrape's own result, or [`ScrapeError::Cancelled`] when `cancel`
/// fires first. If `cancel` resolves to `Err` (the signal handler could not
/// be installed) that branch is disabled and the scrape runs to completion.
pub async fn with_cancellation<S, C>(
    scrape: S,
    cancel: C,
    url: &str,
) -> Result<Vec<HeadlineRecord>, ScrapeError>
where
    S: Future<Output = Result<Vec<HeadlineRecord>, ScrapeError>>,
    C: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        res = scrape => res,
        Ok(()) = cancel => {
            warn!(%url, "Fetch cancelled");
            Err(ScrapeError::Cancelled { url: url.to_string() })
        }
    }
}

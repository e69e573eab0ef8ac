//! Read saved headlines back, narrow them down, and print them.
//!
//! Only the JSON encoding can be read back; CSV output is write-only.
//!
//! Filtering never touches the loaded set. Keywords are OR'ed together and
//! matched as case-insensitive substrings of the title, then the first
//! `limit` survivors are shown in their original order.

use crate::models::HeadlineRecord;
use itertools::Itertools;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

const RULE: &str =
    "==============================================================================";
const BANNER_TITLE: &str = "                          Latest News Headlines";

/// Why a saved file could not be read back.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("the file {path} does not exist")]
    NotFound { path: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("error decoding JSON from the file {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// What to show after filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// Records to print, already truncated to the limit.
    Headlines(Vec<HeadlineRecord>),
    /// Keywords were given and no title matched any of them.
    NoMatch { keywords: Vec<String> },
    /// The file held no records and no keywords were given.
    Empty,
}

/// Console styling for [`render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette {
    /// Emit ANSI colors (red titles, green links).
    pub color: bool,
}

impl Palette {
    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

/// Load a JSON record set written by [`crate::outputs::json`].
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_records(path: impl AsRef<Path>) -> Result<Vec<HeadlineRecord>, ReadError> {
    let path_str = path.as_ref().display().to_string();
    info!("Reading data");

    let raw = match tokio::fs::read(path.as_ref()).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ReadError::NotFound { path: path_str });
        }
        Err(source) => return Err(ReadError::Io { path: path_str, source }),
    };

    serde_json::from_slice(&raw).map_err(|source| ReadError::Malformed {
        path: path_str,
        source,
    })
}

/// Records whose title contains any keyword, ignoring case.
///
/// An empty keyword list keeps everything.
pub fn filter_by_keywords(records: &[HeadlineRecord], keywords: &[String]) -> Vec<HeadlineRecord> {
    if keywords.is_empty() {
        return records.to_vec();
    }

    let needles: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    records
        .iter()
        .filter(|record| {
            let title = record.title.to_lowercase();
            needles.iter().any(|needle| title.contains(needle.as_str()))
        })
        .cloned()
        .collect()
}

/// Filter by keywords, then keep the first `limit` records.
pub fn select(records: &[HeadlineRecord], limit: usize, keywords: &[String]) -> Listing {
    let matched = filter_by_keywords(records, keywords);
    if matched.is_empty() {
        return if keywords.is_empty() {
            Listing::Empty
        } else {
            Listing::NoMatch {
                keywords: keywords.to_vec(),
            }
        };
    }

    Listing::Headlines(matched.into_iter().take(limit).collect())
}

/// Print a listing: a banner and numbered entries, or a no-results line.
pub fn render(listing: &Listing, out: &mut impl Write, palette: Palette) -> io::Result<()> {
    match listing {
        Listing::Headlines(records) => {
            writeln!(out, "\n")?;
            writeln!(out, "{RULE}")?;
            writeln!(out, "{BANNER_TITLE}")?;
            writeln!(out, "{RULE}\n")?;
            for (idx, record) in records.iter().enumerate() {
                let title = format!("{}. {}", idx + 1, record.title);
                let link = format!("Link: {}", record.link);
                writeln!(out, "{}", palette.paint("31", &title))?;
                writeln!(out, "   {}\n", palette.paint("32", &link))?;
            }
            writeln!(out, "{RULE}\n")?;
        }
        Listing::NoMatch { keywords } => {
            writeln!(
                out,
                "No headlines found with the word(s): {}.",
                keywords.iter().join(", ")
            )?;
        }
        Listing::Empty => {
            writeln!(out, "No headlines found.")?;
        }
    }
    Ok(())
}

/// Load `path`, select up to `limit` headlines matching `keywords`, and print them.
///
/// A missing or malformed file is logged and nothing is printed; this never
/// fails the run.
///
/// # Arguments
///
/// * `path` - JSON file written by [`crate::outputs::json::write_records`]
/// * `limit` - Maximum number of headlines to print
/// * `keywords` - Case-insensitive title filters, OR'ed; empty keeps everything
/// * `out` - Where the listing is written (stdout in the CLI)
/// * `palette` - Whether to colorize the output
///
/// # Returns
///
/// The [`Listing`] that was printed, or `None` when the file could not be read.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display(), limit = limit, keywords = ?keywords))]
pub async fn present(
    path: impl AsRef<Path>,
    limit: usize,
    keywords: &[String],
    out: &mut impl Write,
    palette: Palette,
) -> Option<Listing> {
    let records = match load_records(path).await {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, "Could not read saved headlines");
            return None;
        }
    };

    let listing = select(&records, limit, keywords);
    if let Err(e) = render(&listing, out, palette) {
        warn!(error = %e, "Failed to print headlines");
    }
    Some(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::json;

    fn record(title: &str) -> HeadlineRecord {
        HeadlineRecord {
            title: title.to_string(),
            link: format!("https://www.cnn.com/{}", title.to_lowercase().replace(' ', "-")),
        }
    }

    fn five() -> Vec<HeadlineRecord> {
        ["One", "Two", "Three", "Four", "Five"]
            .into_iter()
            .map(record)
            .collect()
    }

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_keywords_are_case_insensitive_or() {
        let records = vec![
            record("Markets rally"),
            record("Storm warning"),
            record("Tennis final"),
        ];

        let listing = select(&records, 5, &kw(&["storm", "TENNIS"]));
        assert_eq!(
            listing,
            Listing::Headlines(vec![record("Storm warning"), record("Tennis final")])
        );
    }

    #[test]
    fn test_limit_keeps_leading_records() {
        let listing = select(&five(), 2, &[]);
        assert_eq!(listing, Listing::Headlines(vec![record("One"), record("Two")]));
    }

    #[test]
    fn test_limit_zero_is_empty_listing() {
        let listing = select(&five(), 0, &[]);
        assert_eq!(listing, Listing::Headlines(vec![]));
    }

    #[test]
    fn test_no_match_names_keywords() {
        let listing = select(&five(), 5, &kw(&["storm", "golf"]));
        assert_eq!(
            listing,
            Listing::NoMatch {
                keywords: kw(&["storm", "golf"])
            }
        );

        let mut out = Vec::new();
        render(&listing, &mut out, Palette::default()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "No headlines found with the word(s): storm, golf.\n"
        );
    }

    #[test]
    fn test_empty_set_without_keywords() {
        assert_eq!(select(&[], 5, &[]), Listing::Empty);
    }

    #[test]
    fn test_filter_leaves_input_untouched() {
        let records = five();
        let filtered = filter_by_keywords(&records, &kw(&["t"]));
        assert_eq!(filtered, vec![record("Two"), record("Three")]);
        assert_eq!(records, five());
    }

    #[test]
    fn test_render_numbered_lines() {
        let mut out = Vec::new();
        render(
            &Listing::Headlines(vec![record("One"), record("Two")]),
            &mut out,
            Palette::default(),
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Latest News Headlines"));
        assert!(text.contains("1. One\n   Link: https://www.cnn.com/one\n"));
        assert!(text.contains("2. Two\n   Link: https://www.cnn.com/two\n"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_render_with_color() {
        let mut out = Vec::new();
        render(
            &Listing::Headlines(vec![record("One")]),
            &mut out,
            Palette { color: true },
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[31m1. One\x1b[0m"));
        assert!(text.contains("\x1b[32mLink: https://www.cnn.com/one\x1b[0m"));
    }

    #[tokio::test]
    async fn test_round_trip_through_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("headlines.json");
        let records = five();

        json::write_records(&records, &path).await.unwrap();

        let mut out = Vec::new();
        let listing = present(&path, 10, &[], &mut out, Palette::default()).await;
        assert_eq!(listing, Some(Listing::Headlines(records)));
        assert!(!out.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_prints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();

        let listing = present(dir.path().join("absent.json"), 5, &[], &mut out, Palette::default()).await;
        assert!(listing.is_none());
        assert!(out.is_empty());

        let err = load_records(dir.path().join("absent.json")).await.unwrap_err();
        assert!(matches!(err, ReadError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_malformed_file_prints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, "[{\"title\": \"cut off").await.unwrap();

        let mut out = Vec::new();
        assert!(present(&path, 5, &[], &mut out, Palette::default()).await.is_none());
        assert!(out.is_empty());

        let err = load_records(&path).await.unwrap_err();
        assert!(matches!(err, ReadError::Malformed { .. }));
    }
}

//! Writers for the scraped record set.
//!
//! # Submodules
//!
//! - [`json`]: array of `{title, link}` objects, indented for reading
//! - [`tabular`]: comma-separated rows under a `title,link` header
//!
//! Both overwrite the destination file. Write failures are not absorbed:
//! a missing directory or a permission error ends the run.

pub mod json;
pub mod tabular;

use crate::models::HeadlineRecord;
use clap::ValueEnum;
use std::path::Path;
use thiserror::Error;

/// On-disk encoding selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Array-of-objects JSON.
    #[default]
    Json,
    /// `title,link` CSV.
    Csv,
}

/// A write that could not complete.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode CSV: {0}")]
    Csv(#[from] ::csv::Error),
}

/// Write `records` to `path` in `format`, replacing any existing file.
///
/// # Arguments
///
/// * `records` - Headlines in document order
/// * `path` - Destination file; its directory must already exist
/// * `format` - [`OutputFormat::Json`] or [`OutputFormat::Csv`]
///
/// # Returns
///
/// `Ok(())` once the file is written, or a [`SinkError`] if encoding or the
/// filesystem write fails.
pub async fn write_records(
    records: &[HeadlineRecord],
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<(), SinkError> {
    match format {
        OutputFormat::Json => json::write_records(records, path).await,
        OutputFormat::Csv => tabular::write_records(records, path).await,
    }
}

/// Write encoded bytes, mapping I/O failures to [`SinkError::Io`].
pub(crate) async fn write_file(path: &Path, bytes: Vec<u8>) -> Result<(), SinkError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| SinkError::Io {
            path: path.display().to_string(),
            source,
        })
}

//! JSON output: the record set as a pretty-printed array of objects.
//!
//! ```json
//! [
//!     {
//!         "title": "Senate votes",
//!         "link": "https://www.cnn.com/politics/story-1"
//!     }
//! ]
//! ```

use crate::models::HeadlineRecord;
use crate::outputs::{SinkError, write_file};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;
use tracing::{info, instrument};

const INDENT: &[u8] = b"    ";

/// Encode records as four-space-indented JSON.
pub fn to_json(records: &[HeadlineRecord]) -> Result<Vec<u8>, SinkError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    records.serialize(&mut ser)?;
    Ok(buf)
}

/// Overwrite `path` with the JSON encoding of `records`.
///
/// # Arguments
///
/// * `records` - Headlines to serialize, in order
/// * `path` - Output file path
///
/// # Returns
///
/// `Ok(())` on success, or [`SinkError::Io`] when the file cannot be written.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display(), count = records.len()))]
pub async fn write_records(
    records: &[HeadlineRecord],
    path: impl AsRef<Path>,
) -> Result<(), SinkError> {
    info!("Saving data");
    write_file(path.as_ref(), to_json(records)?).await?;
    info!("Data saved successfully");
    Ok(())
}

//! CSV output with a `title,link` header row.
//!
//! Quoting follows the `csv` crate defaults: a field is quoted only when it
//! contains a comma, a quote, or a line break.

use crate::models::HeadlineRecord;
use crate::outputs::{SinkError, write_file};
use std::path::Path;
use tracing::{info, instrument};

/// Encode records as CSV, header first, one row per record in order.
pub fn to_csv(records: &[HeadlineRecord]) -> Result<Vec<u8>, SinkError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(["title", "link"])?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| SinkError::Csv(csv::Error::from(e.into_error())))
}

/// Overwrite `path` with the CSV encoding of `records`.
///
/// # Arguments
///
/// * `records` - Headlines to write, one row each
/// * `path` - Output file path
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display(), count = records.len()))]
pub async fn write_records(
    records: &[HeadlineRecord],
    path: impl AsRef<Path>,
) -> Result<(), SinkError> {
    info!("Saving data");
    write_file(path.as_ref(), to_csv(records)?).await?;
    info!("Data saved successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows_in_order() {
        let records = vec![
            HeadlineRecord {
                title: "Markets rally".to_string(),
                link: "https://www.cnn.com/markets/1".to_string(),
            },
            HeadlineRecord {
                title: "Storm warning".to_string(),
                link: String::new(),
            },
        ];
        let csv = String::from_utf8(to_csv(&records).unwrap()).unwrap();
        assert_eq!(
            csv,
            "title,link\nMarkets rally,https://www.cnn.com/markets/1\nStorm warning,\n"
        );
    }

    #[test]
    fn test_header_only_for_empty_set() {
        let csv = String::from_utf8(to_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv, "title,link\n");
    }

    #[test]
    fn test_delimiters_are_quoted() {
        let records = vec![HeadlineRecord {
            title: "Rates, \"again\"".to_string(),
            link: "https://www.cnn.com/a".to_string(),
        }];
        let csv = String::from_utf8(to_csv(&records).unwrap()).unwrap();
        assert_eq!(
            csv,
            "title,link\n\"Rates, \"\"again\"\"\",https://www.cnn.com/a\n"
        );
    }

    #[tokio::test]
    async fn test_write_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("headlines.csv");
        let records = vec![HeadlineRecord {
            title: "Test".to_string(),
            link: "https://www.cnn.com/test".to_string(),
        }];

        write_records(&records, &path).await.unwrap();

        let saved = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(saved, "title,link\nTest,https://www.cnn.com/test\n");
    }
}

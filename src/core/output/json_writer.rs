//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::core::models::{OUTPUT_TIMESTAMP_FORMAT, OutputConfig};
use crate::error::Result;
use crate::record::MessageRecord;

/// Serialized shape of one record, shared with the JSONL writer.
#[derive(Serialize)]
pub(super) struct JsonRecord<'a> {
    datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_datetime: Option<&'a str>,
    author: &'a str,
    message: &'a str,
}

impl<'a> JsonRecord<'a> {
    pub(super) fn from_record(record: &'a MessageRecord, config: &OutputConfig) -> Self {
        Self {
            datetime: record
                .timestamp
                .map(|ts| ts.format(OUTPUT_TIMESTAMP_FORMAT).to_string()),
            raw_datetime: config
                .include_raw_timestamps
                .then_some(record.timestamp_text.as_str()),
            author: &record.author,
            message: &record.message,
        }
    }
}

/// Writes records to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"datetime": "2023-05-24 14:05:00", "author": "Alice", "message": "Hello"},
///   {"datetime": null, "author": "Bob", "message": "Hi"}
/// ]
/// ```
pub fn write_json(
    records: &[MessageRecord],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(records, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Same array as [`write_json`], returned as a string.
pub fn to_json(records: &[MessageRecord], config: &OutputConfig) -> Result<String> {
    let json_records: Vec<JsonRecord<'_>> = records
        .iter()
        .map(|r| JsonRecord::from_record(r, config))
        .collect();

    Ok(serde_json::to_string_pretty(&json_records)?)
}

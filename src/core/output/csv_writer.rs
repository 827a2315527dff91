//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::models::{OUTPUT_TIMESTAMP_FORMAT, OutputConfig};
use crate::error::Result;
use crate::record::MessageRecord;

/// Writes records to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `DateTime`, `Author`, `Message`; with raw timestamps enabled
///   `DateTime`, `RawDateTime`, `Author`, `Message`
/// - Unresolved timestamps are written as an empty cell
/// - Encoding: UTF-8
pub fn write_csv(
    records: &[MessageRecord],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(records, file, config)
}

/// Same rows as [`write_csv`], returned as a string.
pub fn to_csv(records: &[MessageRecord], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(records: &[MessageRecord], sink: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(build_header(config))?;
    for record in records {
        writer.write_record(build_row(record, config))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["DateTime"];
    if config.include_raw_timestamps {
        header.push("RawDateTime");
    }
    header.push("Author");
    header.push("Message");
    header
}

fn build_row(record: &MessageRecord, config: &OutputConfig) -> Vec<String> {
    let mut row = vec![
        record
            .timestamp
            .map(|ts| ts.format(OUTPUT_TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default(),
    ];
    if config.include_raw_timestamps {
        row.push(record.timestamp_text.clone());
    }
    row.push(record.author.clone());
    row.push(record.message.clone());
    row
}

//! JSON Lines (JSONL) output writer.
//!
//! One object per line with the same fields as the JSON writer. Convenient
//! for line-oriented tools and incremental loading.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::json_writer::JsonRecord;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::record::MessageRecord;

/// Writes records to a JSONL file.
///
/// ```jsonl
/// {"datetime":"2023-05-24 14:05:00","author":"Alice","message":"Hello"}
/// {"datetime":null,"author":"Bob","message":"Hi"}
/// ```
pub fn write_jsonl(
    records: &[MessageRecord],
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_lines(records, BufWriter::new(file), config)
}

/// Same lines as [`write_jsonl`], returned as a string.
pub fn to_jsonl(records: &[MessageRecord], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(records, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(records: &[MessageRecord], mut writer: W, config: &OutputConfig) -> Result<()> {
    for record in records {
        let line = serde_json::to_string(&JsonRecord::from_record(record, config))?;
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter (`csv-output` feature)
//! - [`write_json`] / [`to_json`] - JSON array of records (`json-output` feature)
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one record per line (`json-output` feature)
//!
//! All writers emit the resolved timestamp as `YYYY-MM-DD HH:MM:SS`, or an
//! empty cell / `null` when it is unresolved.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::models::OutputConfig;
//! use chatlens::core::output::{to_csv, write_json, write_jsonl};
//! use chatlens::parser::ChatLogParser;
//!
//! let records = ChatLogParser::new().parse("24/05/2023, 14:05 - Alice: Hello");
//! let config = OutputConfig::new().with_raw_timestamps();
//!
//! write_json(&records, "chat.json", &config)?;
//! write_jsonl(&records, "chat.jsonl", &config)?;
//!
//! let csv = to_csv(&records, &config)?;
//! assert!(csv.starts_with("DateTime;RawDateTime;Author;Message"));
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

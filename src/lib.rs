//! # chatlens
//!
//! A Rust library for turning exported WhatsApp chat transcripts into
//! structured message records, and for analyzing the conversation they
//! describe.
//!
//! ## Overview
//!
//! An export is plain text where each message starts with a header line
//! (timestamp, author, first fragment of the message) and may continue over
//! any number of following lines. Two header shapes are recognized out of the
//! box:
//!
//! - **bracketed** (iOS-style): `[24/05/23, 14:05:10] Alice: Hello`
//! - **dashed** (Android-style): `24/05/2023, 14:05 - Alice: Hello`
//!
//! Both can appear in the same file. Parsing never fails on text: lines before
//! the first header are dropped, and timestamps that match no known format are
//! kept as text with `timestamp == None`.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! let text = "\
//! 24/05/2023, 14:05 - Alice: Hello
//! world
//! [24/05/23, 14:06:30] Bob: Hi Alice";
//!
//! let records = ChatLogParser::new().parse(text);
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].message, "Hello world");
//! assert_eq!(records[1].author, "Bob");
//! ```
//!
//! ## Analysis
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! let records = ChatLogParser::new().parse(
//!     "24/05/2023, 14:05 - Alice: Hello\n24/05/2023, 14:06 - Bob: Hi",
//! );
//! let report = ChatReport::build(&records, &AnalysisConfig::default());
//!
//! assert_eq!(report.summary.participants, 2);
//! assert_eq!(report.response_times[0].author, "Bob");
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatLogParser`], [`ParseStats`](parser::ParseStats)
//! - [`parsing`] - the two parser stages: header matching and line assembly,
//!   then timestamp resolution
//! - [`record`] - [`MessageRecord`]
//! - [`config`] - [`ParserConfig`](config::ParserConfig),
//!   [`AnalysisConfig`](config::AnalysisConfig)
//! - [`core`] - filtering, analysis and output writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - [`cli`] - CLI argument types (`cli` feature)
//! - [`error`] - [`ChatlensError`], [`Result`]
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod parser;
pub mod parsing;
pub mod record;

pub use error::{ChatlensError, Result};
pub use parser::ChatLogParser;
pub use record::MessageRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::MessageRecord;

    pub use crate::error::{ChatlensError, Result};

    pub use crate::parser::{ChatLogParser, ParseOutcome, ParseStats};

    pub use crate::config::{AnalysisConfig, ParserConfig};
    pub use crate::parsing::HeaderPattern;

    pub use crate::core::analysis::ChatReport;
    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::OutputConfig;

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::OutputFormat;
}

//! Everything that happens after parsing.
//!
//! - [`filter`] - drop records by author, content or date
//! - [`analysis`] - summaries, activity buckets and reply dynamics
//! - [`models`] - output configuration
//! - [`output`] - format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use chatlens::core::{AnalysisConfig, ChatReport, FilterConfig, apply_filters};
//! use chatlens::parser::ChatLogParser;
//!
//! let records = ChatLogParser::new().parse(
//!     "24/05/2023, 14:05 - Alice: Hello\n24/05/2023, 14:06 - Meta AI: Hi there",
//! );
//! let analysis = AnalysisConfig::default();
//! let records = apply_filters(records, &FilterConfig::for_analysis(&analysis));
//! let report = ChatReport::build(&records, &analysis);
//!
//! assert_eq!(report.summary.total_messages, 1);
//! ```

pub mod analysis;
pub mod filter;
pub mod models;
pub mod output;

pub use analysis::{ChatReport, ChatSummary, MediaCounts, Talkativeness};
pub use filter::{FilterConfig, apply_filters};
pub use models::OutputConfig;

pub use crate::config::AnalysisConfig;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};

//! Configuration types for parsing and analysis.
//!
//! - [`ParserConfig`] - which header shapes are recognized and which date
//!   formats resolve their timestamps
//! - [`AnalysisConfig`] - labels, placeholders and time windows used by the
//!   aggregation in [`core::analysis`](crate::core::analysis)
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{AnalysisConfig, ParserConfig};
//! use chatlens::parsing::HeaderPattern;
//!
//! let dotted = HeaderPattern::new(
//!     "dotted",
//!     r"^(?P<timestamp>\d{2}\.\d{2}\.\d{4}, \d{2}:\d{2}) - (?P<author>.*?): (?P<message>.*)$",
//! )?
//! .with_date_format("%d.%m.%Y, %H:%M");
//!
//! let parser_config = ParserConfig::default().with_pattern(dotted);
//! assert_eq!(parser_config.patterns.len(), 3);
//! assert_eq!(parser_config.timestamp_formats.len(), 3);
//!
//! let analysis = AnalysisConfig::new().with_reply_window_secs(30 * 60);
//! assert_eq!(analysis.reply_window_secs, 1800);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::parsing::header::{BRACKETED_DATE_FORMAT, DASHED_DATE_FORMAT, HeaderPattern, default_patterns};

/// Author label of the automated assistant that posts into chats.
pub const ASSISTANT_LABEL: &str = "Meta AI";

/// Message texts that stand in for omitted media.
pub const MEDIA_PLACEHOLDERS: [&str; 5] = [
    "<Media omitted>",
    "image omitted",
    "video omitted",
    "sticker omitted",
    "audio omitted",
];

/// Configuration for [`ChatLogParser`](crate::parser::ChatLogParser).
///
/// `patterns` are tried in order for every line; the first match wins.
/// `timestamp_formats` are tried in order during timestamp resolution,
/// independently of which pattern captured the text.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Header patterns in match order.
    pub patterns: Vec<HeaderPattern>,

    /// chrono formats in resolution priority order.
    pub timestamp_formats: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            timestamp_formats: vec![
                DASHED_DATE_FORMAT.to_string(),
                BRACKETED_DATE_FORMAT.to_string(),
            ],
        }
    }
}

impl ParserConfig {
    /// Creates the default configuration (bracketed and dashed exports).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that recognizes nothing.
    ///
    /// Useful as a starting point when only custom patterns are wanted.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            timestamp_formats: Vec::new(),
        }
    }

    /// Appends a header pattern.
    ///
    /// If the pattern carries a date format that is not yet known, it is
    /// appended to the end of the resolution order.
    #[must_use]
    pub fn with_pattern(mut self, pattern: HeaderPattern) -> Self {
        if let Some(format) = pattern.date_format() {
            if !self.timestamp_formats.iter().any(|f| f == format) {
                self.timestamp_formats.push(format.to_string());
            }
        }
        self.patterns.push(pattern);
        self
    }

    /// Appends a timestamp format to the resolution order.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_formats.push(format.into());
        self
    }
}

/// Configuration for conversation analysis.
///
/// All windows are in seconds.
///
/// # Example
///
/// ```rust
/// use chatlens::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.assistant_label, "Meta AI");
/// assert_eq!(config.reply_window_secs, 3600);
/// assert_eq!(config.interaction_window_secs, 120);
/// assert_eq!(config.silence_threshold_secs, 7200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Author whose messages are automated (default: `Meta AI`)
    pub assistant_label: String,

    /// Case-insensitive substrings marking media placeholder messages
    pub media_placeholders: Vec<String>,

    /// A reply from another author within this window counts toward
    /// response-time statistics (default: 1 hour)
    pub reply_window_secs: i64,

    /// A reply from another author within this window counts as an
    /// interaction pair (default: 2 minutes)
    pub interaction_window_secs: i64,

    /// A message after a gap longer than this starts a conversation
    /// (default: 2 hours)
    pub silence_threshold_secs: i64,

    /// Maximum number of interaction pairs reported (default: 10)
    pub top_interactions: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            assistant_label: ASSISTANT_LABEL.to_string(),
            media_placeholders: MEDIA_PLACEHOLDERS.iter().map(|s| (*s).to_string()).collect(),
            reply_window_secs: 60 * 60,
            interaction_window_secs: 120,
            silence_threshold_secs: 7200,
            top_interactions: 10,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the assistant label.
    #[must_use]
    pub fn with_assistant_label(mut self, label: impl Into<String>) -> Self {
        self.assistant_label = label.into();
        self
    }

    /// Sets the response-time window.
    #[must_use]
    pub fn with_reply_window_secs(mut self, secs: i64) -> Self {
        self.reply_window_secs = secs;
        self
    }

    /// Sets the interaction-pair window.
    #[must_use]
    pub fn with_interaction_window_secs(mut self, secs: i64) -> Self {
        self.interaction_window_secs = secs;
        self
    }

    /// Sets the silence threshold for conversation starters.
    #[must_use]
    pub fn with_silence_threshold_secs(mut self, secs: i64) -> Self {
        self.silence_threshold_secs = secs;
        self
    }

    /// Sets how many interaction pairs are reported.
    #[must_use]
    pub fn with_top_interactions(mut self, limit: usize) -> Self {
        self.top_interactions = limit;
        self
    }

    /// Returns `true` if `message` contains one of the media placeholders
    /// (case-insensitive).
    pub fn is_media_placeholder(&self, message: &str) -> bool {
        let lower = message.to_lowercase();
        self.media_placeholders
            .iter()
            .any(|p| lower.contains(&p.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_config_defaults() {
        let config = ParserConfig::default();
        let names: Vec<_> = config.patterns.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["bracketed", "dashed"]);
        assert_eq!(
            config.timestamp_formats,
            [DASHED_DATE_FORMAT, BRACKETED_DATE_FORMAT]
        );
    }

    #[test]
    fn test_with_pattern_appends_new_format_once() {
        let pattern = HeaderPattern::new(
            "dotted",
            r"^(?P<timestamp>\S+ \S+) - (?P<author>.*?): (?P<message>.*)$",
        )
        .unwrap()
        .with_date_format("%d.%m.%Y, %H:%M");

        let config = ParserConfig::default()
            .with_pattern(pattern.clone())
            .with_pattern(pattern);

        assert_eq!(config.patterns.len(), 4);
        assert_eq!(config.timestamp_formats.len(), 3);
        assert_eq!(config.timestamp_formats[2], "%d.%m.%Y, %H:%M");
    }

    #[test]
    fn test_with_pattern_without_format() {
        let pattern = HeaderPattern::new(
            "loose",
            r"^(?P<timestamp>\S+) (?P<author>\w+): (?P<message>.*)$",
        )
        .unwrap();
        let config = ParserConfig::empty().with_pattern(pattern);
        assert_eq!(config.patterns.len(), 1);
        assert!(config.timestamp_formats.is_empty());
    }

    #[test]
    fn test_builtin_pattern_does_not_duplicate_format() {
        let config = ParserConfig::default().with_pattern(HeaderPattern::dashed());
        assert_eq!(config.timestamp_formats.len(), 2);
    }

    #[test]
    fn test_analysis_config_builder() {
        let config = AnalysisConfig::new()
            .with_assistant_label("Bot")
            .with_reply_window_secs(600)
            .with_interaction_window_secs(30)
            .with_silence_threshold_secs(3600)
            .with_top_interactions(3);

        assert_eq!(config.assistant_label, "Bot");
        assert_eq!(config.reply_window_secs, 600);
        assert_eq!(config.interaction_window_secs, 30);
        assert_eq!(config.silence_threshold_secs, 3600);
        assert_eq!(config.top_interactions, 3);
    }

    #[test]
    fn test_media_placeholder_case_insensitive() {
        let config = AnalysisConfig::default();
        assert!(config.is_media_placeholder("<Media omitted>"));
        assert!(config.is_media_placeholder("IMAGE OMITTED"));
        assert!(config.is_media_placeholder("\u{200e}sticker omitted"));
        assert!(!config.is_media_placeholder("I omitted the image on purpose"));
    }

    #[test]
    fn test_analysis_config_serde_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"reply_window_secs": 900}"#).unwrap();
        assert_eq!(config.reply_window_secs, 900);
        assert_eq!(config.silence_threshold_secs, 7200);
        assert_eq!(config.media_placeholders.len(), MEDIA_PLACEHOLDERS.len());
    }
}

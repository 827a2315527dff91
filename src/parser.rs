//! The chat-log parser.
//!
//! [`ChatLogParser`] turns the text of one exported chat into an ordered
//! sequence of [`MessageRecord`]s.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::ChatLogParser;
//!
//! let text = "\
//! Messages to this group are now secured with end-to-end encryption.
//! [24/05/23, 09:00:00] Bob: Hi
//! 25/05/2023, 10:00 - Carol: Yo
//! still Carol";
//!
//! let records = ChatLogParser::new().parse(text);
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].author, "Bob");
//! assert_eq!(records[1].message, "Yo still Carol");
//! assert!(records.iter().all(|r| r.timestamp.is_some()));
//! ```
//!
//! # Behavior Notes
//!
//! - Lines are trimmed; blank lines are ignored entirely
//! - Lines before the first header are dropped
//! - Continuation lines are joined to the open message with a single space
//! - Unparseable timestamps leave `timestamp == None`; the record is kept
//! - Parsing text never fails; only [`parse_bytes`](ChatLogParser::parse_bytes)
//!   and [`parse_file`](ChatLogParser::parse_file) can, on I/O or decoding

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::error::{ChatlensError, Result};
use crate::parsing::{MessageAssembler, TimestampResolver, match_header};
use crate::record::MessageRecord;

/// Counters collected during one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Non-blank lines seen
    pub lines: usize,
    /// Lines that matched a header pattern
    pub headers: usize,
    /// Lines merged into the preceding message
    pub continuations: usize,
    /// Lines dropped because no message was open
    pub dropped: usize,
    /// Records whose timestamp matched no format
    pub unresolved: usize,
}

impl ParseStats {
    /// Number of records with a resolved timestamp.
    pub fn resolved(&self) -> usize {
        self.headers - self.unresolved
    }

    /// Share of records with a resolved timestamp, in percent.
    pub fn resolution_rate(&self) -> f64 {
        if self.headers == 0 {
            return 0.0;
        }
        self.resolved() as f64 / self.headers as f64 * 100.0
    }
}

/// Records plus the counters describing how they were obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Parsed records in header order.
    pub records: Vec<MessageRecord>,
    /// Line and timestamp counters.
    pub stats: ParseStats,
}

/// Parser for exported chat transcripts.
///
/// Holds only configuration; every call works on its own local state, so one
/// parser can be shared freely between threads.
///
/// # Example
///
/// ```rust
/// use chatlens::parser::ChatLogParser;
///
/// let parser = ChatLogParser::new();
/// let outcome = parser.parse_with_stats("24/05/2023, 14:05 - Alice: Hello\nworld");
///
/// assert_eq!(outcome.records[0].message, "Hello world");
/// assert_eq!(outcome.stats.headers, 1);
/// assert_eq!(outcome.stats.continuations, 1);
/// ```
#[derive(Debug, Clone)]
pub struct ChatLogParser {
    config: ParserConfig,
    resolver: TimestampResolver,
}

impl ChatLogParser {
    /// Creates a parser recognizing the bracketed and dashed export shapes.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        let resolver = TimestampResolver::new(config.timestamp_formats.iter().cloned());
        Self { config, resolver }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the timestamp resolver used by the second pass.
    pub fn resolver(&self) -> &TimestampResolver {
        &self.resolver
    }

    /// Parses decoded text into records with resolved timestamps.
    pub fn parse(&self, text: &str) -> Vec<MessageRecord> {
        self.parse_with_stats(text).records
    }

    /// Parses decoded text and reports line and timestamp counters.
    pub fn parse_with_stats(&self, text: &str) -> ParseOutcome {
        let (mut records, mut stats) = self.assemble_counted(text);
        stats.unresolved = self.resolver.resolve_all(&mut records);

        debug!(
            records = records.len(),
            unresolved = stats.unresolved,
            dropped = stats.dropped,
            "parsed chat log"
        );

        ParseOutcome { records, stats }
    }

    /// Runs only the line-assembly pass.
    ///
    /// The returned records carry their timestamp text but no resolved
    /// timestamp.
    pub fn assemble(&self, text: &str) -> Vec<MessageRecord> {
        self.assemble_counted(text).0
    }

    /// Decodes UTF-8 bytes and parses them.
    ///
    /// A leading byte order mark is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Decode`] if the bytes are not valid UTF-8.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<MessageRecord>> {
        let text = decode(bytes, "chat export")?;
        Ok(self.parse(text))
    }

    /// Reads, decodes and parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Io`] if the file cannot be read and
    /// [`ChatlensError::Decode`] if it is not valid UTF-8.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<MessageRecord>> {
        let bytes = fs::read(path)?;
        let text = decode(&bytes, path.display().to_string())?;
        Ok(self.parse(text))
    }

    fn assemble_counted(&self, text: &str) -> (Vec<MessageRecord>, ParseStats) {
        let mut assembler = MessageAssembler::new();
        let mut stats = ParseStats::default();

        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            stats.lines += 1;

            if let Some(header) = match_header(&self.config.patterns, line) {
                stats.headers += 1;
                assembler.push_header(header);
            } else if assembler.push_continuation(line) {
                stats.continuations += 1;
            } else {
                stats.dropped += 1;
                trace!(line = line_no + 1, "dropping line before first header");
            }
        }

        (assembler.finish(), stats)
    }
}

impl Default for ChatLogParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes raw export bytes into text, skipping a leading byte order mark.
///
/// # Errors
///
/// Returns [`ChatlensError::Decode`] with `context` if the bytes are not
/// valid UTF-8.
pub fn decode(bytes: &[u8], context: impl Into<String>) -> Result<&str> {
    let text = std::str::from_utf8(bytes).map_err(|e| ChatlensError::decode(context, e))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::HeaderPattern;

    #[test]
    fn test_parse_single_dashed_message() {
        let records = ChatLogParser::new().parse("24/05/2023, 14:05 - Alice: Hello");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp_text, "24/05/2023, 14:05");
        assert_eq!(records[0].author, "Alice");
        assert_eq!(records[0].message, "Hello");
        assert!(records[0].timestamp.is_some());
    }

    #[test]
    fn test_blank_lines_do_not_break_messages() {
        let text = "24/05/2023, 14:05 - Alice: Hello\n\n   \nworld\n";
        let records = ChatLogParser::new().parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "Hello world");
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "24/05/2023, 14:05 - Alice: Hello\r\nagain\r\n24/05/2023, 14:06 - Bob: Hi\r\n";
        let records = ChatLogParser::new().parse(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "Hello again");
        assert_eq!(records[1].message, "Hi");
    }

    #[test]
    fn test_indented_lines_are_trimmed() {
        let text = "   [24/05/23, 14:05:10] Alice: Hello   \n\t  continued\t";
        let records = ChatLogParser::new().parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "Hello continued");
    }

    #[test]
    fn test_stats_counts() {
        let text = "noise\n\n24/05/2023, 14:05 - Alice: Hello\nworld\n31/02/2023, 10:00 - Bob: Hi";
        let outcome = ChatLogParser::new().parse_with_stats(text);

        assert_eq!(outcome.stats.lines, 4);
        assert_eq!(outcome.stats.headers, 2);
        assert_eq!(outcome.stats.continuations, 1);
        assert_eq!(outcome.stats.dropped, 1);
        assert_eq!(outcome.stats.unresolved, 1);
        assert_eq!(outcome.stats.resolved(), 1);
        assert!((outcome.stats.resolution_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolution_rate_empty() {
        assert_eq!(ParseStats::default().resolution_rate(), 0.0);
    }

    #[test]
    fn test_assemble_leaves_timestamps_unresolved() {
        let records = ChatLogParser::new().assemble("24/05/2023, 14:05 - Alice: Hello");
        assert_eq!(records.len(), 1);
        assert!(records[0].timestamp.is_none());
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let bytes = vec![b'h', b'i', 0xff, 0xfe];
        let err = ChatLogParser::new().parse_bytes(&bytes).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_parse_bytes_skips_bom() {
        let mut bytes = "\u{feff}".as_bytes().to_vec();
        bytes.extend_from_slice(b"[24/05/23, 14:05:10] Alice: Hello");
        let records = ChatLogParser::new().parse_bytes(&bytes).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].author, "Alice");
    }

    #[test]
    fn test_parse_file_missing() {
        let err = ChatLogParser::new()
            .parse_file(Path::new("/definitely/not/here/_chat.txt"))
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_custom_pattern_extends_recognition() {
        let dotted = HeaderPattern::new(
            "dotted",
            r"^(?P<timestamp>\d{2}\.\d{2}\.\d{4}, \d{2}:\d{2}) - (?P<author>.*?): (?P<message>.*)$",
        )
        .unwrap()
        .with_date_format("%d.%m.%Y, %H:%M");
        let parser = ChatLogParser::with_config(ParserConfig::default().with_pattern(dotted));

        let records = parser.parse("26.10.2025, 20:40 - Alice: Привет\n24/05/2023, 14:05 - Bob: Hi");
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.timestamp.is_some()));
        assert_eq!(parser.resolver().formats().len(), 3);
    }

    #[test]
    fn test_parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChatLogParser>();
    }
}

//! Header line recognition.
//!
//! A header line starts a new message: it carries the timestamp, the author,
//! and the first fragment of the message text. Two export shapes are built in:
//!
//! | Pattern | Example | Date format |
//! |---------|---------|-------------|
//! | Bracketed | `[24/05/23, 14:05:10] Alice: Hello` | `%d/%m/%y, %H:%M:%S` |
//! | Dashed | `24/05/2023, 14:05 - Alice: Hello` | `%d/%m/%Y, %H:%M` |
//!
//! Further shapes can be registered through [`HeaderPattern::new`]. A pattern
//! is any regex with the named groups `timestamp`, `author` and `message`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ChatlensError, Result};

/// `[dd/mm/yy, HH:MM:SS] Author: Message`
pub const BRACKETED_PATTERN: &str =
    r"^\[(?P<timestamp>\d{2}/\d{2}/\d{2}, \d{2}:\d{2}:\d{2})\] (?P<author>.*?): (?P<message>.*)$";

/// `dd/mm/yyyy, HH:MM - Author: Message`
pub const DASHED_PATTERN: &str =
    r"^(?P<timestamp>\d{2}/\d{2}/\d{4}, \d{2}:\d{2}) - (?P<author>.*?): (?P<message>.*)$";

/// chrono format for bracketed timestamps.
pub const BRACKETED_DATE_FORMAT: &str = "%d/%m/%y, %H:%M:%S";

/// chrono format for dashed timestamps.
pub const DASHED_DATE_FORMAT: &str = "%d/%m/%Y, %H:%M";

/// Capture groups every header pattern must define.
pub const REQUIRED_GROUPS: [&str; 3] = ["timestamp", "author", "message"];

static BRACKETED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BRACKETED_PATTERN).expect("bracketed header pattern compiles"));

static DASHED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DASHED_PATTERN).expect("dashed header pattern compiles"));

/// The three pieces captured from a header line, borrowed from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// Date/time text, exactly as matched.
    pub timestamp_text: &'a str,
    /// Author between the timestamp and the `: ` separator.
    pub author: &'a str,
    /// First fragment of the message.
    pub message: &'a str,
}

/// A recognizable header line shape paired with the date format it uses.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::HeaderPattern;
///
/// let dotted = HeaderPattern::new(
///     "dotted",
///     r"^(?P<timestamp>\d{2}\.\d{2}\.\d{4}, \d{2}:\d{2}) - (?P<author>.*?): (?P<message>.*)$",
/// )?
/// .with_date_format("%d.%m.%Y, %H:%M");
///
/// let header = dotted.captures("26.10.2025, 20:40 - Alice: Hi").unwrap();
/// assert_eq!(header.author, "Alice");
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HeaderPattern {
    name: String,
    regex: Regex,
    date_format: Option<String>,
}

impl HeaderPattern {
    /// Compiles a custom header pattern.
    ///
    /// The regex must define the named groups `timestamp`, `author` and
    /// `message`. No date format is attached; see
    /// [`with_date_format`](Self::with_date_format).
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let regex =
            Regex::new(pattern).map_err(|e| ChatlensError::invalid_pattern(&name, e.to_string()))?;

        for group in REQUIRED_GROUPS {
            if !regex.capture_names().flatten().any(|n| n == group) {
                return Err(ChatlensError::invalid_pattern(
                    name,
                    format!("missing capture group '{group}'"),
                ));
            }
        }

        Ok(Self {
            name,
            regex,
            date_format: None,
        })
    }

    /// The bracketed export shape: `[24/05/23, 14:05:10] Alice: Hello`.
    pub fn bracketed() -> Self {
        Self {
            name: "bracketed".to_string(),
            regex: BRACKETED_REGEX.clone(),
            date_format: Some(BRACKETED_DATE_FORMAT.to_string()),
        }
    }

    /// The dashed export shape: `24/05/2023, 14:05 - Alice: Hello`.
    pub fn dashed() -> Self {
        Self {
            name: "dashed".to_string(),
            regex: DASHED_REGEX.clone(),
            date_format: Some(DASHED_DATE_FORMAT.to_string()),
        }
    }

    /// Attaches the chrono format used to resolve this pattern's timestamps.
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// Returns the pattern name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the regex source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the attached date format, if any.
    pub fn date_format(&self) -> Option<&str> {
        self.date_format.as_deref()
    }

    /// Returns `true` if `line` is a header of this shape.
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Splits a header line into its captured pieces.
    ///
    /// Returns `None` if the line does not match, or if one of the required
    /// groups did not participate in the match.
    pub fn captures<'a>(&self, line: &'a str) -> Option<HeaderMatch<'a>> {
        let caps = self.regex.captures(line)?;
        Some(HeaderMatch {
            timestamp_text: caps.name("timestamp")?.as_str(),
            author: caps.name("author")?.as_str(),
            message: caps.name("message")?.as_str(),
        })
    }
}

/// Built-in patterns in match order.
pub fn default_patterns() -> Vec<HeaderPattern> {
    vec![HeaderPattern::bracketed(), HeaderPattern::dashed()]
}

/// Tries each pattern in order; the first match wins.
pub fn match_header<'a>(patterns: &[HeaderPattern], line: &'a str) -> Option<HeaderMatch<'a>> {
    patterns.iter().find_map(|pattern| pattern.captures(line))
}

//! The parser's output unit.
//!
//! A [`MessageRecord`] is one chat message as recovered from an export:
//! who wrote it, the timestamp text exactly as it appeared, the resolved
//! timestamp (if any known format matched), and the full message text.
//!
//! # Examples
//!
//! ```
//! use chatlens::MessageRecord;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 5, 24)
//!     .unwrap()
//!     .and_hms_opt(14, 5, 0)
//!     .unwrap();
//!
//! let record = MessageRecord::new("24/05/2023, 14:05", "Alice", "Hello")
//!     .with_timestamp(ts);
//!
//! assert_eq!(record.author(), "Alice");
//! assert!(record.is_resolved());
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single message recovered from a chat export.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp_text` | `String` | Date/time text exactly as captured by the header pattern |
/// | `timestamp` | `Option<NaiveDateTime>` | Resolved point in time; `None` when unresolved |
/// | `author` | `String` | Author exactly as captured, no trimming |
/// | `message` | `String` | First fragment plus continuation lines, joined by single spaces |
///
/// An unresolved timestamp is a valid, expected state. Consumers should skip
/// such records in date-based aggregation but still count them as messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Original date/time text, unnormalized.
    pub timestamp_text: String,

    /// Resolved timestamp (no timezone), or `None` if no known format matched.
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,

    /// Author name as it appeared between the timestamp and the separator.
    pub author: String,

    /// Full message text.
    pub message: String,
}

impl MessageRecord {
    /// Creates a record with an unresolved timestamp.
    pub fn new(
        timestamp_text: impl Into<String>,
        author: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp_text: timestamp_text.into(),
            timestamp: None,
            author: author.into(),
            message: message.into(),
        }
    }

    /// Builder method to set the resolved timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, ts: NaiveDateTime) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Returns the original timestamp text.
    pub fn timestamp_text(&self) -> &str {
        &self.timestamp_text
    }

    /// Returns the resolved timestamp, if any.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    /// Returns the author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if the timestamp was resolved.
    pub fn is_resolved(&self) -> bool {
        self.timestamp.is_some()
    }
}

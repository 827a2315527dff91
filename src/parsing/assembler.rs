//! Line-to-message assembly.
//!
//! [`MessageAssembler`] is a two-state machine. It starts [`Idle`]; a header
//! line moves it to [`Buffering`], flushing whatever was buffered before.
//! Continuation lines extend the buffered message, or are dropped while idle.
//!
//! [`Idle`]: LineState::Idle
//! [`Buffering`]: LineState::Buffering

use std::mem;

use crate::parsing::header::HeaderMatch;
use crate::record::MessageRecord;

/// Message being accumulated from a header and its continuation lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    timestamp_text: String,
    author: String,
    message: String,
}

impl PendingMessage {
    fn start(header: HeaderMatch<'_>) -> Self {
        Self {
            timestamp_text: header.timestamp_text.to_string(),
            author: header.author.to_string(),
            message: header.message.to_string(),
        }
    }

    fn extend(&mut self, line: &str) {
        self.message.push(' ');
        self.message.push_str(line);
    }

    fn into_record(self) -> MessageRecord {
        MessageRecord::new(self.timestamp_text, self.author, self.message)
    }

    /// Returns the author of the buffered message.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the text accumulated so far.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// State of the line classifier between two lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LineState {
    /// No header seen yet.
    #[default]
    Idle,
    /// A message is open and accepts continuation lines.
    Buffering(PendingMessage),
}

/// Accumulates classified lines into ordered [`MessageRecord`]s.
///
/// Timestamps on the emitted records are left unresolved; resolution is a
/// separate pass (see [`TimestampResolver`](crate::parsing::TimestampResolver)).
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::{HeaderPattern, MessageAssembler};
///
/// let dashed = HeaderPattern::dashed();
/// let mut assembler = MessageAssembler::new();
///
/// assert!(!assembler.push_continuation("noise before any header"));
/// assembler.push_header(dashed.captures("24/05/2023, 14:05 - Alice: Hello").unwrap());
/// assert!(assembler.push_continuation("world"));
///
/// let records = assembler.finish();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].message, "Hello world");
/// ```
#[derive(Debug, Default)]
pub struct MessageAssembler {
    state: LineState,
    records: Vec<MessageRecord>,
}

impl MessageAssembler {
    /// Creates an idle assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn state(&self) -> &LineState {
        &self.state
    }

    /// Returns `true` while a message is open.
    pub fn is_buffering(&self) -> bool {
        matches!(self.state, LineState::Buffering(_))
    }

    /// Returns the number of completed records.
    pub fn completed(&self) -> usize {
        self.records.len()
    }

    /// Starts a new message, flushing the open one (if any).
    pub fn push_header(&mut self, header: HeaderMatch<'_>) {
        let next = LineState::Buffering(PendingMessage::start(header));
        if let LineState::Buffering(done) = mem::replace(&mut self.state, next) {
            self.records.push(done.into_record());
        }
    }

    /// Appends a continuation line to the open message.
    ///
    /// Returns `false` if no message is open and the line was dropped.
    pub fn push_continuation(&mut self, line: &str) -> bool {
        match &mut self.state {
            LineState::Buffering(pending) => {
                pending.extend(line);
                true
            }
            LineState::Idle => false,
        }
    }

    /// Flushes the open message and returns all records in header order.
    pub fn finish(mut self) -> Vec<MessageRecord> {
        if let LineState::Buffering(done) = mem::take(&mut self.state) {
            self.records.push(done.into_record());
        }
        self.records
    }
}

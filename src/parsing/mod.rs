//! Building blocks of the chat-log parser.
//!
//! The parser runs in two independent stages:
//!
//! 1. [`header`] + [`assembler`]: classify each line as a header or a
//!    continuation and assemble [`MessageRecord`](crate::MessageRecord)s with
//!    the raw timestamp text.
//! 2. [`timestamp`]: resolve the collected timestamp texts in one batch.
//!
//! [`ChatLogParser`](crate::parser::ChatLogParser) wires both together; the
//! pieces are public so each stage can be used and tested on its own.

pub mod assembler;
pub mod header;
pub mod timestamp;

pub use assembler::{LineState, MessageAssembler, PendingMessage};
pub use header::{HeaderMatch, HeaderPattern, default_patterns, match_header};
pub use timestamp::TimestampResolver;

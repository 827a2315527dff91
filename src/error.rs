//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers all error
//! cases in the library.
//!
//! Note what is *not* an error here: unrecognized lines and timestamps that
//! match no known format are expected in real exports. The parser absorbs them
//! (dropping, merging, or leaving the timestamp unresolved) and never fails.
//! The only hard failure on the parsing path is decoding raw bytes into text.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::MessageRecord;
///
/// fn my_function() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The raw export bytes are not valid UTF-8.
    ///
    /// Raised before any line is classified; a transcript that cannot be
    /// decoded is rejected as a whole.
    #[error("UTF-8 decoding error in {context}: {source}")]
    Decode {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::str::Utf8Error,
    },

    /// A header pattern could not be compiled or lacks required capture groups.
    #[error("Invalid header pattern '{name}': {message}")]
    InvalidPattern {
        /// Name of the offending pattern
        name: String,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The output path has an extension no writer handles.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::str::Utf8Error> for ChatlensError {
    fn from(err: std::str::Utf8Error) -> Self {
        ChatlensError::Decode {
            context: "chat export".to_string(),
            source: err,
        }
    }
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        err.utf8_error().into()
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a decoding error with context.
    pub fn decode(context: impl Into<String>, source: std::str::Utf8Error) -> Self {
        ChatlensError::Decode {
            context: context.into(),
            source,
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(name: impl Into<String>, message: impl Into<String>) -> Self {
        ChatlensError::InvalidPattern {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if the input could not be decoded as text.
    pub fn is_decode(&self) -> bool {
        matches!(self, ChatlensError::Decode { .. })
    }

    /// Returns `true` if this is an invalid pattern error.
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, ChatlensError::InvalidPattern { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }
}

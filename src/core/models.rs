//! Output configuration shared by all writers.

/// Timestamp layout used for resolved timestamps in every output format.
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Controls which fields the writers emit.
///
/// Resolved timestamp, author and message are always written. The raw
/// timestamp text is opt-in.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Also write the timestamp text exactly as it appeared in the export
    pub include_raw_timestamps: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_raw_timestamps(mut self) -> Self {
        self.include_raw_timestamps = true;
        self
    }
}

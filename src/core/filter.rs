//! Filter records by author, content and date range.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Excluded author | [`excluding_author`](FilterConfig::excluding_author) | Drop an author entirely (e.g. the assistant) |
//! | Text only | [`text_only`](FilterConfig::text_only) | Drop media placeholder messages |
//! | Author | [`with_author`](FilterConfig::with_author) | Keep one author only |
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//!
//! # Examples
//!
//! ```
//! use chatlens::config::AnalysisConfig;
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//! use chatlens::MessageRecord;
//!
//! let records = vec![
//!     MessageRecord::new("t", "Alice", "Hello"),
//!     MessageRecord::new("t", "Meta AI", "How can I help?"),
//!     MessageRecord::new("t", "Bob", "<Media omitted>"),
//! ];
//!
//! let config = FilterConfig::for_analysis(&AnalysisConfig::default()).text_only();
//! let filtered = apply_filters(records, &config);
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].author, "Alice");
//! ```
//!
//! # Behavior Notes
//!
//! - Records with unresolved timestamps are **excluded** only when a date
//!   filter is active
//! - Author matching is case-insensitive for ASCII characters; exclusion is exact
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::{AnalysisConfig, MEDIA_PLACEHOLDERS};
use crate::error::ChatlensError;
use crate::record::MessageRecord;

/// Configuration for filtering records.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only records on or after this timestamp.
    pub after: Option<NaiveDateTime>,

    /// Include only records on or before this timestamp.
    pub before: Option<NaiveDateTime>,

    /// Include only records from this author (case-insensitive).
    pub author: Option<String>,

    /// Drop records from these authors (exact match).
    pub excluded_authors: Vec<String>,

    /// Drop records whose message contains one of these substrings
    /// (case-insensitive). Empty means no content filtering.
    pub excluded_placeholders: Vec<String>,

    /// Placeholders that [`text_only`](Self::text_only) turns on. Empty means
    /// [`MEDIA_PLACEHOLDERS`].
    pub media_placeholders: Vec<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter that drops the assistant's messages and takes its
    /// media placeholders from `analysis`.
    pub fn for_analysis(analysis: &AnalysisConfig) -> Self {
        let mut config = Self::new().excluding_author(analysis.assistant_label.clone());
        config.media_placeholders = analysis.media_placeholders.clone();
        config
    }

    /// Drops records from `author`.
    #[must_use]
    pub fn excluding_author(mut self, author: impl Into<String>) -> Self {
        self.excluded_authors.push(author.into());
        self
    }

    /// Drops messages containing any of the configured media placeholders.
    #[must_use]
    pub fn text_only(self) -> Self {
        if self.media_placeholders.is_empty() {
            return self.excluding_placeholders(MEDIA_PLACEHOLDERS);
        }
        let placeholders = self.media_placeholders.clone();
        self.excluding_placeholders(placeholders)
    }

    /// Drops messages containing any of `placeholders` (case-insensitive).
    #[must_use]
    pub fn excluding_placeholders<I, S>(mut self, placeholders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_placeholders
            .extend(placeholders.into_iter().map(Into::into));
        self
    }

    /// Keeps only records from `author` (case-insensitive).
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        let date = parse_date(date_str)?;
        self.after = Some(date.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        let date = parse_date(date_str)?;
        // End of the day to include the full day
        let end = date
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ChatlensError::invalid_date(date_str))?;
        self.before = Some(end);
        Ok(self)
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter()
            || self.author.is_some()
            || !self.excluded_authors.is_empty()
            || !self.excluded_placeholders.is_empty()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `record` passes every active filter.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        if self.excluded_authors.iter().any(|a| *a == record.author) {
            return false;
        }

        if let Some(ref author) = self.author {
            if !record.author.eq_ignore_ascii_case(author) {
                return false;
            }
        }

        if !self.excluded_placeholders.is_empty() {
            let lower = record.message.to_lowercase();
            if self
                .excluded_placeholders
                .iter()
                .any(|p| lower.contains(&p.to_lowercase()))
            {
                return false;
            }
        }

        if self.has_date_filter() {
            let Some(ts) = record.timestamp else {
                return false;
            };
            if self.after.is_some_and(|after| ts < after) {
                return false;
            }
            if self.before.is_some_and(|before| ts > before) {
                return false;
            }
        }

        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Filters records based on the provided configuration.
///
/// Returns the records that match all active filters, in their original
/// order. If no filters are active, returns the input unchanged.
pub fn apply_filters(records: Vec<MessageRecord>, config: &FilterConfig) -> Vec<MessageRecord> {
    if !config.is_active() {
        return records;
    }

    records.into_iter().filter(|r| config.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(author: &str, message: &str, date: Option<&str>) -> MessageRecord {
        let mut record = MessageRecord::new("raw", author, message);
        if let Some(d) = date {
            let naive = NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap();
            record.timestamp = Some(naive.and_hms_opt(12, 0, 0).unwrap());
        }
        record
    }

    #[test]
    fn test_no_filters_is_identity() {
        let records = vec![make_record("Alice", "Hello", None)];
        let config = FilterConfig::new();
        assert!(!config.is_active());
        assert_eq!(apply_filters(records.clone(), &config), records);
    }

    #[test]
    fn test_excludes_assistant() {
        let records = vec![
            make_record("Alice", "Hello", None),
            make_record("Meta AI", "Hi! Ask me anything", None),
        ];

        let config = FilterConfig::for_analysis(&AnalysisConfig::default());
        let filtered = apply_filters(records, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].author, "Alice");
    }

    #[test]
    fn test_text_only_drops_media() {
        let records = vec![
            make_record("Alice", "<Media omitted>", None),
            make_record("Bob", "‎image omitted", None),
            make_record("Bob", "Video Omitted", None),
            make_record("Alice", "Look at this", None),
        ];

        let filtered = apply_filters(records, &FilterConfig::new().text_only());

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].message, "Look at this");
    }

    #[test]
    fn test_custom_placeholders() {
        let mut analysis = AnalysisConfig::default();
        analysis.media_placeholders = vec!["<Без медиафайлов>".to_string()];

        let records = vec![
            make_record("Муха", "<Без медиафайлов>", None),
            make_record("Муха", "<Media omitted>", None),
        ];
        let config = FilterConfig::for_analysis(&analysis).text_only();
        let filtered = apply_filters(records, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].message, "<Media omitted>");
    }

    #[test]
    fn test_for_analysis_without_text_only_keeps_placeholders() {
        let mut analysis = AnalysisConfig::default();
        analysis.media_placeholders = vec!["<Без медиафайлов>".to_string()];

        let records = vec![make_record("Муха", "<Без медиафайлов>", None)];
        let filtered = apply_filters(records, &FilterConfig::for_analysis(&analysis));

        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_filter_by_author() {
        let records = vec![
            make_record("Alice", "Hello", None),
            make_record("Bob", "Hi", None),
            make_record("alice", "Bye", None),
        ];

        let filtered = apply_filters(records, &FilterConfig::new().with_author("ALICE"));

        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filter_by_date_range() {
        let records = vec![
            make_record("Alice", "Old", Some("2024-01-01")),
            make_record("Alice", "Mid", Some("2024-06-15")),
            make_record("Alice", "New", Some("2024-12-31")),
        ];

        let config = FilterConfig::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_date_to("2024-06-30")
            .unwrap();
        let filtered = apply_filters(records, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].message, "Mid");
    }

    #[test]
    fn test_date_to_is_inclusive() {
        let records = vec![make_record("Alice", "Same day", Some("2024-06-15"))];
        let config = FilterConfig::new().with_date_to("2024-06-15").unwrap();
        assert_eq!(apply_filters(records, &config).len(), 1);
    }

    #[test]
    fn test_unresolved_excluded_only_with_date_filter() {
        let records = vec![
            make_record("Alice", "With date", Some("2024-06-15")),
            make_record("Alice", "No date", None),
        ];

        let by_author = apply_filters(records.clone(), &FilterConfig::new().with_author("Alice"));
        assert_eq!(by_author.len(), 2);

        let by_date = apply_filters(records, &FilterConfig::new().with_date_from("2024-01-01").unwrap());
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[0].message, "With date");
    }

    #[test]
    fn test_invalid_date_format() {
        let result = FilterConfig::new().with_date_from("01-01-2024");
        assert!(matches!(result, Err(ChatlensError::InvalidDate { .. })));

        let result = FilterConfig::new().with_date_to("2024-02-30");
        assert!(result.is_err());
    }

    #[test]
    fn test_with_datetime_directly() {
        let dt = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let config = FilterConfig::new().with_after(dt).with_before(dt);
        assert_eq!(config.after, Some(dt));
        assert_eq!(config.before, Some(dt));
        assert!(config.has_date_filter());
    }

    #[test]
    fn test_combined_filters_preserve_order() {
        let records = vec![
            make_record("Alice", "first", Some("2024-06-15")),
            make_record("Bob", "skip", Some("2024-06-15")),
            make_record("Alice", "<Media omitted>", Some("2024-06-15")),
            make_record("Alice", "second", Some("2024-06-16")),
        ];

        let config = FilterConfig::new()
            .with_author("alice")
            .text_only()
            .with_date_from("2024-06-01")
            .unwrap();
        let filtered = apply_filters(records, &config);

        let messages: Vec<_> = filtered.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["first", "second"]);
    }
}

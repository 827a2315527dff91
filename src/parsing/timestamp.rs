//! Batch timestamp resolution.
//!
//! Header matching only captures the raw date/time text. Turning that text
//! into a [`NaiveDateTime`] is a separate pass over the whole record set:
//! every pending value is tried against the first format, whatever fails is
//! tried against the next, and so on. Values that survive every format stay
//! unresolved (`None`) and the record is kept.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::parsing::header::{BRACKETED_DATE_FORMAT, DASHED_DATE_FORMAT};
use crate::record::MessageRecord;

/// Resolves timestamp text against an ordered list of chrono formats.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::TimestampResolver;
///
/// let resolver = TimestampResolver::default();
/// assert!(resolver.resolve("24/05/2023, 14:05").is_some());
/// assert!(resolver.resolve("24/05/23, 14:05:10").is_some());
/// assert!(resolver.resolve("2023-05-24 14:05").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampResolver {
    formats: Vec<String>,
}

impl Default for TimestampResolver {
    /// Four-digit year without seconds first, then two-digit year with seconds.
    fn default() -> Self {
        Self::new([DASHED_DATE_FORMAT, BRACKETED_DATE_FORMAT])
    }
}

impl TimestampResolver {
    /// Creates a resolver trying `formats` in the given order.
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the formats in priority order.
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// Resolves a single value, returning the first format that parses it.
    pub fn resolve(&self, text: &str) -> Option<NaiveDateTime> {
        self.formats
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    }

    /// Resolves every record's timestamp in place and returns how many stayed
    /// unresolved.
    ///
    /// Any previously resolved value is overwritten, so running this twice
    /// gives the same result as running it once.
    pub fn resolve_all(&self, records: &mut [MessageRecord]) -> usize {
        let mut pending: Vec<usize> = (0..records.len()).collect();

        for format in &self.formats {
            if pending.is_empty() {
                break;
            }
            let before = pending.len();
            pending.retain(|&i| {
                match NaiveDateTime::parse_from_str(&records[i].timestamp_text, format) {
                    Ok(ts) => {
                        records[i].timestamp = Some(ts);
                        false
                    }
                    Err(_) => true,
                }
            });
            debug!(
                format = %format,
                resolved = before - pending.len(),
                remaining = pending.len(),
                "timestamp format pass"
            );
        }

        for &i in &pending {
            records[i].timestamp = None;
        }

        pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_resolve_dashed() {
        let resolver = TimestampResolver::default();
        assert_eq!(
            resolver.resolve("24/05/2023, 14:05"),
            Some(dt(2023, 5, 24, 14, 5, 0))
        );
    }

    #[test]
    fn test_resolve_bracketed() {
        let resolver = TimestampResolver::default();
        assert_eq!(
            resolver.resolve("24/05/23, 14:05:10"),
            Some(dt(2023, 5, 24, 14, 5, 10))
        );
    }

    #[test]
    fn test_resolve_day_first() {
        let resolver = TimestampResolver::default();
        assert_eq!(
            resolver.resolve("03/04/2024, 08:00"),
            Some(dt(2024, 4, 3, 8, 0, 0))
        );
    }

    #[test]
    fn test_resolve_invalid_calendar_date() {
        let resolver = TimestampResolver::default();
        assert!(resolver.resolve("31/02/2023, 10:00").is_none());
        assert!(resolver.resolve("24/13/23, 10:00:00").is_none());
    }

    #[test]
    fn test_two_digit_year_pivot() {
        // chrono reads 00-69 as 20xx and 70-99 as 19xx
        let resolver = TimestampResolver::default();
        assert_eq!(
            resolver.resolve("01/01/68, 10:00:00"),
            Some(dt(2068, 1, 1, 10, 0, 0))
        );
        assert_eq!(
            resolver.resolve("01/01/69, 10:00:00"),
            Some(dt(2069, 1, 1, 10, 0, 0))
        );
        assert_eq!(
            resolver.resolve("01/01/70, 10:00:00"),
            Some(dt(1970, 1, 1, 10, 0, 0))
        );
    }

    #[test]
    fn test_resolve_all_mixed_batch() {
        let mut records = vec![
            MessageRecord::new("24/05/23, 09:00:00", "Bob", "Hi"),
            MessageRecord::new("25/05/2023, 10:00", "Carol", "Yo"),
            MessageRecord::new("26.05.2023, 11:00", "Dave", "Hey"),
        ];

        let unresolved = TimestampResolver::default().resolve_all(&mut records);

        assert_eq!(unresolved, 1);
        assert_eq!(records[0].timestamp, Some(dt(2023, 5, 24, 9, 0, 0)));
        assert_eq!(records[1].timestamp, Some(dt(2023, 5, 25, 10, 0, 0)));
        assert_eq!(records[2].timestamp, None);
    }

    #[test]
    fn test_resolve_all_resets_stale_values() {
        let stale = dt(2000, 1, 1, 0, 0, 0);
        let mut records = vec![MessageRecord::new("garbage", "Bob", "Hi").with_timestamp(stale)];

        let unresolved = TimestampResolver::default().resolve_all(&mut records);

        assert_eq!(unresolved, 1);
        assert!(records[0].timestamp.is_none());
    }

    #[test]
    fn test_resolve_all_empty() {
        let mut records: Vec<MessageRecord> = Vec::new();
        assert_eq!(TimestampResolver::default().resolve_all(&mut records), 0);
    }

    #[test]
    fn test_custom_format_order() {
        let resolver = TimestampResolver::new(["%d.%m.%Y, %H:%M"]);
        assert_eq!(resolver.formats(), ["%d.%m.%Y, %H:%M".to_string()]);
        assert!(resolver.resolve("26.10.2025, 20:40").is_some());
        assert!(resolver.resolve("24/05/2023, 14:05").is_none());
    }

    #[test]
    fn test_no_formats_leaves_everything_unresolved() {
        let mut records = vec![MessageRecord::new("24/05/2023, 14:05", "Alice", "Hi")];
        let unresolved = TimestampResolver::new(Vec::<String>::new()).resolve_all(&mut records);
        assert_eq!(unresolved, 1);
    }
}

//! Conversation analysis over parsed records.
//!
//! Everything here is a pure function of `&[MessageRecord]`. Counting
//! functions (summary, per-author activity, media) use every record; anything
//! that needs a point in time (buckets, response times, interactions,
//! conversation starters) skips records whose timestamp is unresolved.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::AnalysisConfig;
//! use chatlens::core::analysis::ChatReport;
//! use chatlens::parser::ChatLogParser;
//!
//! let records = ChatLogParser::new().parse(
//!     "24/05/2023, 14:05 - Alice: Hello\n24/05/2023, 14:06 - Bob: Hi Alice",
//! );
//! let report = ChatReport::build(&records, &AnalysisConfig::default());
//!
//! assert_eq!(report.summary.total_messages, 2);
//! assert_eq!(report.summary.participants, 2);
//! assert_eq!(report.top_interactions[0].to_string(), "Bob ➔ Alice");
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::ops::AddAssign;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::record::MessageRecord;

/// Weekdays in the order used by every weekday-indexed array.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ============================================================================
// Summary
// ============================================================================

/// Headline numbers for one chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatSummary {
    pub total_messages: usize,
    pub participants: usize,
    pub unresolved: usize,
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
    /// Whole days between first and last message, at least 1.
    pub days_active: i64,
    /// `total_messages / days_active`, rounded down.
    pub messages_per_day: usize,
}

impl ChatSummary {
    pub fn from_records(records: &[MessageRecord]) -> Self {
        let participants = records
            .iter()
            .map(|r| r.author.as_str())
            .collect::<HashSet<_>>()
            .len();
        let first = records.iter().filter_map(|r| r.timestamp).min();
        let last = records.iter().filter_map(|r| r.timestamp).max();

        let days_active = match (first, last) {
            (Some(first), Some(last)) => (last - first).num_days().max(1),
            _ => 1,
        };

        Self {
            total_messages: records.len(),
            participants,
            unresolved: records.iter().filter(|r| !r.is_resolved()).count(),
            first,
            last,
            days_active,
            messages_per_day: records.len() / days_active.unsigned_abs() as usize,
        }
    }
}

// ============================================================================
// Per-author activity
// ============================================================================

/// How much an author talks relative to the whole chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Talkativeness {
    VeryTalkative,
    Talkative,
    Moderate,
    Quiet,
    VeryQuiet,
}

impl Talkativeness {
    /// Rates a share of all messages, given in percent.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 30.0 {
            Talkativeness::VeryTalkative
        } else if percentage >= 20.0 {
            Talkativeness::Talkative
        } else if percentage >= 10.0 {
            Talkativeness::Moderate
        } else if percentage >= 5.0 {
            Talkativeness::Quiet
        } else {
            Talkativeness::VeryQuiet
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Talkativeness::VeryTalkative => "Very Talkative",
            Talkativeness::Talkative => "Talkative",
            Talkativeness::Moderate => "Moderate",
            Talkativeness::Quiet => "Quiet",
            Talkativeness::VeryQuiet => "Very Quiet",
        }
    }
}

impl fmt::Display for Talkativeness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Message count and share for one author.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorActivity {
    pub author: String,
    pub messages: usize,
    /// Share of all messages in percent, one decimal.
    pub percentage: f64,
    pub rating: Talkativeness,
}

/// Counts messages per author, most active first (ties by name).
pub fn author_activity(records: &[MessageRecord]) -> Vec<AuthorActivity> {
    let total = records.len();
    count_by_author(records.iter().map(|r| r.author.as_str()))
        .into_iter()
        .map(|AuthorCount { author, count }| {
            let percentage = round_one_decimal(count as f64 / total as f64 * 100.0);
            AuthorActivity {
                author,
                messages: count,
                percentage,
                rating: Talkativeness::from_percentage(percentage),
            }
        })
        .collect()
}

/// An author and how often something happened for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCount {
    pub author: String,
    pub count: usize,
}

fn count_by_author<'a>(authors: impl Iterator<Item = &'a str>) -> Vec<AuthorCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for author in authors {
        *counts.entry(author).or_default() += 1;
    }

    let mut counts: Vec<AuthorCount> = counts
        .into_iter()
        .map(|(author, count)| AuthorCount {
            author: author.to_string(),
            count,
        })
        .collect();
    // BTreeMap already yields names in order; a stable sort keeps it for ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ============================================================================
// Time buckets
// ============================================================================

/// Messages in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// `YYYY-MM`
    pub month: String,
    pub messages: usize,
}

/// Messages per calendar month, oldest first. Months without messages are
/// omitted.
pub fn messages_by_month(records: &[MessageRecord]) -> Vec<MonthlyCount> {
    let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for ts in records.iter().filter_map(|r| r.timestamp) {
        *months.entry((ts.year(), ts.month())).or_default() += 1;
    }

    months
        .into_iter()
        .map(|((year, month), messages)| MonthlyCount {
            month: format!("{year:04}-{month:02}"),
            messages,
        })
        .collect()
}

/// Messages per hour of day, index 0-23.
pub fn messages_by_hour(records: &[MessageRecord]) -> [usize; 24] {
    let mut hours = [0usize; 24];
    for ts in records.iter().filter_map(|r| r.timestamp) {
        hours[ts.hour() as usize] += 1;
    }
    hours
}

/// Messages per weekday, Monday first (see [`WEEKDAYS`]).
pub fn messages_by_weekday(records: &[MessageRecord]) -> [usize; 7] {
    let mut days = [0usize; 7];
    for ts in records.iter().filter_map(|r| r.timestamp) {
        days[ts.weekday().num_days_from_monday() as usize] += 1;
    }
    days
}

/// Messages per (weekday, hour) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityHeatmap {
    /// `cells[weekday][hour]`, Monday first.
    pub cells: [[usize; 24]; 7],
}

/// The busiest heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeakActivity {
    pub weekday: Weekday,
    pub hour: u32,
    pub messages: usize,
}

impl ActivityHeatmap {
    pub fn from_records(records: &[MessageRecord]) -> Self {
        let mut cells = [[0usize; 24]; 7];
        for ts in records.iter().filter_map(|r| r.timestamp) {
            cells[ts.weekday().num_days_from_monday() as usize][ts.hour() as usize] += 1;
        }
        Self { cells }
    }

    /// Messages in one cell. `None` if `hour` is outside `0..24`.
    pub fn get(&self, weekday: Weekday, hour: u32) -> Option<usize> {
        let row = &self.cells[weekday.num_days_from_monday() as usize];
        row.get(usize::try_from(hour).ok()?).copied()
    }

    /// Busiest cell; the earliest one in the week wins ties. `None` if empty.
    pub fn peak(&self) -> Option<PeakActivity> {
        let mut peak: Option<PeakActivity> = None;
        for (day, row) in WEEKDAYS.iter().zip(self.cells.iter()) {
            for (hour, &messages) in row.iter().enumerate() {
                if messages > peak.map_or(0, |p| p.messages) {
                    peak = Some(PeakActivity {
                        weekday: *day,
                        hour: hour as u32,
                        messages,
                    });
                }
            }
        }
        peak
    }
}

// ============================================================================
// Reply dynamics
// ============================================================================

/// Records with a resolved timestamp, oldest first. Equal timestamps keep
/// their export order.
fn chronological(records: &[MessageRecord]) -> Vec<(&MessageRecord, NaiveDateTime)> {
    let mut timed: Vec<_> = records
        .iter()
        .filter_map(|r| r.timestamp.map(|ts| (r, ts)))
        .collect();
    timed.sort_by_key(|&(_, ts)| ts);
    timed
}

/// Mean reply delay for one author.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTime {
    pub author: String,
    pub mean_minutes: f64,
    pub replies: usize,
}

/// Mean response time per author, fastest first.
///
/// A reply is a message whose author differs from the previous message's
/// author and that arrives within `reply_window_secs`. Longer gaps (e.g.
/// overnight) are ignored rather than counted as slow replies.
pub fn response_times(records: &[MessageRecord], config: &AnalysisConfig) -> Vec<ResponseTime> {
    let mut totals: BTreeMap<&str, (i64, usize)> = BTreeMap::new();

    for pair in chronological(records).windows(2) {
        let (prev, prev_ts) = pair[0];
        let (cur, cur_ts) = pair[1];
        if cur.author == prev.author {
            continue;
        }
        let delta = (cur_ts - prev_ts).num_seconds();
        if delta <= config.reply_window_secs {
            let entry = totals.entry(cur.author.as_str()).or_default();
            entry.0 += delta;
            entry.1 += 1;
        }
    }

    let mut times: Vec<ResponseTime> = totals
        .into_iter()
        .map(|(author, (seconds, replies))| ResponseTime {
            author: author.to_string(),
            mean_minutes: seconds as f64 / 60.0 / replies as f64,
            replies,
        })
        .collect();
    times.sort_by(|a, b| a.mean_minutes.total_cmp(&b.mean_minutes));
    times
}

/// How often `responder` answered `recipient` quickly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub responder: String,
    pub recipient: String,
    pub count: usize,
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ➔ {}", self.responder, self.recipient)
    }
}

/// Most frequent reply pairs within `interaction_window_secs`, limited to
/// `top_interactions` entries.
pub fn top_interactions(records: &[MessageRecord], config: &AnalysisConfig) -> Vec<Interaction> {
    let mut pairs: BTreeMap<(&str, &str), usize> = BTreeMap::new();

    for pair in chronological(records).windows(2) {
        let (prev, prev_ts) = pair[0];
        let (cur, cur_ts) = pair[1];
        if cur.author != prev.author
            && (cur_ts - prev_ts).num_seconds() <= config.interaction_window_secs
        {
            *pairs
                .entry((cur.author.as_str(), prev.author.as_str()))
                .or_default() += 1;
        }
    }

    let mut interactions: Vec<Interaction> = pairs
        .into_iter()
        .map(|((responder, recipient), count)| Interaction {
            responder: responder.to_string(),
            recipient: recipient.to_string(),
            count,
        })
        .collect();
    interactions.sort_by(|a, b| b.count.cmp(&a.count));
    interactions.truncate(config.top_interactions);
    interactions
}

/// Who opens conversations: the author of every message that follows a
/// silence longer than `silence_threshold_secs`, plus the very first message.
pub fn conversation_starters(records: &[MessageRecord], config: &AnalysisConfig) -> Vec<AuthorCount> {
    let timed = chronological(records);
    let starters = timed.iter().enumerate().filter_map(|(i, &(record, ts))| {
        let is_start = i == 0 || (ts - timed[i - 1].1).num_seconds() > config.silence_threshold_secs;
        is_start.then_some(record.author.as_str())
    });
    count_by_author(starters)
}

// ============================================================================
// Media
// ============================================================================

/// Media and special-message flags, per message or summed over a chat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MediaCounts {
    pub images: usize,
    pub videos: usize,
    pub gifs: usize,
    pub stickers: usize,
    pub voice: usize,
    pub links: usize,
    pub deleted: usize,
}

impl MediaCounts {
    /// Flags for a single message; each field is 0 or 1.
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        let flag = |hit: bool| usize::from(hit);

        Self {
            images: flag(lower.contains("image omitted")),
            videos: flag(lower.contains("video omitted")),
            gifs: flag(lower.contains("gif omitted")),
            stickers: flag(lower.contains("sticker omitted")),
            voice: flag(lower.contains("audio omitted") || lower.contains("ptt omitted")),
            links: flag(message.contains("http://") || message.contains("https://")),
            deleted: flag(
                lower.contains("this message was deleted")
                    || lower.contains("you deleted this message"),
            ),
        }
    }

    pub fn total(&self) -> usize {
        self.images + self.videos + self.gifs + self.stickers + self.voice + self.links + self.deleted
    }
}

impl AddAssign for MediaCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.images += rhs.images;
        self.videos += rhs.videos;
        self.gifs += rhs.gifs;
        self.stickers += rhs.stickers;
        self.voice += rhs.voice;
        self.links += rhs.links;
        self.deleted += rhs.deleted;
    }
}

/// Media flags summed over all records.
pub fn media_totals(records: &[MessageRecord]) -> MediaCounts {
    let mut totals = MediaCounts::default();
    for record in records {
        totals += MediaCounts::from_message(&record.message);
    }
    totals
}

// ============================================================================
// Report
// ============================================================================

/// Every analysis in one serializable bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReport {
    pub summary: ChatSummary,
    pub authors: Vec<AuthorActivity>,
    pub by_month: Vec<MonthlyCount>,
    pub by_hour: [usize; 24],
    pub by_weekday: [usize; 7],
    pub heatmap: ActivityHeatmap,
    pub peak: Option<PeakActivity>,
    pub response_times: Vec<ResponseTime>,
    pub top_interactions: Vec<Interaction>,
    pub conversation_starters: Vec<AuthorCount>,
    pub media: MediaCounts,
}

impl ChatReport {
    /// Runs every analysis over `records`.
    ///
    /// Filtering (assistant, media placeholders) is the caller's choice; see
    /// [`FilterConfig`](crate::core::filter::FilterConfig).
    pub fn build(records: &[MessageRecord], config: &AnalysisConfig) -> Self {
        let heatmap = ActivityHeatmap::from_records(records);
        let peak = heatmap.peak();

        Self {
            summary: ChatSummary::from_records(records),
            authors: author_activity(records),
            by_month: messages_by_month(records),
            by_hour: messages_by_hour(records),
            by_weekday: messages_by_weekday(records),
            heatmap,
            peak,
            response_times: response_times(records, config),
            top_interactions: top_interactions(records, config),
            conversation_starters: conversation_starters(records, config),
            media: media_totals(records),
        }
    }
}

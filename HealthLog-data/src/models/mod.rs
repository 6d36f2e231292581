// Storage models for persisted readings
pub mod blood_pressure;
pub mod inr;

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, SecondsFormat, Utc};

/// Years whose timestamps format to the fixed-width stored form
pub const STORABLE_YEARS: RangeInclusive<i32> = 1..=9999;

/// Format a timestamp the way it is stored.
///
/// All stored `record_time` values use this fixed-width UTC form so that
/// string comparison in SQL and in memory orders them chronologically.
/// Only timestamps within [`STORABLE_YEARS`] keep that width.
pub fn format_record_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Whether `time` can be stored without breaking chronological ordering
pub fn is_storable_record_time(time: &DateTime<Utc>) -> bool {
    STORABLE_YEARS.contains(&time.year())
}

/// Common accessors the stores need to index and filter readings
pub trait StoredReading {
    /// Unique identifier of the reading
    fn id(&self) -> &str;

    /// Stored `record_time` (see [`format_record_time`])
    fn record_time(&self) -> &str;
}

/// Filter applied when listing readings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingFilter {
    /// Inclusive lower bound on `record_time`
    pub start: Option<String>,

    /// Inclusive upper bound on `record_time`
    pub end: Option<String>,

    /// Maximum number of readings to return
    pub limit: Option<usize>,
}

impl ReadingFilter {
    /// Check whether a stored timestamp falls inside the bounds
    pub fn matches(&self, record_time: &str) -> bool {
        if let Some(start) = &self.start {
            if record_time < start.as_str() {
                return false;
            }
        }
        if let Some(end) = &self.end {
            if record_time > end.as_str() {
                return false;
            }
        }
        true
    }
}

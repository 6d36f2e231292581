//! Resolution of the trend and report time windows
//!
//! A window always covers whole local days: it starts at local midnight of
//! its first day and ends at the last millisecond of its last day.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use health_log_data::models::STORABLE_YEARS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Errors raised while resolving a time range
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    #[error("Unknown time range: {0} (expected 7d, 30d, 90d or custom)")]
    UnknownPreset(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Start date {start} is after end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },

    #[error("Date {0} is outside the supported years 1 to 9999")]
    OutOfRange(NaiveDate),
}

/// Named windows offered by the trends and report views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum TimeRangePreset {
    #[serde(rename = "7d")]
    Last7Days,
    #[default]
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    #[serde(rename = "custom")]
    Custom,
}

impl TimeRangePreset {
    /// Number of days looked back, `None` for custom windows
    pub fn days(&self) -> Option<i64> {
        match self {
            TimeRangePreset::Last7Days => Some(7),
            TimeRangePreset::Last30Days => Some(30),
            TimeRangePreset::Last90Days => Some(90),
            TimeRangePreset::Custom => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRangePreset::Last7Days => "7d",
            TimeRangePreset::Last30Days => "30d",
            TimeRangePreset::Last90Days => "90d",
            TimeRangePreset::Custom => "custom",
        }
    }

    /// Resolve the window relative to `now` in timezone `tz`
    ///
    /// Custom windows default to the 30 day start and to today when a bound
    /// is missing; the custom bounds are ignored for the other presets.
    pub fn resolve<Tz: TimeZone>(
        &self,
        now: DateTime<Utc>,
        tz: &Tz,
        custom_start: Option<NaiveDate>,
        custom_end: Option<NaiveDate>,
    ) -> Result<TimeRange, TimeRangeError> {
        let today = now.with_timezone(tz).date_naive();
        let days_back = |days: i64| {
            today
                .checked_sub_signed(Duration::days(days))
                .ok_or(TimeRangeError::OutOfRange(today))
        };

        let (start_date, end_date) = match (self.days(), custom_start) {
            (Some(days), _) => (days_back(days)?, today),
            (None, Some(start)) => (start, custom_end.unwrap_or(today)),
            (None, None) => (days_back(30)?, custom_end.unwrap_or(today)),
        };

        TimeRange::between(start_date, end_date, tz)
    }
}

impl fmt::Display for TimeRangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRangePreset {
    type Err = TimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7d" => Ok(TimeRangePreset::Last7Days),
            "30d" => Ok(TimeRangePreset::Last30Days),
            "90d" => Ok(TimeRangePreset::Last90Days),
            "custom" => Ok(TimeRangePreset::Custom),
            _ => Err(TimeRangeError::UnknownPreset(s.to_string())),
        }
    }
}

/// Inclusive window of whole local days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct TimeRange {
    /// First local day of the window
    pub start_date: NaiveDate,
    /// Last local day of the window
    pub end_date: NaiveDate,
    /// Local midnight of `start_date`
    pub start: DateTime<Utc>,
    /// Last millisecond of `end_date`
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Window covering `start_date` through `end_date` in timezone `tz`
    pub fn between<Tz: TimeZone>(
        start_date: NaiveDate,
        end_date: NaiveDate,
        tz: &Tz,
    ) -> Result<Self, TimeRangeError> {
        for date in [start_date, end_date] {
            if !STORABLE_YEARS.contains(&date.year()) {
                return Err(TimeRangeError::OutOfRange(date));
            }
        }
        if start_date > end_date {
            return Err(TimeRangeError::StartAfterEnd {
                start: start_date,
                end: end_date,
            });
        }

        let end = start_of_day(end_date, tz)
            .checked_add_signed(Duration::days(1) - Duration::milliseconds(1))
            .ok_or(TimeRangeError::OutOfRange(end_date))?;

        Ok(Self {
            start_date,
            end_date,
            start: start_of_day(start_date, tz),
            end,
        })
    }

    /// `YYYY-MM-DD to YYYY-MM-DD`
    pub fn label(&self) -> String {
        format!(
            "{} to {}",
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }

    /// Whether an instant falls inside the window
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }
}

/// Parse a `YYYY-MM-DD` query parameter
pub fn parse_day(raw: &str) -> Result<NaiveDate, TimeRangeError> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| TimeRangeError::InvalidDate(raw.to_string()))?;
    if STORABLE_YEARS.contains(&date.year()) {
        Ok(date)
    } else {
        Err(TimeRangeError::OutOfRange(date))
    }
}

fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = NaiveDateTime::new(date, NaiveTime::default());
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(time) => time.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        // midnight skipped by a DST jump; read the wall time as UTC offset
        LocalResult::None => tz.from_utc_datetime(&midnight).with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 20, 15, 30, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_seven_day_preset() {
        let range = TimeRangePreset::Last7Days.resolve(now(), &Utc, None, None).unwrap();

        assert_eq!(range.start_date, day(2026, 1, 13));
        assert_eq!(range.end_date, day(2026, 1, 20));
        assert_eq!(range.start, Utc.with_ymd_and_hms(2026, 1, 13, 0, 0, 0).unwrap());
        assert_eq!(range.end.to_rfc3339(), "2026-01-20T23:59:59.999+00:00");
        assert_eq!(range.label(), "2026-01-13 to 2026-01-20");
    }

    #[test]
    fn test_presets_use_local_days() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        // 15:30 UTC is already the 21st in UTC+9
        let range = TimeRangePreset::Last30Days
            .resolve(now(), &tokyo, None, None)
            .unwrap();

        assert_eq!(range.end_date, day(2026, 1, 21));
        assert_eq!(range.start_date, day(2025, 12, 22));
        assert_eq!(range.start, Utc.with_ymd_and_hms(2025, 12, 21, 15, 0, 0).unwrap());
    }

    #[test]
    fn test_custom_range_defaults() {
        let range = TimeRangePreset::Custom
            .resolve(now(), &Utc, Some(day(2026, 1, 1)), None)
            .unwrap();
        assert_eq!(range.label(), "2026-01-01 to 2026-01-20");

        let range = TimeRangePreset::Custom.resolve(now(), &Utc, None, None).unwrap();
        assert_eq!(range.start_date, day(2025, 12, 21));
    }

    #[test]
    fn test_custom_range_rejects_reversed_bounds() {
        let result = TimeRangePreset::Custom.resolve(
            now(),
            &Utc,
            Some(day(2026, 1, 10)),
            Some(day(2026, 1, 5)),
        );
        assert!(matches!(result, Err(TimeRangeError::StartAfterEnd { .. })));
    }

    #[test]
    fn test_far_out_dates_are_rejected_instead_of_overflowing() {
        assert!(matches!(
            parse_day("+262142-12-31"),
            Err(TimeRangeError::OutOfRange(_))
        ));

        let far = NaiveDate::from_ymd_opt(262142, 12, 31).unwrap();
        let result = TimeRangePreset::Custom.resolve(now(), &Utc, None, Some(far));
        assert_eq!(result, Err(TimeRangeError::OutOfRange(far)));

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let result = TimeRange::between(NaiveDate::MIN, day(2026, 1, 1), &tokyo);
        assert_eq!(result, Err(TimeRangeError::OutOfRange(NaiveDate::MIN)));

        assert!(TimeRange::between(day(9999, 12, 31), day(9999, 12, 31), &Utc).is_ok());
    }

    #[test]
    fn test_single_day_window_contains_its_edges() {
        let range = TimeRange::between(day(2026, 1, 20), day(2026, 1, 20), &Utc).unwrap();
        assert!(range.contains(&Utc.with_ymd_and_hms(2026, 1, 20, 0, 0, 0).unwrap()));
        assert!(range.contains(&Utc.with_ymd_and_hms(2026, 1, 20, 23, 59, 59).unwrap()));
        assert!(!range.contains(&Utc.with_ymd_and_hms(2026, 1, 21, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_preset_and_day_parsing() {
        assert_eq!("90D".parse::<TimeRangePreset>().unwrap(), TimeRangePreset::Last90Days);
        assert!("1y".parse::<TimeRangePreset>().is_err());
        assert_eq!(parse_day("2026-01-20").unwrap(), day(2026, 1, 20));
        assert!(matches!(parse_day("20/01/2026"), Err(TimeRangeError::InvalidDate(_))));
    }
}

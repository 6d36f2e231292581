//! Day-level aggregation of readings
//!
//! Readings are grouped by the local calendar date of their timestamp in an
//! explicit timezone and averaged per day. INR averages keep two decimals,
//! pressure and heart rate averages are whole numbers. Every function here
//! is pure; empty input yields empty output (or zeroes for the scalar
//! statistics).
//!
//! Non-finite values are not filtered: a NaN in a bucket makes that day's
//! average NaN.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};

use crate::entities::{
    BloodPressureReading, BloodPressureStats, DailyAggregatePoint, DailyValue, InrReading,
};

/// Anything carrying a measurement timestamp
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

impl Timestamped for InrReading {
    fn timestamp(&self) -> DateTime<Utc> {
        self.record_time
    }
}

impl Timestamped for BloodPressureReading {
    fn timestamp(&self) -> DateTime<Utc> {
        self.record_time
    }
}

/// Rounding applied to an average
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Two decimal places
    Hundredths,
    /// Nearest integer
    Whole,
}

/// Round half away from zero to the given precision
pub fn round_to(value: f64, precision: Precision) -> f64 {
    match precision {
        Precision::Hundredths => (value * 100.0).round() / 100.0,
        Precision::Whole => value.round(),
    }
}

/// Local calendar date of `timestamp` in `tz`, formatted `YYYY-MM-DD`
pub fn day_key<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String {
    timestamp
        .with_timezone(tz)
        .date_naive()
        .format("%Y-%m-%d")
        .to_string()
}

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn get(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

fn whole(value: f64) -> u16 {
    round_to(value, Precision::Whole) as u16
}

/// Average the selected value of each item per local day
///
/// Items for which `selector` returns `None` are skipped; days that end up
/// with no values are omitted. The result is sorted by date ascending.
pub fn aggregate_by_day<T, Tz, F>(
    items: &[T],
    tz: &Tz,
    precision: Precision,
    selector: F,
) -> Vec<DailyValue>
where
    T: Timestamped,
    Tz: TimeZone,
    F: Fn(&T) -> Option<f64>,
{
    let mut buckets: BTreeMap<String, Mean> = BTreeMap::new();

    for item in items {
        if let Some(value) = selector(item) {
            buckets
                .entry(day_key(&item.timestamp(), tz))
                .or_default()
                .push(value);
        }
    }

    buckets
        .into_iter()
        .filter_map(|(date, mean)| {
            mean.get().map(|avg| DailyValue {
                date,
                value: round_to(avg, precision),
            })
        })
        .collect()
}

/// Daily average INR, two decimals
pub fn aggregate_inr_by_day<Tz: TimeZone>(
    readings: &[InrReading],
    tz: &Tz,
) -> Vec<DailyAggregatePoint> {
    aggregate_by_day(readings, tz, Precision::Hundredths, |r| Some(r.value))
        .into_iter()
        .map(|day| DailyAggregatePoint::value(day.date, day.value))
        .collect()
}

/// Daily average systolic and diastolic pressure, whole numbers
pub fn aggregate_blood_pressure_by_day<Tz: TimeZone>(
    readings: &[BloodPressureReading],
    tz: &Tz,
) -> Vec<DailyAggregatePoint> {
    let mut buckets: BTreeMap<String, (Mean, Mean)> = BTreeMap::new();

    for reading in readings {
        let (systolic, diastolic) = buckets
            .entry(day_key(&reading.record_time, tz))
            .or_default();
        systolic.push(f64::from(reading.systolic));
        diastolic.push(f64::from(reading.diastolic));
    }

    buckets
        .into_iter()
        .filter_map(|(date, (systolic, diastolic))| {
            Some(DailyAggregatePoint::blood_pressure(
                date,
                whole(systolic.get()?),
                whole(diastolic.get()?),
            ))
        })
        .collect()
}

/// Daily average heart rate over readings that carry one
pub fn aggregate_heart_rate_by_day<Tz: TimeZone>(
    readings: &[BloodPressureReading],
    tz: &Tz,
) -> Vec<DailyAggregatePoint> {
    aggregate_by_day(readings, tz, Precision::Whole, |r| r.heart_rate.map(f64::from))
        .into_iter()
        .map(|day| DailyAggregatePoint::heart_rate(day.date, whole(day.value)))
        .collect()
}

/// Percentage of readings flagged in range, rounded; 0 for no readings
///
/// Readings whose flag is unknown count against the rate.
pub fn compute_in_range_rate(readings: &[InrReading]) -> u8 {
    if readings.is_empty() {
        return 0;
    }

    let in_range = readings
        .iter()
        .filter(|r| r.is_in_range == Some(true))
        .count();

    round_to(in_range as f64 / readings.len() as f64 * 100.0, Precision::Whole) as u8
}

/// Whole-number averages over all readings
///
/// The heart rate average only considers readings that have one.
pub fn compute_blood_pressure_stats(readings: &[BloodPressureReading]) -> BloodPressureStats {
    let mut systolic = Mean::default();
    let mut diastolic = Mean::default();
    let mut heart_rate = Mean::default();

    for reading in readings {
        systolic.push(f64::from(reading.systolic));
        diastolic.push(f64::from(reading.diastolic));
        if let Some(bpm) = reading.heart_rate {
            heart_rate.push(f64::from(bpm));
        }
    }

    BloodPressureStats {
        avg_systolic: systolic.get().map(whole).unwrap_or(0),
        avg_diastolic: diastolic.get().map(whole).unwrap_or(0),
        avg_heart_rate: heart_rate.get().map(whole).unwrap_or(0),
        count: readings.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    fn inr(value: f64, record_time: &str, in_range: Option<bool>) -> InrReading {
        InrReading {
            id: String::new(),
            value,
            record_time: at(record_time),
            warfarin_dose_mg: 3.0,
            is_in_range: in_range,
            target_range_low: Some(2.0),
            target_range_high: Some(3.0),
            note: None,
        }
    }

    fn bp(systolic: u16, diastolic: u16, heart_rate: Option<u16>, record_time: &str) -> BloodPressureReading {
        BloodPressureReading {
            id: String::new(),
            systolic,
            diastolic,
            heart_rate,
            position: None,
            record_time: at(record_time),
        }
    }

    #[test]
    fn test_inr_same_day_is_averaged() {
        let readings = vec![
            inr(2.5, "2026-01-20T08:00:00Z", None),
            inr(2.7, "2026-01-20T18:00:00Z", None),
        ];

        let series = aggregate_inr_by_day(&readings, &Utc);
        assert_eq!(series, vec![DailyAggregatePoint::value("2026-01-20", 2.6)]);
    }

    #[test]
    fn test_inr_average_rounds_to_two_decimals() {
        let readings = vec![
            inr(2.555, "2026-01-20T08:00:00Z", None),
            inr(2.666, "2026-01-20T09:00:00Z", None),
        ];

        let series = aggregate_inr_by_day(&readings, &Utc);
        assert_eq!(series[0].value, Some(2.61));
    }

    #[test]
    fn test_days_are_separate_and_ascending() {
        let readings = vec![
            inr(2.8, "2026-01-22T08:00:00Z", None),
            inr(2.5, "2026-01-20T08:00:00Z", None),
            inr(2.1, "2026-01-21T08:00:00Z", None),
        ];

        let dates: Vec<String> = aggregate_inr_by_day(&readings, &Utc)
            .into_iter()
            .map(|p| p.date)
            .collect();
        assert_eq!(dates, vec!["2026-01-20", "2026-01-21", "2026-01-22"]);
    }

    #[test]
    fn test_grouping_uses_the_given_timezone() {
        // 23:30 UTC on the 20th is already the 21st at UTC+8
        let readings = vec![
            inr(2.0, "2026-01-20T10:00:00Z", None),
            inr(3.0, "2026-01-20T23:30:00Z", None),
        ];

        assert_eq!(aggregate_inr_by_day(&readings, &Utc).len(), 1);

        let shanghai = FixedOffset::east_opt(8 * 3600).unwrap();
        let series = aggregate_inr_by_day(&readings, &shanghai);
        assert_eq!(
            series,
            vec![
                DailyAggregatePoint::value("2026-01-20", 2.0),
                DailyAggregatePoint::value("2026-01-21", 3.0),
            ]
        );
    }

    #[test]
    fn test_blood_pressure_daily_average() {
        let readings = vec![
            bp(120, 80, None, "2026-01-20T08:00:00Z"),
            bp(130, 85, None, "2026-01-20T20:00:00Z"),
        ];

        let series = aggregate_blood_pressure_by_day(&readings, &Utc);
        assert_eq!(
            series,
            vec![DailyAggregatePoint::blood_pressure("2026-01-20", 125, 83)]
        );
    }

    #[test]
    fn test_heart_rate_ignores_missing_values() {
        let readings = vec![
            bp(120, 80, Some(70), "2026-01-20T08:00:00Z"),
            bp(125, 82, None, "2026-01-20T12:00:00Z"),
            bp(130, 85, Some(80), "2026-01-20T20:00:00Z"),
            bp(118, 78, None, "2026-01-21T08:00:00Z"),
        ];

        let series = aggregate_heart_rate_by_day(&readings, &Utc);
        assert_eq!(series, vec![DailyAggregatePoint::heart_rate("2026-01-20", 75)]);
    }

    #[test]
    fn test_heart_rate_single_present_value() {
        let readings = vec![
            bp(120, 80, Some(70), "2026-01-20T08:00:00Z"),
            bp(130, 85, None, "2026-01-20T20:00:00Z"),
        ];

        let series = aggregate_heart_rate_by_day(&readings, &Utc);
        assert_eq!(series[0].heart_rate, Some(70));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(aggregate_inr_by_day(&[], &Utc).is_empty());
        assert!(aggregate_blood_pressure_by_day(&[], &Utc).is_empty());
        assert!(aggregate_heart_rate_by_day(&[], &Utc).is_empty());
        assert_eq!(compute_in_range_rate(&[]), 0);
        assert_eq!(compute_blood_pressure_stats(&[]), BloodPressureStats::default());
    }

    #[test]
    fn test_in_range_rate() {
        let readings = vec![
            inr(2.5, "2026-01-20T08:00:00Z", Some(true)),
            inr(1.8, "2026-01-21T08:00:00Z", Some(false)),
            inr(2.2, "2026-01-22T08:00:00Z", Some(true)),
            inr(3.4, "2026-01-23T08:00:00Z", Some(false)),
        ];
        assert_eq!(compute_in_range_rate(&readings), 50);
        assert_eq!(compute_in_range_rate(&readings[..1]), 100);
    }

    #[test]
    fn test_in_range_rate_counts_unknown_as_out_of_range() {
        let readings = vec![
            inr(2.5, "2026-01-20T08:00:00Z", Some(true)),
            inr(2.5, "2026-01-21T08:00:00Z", None),
            inr(2.5, "2026-01-22T08:00:00Z", None),
        ];
        assert_eq!(compute_in_range_rate(&readings), 33);
    }

    #[test]
    fn test_blood_pressure_stats() {
        let readings = vec![
            bp(120, 80, Some(70), "2026-01-20T08:00:00Z"),
            bp(130, 85, None, "2026-01-21T08:00:00Z"),
        ];

        let stats = compute_blood_pressure_stats(&readings);
        assert_eq!(
            stats,
            BloodPressureStats {
                avg_systolic: 125,
                avg_diastolic: 83,
                avg_heart_rate: 70,
                count: 2,
            }
        );
    }

    #[test]
    fn test_stats_without_heart_rate() {
        let stats = compute_blood_pressure_stats(&[bp(120, 80, None, "2026-01-20T08:00:00Z")]);
        assert_eq!(stats.avg_heart_rate, 0);
        assert_eq!(stats.count, 1);
    }

    #[test]
    fn test_generic_aggregation_skips_unselected_days() {
        let readings = vec![
            bp(120, 80, None, "2026-01-20T08:00:00Z"),
            bp(140, 90, Some(60), "2026-01-21T08:00:00Z"),
        ];

        let series = aggregate_by_day(&readings, &Utc, Precision::Whole, |r| {
            r.heart_rate.map(f64::from)
        });
        assert_eq!(
            series,
            vec![DailyValue {
                date: "2026-01-21".to_string(),
                value: 60.0
            }]
        );
    }

    #[test]
    fn test_nan_propagates_through_average() {
        let readings = vec![
            inr(f64::NAN, "2026-01-20T08:00:00Z", None),
            inr(2.5, "2026-01-20T09:00:00Z", None),
        ];
        let series = aggregate_inr_by_day(&readings, &Utc);
        assert!(series[0].value.unwrap().is_nan());
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let readings = vec![
            inr(2.9, "2026-01-21T08:00:00Z", None),
            inr(2.4, "2026-01-20T08:00:00Z", None),
        ];
        assert_eq!(
            aggregate_inr_by_day(&readings, &Utc),
            aggregate_inr_by_day(&readings, &Utc)
        );
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.616, Precision::Hundredths), 2.62);
        assert_eq!(round_to(82.5, Precision::Whole), 83.0);
        assert_eq!(round_to(82.49, Precision::Whole), 82.0);
    }
}

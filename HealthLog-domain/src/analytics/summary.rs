//! Trend and report assembly over a time window

use chrono::{DateTime, TimeZone, Utc};

use super::aggregate::{
    aggregate_blood_pressure_by_day, aggregate_heart_rate_by_day, aggregate_inr_by_day,
    compute_blood_pressure_stats, compute_in_range_rate,
};
use super::classify::{evaluate_blood_pressure_reading, evaluate_inr_reading};
use crate::entities::{
    BloodPressureReading, BloodPressureReportRow, HealthReport, InrReading, InrReportRow,
    InrReportSummary, Locale, TrendSummary,
};
use crate::time_range::TimeRange;

fn within<T, F>(readings: &[T], range: &TimeRange, time: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &DateTime<Utc>,
{
    readings
        .iter()
        .filter(|r| range.contains(time(r)))
        .cloned()
        .collect()
}

/// Series and statistics for the trends view
///
/// Readings outside `range` are ignored.
pub fn build_trend_summary<Tz: TimeZone>(
    inr: &[InrReading],
    blood_pressure: &[BloodPressureReading],
    tz: &Tz,
    range: &TimeRange,
) -> TrendSummary {
    let inr = within(inr, range, |r| &r.record_time);
    let blood_pressure = within(blood_pressure, range, |r| &r.record_time);

    TrendSummary {
        range: *range,
        inr_series: aggregate_inr_by_day(&inr, tz),
        blood_pressure_series: aggregate_blood_pressure_by_day(&blood_pressure, tz),
        heart_rate_series: aggregate_heart_rate_by_day(&blood_pressure, tz),
        inr_in_range_rate: compute_in_range_rate(&inr),
        blood_pressure_stats: compute_blood_pressure_stats(&blood_pressure),
    }
}

/// Printable report with every reading of the window and its alert
///
/// Rows are ordered newest first.
pub fn build_health_report(
    inr: &[InrReading],
    blood_pressure: &[BloodPressureReading],
    range: &TimeRange,
    locale: Locale,
    generated_at: DateTime<Utc>,
) -> HealthReport {
    let mut inr = within(inr, range, |r| &r.record_time);
    let mut blood_pressure = within(blood_pressure, range, |r| &r.record_time);
    inr.sort_by(|a, b| b.record_time.cmp(&a.record_time));
    blood_pressure.sort_by(|a, b| b.record_time.cmp(&a.record_time));

    let summary = InrReportSummary {
        count: inr.len(),
        in_range_rate: compute_in_range_rate(&inr),
        latest_value: inr.first().map(|r| r.value),
    };
    let stats = compute_blood_pressure_stats(&blood_pressure);

    HealthReport {
        range_label: range.label(),
        generated_at,
        inr: summary,
        blood_pressure: stats,
        inr_readings: inr
            .into_iter()
            .map(|reading| InrReportRow {
                alert: evaluate_inr_reading(&reading, locale),
                reading,
            })
            .collect(),
        blood_pressure_readings: blood_pressure
            .into_iter()
            .map(|reading| BloodPressureReportRow {
                alert: evaluate_blood_pressure_reading(&reading, locale),
                reading,
            })
            .collect(),
    }
}

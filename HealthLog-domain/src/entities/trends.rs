use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::alert::HealthAlert;
use super::blood_pressure::BloodPressureReading;
use super::inr::InrReading;
use crate::time_range::TimeRange;

/// Averaged value for one local calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyValue {
    /// Local calendar date, `YYYY-MM-DD`
    pub date: String,
    pub value: f64,
}

/// One point of a day-level series
///
/// Only the fields relevant to the series are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DailyAggregatePoint {
    /// Local calendar date, `YYYY-MM-DD`
    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systolic: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u16>,
}

impl DailyAggregatePoint {
    /// Point carrying a single averaged value
    pub fn value(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value: Some(value),
            systolic: None,
            diastolic: None,
            heart_rate: None,
        }
    }

    /// Point carrying averaged systolic and diastolic pressure
    pub fn blood_pressure(date: impl Into<String>, systolic: u16, diastolic: u16) -> Self {
        Self {
            date: date.into(),
            value: None,
            systolic: Some(systolic),
            diastolic: Some(diastolic),
            heart_rate: None,
        }
    }

    /// Point carrying an averaged heart rate
    pub fn heart_rate(date: impl Into<String>, heart_rate: u16) -> Self {
        Self {
            date: date.into(),
            value: None,
            systolic: None,
            diastolic: None,
            heart_rate: Some(heart_rate),
        }
    }
}

/// Summary statistics over a set of blood pressure readings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPressureStats {
    pub avg_systolic: u16,
    pub avg_diastolic: u16,
    /// Average over readings that carry a heart rate, 0 when none do
    pub avg_heart_rate: u16,
    pub count: usize,
}

/// Everything the trends view needs for one time range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct TrendSummary {
    pub range: TimeRange,
    pub inr_series: Vec<DailyAggregatePoint>,
    pub blood_pressure_series: Vec<DailyAggregatePoint>,
    pub heart_rate_series: Vec<DailyAggregatePoint>,
    /// Percentage of INR readings inside their target range
    pub inr_in_range_rate: u8,
    pub blood_pressure_stats: BloodPressureStats,
}

/// INR section of a health report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct InrReportSummary {
    pub count: usize,
    pub in_range_rate: u8,
    /// Value of the most recent reading in the range
    pub latest_value: Option<f64>,
}

/// INR reading together with its evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct InrReportRow {
    pub reading: InrReading,
    pub alert: HealthAlert,
}

/// Blood pressure reading together with its evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPressureReportRow {
    pub reading: BloodPressureReading,
    pub alert: HealthAlert,
}

/// Printable summary of a time range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct HealthReport {
    /// Human-readable range, `YYYY-MM-DD to YYYY-MM-DD`
    pub range_label: String,
    pub generated_at: DateTime<Utc>,
    pub inr: InrReportSummary,
    pub blood_pressure: BloodPressureStats,
    /// INR readings, newest first
    pub inr_readings: Vec<InrReportRow>,
    /// Blood pressure readings, newest first
    pub blood_pressure_readings: Vec<BloodPressureReportRow>,
}

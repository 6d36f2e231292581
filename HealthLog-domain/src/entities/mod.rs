// Domain entities and value objects
pub mod alert;
pub mod blood_pressure;
pub mod conversions;
pub mod inr;
pub mod trends;

// Re-export common types for easier imports
pub use alert::{AlertLevel, ColorHint, HealthAlert, Locale};
pub use blood_pressure::{
    BloodPressureReading, CreateBloodPressureRequest, Position, UpdateBloodPressureRequest,
};
pub use inr::{CreateInrRequest, InrReading, TargetRange, UpdateInrRequest};
pub use trends::{
    BloodPressureReportRow, BloodPressureStats, DailyAggregatePoint, DailyValue, HealthReport,
    InrReportRow, InrReportSummary, TrendSummary,
};

use chrono::{DateTime, Utc};
use health_log_data::models::{is_storable_record_time, STORABLE_YEARS};
use validator::ValidationError;

/// Reject timestamps outside the years storage can order correctly
pub(crate) fn validate_record_time(time: &DateTime<Utc>) -> Result<(), ValidationError> {
    if is_storable_record_time(time) {
        Ok(())
    } else {
        let mut error = ValidationError::new("record_time");
        error.message = Some(
            format!(
                "Record time must fall between the years {} and {}",
                STORABLE_YEARS.start(),
                STORABLE_YEARS.end()
            )
            .into(),
        );
        Err(error)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::validate_record_time;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Clinician-set INR target band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct TargetRange {
    pub low: f64,
    pub high: f64,
}

impl TargetRange {
    /// Target band used when none is recorded
    pub const DEFAULT: TargetRange = TargetRange { low: 2.0, high: 3.0 };

    /// Whether `value` lies inside the band, bounds included
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

impl Default for TargetRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Domain model for an INR reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct InrReading {
    /// Unique identifier for the reading
    #[serde(default)]
    pub id: String,

    /// Measured INR value
    pub value: f64,

    /// When the reading was taken
    pub record_time: DateTime<Utc>,

    /// Warfarin dose in milligrams
    #[serde(default)]
    pub warfarin_dose_mg: f64,

    /// Whether the value was inside the target range; `None` when unknown
    #[serde(default)]
    pub is_in_range: Option<bool>,

    /// Lower bound of the target range
    #[serde(default)]
    pub target_range_low: Option<f64>,

    /// Upper bound of the target range
    #[serde(default)]
    pub target_range_high: Option<f64>,

    /// Optional free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl InrReading {
    /// Target range recorded on the reading, when both bounds are known
    pub fn target_range(&self) -> Option<TargetRange> {
        match (self.target_range_low, self.target_range_high) {
            (Some(low), Some(high)) => Some(TargetRange { low, high }),
            _ => None,
        }
    }
}

/// Request payload for creating a new INR reading
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct CreateInrRequest {
    /// Measured INR value
    #[validate(custom = "validate_inr_value")]
    pub value: f64,

    /// Warfarin dose in milligrams
    #[validate(custom = "validate_warfarin_dose")]
    pub warfarin_dose_mg: f64,

    /// When the reading was taken
    #[validate(custom = "validate_record_time")]
    pub record_time: DateTime<Utc>,

    /// Optional target range; defaults to 2.0 - 3.0
    pub target_range: Option<TargetRange>,

    /// Optional free-text note
    #[validate(length(max = 1000, message = "Note cannot exceed 1000 characters"))]
    pub note: Option<String>,
}

/// Request payload for updating an existing INR reading
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct UpdateInrRequest {
    #[validate(custom = "validate_inr_value")]
    pub value: Option<f64>,

    #[validate(custom = "validate_warfarin_dose")]
    pub warfarin_dose_mg: Option<f64>,

    #[validate(custom = "validate_record_time")]
    pub record_time: Option<DateTime<Utc>>,

    pub target_range: Option<TargetRange>,

    #[validate(length(max = 1000, message = "Note cannot exceed 1000 characters"))]
    pub note: Option<String>,
}

impl UpdateInrRequest {
    /// Apply the present fields on top of an existing reading
    ///
    /// The in-range flag and stored bounds are re-derived from the resulting
    /// value and target range.
    pub fn apply_to(&self, reading: &InrReading) -> InrReading {
        let value = self.value.unwrap_or(reading.value);
        let target_range = self
            .target_range
            .or_else(|| reading.target_range())
            .unwrap_or_default();

        InrReading {
            id: reading.id.clone(),
            value,
            record_time: self.record_time.unwrap_or(reading.record_time),
            warfarin_dose_mg: self.warfarin_dose_mg.unwrap_or(reading.warfarin_dose_mg),
            is_in_range: Some(target_range.contains(value)),
            target_range_low: Some(target_range.low),
            target_range_high: Some(target_range.high),
            note: self.note.clone().or_else(|| reading.note.clone()),
        }
    }
}

fn validate_inr_value(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 && value <= 10.0 {
        Ok(())
    } else {
        let mut error = ValidationError::new("inr_value");
        error.message = Some("INR value must be greater than 0 and at most 10".into());
        Err(error)
    }
}

fn validate_warfarin_dose(dose: f64) -> Result<(), ValidationError> {
    if dose.is_finite() && dose > 0.0 && dose <= 50.0 {
        Ok(())
    } else {
        let mut error = ValidationError::new("warfarin_dose");
        error.message = Some("Warfarin dose must be greater than 0 and at most 50 mg".into());
        Err(error)
    }
}

/// Check that a target range is usable
pub fn validate_target_range(range: &TargetRange) -> Result<(), String> {
    if !range.low.is_finite() || !range.high.is_finite() || range.low <= 0.0 {
        return Err("Target range bounds must be positive numbers".to_string());
    }
    if range.low >= range.high {
        return Err("Target range low must be below target range high".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request(value: f64, dose: f64) -> CreateInrRequest {
        CreateInrRequest {
            value,
            warfarin_dose_mg: dose,
            record_time: Utc.with_ymd_and_hms(2026, 1, 20, 8, 0, 0).unwrap(),
            target_range: None,
            note: None,
        }
    }

    #[test]
    fn test_target_range_bounds_are_inclusive() {
        let range = TargetRange::default();
        assert!(range.contains(2.0));
        assert!(range.contains(3.0));
        assert!(!range.contains(1.99));
        assert!(!range.contains(3.01));
    }

    #[test]
    fn test_create_request_rejects_non_positive_values() {
        assert!(request(2.5, 3.0).validate().is_ok());
        assert!(request(0.0, 3.0).validate().is_err());
        assert!(request(2.5, 0.0).validate().is_err());
        assert!(request(f64::NAN, 3.0).validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_unstorable_record_time() {
        let mut far_future = request(2.5, 3.0);
        far_future.record_time = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();

        let errors = far_future.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("record_time"));
    }

    #[test]
    fn test_update_rederives_in_range_flag() {
        let reading = InrReading {
            id: "inr-1".to_string(),
            value: 2.5,
            record_time: Utc.with_ymd_and_hms(2026, 1, 20, 8, 0, 0).unwrap(),
            warfarin_dose_mg: 3.0,
            is_in_range: Some(true),
            target_range_low: Some(2.0),
            target_range_high: Some(3.0),
            note: Some("after dinner".to_string()),
        };

        let update = UpdateInrRequest {
            value: Some(3.4),
            ..UpdateInrRequest::default()
        };
        let updated = update.apply_to(&reading);
        assert_eq!(updated.is_in_range, Some(false));
        assert_eq!(updated.note.as_deref(), Some("after dinner"));

        let widened = UpdateInrRequest {
            target_range: Some(TargetRange { low: 2.5, high: 3.5 }),
            ..UpdateInrRequest::default()
        };
        assert_eq!(widened.apply_to(&updated).is_in_range, Some(true));
    }

    #[test]
    fn test_target_range_validation() {
        assert!(validate_target_range(&TargetRange::default()).is_ok());
        assert!(validate_target_range(&TargetRange { low: 3.0, high: 2.0 }).is_err());
        assert!(validate_target_range(&TargetRange { low: 0.0, high: 2.0 }).is_err());
    }
}

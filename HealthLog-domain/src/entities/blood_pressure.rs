use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_record_time;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Body position during a blood pressure measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Sitting,
    Lying,
    Standing,
    Other,
}

impl Position {
    /// Stable lowercase name used in storage and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Sitting => "sitting",
            Position::Lying => "lying",
            Position::Standing => "standing",
            Position::Other => "other",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    /// Accepts the English names and the Chinese form labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sitting" | "坐位" => Ok(Position::Sitting),
            "lying" | "卧位" => Ok(Position::Lying),
            "standing" | "站立" => Ok(Position::Standing),
            "other" | "其它" => Ok(Position::Other),
            other => Err(format!("Unknown position: {}", other)),
        }
    }
}

/// Domain model for a blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BloodPressureReading {
    /// Unique identifier for the reading
    #[serde(default)]
    pub id: String,

    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,

    /// Heart rate in beats per minute, when measured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u16>,

    /// Body position during the measurement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// When the reading was taken
    pub record_time: DateTime<Utc>,
}

/// Request payload for creating a new blood pressure reading
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct CreateBloodPressureRequest {
    /// Systolic blood pressure (the higher number)
    #[validate(range(min = 40, max = 300, message = "Systolic must be between 40 and 300"))]
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    #[validate(range(min = 20, max = 200, message = "Diastolic must be between 20 and 200"))]
    pub diastolic: u16,

    /// Optional heart rate in beats per minute
    #[validate(range(min = 20, max = 250, message = "Heart rate must be between 20 and 250"))]
    pub heart_rate: Option<u16>,

    /// Optional body position during measurement
    pub position: Option<Position>,

    /// When the reading was taken
    #[validate(custom = "validate_record_time")]
    pub record_time: DateTime<Utc>,
}

/// Request payload for updating an existing blood pressure reading
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct UpdateBloodPressureRequest {
    #[validate(range(min = 40, max = 300, message = "Systolic must be between 40 and 300"))]
    pub systolic: Option<u16>,

    #[validate(range(min = 20, max = 200, message = "Diastolic must be between 20 and 200"))]
    pub diastolic: Option<u16>,

    #[validate(range(min = 20, max = 250, message = "Heart rate must be between 20 and 250"))]
    pub heart_rate: Option<u16>,

    pub position: Option<Position>,

    #[validate(custom = "validate_record_time")]
    pub record_time: Option<DateTime<Utc>>,
}

impl UpdateBloodPressureRequest {
    /// Apply the present fields on top of an existing reading
    pub fn apply_to(&self, reading: &BloodPressureReading) -> BloodPressureReading {
        BloodPressureReading {
            id: reading.id.clone(),
            systolic: self.systolic.unwrap_or(reading.systolic),
            diastolic: self.diastolic.unwrap_or(reading.diastolic),
            heart_rate: self.heart_rate.or(reading.heart_rate),
            position: self.position.or(reading.position),
            record_time: self.record_time.unwrap_or(reading.record_time),
        }
    }
}

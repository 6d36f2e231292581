use serde::{Deserialize, Serialize};

use super::StoredReading;

/// Storage model for a blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressureReading {
    /// Unique identifier for the reading
    pub id: String,

    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,

    /// Optional heart rate in beats per minute
    pub heart_rate: Option<u16>,

    /// Optional body position during measurement (sitting, lying, ...)
    pub position: Option<String>,

    /// When the reading was taken (see `format_record_time`)
    pub record_time: String,
}

/// Input data for creating a new blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBloodPressureRequest {
    pub systolic: u16,
    pub diastolic: u16,
    pub heart_rate: Option<u16>,
    pub position: Option<String>,
    pub record_time: String,
}

impl BloodPressureReading {
    /// Build a stored reading from a create request and a freshly minted id
    pub fn from_request(id: String, request: CreateBloodPressureRequest) -> Self {
        Self {
            id,
            systolic: request.systolic,
            diastolic: request.diastolic,
            heart_rate: request.heart_rate,
            position: request.position,
            record_time: request.record_time,
        }
    }
}

impl StoredReading for BloodPressureReading {
    fn id(&self) -> &str {
        &self.id
    }

    fn record_time(&self) -> &str {
        &self.record_time
    }
}

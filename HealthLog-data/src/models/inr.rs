use serde::{Deserialize, Serialize};

use super::StoredReading;

/// Storage model for an INR reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InrReading {
    /// Unique identifier for the reading
    pub id: String,

    /// Measured INR value
    pub value: f64,

    /// When the reading was taken (see `format_record_time`)
    pub record_time: String,

    /// Warfarin dose taken, in milligrams
    pub warfarin_dose_mg: f64,

    /// Whether the value fell inside the target range, if known
    pub is_in_range: Option<bool>,

    /// Lower bound of the clinician-set target range
    pub target_range_low: Option<f64>,

    /// Upper bound of the clinician-set target range
    pub target_range_high: Option<f64>,

    /// Optional free-text note
    pub note: Option<String>,
}

/// Input data for creating a new INR reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateInrRequest {
    pub value: f64,
    pub record_time: String,
    pub warfarin_dose_mg: f64,
    pub is_in_range: Option<bool>,
    pub target_range_low: Option<f64>,
    pub target_range_high: Option<f64>,
    pub note: Option<String>,
}

impl InrReading {
    /// Build a stored reading from a create request and a freshly minted id
    pub fn from_request(id: String, request: CreateInrRequest) -> Self {
        Self {
            id,
            value: request.value,
            record_time: request.record_time,
            warfarin_dose_mg: request.warfarin_dose_mg,
            is_in_range: request.is_in_range,
            target_range_low: request.target_range_low,
            target_range_high: request.target_range_high,
            note: request.note,
        }
    }
}

impl StoredReading for InrReading {
    fn id(&self) -> &str {
        &self.id
    }

    fn record_time(&self) -> &str {
        &self.record_time
    }
}

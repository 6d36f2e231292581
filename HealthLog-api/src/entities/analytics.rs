use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use health_log_domain::entities::{
    BloodPressureReading, BloodPressureStats, ColorHint, DailyAggregatePoint, HealthAlert,
    InrReading,
};

/// INR readings to aggregate
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AggregateInrRequest {
    pub readings: Vec<InrReading>,

    /// Offset east of UTC used for day grouping; defaults to the server setting
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

/// Blood pressure readings to aggregate
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AggregateBloodPressureRequest {
    pub readings: Vec<BloodPressureReading>,

    /// Offset east of UTC used for day grouping; defaults to the server setting
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

/// Daily INR series with the in-range rate
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InrAggregateResponse {
    pub series: Vec<DailyAggregatePoint>,
    pub in_range_rate: u8,
}

/// Daily blood pressure series with overall statistics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BloodPressureAggregateResponse {
    pub series: Vec<DailyAggregatePoint>,
    pub stats: BloodPressureStats,
}

/// Daily heart rate series
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HeartRateAggregateResponse {
    pub series: Vec<DailyAggregatePoint>,
}

/// INR value to classify; a full reading is accepted as well
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassifyInrRequest {
    pub value: f64,
}

/// Blood pressure to classify; a full reading is accepted as well
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassifyBloodPressureRequest {
    pub systolic: u16,
    pub diastolic: u16,
    #[serde(default)]
    pub heart_rate: Option<u16>,
}

/// Alert for a reading plus the palette for its tier
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassificationResponse {
    #[serde(flatten)]
    pub alert: HealthAlert,
    pub color: ColorHint,
}

impl From<HealthAlert> for ClassificationResponse {
    fn from(alert: HealthAlert) -> Self {
        Self {
            color: alert.level.color_hint(),
            alert,
        }
    }
}

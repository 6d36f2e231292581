use chrono::{DateTime, Utc};
use health_log_data::models::{self as data, format_record_time};
use uuid::Uuid;

use crate::entities::blood_pressure::{BloodPressureReading, CreateBloodPressureRequest, Position};
use crate::entities::inr::{InrReading, TargetRange};

/// Conversion functions between domain entities and data models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Helper function to safely parse a string ID to UUID
pub fn parse_string_to_uuid(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|_| format!("Invalid UUID format: {}", id))
}

/// Parse a stored `record_time`
///
/// Stored rows always carry RFC 3339 timestamps; anything else is corrupt
/// data and is reported instead of being replaced with the current time.
pub fn parse_record_time(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| format!("Invalid record_time '{}': {}", raw, e))
}

/// Convert from data model to domain entity for an INR reading
pub fn convert_to_domain_inr_reading(reading: data::inr::InrReading) -> Result<InrReading, String> {
    Ok(InrReading {
        record_time: parse_record_time(&reading.record_time)?,
        id: reading.id,
        value: reading.value,
        warfarin_dose_mg: reading.warfarin_dose_mg,
        is_in_range: reading.is_in_range,
        target_range_low: reading.target_range_low,
        target_range_high: reading.target_range_high,
        note: reading.note,
    })
}

/// Convert from domain entity to data model for an INR reading
pub fn convert_to_data_inr_reading(reading: &InrReading) -> data::inr::InrReading {
    data::inr::InrReading {
        id: reading.id.clone(),
        value: reading.value,
        record_time: format_record_time(&reading.record_time),
        warfarin_dose_mg: reading.warfarin_dose_mg,
        is_in_range: reading.is_in_range,
        target_range_low: reading.target_range_low,
        target_range_high: reading.target_range_high,
        note: reading.note.clone(),
    }
}

/// Build the data create request for a validated INR request
///
/// `is_in_range` is derived from the target range here so that stored
/// readings always agree with their bounds.
pub fn convert_to_data_inr_create_request(
    value: f64,
    warfarin_dose_mg: f64,
    record_time: &DateTime<Utc>,
    target_range: TargetRange,
    note: Option<String>,
) -> data::inr::CreateInrRequest {
    data::inr::CreateInrRequest {
        value,
        record_time: format_record_time(record_time),
        warfarin_dose_mg,
        is_in_range: Some(target_range.contains(value)),
        target_range_low: Some(target_range.low),
        target_range_high: Some(target_range.high),
        note,
    }
}

/// Convert from data model to domain entity for a blood pressure reading
///
/// Unknown position labels map to [`Position::Other`].
pub fn convert_to_domain_bp_reading(
    reading: data::blood_pressure::BloodPressureReading,
) -> Result<BloodPressureReading, String> {
    Ok(BloodPressureReading {
        record_time: parse_record_time(&reading.record_time)?,
        id: reading.id,
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        heart_rate: reading.heart_rate,
        position: reading
            .position
            .map(|label| label.parse().unwrap_or(Position::Other)),
    })
}

/// Convert from domain entity to data model for a blood pressure reading
pub fn convert_to_data_bp_reading(
    reading: &BloodPressureReading,
) -> data::blood_pressure::BloodPressureReading {
    data::blood_pressure::BloodPressureReading {
        id: reading.id.clone(),
        systolic: reading.systolic,
        diastolic: reading.diastolic,
        heart_rate: reading.heart_rate,
        position: reading.position.map(|p| p.as_str().to_string()),
        record_time: format_record_time(&reading.record_time),
    }
}

/// Convert from domain entity to data model for a blood pressure create request
pub fn convert_to_data_bp_create_request(
    request: &CreateBloodPressureRequest,
) -> data::blood_pressure::CreateBloodPressureRequest {
    data::blood_pressure::CreateBloodPressureRequest {
        systolic: request.systolic,
        diastolic: request.diastolic,
        heart_rate: request.heart_rate,
        position: request.position.map(|p| p.as_str().to_string()),
        record_time: format_record_time(&request.record_time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn data_bp(position: Option<&str>, record_time: &str) -> data::blood_pressure::BloodPressureReading {
        data::blood_pressure::BloodPressureReading {
            id: "123e4567-e89b-12d3-a456-426614174000".to_string(),
            systolic: 120,
            diastolic: 80,
            heart_rate: Some(72),
            position: position.map(str::to_string),
            record_time: record_time.to_string(),
        }
    }

    #[test]
    fn test_bp_reading_round_trips_through_storage_model() {
        let domain = BloodPressureReading {
            id: "123e4567-e89b-12d3-a456-426614174000".to_string(),
            systolic: 120,
            diastolic: 80,
            heart_rate: Some(72),
            position: Some(Position::Sitting),
            record_time: Utc.with_ymd_and_hms(2026, 1, 20, 8, 30, 0).unwrap(),
        };

        let stored = convert_to_data_bp_reading(&domain);
        assert_eq!(stored.position.as_deref(), Some("sitting"));
        assert_eq!(stored.record_time, "2026-01-20T08:30:00.000Z");
        assert_eq!(convert_to_domain_bp_reading(stored).unwrap(), domain);
    }

    #[test]
    fn test_unknown_position_maps_to_other() {
        let reading = convert_to_domain_bp_reading(data_bp(Some("kneeling"), "2026-01-20T08:30:00.000Z")).unwrap();
        assert_eq!(reading.position, Some(Position::Other));
    }

    #[test]
    fn test_corrupt_record_time_is_an_error() {
        assert!(convert_to_domain_bp_reading(data_bp(None, "yesterday")).is_err());
    }

    #[test]
    fn test_inr_create_request_derives_in_range_flag() {
        let time = Utc.with_ymd_and_hms(2026, 1, 20, 8, 0, 0).unwrap();

        let inside = convert_to_data_inr_create_request(2.5, 3.0, &time, TargetRange::default(), None);
        assert_eq!(inside.is_in_range, Some(true));
        assert_eq!(inside.target_range_low, Some(2.0));
        assert_eq!(inside.target_range_high, Some(3.0));

        let outside = convert_to_data_inr_create_request(3.4, 3.0, &time, TargetRange::default(), None);
        assert_eq!(outside.is_in_range, Some(false));
    }

    #[test]
    fn test_parse_string_to_uuid() {
        assert!(parse_string_to_uuid("123e4567-e89b-12d3-a456-426614174000").is_ok());
        assert!(parse_string_to_uuid("not-a-uuid").is_err());
    }
}

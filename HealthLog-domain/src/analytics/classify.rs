//! Clinical threshold evaluation
//!
//! Thresholds:
//! - INR: normal 2.0 to 3.0, warning 1.5 to 2.0 or 3.0 to 3.5, danger outside
//! - Blood pressure: danger from 160/100, warning from 130/85 or below 90/60
//! - Heart rate: normal 60 to 100 bpm, warning 50 to 120, danger outside
//!
//! Ranges are tested explicitly so that a non-finite value can never land
//! in the normal tier.

use crate::entities::{AlertLevel, BloodPressureReading, HealthAlert, InrReading, Locale};

/// Classify an INR value
pub fn classify_inr(value: f64) -> AlertLevel {
    if (2.0..=3.0).contains(&value) {
        AlertLevel::Normal
    } else if (1.5..=3.5).contains(&value) {
        AlertLevel::Warning
    } else {
        AlertLevel::Danger
    }
}

/// Advisory message for an INR value; `None` when normal
pub fn inr_message(value: f64, locale: Locale) -> Option<String> {
    let message = match (classify_inr(value), locale) {
        (AlertLevel::Normal, _) => return None,
        (AlertLevel::Danger, Locale::En) if value < 1.5 => {
            "⚠️ INR too low, increased clotting risk, seek medical care soon"
        }
        (AlertLevel::Danger, Locale::ZhCn) if value < 1.5 => "⚠️ INR 过低,血栓风险增加,请尽快就医",
        (AlertLevel::Danger, Locale::En) => {
            "⚠️ INR too high, increased bleeding risk, seek medical care soon"
        }
        (AlertLevel::Danger, Locale::ZhCn) => "⚠️ INR 过高,出血风险增加,请尽快就医",
        (AlertLevel::Warning, Locale::En) if value < 2.0 => {
            "⚡ INR below target, the dose may need adjusting"
        }
        (AlertLevel::Warning, Locale::ZhCn) if value < 2.0 => "⚡ INR 偏低,可能需要调整剂量",
        (AlertLevel::Warning, Locale::En) => "⚡ INR above target, the dose may need adjusting",
        (AlertLevel::Warning, Locale::ZhCn) => "⚡ INR 偏高,可能需要调整剂量",
    };
    Some(message.to_string())
}

/// Classify a blood pressure pair; the first matching tier wins
pub fn classify_blood_pressure(systolic: u16, diastolic: u16) -> AlertLevel {
    if systolic >= 160 || diastolic >= 100 {
        AlertLevel::Danger
    } else if systolic >= 130 || diastolic >= 85 || is_low_pressure(systolic, diastolic) {
        AlertLevel::Warning
    } else {
        AlertLevel::Normal
    }
}

fn is_low_pressure(systolic: u16, diastolic: u16) -> bool {
    systolic < 90 || diastolic < 60
}

/// Advisory message for a blood pressure pair; `None` when normal
pub fn blood_pressure_message(systolic: u16, diastolic: u16, locale: Locale) -> Option<String> {
    let message = match classify_blood_pressure(systolic, diastolic) {
        AlertLevel::Normal => return None,
        AlertLevel::Danger if systolic >= 180 || diastolic >= 110 => match locale {
            Locale::En => "⚠️ Blood pressure severely high, seek medical care immediately",
            Locale::ZhCn => "⚠️ 血压严重偏高,请立即就医",
        },
        AlertLevel::Danger => match locale {
            Locale::En => "⚠️ Blood pressure high, seek medical care soon",
            Locale::ZhCn => "⚠️ 血压偏高,建议尽快就医",
        },
        AlertLevel::Warning if is_low_pressure(systolic, diastolic) => match locale {
            Locale::En => "⚡ Blood pressure low, keep monitoring",
            Locale::ZhCn => "⚡ 血压偏低,请注意观察",
        },
        AlertLevel::Warning if systolic >= 140 || diastolic >= 90 => match locale {
            Locale::En => "⚡ Blood pressure elevated, consider consulting a doctor",
            Locale::ZhCn => "⚡ 血压偏高,建议咨询医生",
        },
        AlertLevel::Warning => match locale {
            Locale::En => "⚡ Blood pressure high-normal, watch diet and exercise",
            Locale::ZhCn => "⚡ 血压偏高,注意饮食和运动",
        },
    };
    Some(message.to_string())
}

/// Classify a heart rate in beats per minute
pub fn classify_heart_rate(bpm: u16) -> AlertLevel {
    if (60..=100).contains(&bpm) {
        AlertLevel::Normal
    } else if (50..=120).contains(&bpm) {
        AlertLevel::Warning
    } else {
        AlertLevel::Danger
    }
}

/// Advisory message for a heart rate; `None` when normal
pub fn heart_rate_message(bpm: u16, locale: Locale) -> Option<String> {
    let slow = bpm < 60;
    let message = match (classify_heart_rate(bpm), locale) {
        (AlertLevel::Normal, _) => return None,
        (AlertLevel::Danger, Locale::En) if slow => "⚠️ Heart rate too slow, seek medical care promptly",
        (AlertLevel::Danger, Locale::ZhCn) if slow => "⚠️ 心率过慢,请及时就医",
        (AlertLevel::Danger, Locale::En) => "⚠️ Heart rate too fast, seek medical care promptly",
        (AlertLevel::Danger, Locale::ZhCn) => "⚠️ 心率过快,请及时就医",
        (AlertLevel::Warning, Locale::En) if slow => "⚡ Heart rate slightly slow, keep monitoring",
        (AlertLevel::Warning, Locale::ZhCn) if slow => "⚡ 心率偏慢,请注意观察",
        (AlertLevel::Warning, Locale::En) => "⚡ Heart rate slightly fast, keep monitoring",
        (AlertLevel::Warning, Locale::ZhCn) => "⚡ 心率偏快,请注意观察",
    };
    Some(message.to_string())
}

/// Evaluate a bare INR value
pub fn evaluate_inr_value(value: f64, locale: Locale) -> HealthAlert {
    let level = classify_inr(value);
    HealthAlert {
        has_alert: level != AlertLevel::Normal,
        level,
        messages: inr_message(value, locale).into_iter().collect(),
    }
}

/// Evaluate a single INR reading
pub fn evaluate_inr_reading(reading: &InrReading, locale: Locale) -> HealthAlert {
    evaluate_inr_value(reading.value, locale)
}

/// Evaluate a pressure pair together with an optional heart rate
///
/// The level is the worse of the two; the pressure message comes first.
pub fn evaluate_blood_pressure(
    systolic: u16,
    diastolic: u16,
    heart_rate: Option<u16>,
    locale: Locale,
) -> HealthAlert {
    let mut level = classify_blood_pressure(systolic, diastolic);
    let mut messages: Vec<String> = blood_pressure_message(systolic, diastolic, locale)
        .into_iter()
        .collect();

    // a zero heart rate means "not measured"
    if let Some(bpm) = heart_rate.filter(|bpm| *bpm > 0) {
        level = level.max(classify_heart_rate(bpm));
        messages.extend(heart_rate_message(bpm, locale));
    }

    HealthAlert {
        has_alert: !messages.is_empty(),
        level,
        messages,
    }
}

/// Evaluate a blood pressure reading together with its heart rate
pub fn evaluate_blood_pressure_reading(reading: &BloodPressureReading, locale: Locale) -> HealthAlert {
    evaluate_blood_pressure(reading.systolic, reading.diastolic, reading.heart_rate, locale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn bp(systolic: u16, diastolic: u16, heart_rate: Option<u16>) -> BloodPressureReading {
        BloodPressureReading {
            id: "bp".to_string(),
            systolic,
            diastolic,
            heart_rate,
            position: None,
            record_time: Utc.with_ymd_and_hms(2026, 1, 20, 8, 0, 0).unwrap(),
        }
    }

    fn inr(value: f64) -> InrReading {
        InrReading {
            id: "inr".to_string(),
            value,
            record_time: Utc.with_ymd_and_hms(2026, 1, 20, 8, 0, 0).unwrap(),
            warfarin_dose_mg: 3.0,
            is_in_range: None,
            target_range_low: None,
            target_range_high: None,
            note: None,
        }
    }

    #[test]
    fn test_inr_boundaries() {
        assert_eq!(classify_inr(1.49), AlertLevel::Danger);
        assert_eq!(classify_inr(1.5), AlertLevel::Warning);
        assert_eq!(classify_inr(1.99), AlertLevel::Warning);
        assert_eq!(classify_inr(2.0), AlertLevel::Normal);
        assert_eq!(classify_inr(3.0), AlertLevel::Normal);
        assert_eq!(classify_inr(3.01), AlertLevel::Warning);
        assert_eq!(classify_inr(3.5), AlertLevel::Warning);
        assert_eq!(classify_inr(3.51), AlertLevel::Danger);
    }

    #[test]
    fn test_non_finite_inr_is_never_normal() {
        assert_eq!(classify_inr(f64::NAN), AlertLevel::Danger);
        assert_eq!(classify_inr(f64::INFINITY), AlertLevel::Danger);
        assert!(evaluate_inr_reading(&inr(f64::NAN), Locale::En).has_alert);
    }

    #[test]
    fn test_inr_messages() {
        assert!(inr_message(1.2, Locale::En).unwrap().contains("too low"));
        assert!(inr_message(4.0, Locale::En).unwrap().contains("too high"));
        assert!(inr_message(1.8, Locale::En).unwrap().contains("below target"));
        assert!(inr_message(3.2, Locale::En).unwrap().contains("above target"));
        assert_eq!(inr_message(2.5, Locale::En), None);
        assert_eq!(
            inr_message(1.2, Locale::ZhCn).as_deref(),
            Some("⚠️ INR 过低,血栓风险增加,请尽快就医")
        );
    }

    #[test]
    fn test_blood_pressure_tiers() {
        assert_eq!(classify_blood_pressure(120, 80), AlertLevel::Normal);
        assert_eq!(classify_blood_pressure(170, 80), AlertLevel::Danger);
        assert_eq!(classify_blood_pressure(120, 100), AlertLevel::Danger);
        assert_eq!(classify_blood_pressure(130, 80), AlertLevel::Warning);
        assert_eq!(classify_blood_pressure(120, 85), AlertLevel::Warning);
        assert_eq!(classify_blood_pressure(85, 70), AlertLevel::Warning);
        assert_eq!(classify_blood_pressure(110, 55), AlertLevel::Warning);
        assert_eq!(classify_blood_pressure(90, 60), AlertLevel::Normal);
    }

    #[test]
    fn test_blood_pressure_messages() {
        let severe = blood_pressure_message(185, 95, Locale::En).unwrap();
        assert!(severe.contains("immediately"));
        let high = blood_pressure_message(165, 95, Locale::En).unwrap();
        assert!(high.contains("soon"));
        let low = blood_pressure_message(85, 55, Locale::En).unwrap();
        assert!(low.contains("low"));
        let stage_one = blood_pressure_message(145, 80, Locale::En).unwrap();
        assert!(stage_one.contains("doctor"));
        let high_normal = blood_pressure_message(132, 80, Locale::En).unwrap();
        assert!(high_normal.contains("diet"));
        assert_eq!(blood_pressure_message(118, 76, Locale::En), None);
        assert_eq!(
            blood_pressure_message(132, 80, Locale::ZhCn).as_deref(),
            Some("⚡ 血压偏高,注意饮食和运动")
        );
    }

    #[test]
    fn test_heart_rate_tiers_and_messages() {
        assert_eq!(classify_heart_rate(45), AlertLevel::Danger);
        assert_eq!(classify_heart_rate(55), AlertLevel::Warning);
        assert_eq!(classify_heart_rate(60), AlertLevel::Normal);
        assert_eq!(classify_heart_rate(100), AlertLevel::Normal);
        assert_eq!(classify_heart_rate(110), AlertLevel::Warning);
        assert_eq!(classify_heart_rate(130), AlertLevel::Danger);

        assert!(heart_rate_message(45, Locale::En).unwrap().contains("too slow"));
        assert!(heart_rate_message(130, Locale::En).unwrap().contains("too fast"));
        assert_eq!(heart_rate_message(72, Locale::ZhCn), None);
    }

    #[test]
    fn test_evaluate_inr_reading() {
        let alert = evaluate_inr_reading(&inr(1.8), Locale::En);
        assert!(alert.has_alert);
        assert_eq!(alert.level, AlertLevel::Warning);
        assert_eq!(alert.messages.len(), 1);

        assert_eq!(evaluate_inr_reading(&inr(2.5), Locale::En), HealthAlert::normal());
    }

    #[test]
    fn test_warning_pressure_with_danger_heart_rate() {
        let alert = evaluate_blood_pressure_reading(&bp(135, 80, Some(130)), Locale::En);

        assert!(alert.has_alert);
        assert_eq!(alert.level, AlertLevel::Danger);
        assert_eq!(alert.messages.len(), 2);
        assert!(alert.messages[0].contains("Blood pressure"));
        assert!(alert.messages[1].contains("Heart rate"));
    }

    #[test]
    fn test_normal_pressure_with_slow_heart_rate() {
        let alert = evaluate_blood_pressure_reading(&bp(120, 80, Some(55)), Locale::ZhCn);
        assert_eq!(alert.level, AlertLevel::Warning);
        assert_eq!(alert.messages, vec!["⚡ 心率偏慢,请注意观察".to_string()]);
    }

    #[test]
    fn test_normal_reading_has_no_alert() {
        let alert = evaluate_blood_pressure_reading(&bp(118, 76, None), Locale::En);
        assert_eq!(alert, HealthAlert::normal());
    }
}

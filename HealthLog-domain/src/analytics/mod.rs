//! Pure analytics over in-memory reading lists
//!
//! Nothing in here touches storage or reads the environment; the timezone
//! used for day grouping is always passed in.

pub mod aggregate;
pub mod classify;
pub mod summary;

pub use aggregate::{
    aggregate_blood_pressure_by_day, aggregate_by_day, aggregate_heart_rate_by_day,
    aggregate_inr_by_day, compute_blood_pressure_stats, compute_in_range_rate, day_key, round_to,
    Precision, Timestamped,
};
pub use classify::{
    blood_pressure_message, classify_blood_pressure, classify_heart_rate, classify_inr,
    evaluate_blood_pressure, evaluate_blood_pressure_reading, evaluate_inr_reading,
    evaluate_inr_value, heart_rate_message, inr_message,
};
pub use summary::{build_health_report, build_trend_summary};

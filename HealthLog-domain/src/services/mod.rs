pub mod blood_pressure;
pub mod inr;

// Domain services
// This module contains business logic implementations.

use validator::ValidationErrors;

// Re-export service traits and factory functions
pub use blood_pressure::{
    create_default_blood_pressure_service, BloodPressureService, BloodPressureServiceError,
    BloodPressureServiceTrait,
};
pub use inr::{create_default_inr_service, InrService, InrServiceError, InrServiceTrait};

// Re-export mock service factory functions when the mock feature is enabled
#[cfg(feature = "mock")]
pub use blood_pressure::create_mock_blood_pressure_service;
#[cfg(feature = "mock")]
pub use inr::create_mock_inr_service;

/// Flatten validator errors into `field: message; field: message`
pub(crate) fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid {}", field),
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect();
    // field_errors is a HashMap
    fields.sort();
    fields.join("; ")
}

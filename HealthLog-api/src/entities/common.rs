use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use health_log_domain::services::{BloodPressureServiceError, InrServiceError};
use health_log_domain::time_range::TimeRangeError;

/// Error response format for API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a not found error response
    pub fn not_found(resource: &str) -> Self {
        Self {
            error: "not_found".to_string(),
            message: format!("The requested {} could not be found", resource),
            details: None,
        }
    }

    /// Create a validation error response
    pub fn validation_error(message: &str, details: Option<serde_json::Value>) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
            details,
        }
    }

    /// Create a bad request error response
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
            details: None,
        }
    }

    /// HTTP status matching the error code
    pub fn status(&self) -> StatusCode {
        match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" | "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<InrServiceError> for ErrorResponse {
    fn from(err: InrServiceError) -> Self {
        match err {
            InrServiceError::ValidationError(msg) => Self::validation_error(&msg, None),
            InrServiceError::NotFound(_) => Self::not_found("INR reading"),
            InrServiceError::RepositoryError(msg) => {
                error!("INR service failure: {}", msg);
                Self::internal_error()
            }
        }
    }
}

impl From<BloodPressureServiceError> for ErrorResponse {
    fn from(err: BloodPressureServiceError) -> Self {
        match err {
            BloodPressureServiceError::ValidationError(msg) => Self::validation_error(&msg, None),
            BloodPressureServiceError::NotFound(_) => Self::not_found("blood pressure reading"),
            BloodPressureServiceError::RepositoryError(msg) => {
                error!("Blood pressure service failure: {}", msg);
                Self::internal_error()
            }
        }
    }
}

impl From<TimeRangeError> for ErrorResponse {
    fn from(err: TimeRangeError) -> Self {
        Self::bad_request(&err.to_string())
    }
}

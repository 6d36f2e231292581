use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // INR endpoints
        crate::api::handlers::inr::list_inr_readings,
        crate::api::handlers::inr::create_inr_reading,
        crate::api::handlers::inr::get_inr_reading,
        crate::api::handlers::inr::update_inr_reading,
        crate::api::handlers::inr::delete_inr_reading,

        // Blood pressure endpoints
        crate::api::handlers::blood_pressure::list_blood_pressure_readings,
        crate::api::handlers::blood_pressure::create_blood_pressure_reading,
        crate::api::handlers::blood_pressure::get_blood_pressure_reading,
        crate::api::handlers::blood_pressure::update_blood_pressure_reading,
        crate::api::handlers::blood_pressure::delete_blood_pressure_reading,

        // Analytics endpoints
        crate::api::handlers::analytics::aggregate_inr,
        crate::api::handlers::analytics::aggregate_blood_pressure,
        crate::api::handlers::analytics::aggregate_heart_rate,
        crate::api::handlers::analytics::classify_inr,
        crate::api::handlers::analytics::classify_blood_pressure,
        crate::api::handlers::analytics::get_trends,
        crate::api::handlers::analytics::get_report,
    ),
    components(
        schemas(
            // Readings
            health_log_domain::entities::InrReading,
            health_log_domain::entities::CreateInrRequest,
            health_log_domain::entities::UpdateInrRequest,
            health_log_domain::entities::TargetRange,
            health_log_domain::entities::BloodPressureReading,
            health_log_domain::entities::CreateBloodPressureRequest,
            health_log_domain::entities::UpdateBloodPressureRequest,
            health_log_domain::entities::Position,

            // Alerts and summaries
            health_log_domain::entities::AlertLevel,
            health_log_domain::entities::HealthAlert,
            health_log_domain::entities::ColorHint,
            health_log_domain::entities::Locale,
            health_log_domain::entities::DailyAggregatePoint,
            health_log_domain::entities::BloodPressureStats,
            health_log_domain::entities::TrendSummary,
            health_log_domain::entities::HealthReport,
            health_log_domain::entities::InrReportSummary,
            health_log_domain::entities::InrReportRow,
            health_log_domain::entities::BloodPressureReportRow,
            health_log_domain::time_range::TimeRange,
            health_log_domain::time_range::TimeRangePreset,

            // API envelopes
            crate::entities::common::ErrorResponse,
            crate::entities::analytics::AggregateInrRequest,
            crate::entities::analytics::AggregateBloodPressureRequest,
            crate::entities::analytics::InrAggregateResponse,
            crate::entities::analytics::BloodPressureAggregateResponse,
            crate::entities::analytics::HeartRateAggregateResponse,
            crate::entities::analytics::ClassifyInrRequest,
            crate::entities::analytics::ClassifyBloodPressureRequest,
            crate::entities::analytics::ClassificationResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "inr", description = "INR reading management endpoints"),
        (name = "blood_pressure", description = "Blood pressure reading management endpoints"),
        (name = "analytics", description = "Aggregation, classification, trends and reports")
    ),
    info(
        title = "HealthLog API",
        version = "0.1.0",
        description = "API for tracking INR and blood pressure readings",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "HealthLog API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        assert!(tags.iter().any(|tag| tag.name == "inr"));
        assert!(tags.iter().any(|tag| tag.name == "analytics"));

        let paths = &openapi.paths.paths;
        for path in [
            "/health",
            "/aggregate/inr",
            "/aggregate/bp",
            "/aggregate/heart-rate",
            "/classify/inr",
            "/classify/bp",
            "/api/v1/inr",
            "/api/v1/inr/{id}",
            "/api/v1/bloodpressure",
            "/api/v1/bloodpressure/{id}",
            "/api/v1/trends",
            "/api/v1/report",
        ] {
            assert!(paths.contains_key(path), "missing path {}", path);
        }
    }
}

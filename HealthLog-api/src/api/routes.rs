use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::debug;

use crate::api::handlers::{analytics, blood_pressure, health, inr};
use crate::api::state::AppState;
use crate::openapi::configure_swagger_routes;

/// Create the application router around an existing state
pub fn create_app(state: AppState) -> Router {
    debug!("Creating application router");

    // Define specific routes before parametrized routes
    let api_routes = Router::new()
        .route(
            "/inr",
            get(inr::list_inr_readings).post(inr::create_inr_reading),
        )
        .route(
            "/inr/:id",
            get(inr::get_inr_reading)
                .put(inr::update_inr_reading)
                .delete(inr::delete_inr_reading),
        )
        .route(
            "/bloodpressure",
            get(blood_pressure::list_blood_pressure_readings)
                .post(blood_pressure::create_blood_pressure_reading),
        )
        .route(
            "/bloodpressure/:id",
            get(blood_pressure::get_blood_pressure_reading)
                .put(blood_pressure::update_blood_pressure_reading)
                .delete(blood_pressure::delete_blood_pressure_reading),
        )
        .route("/trends", get(analytics::get_trends))
        .route("/report", get(analytics::get_report));

    debug!("API routes configured");

    let analytics_routes = Router::new()
        .route("/aggregate/inr", post(analytics::aggregate_inr))
        .route("/aggregate/bp", post(analytics::aggregate_blood_pressure))
        .route("/aggregate/heart-rate", post(analytics::aggregate_heart_rate))
        .route("/classify/inr", post(analytics::classify_inr))
        .route("/classify/bp", post(analytics::classify_blood_pressure));

    let app = Router::new()
        .route("/health", get(health::health_check))
        .merge(analytics_routes)
        .nest("/api/v1", api_routes)
        .with_state(state)
        .merge(configure_swagger_routes());

    debug!("Routes merged");

    configure_security(app).layer(TraceLayer::new_for_http())
}

/// Apply CORS and security headers to every response
pub fn configure_security(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    app.layer(cors).layer(security_headers)
}

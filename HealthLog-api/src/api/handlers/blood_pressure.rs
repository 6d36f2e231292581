use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument};
use uuid::Uuid;

use health_log_domain::entities::{
    BloodPressureReading, CreateBloodPressureRequest, UpdateBloodPressureRequest,
};

use super::HistoryWindow;
use crate::api::state::BloodPressureService;
use crate::entities::common::ErrorResponse;
use crate::entities::queries::HistoryQueryParams;

/// List blood pressure readings, newest first
#[utoipa::path(
    get,
    path = "/api/v1/bloodpressure",
    params(HistoryQueryParams),
    responses(
        (status = 200, description = "Blood pressure readings retrieved", body = [BloodPressureReading]),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn list_blood_pressure_readings(
    State(service): State<BloodPressureService>,
    Query(params): Query<HistoryQueryParams>,
) -> Result<Json<Vec<BloodPressureReading>>, ErrorResponse> {
    let window = HistoryWindow::try_from(&params)?;

    let readings = service
        .get_filtered_readings(window.start, window.end, Some(window.limit))
        .await?;

    info!("Returning {} blood pressure readings", readings.len());
    Ok(Json(readings))
}

/// Create a new blood pressure reading
#[utoipa::path(
    post,
    path = "/api/v1/bloodpressure",
    request_body = CreateBloodPressureRequest,
    responses(
        (status = 201, description = "Blood pressure reading created", body = BloodPressureReading),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service, request))]
pub async fn create_blood_pressure_reading(
    State(service): State<BloodPressureService>,
    Json(request): Json<CreateBloodPressureRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    info!(
        "Creating new blood pressure reading: {}/{}",
        request.systolic, request.diastolic
    );

    let reading = service.create_reading(request).await?;

    info!("Blood pressure reading created with ID: {}", reading.id);
    Ok((StatusCode::CREATED, Json(reading)))
}

/// Get a single blood pressure reading by ID
#[utoipa::path(
    get,
    path = "/api/v1/bloodpressure/{id}",
    params(
        ("id" = String, Path, description = "Blood pressure reading ID")
    ),
    responses(
        (status = 200, description = "Blood pressure reading found", body = BloodPressureReading),
        (status = 404, description = "Blood pressure reading not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn get_blood_pressure_reading(
    State(service): State<BloodPressureService>,
    Path(id): Path<Uuid>,
) -> Result<Json<BloodPressureReading>, ErrorResponse> {
    let reading = service.get_reading_by_id(&id.to_string()).await?;
    Ok(Json(reading))
}

/// Update a blood pressure reading; absent fields are kept
#[utoipa::path(
    put,
    path = "/api/v1/bloodpressure/{id}",
    params(
        ("id" = String, Path, description = "Blood pressure reading ID")
    ),
    request_body = UpdateBloodPressureRequest,
    responses(
        (status = 200, description = "Blood pressure reading updated", body = BloodPressureReading),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Blood pressure reading not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service, request))]
pub async fn update_blood_pressure_reading(
    State(service): State<BloodPressureService>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBloodPressureRequest>,
) -> Result<Json<BloodPressureReading>, ErrorResponse> {
    let reading = service.update_reading(&id.to_string(), request).await?;
    info!("Blood pressure reading {} updated", id);
    Ok(Json(reading))
}

/// Delete a blood pressure reading
#[utoipa::path(
    delete,
    path = "/api/v1/bloodpressure/{id}",
    params(
        ("id" = String, Path, description = "Blood pressure reading ID")
    ),
    responses(
        (status = 204, description = "Blood pressure reading deleted"),
        (status = 404, description = "Blood pressure reading not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn delete_blood_pressure_reading(
    State(service): State<BloodPressureService>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ErrorResponse> {
    service.delete_reading(&id.to_string()).await?;
    info!("Blood pressure reading {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}

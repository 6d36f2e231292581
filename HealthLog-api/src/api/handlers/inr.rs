use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument};
use uuid::Uuid;

use health_log_domain::entities::{CreateInrRequest, InrReading, UpdateInrRequest};

use super::HistoryWindow;
use crate::api::state::InrService;
use crate::entities::common::ErrorResponse;
use crate::entities::queries::HistoryQueryParams;

/// List INR readings, newest first
#[utoipa::path(
    get,
    path = "/api/v1/inr",
    params(HistoryQueryParams),
    responses(
        (status = 200, description = "INR readings retrieved", body = [InrReading]),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "inr"
)]
#[instrument(skip(service))]
pub async fn list_inr_readings(
    State(service): State<InrService>,
    Query(params): Query<HistoryQueryParams>,
) -> Result<Json<Vec<InrReading>>, ErrorResponse> {
    let window = HistoryWindow::try_from(&params)?;

    let readings = service
        .get_filtered_readings(window.start, window.end, Some(window.limit))
        .await?;

    info!("Returning {} INR readings", readings.len());
    Ok(Json(readings))
}

/// Create a new INR reading
#[utoipa::path(
    post,
    path = "/api/v1/inr",
    request_body = CreateInrRequest,
    responses(
        (status = 201, description = "INR reading created", body = InrReading),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "inr"
)]
#[instrument(skip(service, request))]
pub async fn create_inr_reading(
    State(service): State<InrService>,
    Json(request): Json<CreateInrRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    info!("Creating new INR reading");

    let reading = service.create_reading(request).await?;

    info!("INR reading created with ID: {}", reading.id);
    Ok((StatusCode::CREATED, Json(reading)))
}

/// Get a single INR reading by ID
#[utoipa::path(
    get,
    path = "/api/v1/inr/{id}",
    params(
        ("id" = String, Path, description = "INR reading ID")
    ),
    responses(
        (status = 200, description = "INR reading found", body = InrReading),
        (status = 404, description = "INR reading not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "inr"
)]
#[instrument(skip(service))]
pub async fn get_inr_reading(
    State(service): State<InrService>,
    Path(id): Path<Uuid>,
) -> Result<Json<InrReading>, ErrorResponse> {
    let reading = service.get_reading_by_id(&id.to_string()).await?;
    Ok(Json(reading))
}

/// Update an INR reading; absent fields are kept
#[utoipa::path(
    put,
    path = "/api/v1/inr/{id}",
    params(
        ("id" = String, Path, description = "INR reading ID")
    ),
    request_body = UpdateInrRequest,
    responses(
        (status = 200, description = "INR reading updated", body = InrReading),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "INR reading not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "inr"
)]
#[instrument(skip(service, request))]
pub async fn update_inr_reading(
    State(service): State<InrService>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInrRequest>,
) -> Result<Json<InrReading>, ErrorResponse> {
    let reading = service.update_reading(&id.to_string(), request).await?;
    info!("INR reading {} updated", id);
    Ok(Json(reading))
}

/// Delete an INR reading
#[utoipa::path(
    delete,
    path = "/api/v1/inr/{id}",
    params(
        ("id" = String, Path, description = "INR reading ID")
    ),
    responses(
        (status = 204, description = "INR reading deleted"),
        (status = 404, description = "INR reading not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "inr"
)]
#[instrument(skip(service))]
pub async fn delete_inr_reading(
    State(service): State<InrService>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ErrorResponse> {
    service.delete_reading(&id.to_string()).await?;
    info!("INR reading {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}

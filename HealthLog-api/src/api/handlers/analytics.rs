//! Aggregation, classification, trends and report endpoints

use axum::extract::{Json, Query, State};
use chrono::{FixedOffset, Utc};
use tracing::{debug, info, instrument};

use health_log_domain::analytics::{
    aggregate_blood_pressure_by_day, aggregate_heart_rate_by_day, aggregate_inr_by_day,
    build_health_report, build_trend_summary, compute_blood_pressure_stats, compute_in_range_rate,
    evaluate_blood_pressure, evaluate_inr_value,
};
use health_log_domain::entities::{HealthReport, TrendSummary};
use health_log_domain::time_range::{parse_day, TimeRange, TimeRangePreset};

use crate::api::state::{AppSettings, AppState};
use crate::config::offset_from_minutes;
use crate::entities::analytics::{
    AggregateBloodPressureRequest, AggregateInrRequest, BloodPressureAggregateResponse,
    ClassificationResponse, ClassifyBloodPressureRequest, ClassifyInrRequest,
    HeartRateAggregateResponse, InrAggregateResponse,
};
use crate::entities::common::ErrorResponse;
use crate::entities::queries::{parse_locale, LocaleQuery, RangeQueryParams};

fn grouping_offset(
    requested: Option<i32>,
    settings: &AppSettings,
) -> Result<FixedOffset, ErrorResponse> {
    match requested {
        Some(minutes) => offset_from_minutes(minutes).ok_or_else(|| {
            ErrorResponse::bad_request("utc_offset_minutes must be within +/- 24 hours")
        }),
        None => Ok(settings.utc_offset),
    }
}

/// Average INR readings per local day
#[utoipa::path(
    post,
    path = "/aggregate/inr",
    request_body = AggregateInrRequest,
    responses(
        (status = 200, description = "Daily INR series", body = InrAggregateResponse),
        (status = 400, description = "Invalid offset", body = ErrorResponse),
    ),
    tag = "analytics"
)]
#[instrument(skip(settings, request))]
pub async fn aggregate_inr(
    State(settings): State<AppSettings>,
    Json(request): Json<AggregateInrRequest>,
) -> Result<Json<InrAggregateResponse>, ErrorResponse> {
    let tz = grouping_offset(request.utc_offset_minutes, &settings)?;
    debug!("Aggregating {} INR readings at {}", request.readings.len(), tz);

    Ok(Json(InrAggregateResponse {
        series: aggregate_inr_by_day(&request.readings, &tz),
        in_range_rate: compute_in_range_rate(&request.readings),
    }))
}

/// Average systolic and diastolic pressure per local day
#[utoipa::path(
    post,
    path = "/aggregate/bp",
    request_body = AggregateBloodPressureRequest,
    responses(
        (status = 200, description = "Daily blood pressure series", body = BloodPressureAggregateResponse),
        (status = 400, description = "Invalid offset", body = ErrorResponse),
    ),
    tag = "analytics"
)]
#[instrument(skip(settings, request))]
pub async fn aggregate_blood_pressure(
    State(settings): State<AppSettings>,
    Json(request): Json<AggregateBloodPressureRequest>,
) -> Result<Json<BloodPressureAggregateResponse>, ErrorResponse> {
    let tz = grouping_offset(request.utc_offset_minutes, &settings)?;

    Ok(Json(BloodPressureAggregateResponse {
        series: aggregate_blood_pressure_by_day(&request.readings, &tz),
        stats: compute_blood_pressure_stats(&request.readings),
    }))
}

/// Average heart rate per local day
#[utoipa::path(
    post,
    path = "/aggregate/heart-rate",
    request_body = AggregateBloodPressureRequest,
    responses(
        (status = 200, description = "Daily heart rate series", body = HeartRateAggregateResponse),
        (status = 400, description = "Invalid offset", body = ErrorResponse),
    ),
    tag = "analytics"
)]
#[instrument(skip(settings, request))]
pub async fn aggregate_heart_rate(
    State(settings): State<AppSettings>,
    Json(request): Json<AggregateBloodPressureRequest>,
) -> Result<Json<HeartRateAggregateResponse>, ErrorResponse> {
    let tz = grouping_offset(request.utc_offset_minutes, &settings)?;

    Ok(Json(HeartRateAggregateResponse {
        series: aggregate_heart_rate_by_day(&request.readings, &tz),
    }))
}

/// Classify an INR value
#[utoipa::path(
    post,
    path = "/classify/inr",
    params(LocaleQuery),
    request_body = ClassifyInrRequest,
    responses(
        (status = 200, description = "Alert for the value", body = ClassificationResponse),
        (status = 400, description = "Unsupported locale", body = ErrorResponse),
    ),
    tag = "analytics"
)]
#[instrument(skip(settings))]
pub async fn classify_inr(
    State(settings): State<AppSettings>,
    Query(query): Query<LocaleQuery>,
    Json(request): Json<ClassifyInrRequest>,
) -> Result<Json<ClassificationResponse>, ErrorResponse> {
    let locale = parse_locale(query.locale.as_deref(), settings.default_locale)?;
    Ok(Json(evaluate_inr_value(request.value, locale).into()))
}

/// Classify a blood pressure pair and optional heart rate
#[utoipa::path(
    post,
    path = "/classify/bp",
    params(LocaleQuery),
    request_body = ClassifyBloodPressureRequest,
    responses(
        (status = 200, description = "Alert for the reading", body = ClassificationResponse),
        (status = 400, description = "Unsupported locale", body = ErrorResponse),
    ),
    tag = "analytics"
)]
#[instrument(skip(settings))]
pub async fn classify_blood_pressure(
    State(settings): State<AppSettings>,
    Query(query): Query<LocaleQuery>,
    Json(request): Json<ClassifyBloodPressureRequest>,
) -> Result<Json<ClassificationResponse>, ErrorResponse> {
    let locale = parse_locale(query.locale.as_deref(), settings.default_locale)?;
    let alert = evaluate_blood_pressure(
        request.systolic,
        request.diastolic,
        request.heart_rate,
        locale,
    );
    Ok(Json(alert.into()))
}

fn resolve_range(params: &RangeQueryParams, tz: &FixedOffset) -> Result<TimeRange, ErrorResponse> {
    let preset = params
        .range
        .as_deref()
        .map(str::parse::<TimeRangePreset>)
        .transpose()?
        .unwrap_or_default();
    let start = params.start_date.as_deref().map(parse_day).transpose()?;
    let end = params.end_date.as_deref().map(parse_day).transpose()?;

    Ok(preset.resolve(Utc::now(), tz, start, end)?)
}

/// Day-level series and statistics for a time range
#[utoipa::path(
    get,
    path = "/api/v1/trends",
    params(RangeQueryParams),
    responses(
        (status = 200, description = "Trend summary", body = TrendSummary),
        (status = 400, description = "Invalid range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "analytics"
)]
#[instrument(skip(state))]
pub async fn get_trends(
    State(state): State<AppState>,
    Query(params): Query<RangeQueryParams>,
) -> Result<Json<TrendSummary>, ErrorResponse> {
    let tz = state.settings.utc_offset;
    let range = resolve_range(&params, &tz)?;
    info!("Building trends for {}", range.label());

    let inr = state
        .inr
        .get_filtered_readings(Some(range.start), Some(range.end), None)
        .await?;
    let blood_pressure = state
        .blood_pressure
        .get_filtered_readings(Some(range.start), Some(range.end), None)
        .await?;

    Ok(Json(build_trend_summary(&inr, &blood_pressure, &tz, &range)))
}

/// Report of every reading in a time range with its alert
#[utoipa::path(
    get,
    path = "/api/v1/report",
    params(RangeQueryParams),
    responses(
        (status = 200, description = "Health report", body = HealthReport),
        (status = 400, description = "Invalid range or locale", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "analytics"
)]
#[instrument(skip(state))]
pub async fn get_report(
    State(state): State<AppState>,
    Query(params): Query<RangeQueryParams>,
) -> Result<Json<HealthReport>, ErrorResponse> {
    let tz = state.settings.utc_offset;
    let range = resolve_range(&params, &tz)?;
    let locale = parse_locale(params.locale.as_deref(), state.settings.default_locale)?;
    info!("Building {} report for {}", locale, range.label());

    let inr = state
        .inr
        .get_filtered_readings(Some(range.start), Some(range.end), None)
        .await?;
    let blood_pressure = state
        .blood_pressure
        .get_filtered_readings(Some(range.start), Some(range.end), None)
        .await?;

    Ok(Json(build_health_report(
        &inr,
        &blood_pressure,
        &range,
        locale,
        Utc::now(),
    )))
}

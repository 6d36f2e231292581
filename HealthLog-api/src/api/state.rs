use std::sync::Arc;

use axum::extract::FromRef;
use chrono::FixedOffset;

use health_log_domain::entities::Locale;
use health_log_domain::health::HealthServiceTrait;
use health_log_domain::services::{
    create_default_blood_pressure_service, create_default_inr_service, BloodPressureServiceTrait,
    InrServiceTrait,
};

use crate::api::handlers::health::create_health_service;
use crate::config::AppConfig;

/// Service types for dependency injection
pub type InrService = Arc<dyn InrServiceTrait>;
pub type BloodPressureService = Arc<dyn BloodPressureServiceTrait>;
pub type HealthService = Arc<dyn HealthServiceTrait>;

/// Request-independent settings the handlers need
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Offset used to group readings into local days
    pub utc_offset: FixedOffset,
    /// Message language when a request does not pick one
    pub default_locale: Locale,
    /// Deployment environment reported by the health check
    pub environment: String,
}

impl From<&AppConfig> for AppSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            utc_offset: config.utc_offset,
            default_locale: config.default_locale,
            environment: config.environment.clone(),
        }
    }
}

/// Shared state of the router
#[derive(Clone, FromRef)]
pub struct AppState {
    pub inr: InrService,
    pub blood_pressure: BloodPressureService,
    pub health: HealthService,
    pub settings: AppSettings,
}

impl AppState {
    /// State backed by the default repositories
    pub fn new(config: &AppConfig) -> Self {
        Self {
            inr: Arc::new(create_default_inr_service()),
            blood_pressure: Arc::new(create_default_blood_pressure_service()),
            health: create_health_service(),
            settings: AppSettings::from(config),
        }
    }
}

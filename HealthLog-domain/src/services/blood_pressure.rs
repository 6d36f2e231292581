use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, error, warn};
use validator::Validate;

use crate::entities::blood_pressure::{
    BloodPressureReading, CreateBloodPressureRequest, UpdateBloodPressureRequest,
};
use crate::entities::conversions;
use crate::services::describe_validation_errors;
use health_log_data::models::{format_record_time, ReadingFilter};
use health_log_data::repository::{BloodPressureRepositoryTrait, RepositoryError};

/// Blood pressure service errors
#[derive(Debug, Error)]
pub enum BloodPressureServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Not found error
    #[error("Reading not found: {0}")]
    NotFound(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for BloodPressureServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => BloodPressureServiceError::NotFound(msg),
            other => {
                error!("Blood pressure repository failure: {}", other);
                BloodPressureServiceError::RepositoryError(other.to_string())
            }
        }
    }
}

/// Trait for blood pressure service operations
#[async_trait]
pub trait BloodPressureServiceTrait: Send + Sync {
    /// Validate a create blood pressure request
    fn validate_create_request(
        &self,
        request: &CreateBloodPressureRequest,
    ) -> Result<(), BloodPressureServiceError>;

    /// Create a new blood pressure reading
    async fn create_reading(
        &self,
        request: CreateBloodPressureRequest,
    ) -> Result<BloodPressureReading, BloodPressureServiceError>;

    /// Apply a partial update to an existing reading
    async fn update_reading(
        &self,
        id: &str,
        request: UpdateBloodPressureRequest,
    ) -> Result<BloodPressureReading, BloodPressureServiceError>;

    /// Delete a reading
    async fn delete_reading(&self, id: &str) -> Result<(), BloodPressureServiceError>;

    /// Get a blood pressure reading by ID
    async fn get_reading_by_id(&self, id: &str) -> Result<BloodPressureReading, BloodPressureServiceError>;

    /// Get readings taken between `start` and `end` (inclusive), newest first
    async fn get_filtered_readings(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: Option<usize>,
    ) -> Result<Vec<BloodPressureReading>, BloodPressureServiceError>;
}

/// Blood pressure service for domain logic
pub struct BloodPressureService<R: BloodPressureRepositoryTrait> {
    repository: R,
}

impl<R: BloodPressureRepositoryTrait> BloodPressureService<R> {
    /// Create a new blood pressure service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    fn check_pressure_order(systolic: u16, diastolic: u16) -> Result<(), BloodPressureServiceError> {
        if systolic <= diastolic {
            return Err(BloodPressureServiceError::ValidationError(
                "Systolic pressure must be greater than diastolic pressure".to_string(),
            ));
        }
        Ok(())
    }

    fn to_domain(
        reading: health_log_data::models::blood_pressure::BloodPressureReading,
    ) -> Result<BloodPressureReading, BloodPressureServiceError> {
        conversions::convert_to_domain_bp_reading(reading)
            .map_err(BloodPressureServiceError::RepositoryError)
    }
}

#[async_trait]
impl<R: BloodPressureRepositoryTrait> BloodPressureServiceTrait for BloodPressureService<R> {
    fn validate_create_request(
        &self,
        request: &CreateBloodPressureRequest,
    ) -> Result<(), BloodPressureServiceError> {
        if let Err(validation_errors) = request.validate() {
            let message = describe_validation_errors(&validation_errors);
            warn!("Rejected blood pressure reading: {}", message);
            return Err(BloodPressureServiceError::ValidationError(message));
        }

        Self::check_pressure_order(request.systolic, request.diastolic)
    }

    async fn create_reading(
        &self,
        request: CreateBloodPressureRequest,
    ) -> Result<BloodPressureReading, BloodPressureServiceError> {
        self.validate_create_request(&request)?;

        let data_request = conversions::convert_to_data_bp_create_request(&request);
        let data_reading = self.repository.create(data_request).await?;

        Self::to_domain(data_reading)
    }

    async fn update_reading(
        &self,
        id: &str,
        request: UpdateBloodPressureRequest,
    ) -> Result<BloodPressureReading, BloodPressureServiceError> {
        if let Err(validation_errors) = request.validate() {
            let message = describe_validation_errors(&validation_errors);
            warn!("Rejected blood pressure update for {}: {}", id, message);
            return Err(BloodPressureServiceError::ValidationError(message));
        }

        let existing = self.get_reading_by_id(id).await?;
        let updated = request.apply_to(&existing);
        Self::check_pressure_order(updated.systolic, updated.diastolic)?;

        let stored = self
            .repository
            .update(conversions::convert_to_data_bp_reading(&updated))
            .await?;

        Self::to_domain(stored)
    }

    async fn delete_reading(&self, id: &str) -> Result<(), BloodPressureServiceError> {
        let id_uuid = conversions::parse_string_to_uuid(id)
            .map_err(BloodPressureServiceError::ValidationError)?;

        self.repository.delete(id_uuid).await?;
        debug!("Deleted blood pressure reading {}", id);
        Ok(())
    }

    async fn get_reading_by_id(&self, id: &str) -> Result<BloodPressureReading, BloodPressureServiceError> {
        let id_uuid = conversions::parse_string_to_uuid(id)
            .map_err(BloodPressureServiceError::ValidationError)?;

        let data_reading = self.repository.get_by_id(id_uuid).await?.ok_or_else(|| {
            BloodPressureServiceError::NotFound(format!(
                "Blood pressure reading with ID {} not found",
                id
            ))
        })?;

        Self::to_domain(data_reading)
    }

    async fn get_filtered_readings(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: Option<usize>,
    ) -> Result<Vec<BloodPressureReading>, BloodPressureServiceError> {
        let filter = ReadingFilter {
            start: start.as_ref().map(format_record_time),
            end: end.as_ref().map(format_record_time),
            limit,
        };

        self.repository
            .get_filtered(filter)
            .await?
            .into_iter()
            .map(Self::to_domain)
            .collect()
    }
}

/// Create a default blood pressure service using the repository from data layer
pub fn create_default_blood_pressure_service() -> impl BloodPressureServiceTrait {
    let repository = health_log_data::repository::BloodPressureRepository::new();
    BloodPressureService::new(repository)
}

/// Create a blood pressure service over an in-memory mock repository
/// This function is only available when the mock feature is enabled
#[cfg(feature = "mock")]
pub fn create_mock_blood_pressure_service() -> impl BloodPressureServiceTrait {
    BloodPressureService::new(health_log_data::repository::tests::MockBloodPressureRepository::new())
}

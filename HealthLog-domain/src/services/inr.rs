use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, error, warn};
use validator::Validate;

use crate::entities::conversions;
use crate::entities::inr::{validate_target_range, CreateInrRequest, InrReading, UpdateInrRequest};
use crate::services::describe_validation_errors;
use health_log_data::models::{format_record_time, ReadingFilter};
use health_log_data::repository::{InrRepositoryTrait, RepositoryError};

/// INR service errors
#[derive(Debug, Error)]
pub enum InrServiceError {
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

impl From<RepositoryError> for InrServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => InrServiceError::NotFound(msg),
            other => {
                error!("INR repository failure: {}", other);
                InrServiceError::RepositoryError(other.to_string())
            }
        }
    }
}

/// Trait for INR service operations
#[async_trait]
pub trait InrServiceTrait: Send + Sync {
    /// Validate a create INR request
    fn validate_create_request(&self, request: &CreateInrRequest) -> Result<(), InrServiceError>;

    /// Create a new INR reading
    ///
    /// The target range defaults to 2.0 - 3.0 and the in-range flag is
    /// derived from it.
    async fn create_reading(&self, request: CreateInrRequest) -> Result<InrReading, InrServiceError>;

    /// Apply a partial update to an existing reading
    async fn update_reading(
        &self,
        id: &str,
        request: UpdateInrRequest,
    ) -> Result<InrReading, InrServiceError>;

    /// Delete a reading
    async fn delete_reading(&self, id: &str) -> Result<(), InrServiceError>;

    /// Get an INR reading by ID
    async fn get_reading_by_id(&self, id: &str) -> Result<InrReading, InrServiceError>;

    /// Get readings taken between `start` and `end` (inclusive), newest first
    async fn get_filtered_readings(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: Option<usize>,
    ) -> Result<Vec<InrReading>, InrServiceError>;
}

/// INR service for domain logic
pub struct InrService<R: InrRepositoryTrait> {
    repository: R,
}

impl<R: InrRepositoryTrait> InrService<R> {
    /// Create a new INR service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    fn to_domain(
        reading: health_log_data::models::inr::InrReading,
    ) -> Result<InrReading, InrServiceError> {
        conversions::convert_to_domain_inr_reading(reading).map_err(InrServiceError::RepositoryError)
    }
}

#[async_trait]
impl<R: InrRepositoryTrait> InrServiceTrait for InrService<R> {
    fn validate_create_request(&self, request: &CreateInrRequest) -> Result<(), InrServiceError> {
        if let Err(validation_errors) = request.validate() {
            let message = describe_validation_errors(&validation_errors);
            warn!("Rejected INR reading: {}", message);
            return Err(InrServiceError::ValidationError(message));
        }

        if let Some(range) = &request.target_range {
            validate_target_range(range).map_err(InrServiceError::ValidationError)?;
        }

        Ok(())
    }

    async fn create_reading(&self, request: CreateInrRequest) -> Result<InrReading, InrServiceError> {
        self.validate_create_request(&request)?;

        let data_request = conversions::convert_to_data_inr_create_request(
            request.value,
            request.warfarin_dose_mg,
            &request.record_time,
            request.target_range.unwrap_or_default(),
            request.note,
        );
        let data_reading = self.repository.create(data_request).await?;

        Self::to_domain(data_reading)
    }

    async fn update_reading(
        &self,
        id: &str,
        request: UpdateInrRequest,
    ) -> Result<InrReading, InrServiceError> {
        if let Err(validation_errors) = request.validate() {
            let message = describe_validation_errors(&validation_errors);
            warn!("Rejected INR update for {}: {}", id, message);
            return Err(InrServiceError::ValidationError(message));
        }
        if let Some(range) = &request.target_range {
            validate_target_range(range).map_err(InrServiceError::ValidationError)?;
        }

        let existing = self.get_reading_by_id(id).await?;
        let updated = request.apply_to(&existing);

        let stored = self
            .repository
            .update(conversions::convert_to_data_inr_reading(&updated))
            .await?;

        Self::to_domain(stored)
    }

    async fn delete_reading(&self, id: &str) -> Result<(), InrServiceError> {
        let id_uuid =
            conversions::parse_string_to_uuid(id).map_err(InrServiceError::ValidationError)?;

        self.repository.delete(id_uuid).await?;
        debug!("Deleted INR reading {}", id);
        Ok(())
    }

    async fn get_reading_by_id(&self, id: &str) -> Result<InrReading, InrServiceError> {
        let id_uuid =
            conversions::parse_string_to_uuid(id).map_err(InrServiceError::ValidationError)?;

        let data_reading = self
            .repository
            .get_by_id(id_uuid)
            .await?
            .ok_or_else(|| InrServiceError::NotFound(format!("INR reading with ID {} not found", id)))?;

        Self::to_domain(data_reading)
    }

    async fn get_filtered_readings(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: Option<usize>,
    ) -> Result<Vec<InrReading>, InrServiceError> {
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

/// Create a default INR service using the repository from data layer
pub fn create_default_inr_service() -> impl InrServiceTrait {
    let repository = health_log_data::repository::InrRepository::new();
    InrService::new(repository)
}

/// Create an INR service over an in-memory mock repository
/// This function is only available when the mock feature is enabled
#[cfg(feature = "mock")]
pub fn create_mock_inr_service() -> impl InrServiceTrait {
    InrService::new(health_log_data::repository::tests::MockInrRepository::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::inr::TargetRange;
    use chrono::TimeZone;
    use health_log_data::repository::tests::MockInrRepository;

    fn request(value: f64, day: u32) -> CreateInrRequest {
        CreateInrRequest {
            value,
            warfarin_dose_mg: 3.0,
            record_time: Utc.with_ymd_and_hms(2026, 1, day, 8, 0, 0).unwrap(),
            target_range: None,
            note: None,
        }
    }

    fn service() -> InrService<MockInrRepository> {
        InrService::new(MockInrRepository::new())
    }

    #[test]
    fn test_validate_create_request() {
        let service = service();
        assert!(service.validate_create_request(&request(2.4, 20)).is_ok());

        let err = service.validate_create_request(&request(0.0, 20)).unwrap_err();
        assert!(err.to_string().contains("INR value"));

        let mut too_much = request(2.4, 20);
        too_much.warfarin_dose_mg = 80.0;
        assert!(service.validate_create_request(&too_much).is_err());

        let mut chatty = request(2.4, 20);
        chatty.note = Some("x".repeat(1001));
        assert!(service.validate_create_request(&chatty).is_err());

        let mut reversed = request(2.4, 20);
        reversed.target_range = Some(TargetRange { low: 3.0, high: 2.0 });
        assert!(service.validate_create_request(&reversed).is_err());
    }

    #[tokio::test]
    async fn test_create_fills_default_target_range() {
        let service = service();

        let inside = service.create_reading(request(2.4, 20)).await.unwrap();
        assert_eq!(inside.is_in_range, Some(true));
        assert_eq!(inside.target_range(), Some(TargetRange::default()));

        let outside = service.create_reading(request(3.2, 21)).await.unwrap();
        assert_eq!(outside.is_in_range, Some(false));
    }

    #[tokio::test]
    async fn test_create_with_custom_target_range() {
        let mut req = request(3.2, 20);
        req.target_range = Some(TargetRange { low: 2.5, high: 3.5 });

        let created = service().create_reading(req).await.unwrap();
        assert_eq!(created.is_in_range, Some(true));
        assert_eq!(created.target_range_low, Some(2.5));
    }

    #[tokio::test]
    async fn test_update_rederives_in_range() {
        let service = service();
        let created = service.create_reading(request(2.4, 20)).await.unwrap();

        let update = UpdateInrRequest {
            value: Some(1.7),
            ..Default::default()
        };
        let updated = service.update_reading(&created.id, update).await.unwrap();
        assert_eq!(updated.value, 1.7);
        assert_eq!(updated.is_in_range, Some(false));
        assert_eq!(service.get_reading_by_id(&created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_unknown_reading_is_not_found() {
        let result = service()
            .update_reading("123e4567-e89b-12d3-a456-426614174000", UpdateInrRequest::default())
            .await;
        assert!(matches!(result, Err(InrServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_filtered_readings_respect_bounds_and_limit() {
        let service = service();
        for day in [10, 12, 11, 15] {
            service.create_reading(request(2.5, day)).await.unwrap();
        }

        let start = Utc.with_ymd_and_hms(2026, 1, 11, 0, 0, 0).unwrap();
        let readings = service.get_filtered_readings(Some(start), None, None).await.unwrap();
        assert_eq!(readings.len(), 3);
        assert!(readings
            .windows(2)
            .all(|pair| pair[0].record_time >= pair[1].record_time));

        let latest = service.get_filtered_readings(None, None, Some(1)).await.unwrap();
        assert_eq!(latest[0].record_time.format("%d").to_string(), "15");
    }

    #[tokio::test]
    async fn test_delete_reading() {
        let service = service();
        let created = service.create_reading(request(2.4, 20)).await.unwrap();
        service.delete_reading(&created.id).await.unwrap();
        assert!(matches!(
            service.get_reading_by_id(&created.id).await,
            Err(InrServiceError::NotFound(_))
        ));
    }
}

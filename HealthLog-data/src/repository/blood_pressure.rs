use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryError;
use super::store::ReadingStore;
use crate::models::blood_pressure::{CreateBloodPressureRequest, BloodPressureReading};
use crate::models::ReadingFilter;

/// Repository trait for blood pressure readings
#[async_trait]
pub trait BloodPressureRepositoryTrait: Send + Sync {
    /// Create a new blood pressure reading from a request
    async fn create(&self, request: CreateBloodPressureRequest) -> Result<BloodPressureReading, RepositoryError>;

    /// Replace an existing blood pressure reading
    async fn update(&self, reading: BloodPressureReading) -> Result<BloodPressureReading, RepositoryError>;

    /// Delete a blood pressure reading
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// Get a blood pressure reading by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<BloodPressureReading>, RepositoryError>;

    /// Get blood pressure readings inside the filter bounds, newest first
    async fn get_filtered(&self, filter: ReadingFilter) -> Result<Vec<BloodPressureReading>, RepositoryError>;
}

/// Repository for blood pressure readings backed by SQLite with in-memory fallback
#[derive(Debug, Clone, Default)]
pub struct BloodPressureRepository {
    store: ReadingStore<BloodPressureReading>,
}

impl BloodPressureRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BloodPressureRepositoryTrait for BloodPressureRepository {
    async fn create(&self, request: CreateBloodPressureRequest) -> Result<BloodPressureReading, RepositoryError> {
        let reading = BloodPressureReading::from_request(Uuid::new_v4().to_string(), request);
        self.store.insert(reading)
    }

    async fn update(&self, reading: BloodPressureReading) -> Result<BloodPressureReading, RepositoryError> {
        self.store.update(reading)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.store.delete(&id.to_string())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<BloodPressureReading>, RepositoryError> {
        self.store.get_by_id(&id.to_string())
    }

    async fn get_filtered(&self, filter: ReadingFilter) -> Result<Vec<BloodPressureReading>, RepositoryError> {
        self.store.get_filtered(&filter)
    }
}

/// Mock blood pressure repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use crate::repository::in_memory::InMemoryStorage;

    /// In-memory mock that can be told to fail every call
    #[derive(Debug, Clone, Default)]
    pub struct MockBloodPressureRepository {
        storage: InMemoryStorage<BloodPressureReading>,
        fail: bool,
    }

    impl MockBloodPressureRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a mock repository with predefined readings
        pub fn with_readings(readings: Vec<BloodPressureReading>) -> Self {
            let mock = Self::new();
            for reading in &readings {
                let _ = mock.storage.insert(reading);
            }
            mock
        }

        /// Make every call return a database error
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn check(&self) -> Result<(), RepositoryError> {
            if self.fail {
                Err(RepositoryError::Lock("mock repository configured to fail".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl BloodPressureRepositoryTrait for MockBloodPressureRepository {
        async fn create(&self, request: CreateBloodPressureRequest) -> Result<BloodPressureReading, RepositoryError> {
            self.check()?;
            let reading = BloodPressureReading::from_request(Uuid::new_v4().to_string(), request);
            self.storage.insert(&reading)
        }

        async fn update(&self, reading: BloodPressureReading) -> Result<BloodPressureReading, RepositoryError> {
            self.check()?;
            if self.storage.replace(&reading)? {
                Ok(reading)
            } else {
                Err(RepositoryError::NotFound(reading.id))
            }
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
            self.check()?;
            if self.storage.remove(&id.to_string())? {
                Ok(())
            } else {
                Err(RepositoryError::NotFound(id.to_string()))
            }
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Option<BloodPressureReading>, RepositoryError> {
            self.check()?;
            self.storage.get_by_id(&id.to_string())
        }

        async fn get_filtered(&self, filter: ReadingFilter) -> Result<Vec<BloodPressureReading>, RepositoryError> {
            self.check()?;
            self.storage.get_filtered(&filter)
        }
    }
}

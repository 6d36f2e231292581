use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryError;
use super::store::ReadingStore;
use crate::models::inr::{CreateInrRequest, InrReading};
use crate::models::ReadingFilter;

/// Repository trait for INR readings
#[async_trait]
pub trait InrRepositoryTrait: Send + Sync {
    /// Create a new INR reading from a request
    async fn create(&self, request: CreateInrRequest) -> Result<InrReading, RepositoryError>;

    /// Replace an existing INR reading
    async fn update(&self, reading: InrReading) -> Result<InrReading, RepositoryError>;

    /// Delete an INR reading
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// Get an INR reading by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<InrReading>, RepositoryError>;

    /// Get INR readings inside the filter bounds, newest first
    async fn get_filtered(&self, filter: ReadingFilter) -> Result<Vec<InrReading>, RepositoryError>;
}

/// Repository for INR readings backed by SQLite with in-memory fallback
#[derive(Debug, Clone, Default)]
pub struct InrRepository {
    store: ReadingStore<InrReading>,
}

impl InrRepository {
    /// Create a new repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InrRepositoryTrait for InrRepository {
    async fn create(&self, request: CreateInrRequest) -> Result<InrReading, RepositoryError> {
        let reading = InrReading::from_request(Uuid::new_v4().to_string(), request);
        self.store.insert(reading)
    }

    async fn update(&self, reading: InrReading) -> Result<InrReading, RepositoryError> {
        self.store.update(reading)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.store.delete(&id.to_string())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<InrReading>, RepositoryError> {
        self.store.get_by_id(&id.to_string())
    }

    async fn get_filtered(&self, filter: ReadingFilter) -> Result<Vec<InrReading>, RepositoryError> {
        self.store.get_filtered(&filter)
    }
}

/// Mock INR repository for testing
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;
    use crate::repository::in_memory::InMemoryStorage;

    /// In-memory mock that can be told to fail every call
    #[derive(Debug, Clone, Default)]
    pub struct MockInrRepository {
        storage: InMemoryStorage<InrReading>,
        fail: bool,
    }

    impl MockInrRepository {
        /// Create a new empty mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a mock repository with predefined readings
        pub fn with_readings(readings: Vec<InrReading>) -> Self {
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
    impl InrRepositoryTrait for MockInrRepository {
        async fn create(&self, request: CreateInrRequest) -> Result<InrReading, RepositoryError> {
            self.check()?;
            let reading = InrReading::from_request(Uuid::new_v4().to_string(), request);
            self.storage.insert(&reading)
        }

        async fn update(&self, reading: InrReading) -> Result<InrReading, RepositoryError> {
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

        async fn get_by_id(&self, id: Uuid) -> Result<Option<InrReading>, RepositoryError> {
            self.check()?;
            self.storage.get_by_id(&id.to_string())
        }

        async fn get_filtered(&self, filter: ReadingFilter) -> Result<Vec<InrReading>, RepositoryError> {
            self.check()?;
            self.storage.get_filtered(&filter)
        }
    }
}

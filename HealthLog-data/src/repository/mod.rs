// Repository module structure
pub mod errors;
mod blood_pressure;
mod in_memory;
mod inr;
mod storage;
mod store;

// Re-export commonly used types
pub use blood_pressure::{BloodPressureRepository, BloodPressureRepositoryTrait};
pub use errors::RepositoryError;
pub use inr::{InrRepository, InrRepositoryTrait};

// Mock repositories for tests and for the mock feature
#[cfg(any(test, feature = "mock"))]
pub mod tests {
    pub use super::blood_pressure::tests::MockBloodPressureRepository;
    pub use super::inr::tests::MockInrRepository;
}

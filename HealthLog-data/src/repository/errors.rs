use std::sync::PoisonError;
use thiserror::Error;

use crate::database::DatabaseError;

/// Failures of the reading repositories
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Reading not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// The in-memory store could not be locked
    #[error("Storage unavailable: {0}")]
    Lock(String),
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::Lock(error.to_string())
    }
}

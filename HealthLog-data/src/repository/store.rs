use tracing::{debug, error};

use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;
use super::storage::{DatabaseStorage, SqliteRecord};
use crate::database::{get_db_pool, DatabaseError, DatabasePool};
use crate::models::{ReadingFilter, StoredReading};

/// Reading store that prefers the database and falls back to memory
///
/// Readings live in memory only while the database pool has never been
/// initialized. Once a pool exists every failure is reported to the caller.
#[derive(Debug, Clone)]
pub(crate) struct ReadingStore<T> {
    memory: InMemoryStorage<T>,
    pool: Option<DatabasePool>,
}

impl<T> Default for ReadingStore<T> {
    fn default() -> Self {
        Self {
            memory: InMemoryStorage::new(),
            pool: None,
        }
    }
}

impl<T> ReadingStore<T> {
    /// Store bound to an explicit pool instead of the global one
    #[cfg(test)]
    pub fn with_pool(pool: DatabasePool) -> Self {
        Self {
            memory: InMemoryStorage::new(),
            pool: Some(pool),
        }
    }

    /// Pool to use, or `None` when readings should stay in memory
    fn backend(&self) -> Result<Option<DatabasePool>, RepositoryError> {
        if let Some(pool) = &self.pool {
            return Ok(Some(pool.clone()));
        }
        match get_db_pool() {
            Ok(pool) => Ok(Some(pool)),
            Err(DatabaseError::PoolNotInitialized) => {
                debug!("Database pool not initialized, using in-memory storage");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<T: SqliteRecord + StoredReading + Clone> ReadingStore<T> {
    pub fn insert(&self, reading: T) -> Result<T, RepositoryError> {
        match self.backend()? {
            Some(pool) => {
                DatabaseStorage::insert(&pool, &reading).map_err(|e| {
                    error!("Failed to store reading in {}: {}", T::TABLE, e);
                    e
                })?;
                Ok(reading)
            }
            None => self.memory.insert(&reading),
        }
    }

    pub fn update(&self, reading: T) -> Result<T, RepositoryError> {
        let updated = match self.backend()? {
            Some(pool) => DatabaseStorage::update(&pool, &reading).map_err(|e| {
                error!("Failed to update reading in {}: {}", T::TABLE, e);
                e
            })?,
            None => self.memory.replace(&reading)?,
        };

        if updated {
            Ok(reading)
        } else {
            Err(RepositoryError::NotFound(reading.id().to_string()))
        }
    }

    pub fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let deleted = match self.backend()? {
            Some(pool) => DatabaseStorage::delete::<T>(&pool, id).map_err(|e| {
                error!("Failed to delete reading from {}: {}", T::TABLE, e);
                e
            })?,
            None => self.memory.remove(id)?,
        };

        if deleted {
            Ok(())
        } else {
            Err(RepositoryError::NotFound(id.to_string()))
        }
    }

    pub fn get_by_id(&self, id: &str) -> Result<Option<T>, RepositoryError> {
        match self.backend()? {
            Some(pool) => DatabaseStorage::get_by_id(&pool, id).map_err(|e| {
                error!("Failed to get reading by ID from {}: {}", T::TABLE, e);
                e
            }),
            None => self.memory.get_by_id(id),
        }
    }

    pub fn get_filtered(&self, filter: &ReadingFilter) -> Result<Vec<T>, RepositoryError> {
        match self.backend()? {
            Some(pool) => DatabaseStorage::get_filtered(&pool, filter).map_err(|e| {
                error!("Failed to get filtered readings from {}: {}", T::TABLE, e);
                e
            }),
            None => self.memory.get_filtered(filter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inr::InrReading;
    use r2d2_sqlite::SqliteConnectionManager;
    use std::sync::Arc;

    fn pool_rejecting_writes() -> DatabasePool {
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .build(SqliteConnectionManager::memory())
            .unwrap();
        {
            let conn = pool.get().unwrap();
            crate::database::migrations::run_sqlite_migrations(&conn).unwrap();
            conn.execute(
                "INSERT INTO inr_records
                 (id, value, record_time, warfarin_dose_mg, is_in_range,
                  target_range_low, target_range_high, note)
                 VALUES ('kept', 2.5, '2026-01-20T08:00:00.000Z', 3.0, 1, 2.0, 3.0, NULL)",
                [],
            )
            .unwrap();
            conn.execute_batch(
                "CREATE TRIGGER reject_insert BEFORE INSERT ON inr_records
                 BEGIN SELECT RAISE(ABORT, 'disk full'); END;
                 CREATE TRIGGER reject_update BEFORE UPDATE ON inr_records
                 BEGIN SELECT RAISE(ABORT, 'disk full'); END;
                 CREATE TRIGGER reject_delete BEFORE DELETE ON inr_records
                 BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
            )
            .unwrap();
        }
        Arc::new(pool)
    }

    fn reading(id: &str) -> InrReading {
        InrReading {
            id: id.to_string(),
            value: 2.8,
            record_time: "2026-01-21T08:00:00.000Z".to_string(),
            warfarin_dose_mg: 3.0,
            is_in_range: Some(true),
            target_range_low: Some(2.0),
            target_range_high: Some(3.0),
            note: None,
        }
    }

    #[test]
    fn test_failed_insert_is_reported_not_kept_in_memory() {
        let store = ReadingStore::<InrReading>::with_pool(pool_rejecting_writes());

        let result = store.insert(reading("new"));
        assert!(matches!(result, Err(RepositoryError::Sqlite(_))));

        // reads still go to the database, which never saw the row
        assert!(store.get_by_id("new").unwrap().is_none());
        assert!(store.memory.get_by_id("new").unwrap().is_none());
    }

    #[test]
    fn test_failed_update_and_delete_are_errors_not_missing_rows() {
        let store = ReadingStore::<InrReading>::with_pool(pool_rejecting_writes());

        let updated = store.update(reading("kept"));
        assert!(matches!(updated, Err(RepositoryError::Sqlite(_))));

        let deleted = store.delete("kept");
        assert!(matches!(deleted, Err(RepositoryError::Sqlite(_))));

        let kept = store.get_by_id("kept").unwrap().unwrap();
        assert_eq!(kept.value, 2.5);
    }

    #[test]
    fn test_without_pool_readings_stay_in_memory() {
        let store = ReadingStore::<InrReading>::default();
        if get_db_pool().is_ok() {
            return;
        }

        store.insert(reading("mem")).unwrap();
        assert_eq!(store.get_by_id("mem").unwrap().map(|r| r.id), Some("mem".to_string()));
        store.delete("mem").unwrap();
        assert!(matches!(store.delete("mem"), Err(RepositoryError::NotFound(_))));
    }
}

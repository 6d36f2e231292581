use rusqlite::types::ToSql;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::errors::RepositoryError;
use crate::database::DatabasePool;
use crate::models::blood_pressure::BloodPressureReading;
use crate::models::inr::InrReading;
use crate::models::ReadingFilter;

/// Mapping between a storage model and its SQLite table
///
/// `COLUMNS` must start with `id` and list columns in the order produced by
/// [`SqliteRecord::values`] and consumed by [`SqliteRecord::from_row`].
pub trait SqliteRecord: Sized {
    /// Table name
    const TABLE: &'static str;

    /// Column names, `id` first
    const COLUMNS: &'static [&'static str];

    /// Build a model from a row selected with `COLUMNS`
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Column values in `COLUMNS` order
    fn values(&self) -> Vec<&dyn ToSql>;
}

impl SqliteRecord for InrReading {
    const TABLE: &'static str = "inr_records";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "value",
        "record_time",
        "warfarin_dose_mg",
        "is_in_range",
        "target_range_low",
        "target_range_high",
        "note",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(InrReading {
            id: row.get(0)?,
            value: row.get(1)?,
            record_time: row.get(2)?,
            warfarin_dose_mg: row.get(3)?,
            is_in_range: row.get(4)?,
            target_range_low: row.get(5)?,
            target_range_high: row.get(6)?,
            note: row.get(7)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.id,
            &self.value,
            &self.record_time,
            &self.warfarin_dose_mg,
            &self.is_in_range,
            &self.target_range_low,
            &self.target_range_high,
            &self.note,
        ]
    }
}

impl SqliteRecord for BloodPressureReading {
    const TABLE: &'static str = "blood_pressure_records";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "systolic",
        "diastolic",
        "heart_rate",
        "position",
        "record_time",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(BloodPressureReading {
            id: row.get(0)?,
            systolic: row.get(1)?,
            diastolic: row.get(2)?,
            heart_rate: row.get(3)?,
            position: row.get(4)?,
            record_time: row.get(5)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.id,
            &self.systolic,
            &self.diastolic,
            &self.heart_rate,
            &self.position,
            &self.record_time,
        ]
    }
}

/// Database storage operations for readings
pub struct DatabaseStorage;

impl DatabaseStorage {
    /// Store a reading in the database
    pub fn insert<T: SqliteRecord>(pool: &DatabasePool, record: &T) -> Result<(), RepositoryError> {
        let placeholders: Vec<String> = (1..=T::COLUMNS.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders.join(", ")
        );
        debug!("Inserting into {}", T::TABLE);

        let conn = pool.get()?;
        conn.execute(&sql, record.values().as_slice())?;
        Ok(())
    }

    /// Replace every column of an existing row; returns `false` if no row matched
    pub fn update<T: SqliteRecord>(pool: &DatabasePool, record: &T) -> Result<bool, RepositoryError> {
        let assignments: Vec<String> = T::COLUMNS
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, column)| format!("{} = ?{}", column, i + 1))
            .collect();
        let sql = format!("UPDATE {} SET {} WHERE id = ?1", T::TABLE, assignments.join(", "));
        debug!("Updating row in {}", T::TABLE);

        let conn = pool.get()?;
        let changed = conn.execute(&sql, record.values().as_slice())?;
        Ok(changed > 0)
    }

    /// Delete a row by id; returns `false` if no row matched
    pub fn delete<T: SqliteRecord>(pool: &DatabasePool, id: &str) -> Result<bool, RepositoryError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", T::TABLE);
        debug!("Deleting row {} from {}", id, T::TABLE);

        let conn = pool.get()?;
        let changed = conn.execute(&sql, params![id])?;
        Ok(changed > 0)
    }

    /// Get a reading by ID from the database
    pub fn get_by_id<T: SqliteRecord>(pool: &DatabasePool, id: &str) -> Result<Option<T>, RepositoryError> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?1", T::COLUMNS.join(", "), T::TABLE);

        let conn = pool.get()?;
        let record = conn.query_row(&sql, params![id], T::from_row).optional()?;
        Ok(record)
    }

    /// Get filtered readings from the database, newest first
    pub fn get_filtered<T: SqliteRecord>(
        pool: &DatabasePool,
        filter: &ReadingFilter,
    ) -> Result<Vec<T>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM {}
             WHERE (?1 IS NULL OR record_time >= ?1)
               AND (?2 IS NULL OR record_time <= ?2)
             ORDER BY record_time DESC
             LIMIT ?3",
            T::COLUMNS.join(", "),
            T::TABLE
        );
        // SQLite treats a negative LIMIT as "no limit"
        let limit: i64 = filter
            .limit
            .map(|limit| i64::try_from(limit).unwrap_or(i64::MAX))
            .unwrap_or(-1);

        let conn = pool.get()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![filter.start, filter.end, limit], T::from_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use r2d2_sqlite::SqliteConnectionManager;
    use std::sync::Arc;

    fn test_pool() -> DatabasePool {
        let pool = r2d2::Pool::builder()
            .max_size(1)
            .build(SqliteConnectionManager::memory())
            .unwrap();
        {
            let conn = pool.get().unwrap();
            crate::database::migrations::run_sqlite_migrations(&conn).unwrap();
        }
        Arc::new(pool)
    }

    fn inr(id: &str, value: f64, record_time: &str) -> InrReading {
        InrReading {
            id: id.to_string(),
            value,
            record_time: record_time.to_string(),
            warfarin_dose_mg: 3.0,
            is_in_range: Some((2.0..=3.0).contains(&value)),
            target_range_low: Some(2.0),
            target_range_high: Some(3.0),
            note: None,
        }
    }

    #[test]
    fn test_inr_round_trip_through_sqlite() {
        let pool = test_pool();
        let reading = inr("a", 2.5, "2026-01-20T08:00:00.000Z");

        DatabaseStorage::insert(&pool, &reading).unwrap();
        let loaded: Option<InrReading> = DatabaseStorage::get_by_id(&pool, "a").unwrap();
        assert_eq!(loaded, Some(reading));

        let missing: Option<InrReading> = DatabaseStorage::get_by_id(&pool, "missing").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_update_and_delete_report_missing_rows() {
        let pool = test_pool();
        let mut reading = BloodPressureReading {
            id: "bp".to_string(),
            systolic: 120,
            diastolic: 80,
            heart_rate: Some(70),
            position: Some("sitting".to_string()),
            record_time: "2026-01-20T08:00:00.000Z".to_string(),
        };
        DatabaseStorage::insert(&pool, &reading).unwrap();

        reading.heart_rate = None;
        assert!(DatabaseStorage::update(&pool, &reading).unwrap());
        let loaded: Option<BloodPressureReading> = DatabaseStorage::get_by_id(&pool, "bp").unwrap();
        assert_eq!(loaded.unwrap().heart_rate, None);

        assert!(DatabaseStorage::delete::<BloodPressureReading>(&pool, "bp").unwrap());
        assert!(!DatabaseStorage::delete::<BloodPressureReading>(&pool, "bp").unwrap());
    }

    #[test]
    fn test_filtered_query_applies_range_order_and_limit() {
        let pool = test_pool();
        for (id, time) in [
            ("a", "2026-01-19T08:00:00.000Z"),
            ("b", "2026-01-20T08:00:00.000Z"),
            ("c", "2026-01-21T08:00:00.000Z"),
            ("d", "2026-01-22T08:00:00.000Z"),
        ] {
            DatabaseStorage::insert(&pool, &inr(id, 2.5, time)).unwrap();
        }

        let filter = ReadingFilter {
            start: Some("2026-01-20T00:00:00.000Z".to_string()),
            end: Some("2026-01-21T23:59:59.999Z".to_string()),
            limit: None,
        };
        let readings: Vec<InrReading> = DatabaseStorage::get_filtered(&pool, &filter).unwrap();
        let ids: Vec<&str> = readings.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);

        let limited: Vec<InrReading> = DatabaseStorage::get_filtered(
            &pool,
            &ReadingFilter { limit: Some(2), ..ReadingFilter::default() },
        )
        .unwrap();
        let ids: Vec<&str> = limited.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "c"]);
    }
}

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::errors::RepositoryError;
use crate::models::{ReadingFilter, StoredReading};

/// In-memory storage used when the database is not available
///
/// Clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct InMemoryStorage<T> {
    readings: Arc<Mutex<HashMap<String, T>>>,
}

impl<T> Default for InMemoryStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryStorage<T> {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            readings: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T: StoredReading + Clone> InMemoryStorage<T> {
    /// Store a reading in memory
    pub fn insert(&self, reading: &T) -> Result<T, RepositoryError> {
        let mut store = self.readings.lock()?;
        store.insert(reading.id().to_string(), reading.clone());
        Ok(reading.clone())
    }

    /// Replace an existing reading, returning `false` when the id is unknown
    pub fn replace(&self, reading: &T) -> Result<bool, RepositoryError> {
        let mut store = self.readings.lock()?;
        match store.get_mut(reading.id()) {
            Some(existing) => {
                *existing = reading.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a reading, returning `false` when the id is unknown
    pub fn remove(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut store = self.readings.lock()?;
        Ok(store.remove(id).is_some())
    }

    /// Get a reading by ID from memory
    pub fn get_by_id(&self, id: &str) -> Result<Option<T>, RepositoryError> {
        let store = self.readings.lock()?;
        Ok(store.get(id).cloned())
    }

    /// Get filtered readings from memory, newest first
    pub fn get_filtered(&self, filter: &ReadingFilter) -> Result<Vec<T>, RepositoryError> {
        let store = self.readings.lock()?;

        let mut readings: Vec<T> = store
            .values()
            .filter(|reading| filter.matches(reading.record_time()))
            .cloned()
            .collect();

        readings.sort_by(|a, b| b.record_time().cmp(a.record_time()));

        if let Some(limit) = filter.limit {
            readings.truncate(limit);
        }

        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::blood_pressure::BloodPressureReading;

    fn reading(id: &str, record_time: &str) -> BloodPressureReading {
        BloodPressureReading {
            id: id.to_string(),
            systolic: 120,
            diastolic: 80,
            heart_rate: None,
            position: None,
            record_time: record_time.to_string(),
        }
    }

    #[test]
    fn test_filtered_readings_are_newest_first_and_limited() {
        let storage = InMemoryStorage::new();
        storage.insert(&reading("a", "2026-01-20T08:00:00.000Z")).unwrap();
        storage.insert(&reading("b", "2026-01-22T08:00:00.000Z")).unwrap();
        storage.insert(&reading("c", "2026-01-21T08:00:00.000Z")).unwrap();

        let all = storage.get_filtered(&ReadingFilter::default()).unwrap();
        let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        let limited = storage
            .get_filtered(&ReadingFilter {
                limit: Some(1),
                ..ReadingFilter::default()
            })
            .unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].id, "b");
    }

    #[test]
    fn test_replace_and_remove_report_missing_ids() {
        let storage = InMemoryStorage::new();
        storage.insert(&reading("a", "2026-01-20T08:00:00.000Z")).unwrap();

        let mut updated = reading("a", "2026-01-20T08:00:00.000Z");
        updated.systolic = 135;
        assert!(storage.replace(&updated).unwrap());
        assert_eq!(storage.get_by_id("a").unwrap().unwrap().systolic, 135);

        assert!(!storage.replace(&reading("missing", "2026-01-20T08:00:00.000Z")).unwrap());
        assert!(storage.remove("a").unwrap());
        assert!(!storage.remove("a").unwrap());
    }

    #[test]
    fn test_clones_share_storage() {
        let storage = InMemoryStorage::new();
        let clone = storage.clone();
        clone.insert(&reading("a", "2026-01-20T08:00:00.000Z")).unwrap();
        assert!(storage.get_by_id("a").unwrap().is_some());
    }
}

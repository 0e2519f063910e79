use std::collections::HashMap;

use crate::{
    constants::STORAGE_KEY,
    error::{PersistenceError, StorageError},
    workout::Workout,
};

/// A string key-value store, such as the browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/**
 * WorkoutStore keeps the whole workout collection as one JSON document under a fixed key.
 */
pub struct WorkoutStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_owned(),
        }
    }

    pub fn save(&mut self, workouts: &[Workout]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(workouts)?;
        self.store.set(&self.key, &json)?;
        tracing::debug!("Saved {} workouts", workouts.len());
        Ok(())
    }

    /// Stored records are returned as they were written. Derived fields are not recomputed.
    pub fn load(&self) -> Result<Option<Vec<Workout>>, PersistenceError> {
        let Some(json) = self.store.get(&self.key)? else {
            return Ok(None);
        };

        // A stored literal null is treated like an absent key
        let workouts: Option<Vec<Workout>> = serde_json::from_str(&json)?;
        Ok(workouts)
    }

    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.store.remove(&self.key)?;
        Ok(())
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::{Coords, WorkoutKind};
    use chrono::{TimeZone, Utc};

    fn workouts() -> Vec<Workout> {
        let date = Utc.with_ymd_and_hms(2025, 5, 22, 12, 0, 0).unwrap();
        let mut cycling = Workout::cycling(Coords(55.1, 9.5), 37., 80., 0., date + chrono::Duration::minutes(5)).unwrap();
        cycling.register_interaction();

        vec![
            Workout::running(Coords(50., 30.), 7., 40., 170., date).unwrap(),
            cycling,
        ]
    }

    #[test]
    fn load_from_empty_store_is_none() {
        let store = WorkoutStore::new(MemoryStore::default());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let mut store = WorkoutStore::new(MemoryStore::default());
        let workouts = workouts();

        store.save(&workouts).unwrap();
        assert_eq!(store.load().unwrap(), Some(workouts));
    }

    #[test]
    fn derived_speed_keeps_exact_bits() {
        let mut store = WorkoutStore::new(MemoryStore::default());
        let workouts = workouts();
        store.save(&workouts).unwrap();

        let loaded = store.load().unwrap().unwrap();
        let (WorkoutKind::Cycling { speed: saved, .. }, WorkoutKind::Cycling { speed: restored, .. }) = (&workouts[1].kind, &loaded[1].kind) else {
            panic!("expected cycling");
        };
        assert_eq!(saved.to_bits(), restored.to_bits());
        assert_eq!(saved.to_bits(), (37_f64 / 80. / 60.).to_bits());
    }

    #[test]
    fn derived_fields_are_taken_verbatim() {
        let mut store = MemoryStore::default();
        store
            .set(
                STORAGE_KEY,
                r#"[{"id":"1","date":"2025-05-22T12:00:00Z","coords":[50,30],"distance":5,"duration":25,
                    "type":"running","cadence":180,"pace":99,"description":"custom","clickCount":0}]"#,
            )
            .unwrap();

        let loaded = WorkoutStore::new(store).load().unwrap().unwrap();
        assert_eq!(loaded[0].description, "custom");
        assert_eq!(loaded[0].kind, WorkoutKind::Running { cadence: 180., pace: 99. });
    }

    #[test]
    fn save_twice_is_idempotent() {
        let mut once = WorkoutStore::new(MemoryStore::default());
        let mut twice = WorkoutStore::new(MemoryStore::default());
        let workouts = workouts();

        once.save(&workouts).unwrap();
        twice.save(&workouts).unwrap();
        twice.save(&workouts).unwrap();

        assert_eq!(once.inner().get(STORAGE_KEY).unwrap(), twice.inner().get(STORAGE_KEY).unwrap());
    }

    #[test]
    fn corrupt_data_is_an_error() {
        let mut store = MemoryStore::default();
        store.set(STORAGE_KEY, "{not json").unwrap();

        assert!(matches!(WorkoutStore::new(store).load(), Err(PersistenceError::Corrupt(_))));
    }

    #[test]
    fn clear_removes_the_key() {
        let mut store = WorkoutStore::new(MemoryStore::default());
        store.save(&workouts()).unwrap();
        store.clear().unwrap();

        assert!(store.inner().get(STORAGE_KEY).unwrap().is_none());
        assert!(store.load().unwrap().is_none());
    }
}

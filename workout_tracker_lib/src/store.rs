use std::collections::HashMap;

use crate::workout::{StoredWorkout, Workout};

/// Key the workout list is persisted under.
pub const STORAGE_KEY: &str = "workouts";

/// Key-value persistence collaborator. The frontend backs this with
/// `localStorage`; tests use the [`HashMap`] impl below.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
    fn remove_item(&mut self, key: &str);
}

impl StorageBackend for HashMap<String, String> {
    fn get_item(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }

    fn remove_item(&mut self, key: &str) {
        self.remove(key);
    }
}

/// Insertion-ordered collection of workouts. Append-only; individual
/// records are never removed.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|workout| workout.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|workout| workout.id == id)
    }

    /// Serialize the whole collection and replace whatever the backend
    /// currently holds.
    pub fn persist(&self, storage: &mut impl StorageBackend) -> serde_json::Result<()> {
        let stored: Vec<StoredWorkout> = self.workouts.iter().map(Workout::to_stored).collect();
        let blob = serde_json::to_string(&stored)?;
        storage.set_item(STORAGE_KEY, &blob);
        Ok(())
    }

    /// Load the persisted collection. No prior data or a blob that no
    /// longer parses both yield an empty store.
    pub fn restore(storage: &impl StorageBackend) -> Self {
        let Some(blob) = storage.get_item(STORAGE_KEY) else {
            return Self::new();
        };

        let stored: Vec<StoredWorkout> = serde_json::from_str(&blob).unwrap_or_default();
        Self {
            workouts: stored.into_iter().map(Workout::from_stored).collect(),
        }
    }

    pub fn clear(storage: &mut impl StorageBackend) {
        storage.remove_item(STORAGE_KEY);
    }
}

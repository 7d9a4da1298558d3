use geo_types::Point;

use crate::store::{StorageBackend, WorkoutStore};
use crate::workout::{create_workout, ValidationError, Workout, WorkoutEntry};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    /// No entry form shown.
    Idle,
    /// The user picked a spot on the map and the entry form is open.
    AwaitingEntry { position: Point<f64> },
}

/// Drives the interaction sequence: map click, form entry, store update,
/// persistence. All rendering stays with the caller; the session only
/// tells it what changed.
pub struct Session<S: StorageBackend> {
    store: WorkoutStore,
    storage: S,
    state: SessionState,
}

impl<S: StorageBackend> Session<S> {
    /// Restore previously persisted workouts and start idle.
    pub fn start(storage: S) -> Self {
        Self {
            store: WorkoutStore::restore(&storage),
            storage,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn entry_open(&self) -> bool {
        matches!(self.state, SessionState::AwaitingEntry { .. })
    }

    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    /// Map click: hold the picked position and open the entry form.
    pub fn pick_location(&mut self, position: Point<f64>) {
        self.state = SessionState::AwaitingEntry { position };
    }

    pub fn cancel_entry(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Validate the form against the pending location. On success the
    /// workout is appended, the whole store re-persisted and the session
    /// returns to idle. On failure nothing changes, so the caller can
    /// leave the form populated for another attempt.
    pub fn submit(&mut self, entry: &WorkoutEntry) -> Result<(), ValidationError> {
        let SessionState::AwaitingEntry { position } = self.state else {
            return Err(ValidationError::NoLocation);
        };

        let workout = create_workout(entry, position)?;
        self.store.append(workout);
        // localStorage write failures are not surfaced to the user
        let _ = self.store.persist(&mut self.storage);
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Sidebar click: bump the interaction counter and hand back the
    /// coordinates the map should re-center on. Unknown ids are a no-op.
    pub fn focus_workout(&mut self, id: &str) -> Option<Point<f64>> {
        let workout = self.store.find_by_id_mut(id)?;
        workout.register_click();
        Some(workout.position)
    }

    /// Drop everything persisted. The caller is expected to follow up
    /// with a full reinitialization (page reload in the browser).
    pub fn reset(&mut self) {
        WorkoutStore::clear(&mut self.storage);
        self.store = WorkoutStore::new();
        self.state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::store::STORAGE_KEY;
    use crate::workout::WorkoutKind;

    fn running_entry(distance: &str) -> WorkoutEntry {
        let mut entry = WorkoutEntry::new(WorkoutKind::Running);
        entry.distance = distance.to_string();
        entry.duration = "40".to_string();
        entry.cadence = "150".to_string();
        entry
    }

    #[test]
    fn submit_appends_persists_and_closes_the_form() {
        let mut session = Session::start(HashMap::new());
        assert!(!session.entry_open());

        session.pick_location(Point::new(36.0, 50.0));
        assert!(session.entry_open());

        session.submit(&running_entry("7")).unwrap();
        assert_eq!(session.workouts().len(), 1);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.storage.get_item(STORAGE_KEY).is_some());
    }

    #[test]
    fn failed_validation_leaves_everything_untouched() {
        let mut session = Session::start(HashMap::new());
        session.pick_location(Point::new(36.0, 50.0));

        let err = session.submit(&running_entry("-5")).unwrap_err();
        assert_eq!(err, ValidationError::NotPositive("Distance"));
        assert!(session.workouts().is_empty());
        // form stays open for another attempt
        assert!(session.entry_open());
        assert!(session.storage.get_item(STORAGE_KEY).is_none());
    }

    #[test]
    fn submit_without_a_picked_location_is_rejected() {
        let mut session = Session::start(HashMap::new());
        let err = session.submit(&running_entry("7")).unwrap_err();
        assert_eq!(err, ValidationError::NoLocation);
    }

    #[test]
    fn cancel_closes_the_form_without_a_record() {
        let mut session = Session::start(HashMap::new());
        session.pick_location(Point::new(36.0, 50.0));
        session.cancel_entry();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.workouts().is_empty());
    }

    #[test]
    fn focus_workout_returns_coordinates_and_counts_the_click() {
        let mut session = Session::start(HashMap::new());
        session.pick_location(Point::new(36.0, 50.0));
        session.submit(&running_entry("7")).unwrap();

        let id = session.workouts()[0].id.clone();
        assert_eq!(session.focus_workout(&id), Some(Point::new(36.0, 50.0)));
        assert_eq!(session.focus_workout(&id), Some(Point::new(36.0, 50.0)));
        assert_eq!(session.workouts()[0].clicks, 2);

        assert_eq!(session.focus_workout("never-issued"), None);
    }

    #[test]
    fn a_new_session_restores_persisted_workouts() {
        let mut session = Session::start(HashMap::new());
        session.pick_location(Point::new(36.0, 50.0));
        session.submit(&running_entry("7")).unwrap();
        session.pick_location(Point::new(39.0, 50.0));
        session.submit(&running_entry("12")).unwrap();
        let storage = session.storage;

        let reloaded = Session::start(storage);
        assert_eq!(reloaded.workouts().len(), 2);
        assert_eq!(reloaded.workouts()[1].distance_km, 12.0);
    }

    #[test]
    fn reset_clears_the_store_and_the_backend() {
        let mut session = Session::start(HashMap::new());
        session.pick_location(Point::new(36.0, 50.0));
        session.submit(&running_entry("7")).unwrap();

        session.reset();
        assert!(session.workouts().is_empty());
        assert!(session.storage.get_item(STORAGE_KEY).is_none());

        let reloaded = Session::start(session.storage);
        assert!(reloaded.workouts().is_empty());
    }
}

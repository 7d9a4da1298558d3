use gloo_storage::{LocalStorage, Storage};
use workout_tracker_lib::store::StorageBackend;

/// `localStorage`-backed persistence for the workout list.
pub struct BrowserStorage;

impl StorageBackend for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        let _ = LocalStorage::raw().set_item(key, value);
    }

    fn remove_item(&mut self, key: &str) {
        let _ = LocalStorage::raw().remove_item(key);
    }
}

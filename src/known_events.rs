// src/known_events.rs
use crate::errors::StoreError;
use crate::event::EventId;
use log::info;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Flat JSON-file record of every event id already seen (and notified about).
/// The set only ever grows; cancelled or past events are never pruned.
pub struct KnownEventStore {
    path: PathBuf,
}

impl KnownEventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the set of known event ids, or an empty set on first run.
    pub fn load(&self) -> Result<HashSet<EventId>, StoreError> {
        if !self.path.exists() {
            info!("{} not found, starting with an empty known set.", self.path.display());
            return Ok(HashSet::new());
        }
        let content: String = fs::read_to_string(&self.path)?;
        let ids: Vec<EventId> = serde_json::from_str(&content)?;
        Ok(ids.into_iter().collect())
    }

    /// Overwrites the file with the given ids. Full replace, not append.
    pub fn save(&self, ids: &HashSet<EventId>) -> Result<(), StoreError> {
        let ids: Vec<&EventId> = ids.iter().collect();
        let content: String = serde_json::to_string_pretty(&ids)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> KnownEventStore {
        KnownEventStore::new(dir.path().join("known_events.json"))
    }

    #[test]
    fn test_load_missing_file_is_empty_set() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let ids: HashSet<EventId> =
            [EventId::new("A"), EventId::new("B"), EventId::new("C")].into_iter().collect();
        store.save(&ids).unwrap();

        // Order-independent: the set comes back exactly, whatever the file order.
        assert_eq!(store.load().unwrap(), ids);
    }

    #[test]
    fn test_save_overwrites_previous_state() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let first: HashSet<EventId> = [EventId::new("A")].into_iter().collect();
        store.save(&first).unwrap();

        let second: HashSet<EventId> = [EventId::new("B")].into_iter().collect();
        store.save(&second).unwrap();

        assert_eq!(store.load().unwrap(), second);
    }

    #[test]
    fn test_file_is_a_plain_json_string_array() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let ids: HashSet<EventId> = [EventId::new("vv1A")].into_iter().collect();
        store.save(&ids).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, vec!["vv1A".to_string()]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        std::fs::write(store.path(), "{\"not\": \"an array\"}").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Malformed(_))));
    }
}

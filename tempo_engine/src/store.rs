use crate::Snapshot;

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("State format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Opaque load/save of the state snapshot as a JSON document on disk.
///
/// Saving writes a sibling temporary file and renames it into place, so a
/// crash mid-write leaves the previous snapshot intact.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the current snapshot; a missing file is an empty state, not an
    /// error.
    pub fn load(&self) -> Result<Snapshot, StoreError> {
        if !self.path.exists() {
            tracing::debug!("State file {} does not exist", self.path.display());
            return Ok(Snapshot::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&contents)?;
        tracing::debug!("Loaded state from {}", self.path.display());
        Ok(snapshot)
    }

    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let staged = self.path.with_extension("tmp");
        fs::write(&staged, serde_json::to_string_pretty(snapshot)?)?;
        fs::rename(&staged, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Timebox, TimeboxState};

    fn sample_snapshot() -> Snapshot {
        let mut snapshot = Snapshot {
            count: 3,
            minutes: 90,
            ..Snapshot::default()
        };
        snapshot
            .timebox
            .entry("#chan".to_string())
            .or_default()
            .insert(
                "alice".to_string(),
                vec![Timebox {
                    audience: "#chan".to_string(),
                    start: 1_700_000_000,
                    duration: 30,
                    summary: "Read SICP".to_string(),
                    state: TimeboxState::Completed,
                }],
            );
        snapshot
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));

        store.save(&sample_snapshot()).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.count, 3);
        assert_eq!(loaded.minutes, 90);
        assert_eq!(
            loaded.timebox["#chan"]["alice"][0].summary,
            "Read SICP"
        );
        assert_eq!(
            loaded.timebox["#chan"]["alice"][0].state,
            TimeboxState::Completed
        );
    }

    #[test]
    fn missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("absent.json"));

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.count, 0);
        assert_eq!(snapshot.minutes, 0);
        assert!(snapshot.timebox.is_empty());
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));

        store.save(&Snapshot::default()).unwrap();
        store.save(&sample_snapshot()).unwrap();

        assert_eq!(store.load().unwrap().count, 3);
    }
}

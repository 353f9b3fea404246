//! Local snapshot persistence.
//!
//! The entire well collection is persisted as one serialized JSON blob and
//! rewritten wholesale on every persist. There are no per-record rows, so
//! concurrent writers degrade to last-write-wins at the granularity of a
//! full snapshot.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::Snapshot;

/// Durable key-value persistence for the replica snapshot.
pub trait SnapshotStore {
    /// Reads the last written snapshot, or `None` if nothing was persisted
    /// yet.
    fn read(&self) -> Result<Option<Snapshot>, StoreError>;

    /// Replaces the persisted snapshot with `snapshot`.
    fn write(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// Errors that can occur during snapshot store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error for {0}: {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("failed to decode snapshot {0}: {1}")]
    Decode(PathBuf, #[source] serde_json::Error),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Snapshot store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read(&self) -> Result<Option<Snapshot>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                let snapshot = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Decode(self.path.clone(), e))?;
                Ok(Some(snapshot))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(self.path.clone(), e)),
        }
    }

    fn write(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(parent.to_path_buf(), e))?;
        }

        let bytes = serde_json::to_vec_pretty(snapshot).map_err(StoreError::Encode)?;
        fs::write(&self.path, bytes).map_err(|e| StoreError::Io(self.path.clone(), e))?;

        Ok(())
    }
}

/// In-memory snapshot store for coordinator tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    inner: std::sync::Mutex<Option<Snapshot>>,
    pub writes: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MemorySnapshotStore {
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: std::sync::Mutex::new(Some(snapshot)),
            writes: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl SnapshotStore for MemorySnapshotStore {
    fn read(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.inner.lock().unwrap().clone())
    }

    fn write(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        *self.inner.lock().unwrap() = Some(snapshot.clone());
        self.writes
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lithology, Well, WellInput};
    use tempfile::TempDir;

    fn sample_snapshot() -> Snapshot {
        let mut well = Well::new_provisional(WellInput {
            name: "SKV-001".to_string(),
            area: "North".to_string(),
            structure: "Foundation".to_string(),
            design_depth: 20.0,
        });
        well.place_layer(0.0, 2.0, Lithology::Prs, None).unwrap();
        vec![well]
    }

    #[test]
    fn test_read_missing_returns_none() {
        let temp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(temp.path().join("wells.json"));
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(temp.path().join("wells.json"));

        let snapshot = sample_snapshot();
        store.write(&snapshot).unwrap();

        let loaded = store.read().unwrap().unwrap();
        assert_eq!(loaded, snapshot);
        assert_eq!(loaded[0].layers.len(), 1);
    }

    #[test]
    fn test_write_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("nested").join("data").join("wells.json");
        let store = FileSnapshotStore::new(nested.clone());

        store.write(&sample_snapshot()).unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn test_write_replaces_whole_snapshot() {
        let temp = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(temp.path().join("wells.json"));

        store.write(&sample_snapshot()).unwrap();
        store.write(&Vec::new()).unwrap();

        let loaded = store.read().unwrap().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_survives_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wells.json");

        {
            let store = FileSnapshotStore::new(path.clone());
            store.write(&sample_snapshot()).unwrap();
        }

        let store = FileSnapshotStore::new(path);
        let loaded = store.read().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_decode_error_on_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wells.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = FileSnapshotStore::new(path);
        assert!(matches!(store.read(), Err(StoreError::Decode(_, _))));
    }
}

//! File-based Snapshot Store Adapter
//!
//! Writes one pretty-printed JSON document per snapshot event into a base
//! directory, named `session_YYYYMMDD_HHMMSS.json` with the UTC write time.
//! Earlier snapshots are never overwritten; collisions within the same
//! second are out of scope.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::conversation::SessionSnapshot;
use crate::domain::foundation::Timestamp;
use crate::ports::{SnapshotStore, SnapshotStoreError};

/// File-based storage for session snapshots.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    base_dir: PathBuf,
}

impl FileSnapshotStore {
    /// Creates a new file store with a base directory.
    ///
    /// The directory is created on first write if it does not exist.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Builds the file path for a snapshot written at `stamp`.
    fn snapshot_path(&self, stamp: &Timestamp) -> PathBuf {
        self.base_dir
            .join(format!("session_{}.json", stamp.file_stamp()))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn write(&self, snapshot: &SessionSnapshot) -> Result<PathBuf, SnapshotStoreError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| SnapshotStoreError::Io(e.to_string()))?;

        let path = self.snapshot_path(&Timestamp::now());

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| SnapshotStoreError::Serialization(e.to_string()))?;

        fs::write(&path, json)
            .await
            .map_err(|e| SnapshotStoreError::Io(e.to_string()))?;

        tracing::info!(path = %path.display(), "session snapshot written");
        Ok(path)
    }
}

//! Snapshot storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Snapshot storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory snapshots are written into
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,
}

impl StorageConfig {
    /// Snapshot directory as a path
    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(&self.snapshot_dir)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.snapshot_dir.trim().is_empty() {
            return Err(ValidationError::EmptySnapshotDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
        }
    }
}

fn default_snapshot_dir() -> String {
    "./data".to_string()
}

//! Snapshot Store Port - persistence seam for session snapshots.
//!
//! Snapshot writes are side-effect only and append-like: every call produces
//! an additional distinct timestamped document, never overwriting an earlier
//! one. A failed write must leave conversation state untouched; callers
//! surface the failure as a non-fatal notice.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::conversation::SessionSnapshot;

/// Port for persisting session snapshots on terminal events.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Writes one snapshot document, returning where it landed.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotStoreError` when the target location is unwritable
    /// or the snapshot cannot be serialized.
    async fn write(&self, snapshot: &SessionSnapshot) -> Result<PathBuf, SnapshotStoreError>;
}

/// Snapshot persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotStoreError {
    /// Filesystem error while writing.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// Snapshot could not be serialized.
    #[error("snapshot serialization failed: {0}")]
    Serialization(String),
}

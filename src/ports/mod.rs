//! Ports - trait seams for external collaborators.

mod question_generator;
mod snapshot_store;

pub use question_generator::{
    GenerationError, GenerationRequest, GeneratorInfo, QuestionGenerator, SYSTEM_PERSONA,
};
pub use snapshot_store::{SnapshotStore, SnapshotStoreError};

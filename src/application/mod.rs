//! Application layer - orchestration of one conversation turn.

mod orchestrator;

pub use orchestrator::{ConversationOrchestrator, TurnOutcome};

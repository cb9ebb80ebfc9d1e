//! Conversation domain module.
//!
//! Models the dialogue itself: the append-only transcript, the session
//! lifecycle phases, the generated question set, and the session aggregate
//! that ties them together with the intake state.

mod message;
mod phase;
mod questions;
mod session;

pub use message::{Message, Role};
pub use phase::SessionPhase;
pub use questions::{QuestionSet, QuestionStep, MAX_QUESTIONS};
pub use session::{Session, SessionSnapshot};

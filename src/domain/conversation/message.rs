//! Transcript messages.
//!
//! Messages are immutable (role, text) records in an append-only ordered
//! log; they are never mutated or removed and are persisted verbatim.

use serde::{Deserialize, Serialize};

/// Role of a message author in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Assistant prompt, acknowledgement, or question.
    Assistant,
    /// Candidate input.
    User,
}

/// An immutable entry in the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who authored the message.
    pub role: Role,
    /// The message text, verbatim.
    pub text: String,
}

impl Message {
    /// Creates an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }

    /// Creates a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
}

//! Session aggregate and snapshot.
//!
//! One `Session` owns all mutable conversation state for its lifetime:
//! transcript, intake progress, and the generated question set. It is
//! constructed on the first turn, mutated in place by the orchestrator, and
//! discarded on restart or quit; nothing else mutates it concurrently.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::conversation::{Message, QuestionSet, QuestionStep, SessionPhase};
use crate::domain::foundation::{SessionId, StateMachine, Timestamp, ValidationError};
use crate::domain::intake::{IntakeState, IntakeStep, Profile};

/// A single candidate-intake conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    created_at: Timestamp,
    phase: SessionPhase,
    intake: IntakeState,
    questions: Option<QuestionSet>,
    messages: Vec<Message>,
}

impl Session {
    /// Creates a fresh session with the first field's prompt already in the
    /// transcript.
    pub fn new() -> Self {
        let intake = IntakeState::new();
        let opening = intake
            .current_field()
            .map(|field| Message::assistant(field.prompt()));

        Self {
            id: SessionId::new(),
            created_at: Timestamp::now(),
            phase: SessionPhase::Intake,
            intake,
            questions: None,
            messages: opening.into_iter().collect(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns the intake state.
    pub fn intake(&self) -> &IntakeState {
        &self.intake
    }

    /// Returns the collected profile.
    pub fn profile(&self) -> &Profile {
        self.intake.profile()
    }

    /// Returns the question set, once seeded.
    pub fn questions(&self) -> Option<&QuestionSet> {
        self.questions.as_ref()
    }

    /// Returns the transcript.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns true while a question set exists and its cursor is within
    /// bounds. This is the routing rule for the question phase.
    pub fn in_question_phase(&self) -> bool {
        self.questions
            .as_ref()
            .is_some_and(|set| !set.is_exhausted())
    }

    /// Returns true once the session is frozen.
    pub fn is_completed(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    /// Masked read-only preview of the collected data.
    pub fn masked_preview(&self) -> Value {
        self.profile().masked_preview()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Appends a user message to the transcript.
    pub fn record_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    /// Appends an assistant message to the transcript.
    pub fn record_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
    }

    /// Submits one utterance to the intake machine.
    pub fn submit_field(&mut self, input: &str) -> IntakeStep {
        self.intake.submit(input)
    }

    /// Seeds the generated question set and enters the question phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not in the intake phase.
    pub fn seed_questions(&mut self, set: QuestionSet) -> Result<(), ValidationError> {
        self.phase = self.phase.transition_to(SessionPhase::Questioning)?;
        self.questions = Some(set);
        Ok(())
    }

    /// Records an answer for the current question.
    pub fn answer_question(&mut self, answer: &str) -> QuestionStep {
        match self.questions.as_mut() {
            Some(set) => set.record_answer(answer),
            None => QuestionStep::AlreadyExhausted,
        }
    }

    /// Freezes the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is already completed.
    pub fn complete(&mut self) -> Result<(), ValidationError> {
        self.phase = self.phase.transition_to(SessionPhase::Completed)?;
        Ok(())
    }

    /// Takes a deep, self-consistent copy of the full session state.
    ///
    /// The copy is independent of the live session; snapshot writes operate
    /// on it without blocking or observing later mutations.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            created_at: self.created_at,
            data: self.profile().clone(),
            messages: self.messages.clone(),
            questions: self
                .questions
                .as_ref()
                .map(|set| set.questions().to_vec())
                .unwrap_or_default(),
            answers: self
                .questions
                .as_ref()
                .map(|set| set.answers().clone())
                .unwrap_or_default(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable point-in-time serialization of a session.
///
/// Serializes to the persisted snapshot document: `created_at` (ISO-8601
/// UTC), `data` (raw profile values, not masked), `messages`, `questions`,
/// and `answers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub created_at: Timestamp,
    pub data: Profile,
    pub messages: Vec<Message>,
    pub questions: Vec<String>,
    pub answers: HashMap<String, String>,
}

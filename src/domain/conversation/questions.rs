//! Generated question set and its cursor.
//!
//! Built once, atomically, from the generation collaborator's free-text
//! response after intake completes. The cursor advances monotonically by one
//! per user turn and the set is immutable once fully answered.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum number of questions retained from a generation response.
pub const MAX_QUESTIONS: usize = 5;

/// Outcome of recording one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionStep {
    /// Answer stored; another question follows.
    Next { question: String },
    /// Answer stored and the set is now exhausted.
    Finished,
    /// Cursor already past the end; nothing was recorded.
    AlreadyExhausted,
}

/// Ordered generated questions with a cursor and collected answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    questions: Vec<String>,
    cursor: usize,
    answers: HashMap<String, String>,
}

impl QuestionSet {
    /// Parses a free-text generation response into a question set.
    ///
    /// Non-empty lines are taken as individual questions, order preserved,
    /// first [`MAX_QUESTIONS`] retained. Empty or malformed responses yield
    /// an empty (already exhausted) set.
    pub fn from_response_text(text: &str) -> Self {
        let questions = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(MAX_QUESTIONS)
            .map(str::to_string)
            .collect();
        Self {
            questions,
            cursor: 0,
            answers: HashMap::new(),
        }
    }

    /// Returns the questions in order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Returns the recorded answers keyed by question text.
    pub fn answers(&self) -> &HashMap<String, String> {
        &self.answers
    }

    /// Returns the question the cursor currently points at, if any.
    pub fn current_question(&self) -> Option<&str> {
        self.questions.get(self.cursor).map(String::as_str)
    }

    /// Returns true once the cursor has moved past the last question.
    ///
    /// An empty set is exhausted from the start.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.questions.len()
    }

    /// Records an answer for the current question and advances the cursor.
    pub fn record_answer(&mut self, answer: impl Into<String>) -> QuestionStep {
        let Some(question) = self.current_question().map(str::to_string) else {
            return QuestionStep::AlreadyExhausted;
        };

        self.answers.insert(question, answer.into());
        self.cursor += 1;

        match self.current_question() {
            Some(next) => QuestionStep::Next {
                question: next.to_string(),
            },
            None => QuestionStep::Finished,
        }
    }
}

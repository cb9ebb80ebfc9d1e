//! Session lifecycle state machine.
//!
//! Sessions move from field collection through the question walk to a frozen
//! terminal state. A question set that came back empty leaves the session in
//! `Questioning` with an exhausted cursor: utterances fall through with no
//! handler, which is an explicit no-op state rather than an error.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle phase of an intake session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Collecting the seven required profile fields.
    #[default]
    Intake,

    /// Walking the candidate through generated technical questions.
    Questioning,

    /// Frozen: quit, restarted away from, or all questions answered.
    Completed,
}

impl SessionPhase {
    /// Returns true if user utterances can still mutate the session.
    pub fn accepts_user_input(&self) -> bool {
        !matches!(self, Self::Completed)
    }
}

impl StateMachine for SessionPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionPhase::*;
        matches!(
            (self, target),
            // Intake finished, questions seeded
            (Intake, Questioning) |
            // Quit during intake
            (Intake, Completed) |
            // Last question answered, or quit during questioning
            (Questioning, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionPhase::*;
        match self {
            Intake => vec![Questioning, Completed],
            Questioning => vec![Completed],
            Completed => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_phase_is_intake() {
        assert_eq!(SessionPhase::default(), SessionPhase::Intake);
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&SessionPhase::Questioning).unwrap();
        assert_eq!(json, "\"questioning\"");
    }

    #[test]
    fn completed_does_not_accept_input() {
        assert!(SessionPhase::Intake.accepts_user_input());
        assert!(SessionPhase::Questioning.accepts_user_input());
        assert!(!SessionPhase::Completed.accepts_user_input());
    }

    #[test]
    fn intake_transitions_to_questioning_or_completed() {
        let phase = SessionPhase::Intake;
        assert!(phase.can_transition_to(&SessionPhase::Questioning));
        assert!(phase.can_transition_to(&SessionPhase::Completed));
    }

    #[test]
    fn questioning_only_completes() {
        let phase = SessionPhase::Questioning;
        assert!(phase.can_transition_to(&SessionPhase::Completed));
        assert!(!phase.can_transition_to(&SessionPhase::Intake));
    }

    #[test]
    fn completed_is_terminal() {
        assert!(SessionPhase::Completed.is_terminal());
        assert!(SessionPhase::Completed.valid_transitions().is_empty());
    }

    #[test]
    fn transition_to_validates() {
        let phase = SessionPhase::Completed;
        assert!(phase.transition_to(SessionPhase::Intake).is_err());
        assert_eq!(
            SessionPhase::Intake.transition_to(SessionPhase::Questioning),
            Ok(SessionPhase::Questioning)
        );
    }
}

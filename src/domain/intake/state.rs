//! Intake state machine.
//!
//! Holds the profile plus the current-field pointer and decides, for each
//! user utterance, whether the answer is stored or re-prompted and which
//! field comes next. Accepted fields are never re-validated.

use serde::{Deserialize, Serialize};

use crate::domain::intake::{validate, Profile, ProfileField};

/// Outcome of submitting one utterance to the intake machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeStep {
    /// Input failed its field validator; state is unchanged and the same
    /// field must be re-prompted with its fixed rejection message.
    Rejected {
        field: ProfileField,
        message: &'static str,
    },

    /// Value stored; the pointer moved to the next unset field.
    Advanced { next: ProfileField },

    /// Value stored and the profile is now complete; the pointer is cleared
    /// and the caller should transition to the question phase.
    Finished,

    /// The intake already finished; the utterance is not for this machine.
    AlreadyComplete,
}

/// The field-collection half of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeState {
    profile: Profile,
    /// The field currently being asked, or `None` once intake completed.
    current_field: Option<ProfileField>,
}

impl IntakeState {
    /// Creates a fresh intake pointing at the first canonical field.
    pub fn new() -> Self {
        Self {
            profile: Profile::new(),
            current_field: Some(ProfileField::first()),
        }
    }

    /// Returns the collected profile.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Returns the field currently being asked, if any.
    pub fn current_field(&self) -> Option<ProfileField> {
        self.current_field
    }

    /// Returns true once every field has been accepted.
    pub fn is_complete(&self) -> bool {
        self.current_field.is_none()
    }

    /// Validates one utterance against the current field and advances.
    pub fn submit(&mut self, input: &str) -> IntakeStep {
        let Some(field) = self.current_field else {
            return IntakeStep::AlreadyComplete;
        };

        match validate(field, input) {
            Err(_) => IntakeStep::Rejected {
                field,
                message: field.rejection_message(),
            },
            Ok(value) => {
                self.profile.set(field, value);
                // Top-scan over the canonical order, not insertion order.
                self.current_field = self.profile.next_missing_field();
                match self.current_field {
                    Some(next) => IntakeStep::Advanced { next },
                    None => IntakeStep::Finished,
                }
            }
        }
    }
}

impl Default for IntakeState {
    fn default() -> Self {
        Self::new()
    }
}

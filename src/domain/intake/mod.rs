//! Intake domain module.
//!
//! Covers the field-collection half of the conversation: the seven required
//! profile fields, their validators, the candidate profile, and the state
//! machine that walks the fields in canonical order.

mod field;
mod profile;
mod state;
mod validators;

pub use field::ProfileField;
pub use profile::{FieldValue, Profile};
pub use state::{IntakeState, IntakeStep};
pub use validators::validate;

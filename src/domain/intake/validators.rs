//! Per-field validation and normalization.
//!
//! One rule per field, evaluated independently and deterministically: no side
//! effects, no I/O. A successful validation yields the normalized value that
//! is stored in the profile; a failure yields the field's fixed rejection
//! message. Raw, unvalidated text is never stored.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::ValidationError;
use crate::domain::intake::{FieldValue, ProfileField};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\-\s()]{7,}$").expect("valid phone pattern"));

static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit pattern"));

static POSITIONS_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",|/|;| and ").expect("valid positions separator pattern"));

static STACK_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",|\||/|;").expect("valid stack separator pattern"));

/// Validates raw input for a field, returning the normalized value.
///
/// # Errors
///
/// Returns an `InvalidFormat` error carrying the field's fixed rejection
/// message when the input does not satisfy the field's rule.
pub fn validate(field: ProfileField, raw: &str) -> Result<FieldValue, ValidationError> {
    match field {
        ProfileField::FullName => validate_full_name(raw),
        ProfileField::Email => validate_email(raw),
        ProfileField::Phone => validate_phone(raw),
        ProfileField::ExperienceYears => validate_experience_years(raw),
        ProfileField::DesiredPositions => validate_desired_positions(raw),
        ProfileField::Location => validate_location(raw),
        ProfileField::TechStack => validate_tech_stack(raw),
    }
    .ok_or_else(|| rejection(field))
}

fn rejection(field: ProfileField) -> ValidationError {
    ValidationError::invalid_format(field.key(), field.rejection_message())
}

/// At least two whitespace-separated tokens; only the first two are kept.
///
/// Dropping tokens beyond the second is a documented quirk of the intake
/// form, not a bug.
fn validate_full_name(raw: &str) -> Option<FieldValue> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    if parts.len() >= 2 {
        Some(FieldValue::Text(parts[..2].join(" ")))
    } else {
        None
    }
}

fn validate_email(raw: &str) -> Option<FieldValue> {
    let trimmed = raw.trim();
    if EMAIL_RE.is_match(trimmed) {
        // Case preserved
        Some(FieldValue::Text(trimmed.to_string()))
    } else {
        None
    }
}

/// Loose phone match; normalized value is the digits-only string.
fn validate_phone(raw: &str) -> Option<FieldValue> {
    let trimmed = raw.trim();
    if PHONE_RE.is_match(trimmed) {
        let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
        Some(FieldValue::Text(digits))
    } else {
        None
    }
}

/// All-digit input parses directly; otherwise the first digit run anywhere
/// in the text is taken.
fn validate_experience_years(raw: &str) -> Option<FieldValue> {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.parse().ok().map(FieldValue::Number);
    }
    DIGIT_RUN_RE
        .find(trimmed)
        .and_then(|m| m.as_str().parse().ok())
        .map(FieldValue::Number)
}

fn validate_desired_positions(raw: &str) -> Option<FieldValue> {
    split_non_empty(&POSITIONS_SPLIT_RE, raw).map(FieldValue::List)
}

/// No structural parsing of city/country; any trimmed text of two or more
/// characters is accepted.
fn validate_location(raw: &str) -> Option<FieldValue> {
    let trimmed = raw.trim();
    if trimmed.chars().count() >= 2 {
        Some(FieldValue::Text(trimmed.to_string()))
    } else {
        None
    }
}

fn validate_tech_stack(raw: &str) -> Option<FieldValue> {
    split_non_empty(&STACK_SPLIT_RE, raw).map(FieldValue::List)
}

fn split_non_empty(separator: &Regex, raw: &str) -> Option<Vec<String>> {
    let parts: Vec<String> = separator
        .split(raw)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts)
    }
}

//! Candidate profile value objects.
//!
//! A profile field is either unset or holds a value that has passed its
//! validator; raw unvalidated text is never stored. Fields are set one at a
//! time in canonical order and never reverted except by a full restart.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::intake::ProfileField;

/// A validator-normalized field value.
///
/// Values have heterogeneous semantic types: free text (name, email,
/// location), an integer (experience years), or a list (positions, stack).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Normalized integer value.
    Number(u32),
    /// Normalized text value.
    Text(String),
    /// Normalized list of non-empty items.
    List(Vec<String>),
}

impl FieldValue {
    /// Returns the text value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the list items, if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Renders the value for inclusion in prompt text.
    ///
    /// Lists are comma-joined, matching the instruction template contract.
    pub fn render(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::List(items) => items.join(", "),
        }
    }
}

/// The candidate profile: one optional normalized value per required field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub full_name: Option<FieldValue>,
    pub email: Option<FieldValue>,
    pub phone: Option<FieldValue>,
    pub experience_years: Option<FieldValue>,
    pub desired_positions: Option<FieldValue>,
    pub location: Option<FieldValue>,
    pub tech_stack: Option<FieldValue>,
}

impl Profile {
    /// Creates an empty profile with all fields unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for a field, if set.
    pub fn get(&self, field: ProfileField) -> Option<&FieldValue> {
        match field {
            ProfileField::FullName => self.full_name.as_ref(),
            ProfileField::Email => self.email.as_ref(),
            ProfileField::Phone => self.phone.as_ref(),
            ProfileField::ExperienceYears => self.experience_years.as_ref(),
            ProfileField::DesiredPositions => self.desired_positions.as_ref(),
            ProfileField::Location => self.location.as_ref(),
            ProfileField::TechStack => self.tech_stack.as_ref(),
        }
    }

    /// Stores a validated value for a field.
    ///
    /// Callers must only pass values produced by the field's validator.
    pub fn set(&mut self, field: ProfileField, value: FieldValue) {
        let slot = match field {
            ProfileField::FullName => &mut self.full_name,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::ExperienceYears => &mut self.experience_years,
            ProfileField::DesiredPositions => &mut self.desired_positions,
            ProfileField::Location => &mut self.location,
            ProfileField::TechStack => &mut self.tech_stack,
        };
        *slot = Some(value);
    }

    /// Returns the next unset field, scanning the canonical order from the
    /// top on every call.
    ///
    /// The top-scan is deliberate: it keeps collection order correct even if
    /// some field happened to be filled out of sequence.
    pub fn next_missing_field(&self) -> Option<ProfileField> {
        ProfileField::CANONICAL_ORDER
            .into_iter()
            .find(|field| self.get(*field).is_none())
    }

    /// Returns true once every required field holds a validated value.
    pub fn is_complete(&self) -> bool {
        self.next_missing_field().is_none()
    }

    /// Read-only preview of collected data with email and phone masked.
    pub fn masked_preview(&self) -> Value {
        let mut preview = serde_json::Map::new();
        for field in ProfileField::CANONICAL_ORDER {
            let rendered = match (field, self.get(field)) {
                (_, None) => Value::Null,
                (ProfileField::Email, Some(value)) => json!(mask_email(&value.render())),
                (ProfileField::Phone, Some(value)) => json!(mask_phone(&value.render())),
                (_, Some(value)) => serde_json::to_value(value).unwrap_or(Value::Null),
            };
            preview.insert(field.key().to_string(), rendered);
        }
        Value::Object(preview)
    }
}

/// Masks an email as `first local char + ***@domain`, or `***` when the
/// address cannot be split.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => "***".to_string(),
        },
        None => "***".to_string(),
    }
}

/// Masks a phone as `***` + last four digits, or plain `***` when fewer
/// than four digits are available.
pub fn mask_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 4 {
        let last4: String = digits[digits.len() - 4..].iter().collect();
        format!("***{}", last4)
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod field_value {
        use super::*;

        #[test]
        fn render_joins_lists_with_commas() {
            let value = FieldValue::List(vec!["Rust".into(), "Go".into()]);
            assert_eq!(value.render(), "Rust, Go");
        }

        #[test]
        fn render_formats_numbers() {
            assert_eq!(FieldValue::Number(5).render(), "5");
        }

        #[test]
        fn serializes_untagged() {
            assert_eq!(serde_json::to_string(&FieldValue::Number(5)).unwrap(), "5");
            assert_eq!(
                serde_json::to_string(&FieldValue::Text("hi".into())).unwrap(),
                "\"hi\""
            );
            assert_eq!(
                serde_json::to_string(&FieldValue::List(vec!["a".into()])).unwrap(),
                "[\"a\"]"
            );
        }
    }

    mod next_missing_field {
        use super::*;

        #[test]
        fn empty_profile_starts_at_full_name() {
            assert_eq!(Profile::new().next_missing_field(), Some(ProfileField::FullName));
        }

        #[test]
        fn scans_from_the_top_regardless_of_fill_order() {
            let mut profile = Profile::new();
            // Location filled out of sequence; the scan still returns the
            // first unset field in canonical order.
            profile.set(ProfileField::Location, FieldValue::Text("Lisbon".into()));
            assert_eq!(profile.next_missing_field(), Some(ProfileField::FullName));

            profile.set(ProfileField::FullName, FieldValue::Text("Ada Lovelace".into()));
            assert_eq!(profile.next_missing_field(), Some(ProfileField::Email));
        }

        #[test]
        fn full_profile_has_no_missing_field() {
            let profile = complete_profile();
            assert!(profile.next_missing_field().is_none());
            assert!(profile.is_complete());
        }
    }

    mod masking {
        use super::*;

        #[test]
        fn masks_email_keeping_first_char_and_domain() {
            assert_eq!(mask_email("alex@company.com"), "a***@company.com");
        }

        #[test]
        fn malformed_email_masks_fully() {
            assert_eq!(mask_email("not-an-email"), "***");
            assert_eq!(mask_email("@domain.com"), "***");
        }

        #[test]
        fn masks_phone_keeping_last_four_digits() {
            assert_eq!(mask_phone("5551234567"), "***4567");
        }

        #[test]
        fn short_phone_masks_fully() {
            assert_eq!(mask_phone("123"), "***");
        }

        #[test]
        fn preview_masks_only_email_and_phone() {
            let profile = complete_profile();
            let preview = profile.masked_preview();

            assert_eq!(preview["email"], "a***@company.com");
            assert_eq!(preview["phone"], "***4567");
            assert_eq!(preview["full_name"], "Ada Lovelace");
            assert_eq!(preview["experience_years"], 5);
        }

        #[test]
        fn preview_shows_null_for_unset_fields() {
            let preview = Profile::new().masked_preview();
            assert_eq!(preview["email"], Value::Null);
            assert_eq!(preview["tech_stack"], Value::Null);
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn unset_fields_serialize_as_null() {
            let json = serde_json::to_value(Profile::new()).unwrap();
            assert_eq!(json["full_name"], Value::Null);
        }

        #[test]
        fn raw_values_are_not_masked() {
            let json = serde_json::to_value(complete_profile()).unwrap();
            assert_eq!(json["email"], "alex@company.com");
            assert_eq!(json["phone"], "5551234567");
        }
    }

    fn complete_profile() -> Profile {
        let mut profile = Profile::new();
        profile.set(ProfileField::FullName, FieldValue::Text("Ada Lovelace".into()));
        profile.set(ProfileField::Email, FieldValue::Text("alex@company.com".into()));
        profile.set(ProfileField::Phone, FieldValue::Text("5551234567".into()));
        profile.set(ProfileField::ExperienceYears, FieldValue::Number(5));
        profile.set(
            ProfileField::DesiredPositions,
            FieldValue::List(vec!["Backend Engineer".into()]),
        );
        profile.set(ProfileField::Location, FieldValue::Text("Lisbon, Portugal".into()));
        profile.set(
            ProfileField::TechStack,
            FieldValue::List(vec!["Rust".into(), "Postgres".into()]),
        );
        profile
    }
}

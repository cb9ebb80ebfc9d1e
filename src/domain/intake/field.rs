//! The seven required candidate-profile fields.
//!
//! Fields are collected in a strict canonical order regardless of how data
//! happens to arrive. Each field carries its question prompt and the fixed
//! message shown when an answer is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven required candidate-profile attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    FullName,
    Email,
    Phone,
    ExperienceYears,
    DesiredPositions,
    Location,
    TechStack,
}

impl ProfileField {
    /// All fields in canonical collection order.
    pub const CANONICAL_ORDER: [ProfileField; 7] = [
        ProfileField::FullName,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::ExperienceYears,
        ProfileField::DesiredPositions,
        ProfileField::Location,
        ProfileField::TechStack,
    ];

    /// The first field asked in a fresh session.
    pub fn first() -> Self {
        Self::CANONICAL_ORDER[0]
    }

    /// Snake-case key used in persisted snapshots and previews.
    pub fn key(&self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::ExperienceYears => "experience_years",
            Self::DesiredPositions => "desired_positions",
            Self::Location => "location",
            Self::TechStack => "tech_stack",
        }
    }

    /// The question text shown when asking for this field.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::FullName => {
                "Welcome to TalentScout. Please provide your full name (first and last)."
            }
            Self::Email => "What is your email address? (e.g., alex@company.com)",
            Self::Phone => "Please share your phone number (include country code if possible).",
            Self::ExperienceYears => {
                "How many years of professional experience do you have? (a number is fine)"
            }
            Self::DesiredPositions => {
                "Which role(s) are you applying for? (comma-separated if multiple)"
            }
            Self::Location => "What is your current location (City, Country)?",
            Self::TechStack => {
                "Please list your tech stack (languages, frameworks, databases, tools), \
                 comma-separated."
            }
        }
    }

    /// The fixed message shown when an answer for this field is rejected.
    pub fn rejection_message(&self) -> &'static str {
        match self {
            Self::FullName => "Please provide your full name (first and last).",
            Self::Email => "Please provide a valid email.",
            Self::Phone => "Please provide a valid phone number.",
            Self::ExperienceYears => "Please enter a number.",
            Self::DesiredPositions => "Please list at least one position.",
            Self::Location => "Please provide City, Country.",
            Self::TechStack => "Please list at least one technology.",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

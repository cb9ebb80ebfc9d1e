//! Question Generator Port - interface to the language-generation service.
//!
//! Abstracts the external service that turns a completed candidate profile
//! into tailored technical interview questions. Implementations translate
//! between the provider-specific API and the domain; the response is free
//! text that the domain parses into a question set.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::intake::{Profile, ProfileField};

/// System persona prepended to every generation request.
pub const SYSTEM_PERSONA: &str = "You are TalentScout, a polite, structured hiring assistant \
    for a tech recruitment agency. Your job: collect candidate details, then generate concise \
    technical questions tailored to their tech stack. Keep responses short, professional, and \
    on-topic.";

/// Port for the question-generation collaborator.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Requests question text for a completed profile.
    ///
    /// The returned string is the provider's raw text; splitting it into
    /// individual questions is the caller's concern. An empty string is a
    /// valid response (no questions could be generated).
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;

    /// Returns provider identification for logging.
    fn info(&self) -> GeneratorInfo;
}

/// A rendered generation request: persona plus the instruction template
/// filled in from the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// System persona guiding the provider's behavior.
    pub system: String,
    /// The rendered instruction prompt.
    pub prompt: String,
}

impl GenerationRequest {
    /// Renders the fixed instruction template for a profile.
    ///
    /// Positions and tech stack are comma-joined. The template asks for 3–5
    /// single-sentence, progressively harder, stack-specific questions with
    /// no preamble or answers.
    pub fn for_profile(profile: &Profile) -> Self {
        let render = |field: ProfileField| {
            profile
                .get(field)
                .map(|value| value.render())
                .unwrap_or_default()
        };

        let prompt = format!(
            "You are a technical interviewer for a tech recruitment agency.\n\
             \n\
             Candidate profile:\n\
             - Name: {full_name}\n\
             - Experience: {experience_years} years\n\
             - Desired positions: {desired_positions}\n\
             - Tech stack: {tech_stack}\n\
             \n\
             Task:\n\
             Generate 3 to 5 concise, progressively challenging technical questions \
             specifically about the technologies listed in the tech stack.\n\
             Rules:\n\
             - Only questions; no answers or preface.\n\
             - Keep each question in one sentence, clear and interview-ready.\n\
             - Cover multiple items from the stack if possible.\n",
            full_name = render(ProfileField::FullName),
            experience_years = render(ProfileField::ExperienceYears),
            desired_positions = render(ProfileField::DesiredPositions),
            tech_stack = render(ProfileField::TechStack),
        );

        Self {
            system: SYSTEM_PERSONA.to_string(),
            prompt,
        }
    }
}

/// Provider identification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorInfo {
    /// Provider name (e.g., "gemini", "mock").
    pub name: String,
    /// Model identifier.
    pub model: String,
}

impl GeneratorInfo {
    /// Creates new generator info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Question-generation errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl GenerationError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. }
                | GenerationError::Unavailable { .. }
                | GenerationError::Network(_)
                | GenerationError::Timeout { .. }
        )
    }
}

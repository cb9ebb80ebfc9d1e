//! Mock Question Generator for testing.
//!
//! A configurable implementation of the QuestionGenerator port, allowing
//! tests to run without calling the real generation API.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Error injection for resilience testing
//! - Simulated delays for timeout testing
//! - Call recording for verification
//!
//! # Example
//!
//! ```ignore
//! let generator = MockQuestionGenerator::new()
//!     .with_response("Q1?\nQ2?\nQ3?");
//!
//! let text = generator.generate(request).await?;
//! assert_eq!(text, "Q1?\nQ2?\nQ3?");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GenerationError, GenerationRequest, GeneratorInfo, QuestionGenerator};

/// Mock question generator for testing.
#[derive(Debug, Clone)]
pub struct MockQuestionGenerator {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this text.
    Success(String),
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for GenerationError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => {
                GenerationError::rate_limited(retry_after_secs)
            }
            MockError::Unavailable { message } => GenerationError::unavailable(message),
            MockError::AuthenticationFailed => GenerationError::AuthenticationFailed,
            MockError::Network { message } => GenerationError::network(message),
            MockError::Timeout { timeout_secs } => GenerationError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockQuestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockQuestionGenerator {
    /// Creates a new mock generator with default settings.
    ///
    /// With no configured responses, `generate` returns an empty string,
    /// which the domain treats as "no questions generated".
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a response text to the queue.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        {
            let mut responses = self.responses.lock().unwrap();
            responses.push_back(MockResponse::Success(text.into()));
        }
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        {
            let mut responses = self.responses.lock().unwrap();
            responses.push_back(MockResponse::Error(error));
        }
        self
    }

    /// Sets a simulated latency applied to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns how many times `generate` was called.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns the recorded requests.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionGenerator for MockQuestionGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Success(text)) => Ok(text),
            Some(MockResponse::Error(err)) => Err(err.into()),
            None => Ok(String::new()),
        }
    }

    fn info(&self) -> GeneratorInfo {
        GeneratorInfo::new("mock", "mock-model-1")
    }
}

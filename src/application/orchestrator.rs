//! Conversation orchestrator.
//!
//! Top-level dispatcher for a session: routes each user utterance to the
//! intake machine or the question walk depending on the current phase,
//! invokes the generation collaborator exactly once at the intake/question
//! boundary, and writes snapshots on terminal events.
//!
//! Collaborator failures never escape as errors. Generation failures degrade
//! to the "no questions generated" outcome; storage failures become a
//! user-visible notice while the conversation state stays intact.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::conversation::{QuestionSet, QuestionStep, Session};
use crate::domain::intake::IntakeStep;
use crate::ports::{GenerationRequest, QuestionGenerator, SnapshotStore};

const ACK_NEXT_QUESTION: &str = "Thanks. Next question:";
const CLOSING_MESSAGE: &str = "Thank you. That's all the questions I had for now.";
const FAREWELL_MESSAGE: &str = "Thank you for your time. Goodbye!";
const NO_QUESTIONS_MESSAGE: &str = "No questions generated.";
const TRANSITION_MESSAGE: &str = "All details collected. Let's move to technical questions:";

/// What one orchestrator call produced.
#[derive(Debug, Clone, Default)]
pub struct TurnOutcome {
    /// Assistant messages appended to the transcript this turn.
    pub replies: Vec<String>,
    /// Non-fatal storage notice (snapshot confirmation or write failure).
    pub notice: Option<String>,
    /// Where a snapshot landed, if one was written.
    pub snapshot_path: Option<PathBuf>,
}

impl TurnOutcome {
    fn ignored() -> Self {
        Self::default()
    }
}

/// Dispatches user utterances and session commands for one session.
pub struct ConversationOrchestrator {
    generator: Arc<dyn QuestionGenerator>,
    store: Arc<dyn SnapshotStore>,
    /// Upper bound on the blocking generation call. The original behavior
    /// had no bound and could hang a turn indefinitely; exceeding this
    /// bound degrades to the no-questions outcome.
    generation_timeout: Duration,
}

impl ConversationOrchestrator {
    /// Creates an orchestrator over the given collaborators.
    pub fn new(generator: Arc<dyn QuestionGenerator>, store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            generator,
            store,
            generation_timeout: Duration::from_secs(60),
        }
    }

    /// Sets the bound on the generation call.
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Processes one free-text user utterance.
    ///
    /// Exactly one utterance is processed to completion, including any
    /// collaborator call, before the next is accepted; the session is owned
    /// exclusively by the caller for the turn's duration.
    pub async fn process_turn(&self, session: &mut Session, input: &str) -> TurnOutcome {
        if !session.phase().accepts_user_input() {
            // Frozen session: incoming utterances are dropped entirely.
            return TurnOutcome::ignored();
        }

        session.record_user(input);

        if session.in_question_phase() {
            self.advance_question_walk(session, input).await
        } else {
            self.advance_intake(session, input).await
        }
    }

    /// Explicit quit: snapshot, farewell, freeze.
    pub async fn quit(&self, session: &mut Session) -> TurnOutcome {
        if session.is_completed() {
            return TurnOutcome::ignored();
        }

        let (snapshot_path, mut notice) = self.write_snapshot(session).await;
        if let Some(path) = &snapshot_path {
            notice = Some(format!("Session saved to {}", path.display()));
        }

        let mut outcome = TurnOutcome {
            replies: Vec::new(),
            notice,
            snapshot_path,
        };
        self.reply(session, &mut outcome, FAREWELL_MESSAGE.to_string());

        if let Err(err) = session.complete() {
            tracing::warn!(error = %err, "quit on a session that could not complete");
        }
        outcome
    }

    /// Explicit restart: snapshot the prior state, then reset everything.
    pub async fn restart(&self, session: &mut Session) -> TurnOutcome {
        let (snapshot_path, notice) = self.write_snapshot(session).await;

        *session = Session::new();
        tracing::info!(session_id = %session.id(), "session restarted");

        let replies = session
            .messages()
            .iter()
            .map(|message| message.text.clone())
            .collect();

        TurnOutcome {
            replies,
            notice,
            snapshot_path,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Phase handlers
    // ─────────────────────────────────────────────────────────────────────

    async fn advance_intake(&self, session: &mut Session, input: &str) -> TurnOutcome {
        let mut outcome = TurnOutcome::default();

        match session.submit_field(input) {
            IntakeStep::Rejected { field, message } => {
                // Field-local, recoverable: error text plus the original
                // prompt, state unchanged.
                self.reply(session, &mut outcome, format!("{}\n{}", message, field.prompt()));
            }
            IntakeStep::Advanced { next } => {
                self.reply(session, &mut outcome, format!("Saved. {}", next.prompt()));
            }
            IntakeStep::Finished => {
                let set = self.generate_questions(session).await;
                if let Err(err) = session.seed_questions(set) {
                    tracing::warn!(error = %err, "could not seed question set");
                }

                let first = session
                    .questions()
                    .and_then(|set| set.current_question())
                    .unwrap_or(NO_QUESTIONS_MESSAGE)
                    .to_string();
                self.reply(
                    session,
                    &mut outcome,
                    format!("{}\n{}", TRANSITION_MESSAGE, first),
                );
            }
            IntakeStep::AlreadyComplete => {
                // Question set exhausted (possibly empty) and intake done:
                // explicit no-op state, nothing handles the utterance.
                tracing::debug!(session_id = %session.id(), "utterance fell through with no handler");
            }
        }

        outcome
    }

    async fn advance_question_walk(&self, session: &mut Session, input: &str) -> TurnOutcome {
        let mut outcome = TurnOutcome::default();

        match session.answer_question(input) {
            QuestionStep::Next { question } => {
                self.reply(
                    session,
                    &mut outcome,
                    format!("{}\n{}", ACK_NEXT_QUESTION, question),
                );
            }
            QuestionStep::Finished => {
                self.reply(session, &mut outcome, CLOSING_MESSAGE.to_string());
                if let Err(err) = session.complete() {
                    tracing::warn!(error = %err, "question walk finished on a frozen session");
                }
                let (snapshot_path, notice) = self.write_snapshot(session).await;
                outcome.snapshot_path = snapshot_path;
                outcome.notice = notice;
            }
            QuestionStep::AlreadyExhausted => {
                tracing::debug!(session_id = %session.id(), "answer arrived for an exhausted question set");
            }
        }

        outcome
    }

    // ─────────────────────────────────────────────────────────────────────
    // Collaborators
    // ─────────────────────────────────────────────────────────────────────

    /// Invokes the generation collaborator once, bounded by the configured
    /// timeout. Any failure degrades to an empty question set.
    async fn generate_questions(&self, session: &Session) -> QuestionSet {
        let request = GenerationRequest::for_profile(session.profile());
        let info = self.generator.info();
        tracing::info!(provider = %info.name, model = %info.model, "requesting interview questions");

        let text = match tokio::time::timeout(
            self.generation_timeout,
            self.generator.generate(request),
        )
        .await
        {
            Ok(Ok(text)) => text,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, retryable = err.is_retryable(), "question generation failed");
                String::new()
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.generation_timeout.as_secs(),
                    "question generation timed out"
                );
                String::new()
            }
        };

        QuestionSet::from_response_text(&text)
    }

    /// Writes a snapshot of the session's current state.
    ///
    /// Failures are reported as a notice; conversation state is unaffected.
    async fn write_snapshot(&self, session: &Session) -> (Option<PathBuf>, Option<String>) {
        match self.store.write(&session.snapshot()).await {
            Ok(path) => (Some(path), None),
            Err(err) => {
                tracing::warn!(error = %err, "snapshot write failed");
                (
                    None,
                    Some(format!("Warning: session could not be saved: {}", err)),
                )
            }
        }
    }

    fn reply(&self, session: &mut Session, outcome: &mut TurnOutcome, text: String) {
        session.record_assistant(text.clone());
        outcome.replies.push(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockError, MockQuestionGenerator};
    use crate::adapters::storage::FileSnapshotStore;
    use crate::domain::conversation::SessionPhase;
    use crate::domain::intake::ProfileField;
    use tempfile::TempDir;

    const INTAKE_ANSWERS: [&str; 7] = [
        "Ada Lovelace",
        "ada@company.com",
        "+1 (555) 123-4567",
        "about 5 years",
        "Backend Engineer, SRE",
        "London, UK",
        "Rust, Postgres, Redis",
    ];

    struct Fixture {
        orchestrator: ConversationOrchestrator,
        generator: MockQuestionGenerator,
        _temp_dir: TempDir,
        snapshot_dir: std::path::PathBuf,
    }

    fn fixture(generator: MockQuestionGenerator) -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let snapshot_dir = temp_dir.path().to_path_buf();
        let orchestrator = ConversationOrchestrator::new(
            Arc::new(generator.clone()),
            Arc::new(FileSnapshotStore::new(&snapshot_dir)),
        );
        Fixture {
            orchestrator,
            generator,
            _temp_dir: temp_dir,
            snapshot_dir,
        }
    }

    fn snapshot_count(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
    }

    async fn run_intake(fixture: &Fixture, session: &mut Session) -> TurnOutcome {
        let mut last = TurnOutcome::default();
        for answer in INTAKE_ANSWERS {
            last = fixture.orchestrator.process_turn(session, answer).await;
        }
        last
    }

    #[tokio::test]
    async fn rejected_input_reprompts_with_error_and_prompt() {
        let fixture = fixture(MockQuestionGenerator::new());
        let mut session = Session::new();

        let outcome = fixture.orchestrator.process_turn(&mut session, "Ada").await;

        assert_eq!(
            outcome.replies,
            vec![format!(
                "Please provide your full name (first and last).\n{}",
                ProfileField::FullName.prompt()
            )]
        );
        assert_eq!(session.phase(), SessionPhase::Intake);
        assert!(session.profile().get(ProfileField::FullName).is_none());
    }

    #[tokio::test]
    async fn accepted_input_acknowledges_and_asks_next_field() {
        let fixture = fixture(MockQuestionGenerator::new());
        let mut session = Session::new();

        let outcome = fixture
            .orchestrator
            .process_turn(&mut session, "Ada Lovelace")
            .await;

        assert_eq!(
            outcome.replies,
            vec![format!("Saved. {}", ProfileField::Email.prompt())]
        );
    }

    #[tokio::test]
    async fn completed_intake_makes_exactly_one_generation_call() {
        let fixture = fixture(MockQuestionGenerator::new().with_response("Q1?\nQ2?\nQ3?"));
        let mut session = Session::new();

        let outcome = run_intake(&fixture, &mut session).await;

        assert_eq!(fixture.generator.call_count(), 1);
        assert_eq!(
            outcome.replies,
            vec!["All details collected. Let's move to technical questions:\nQ1?".to_string()]
        );
        assert_eq!(session.questions().unwrap().questions().len(), 3);
        // The rendered prompt carried the collected profile.
        let prompt = &fixture.generator.calls()[0].prompt;
        assert!(prompt.contains("Ada Lovelace"));
        assert!(prompt.contains("Rust, Postgres, Redis"));
    }

    #[tokio::test]
    async fn generation_failure_degrades_to_no_questions() {
        let fixture = fixture(MockQuestionGenerator::new().with_error(MockError::Network {
            message: "connection reset".into(),
        }));
        let mut session = Session::new();

        let outcome = run_intake(&fixture, &mut session).await;

        assert_eq!(
            outcome.replies,
            vec![
                "All details collected. Let's move to technical questions:\nNo questions generated."
                    .to_string()
            ]
        );
        // Terminal no-op state: further input is swallowed.
        let next = fixture.orchestrator.process_turn(&mut session, "hello?").await;
        assert!(next.replies.is_empty());
        assert!(!session.is_completed());
    }

    #[tokio::test]
    async fn slow_generation_is_bounded_by_timeout() {
        let generator = MockQuestionGenerator::new()
            .with_response("Q1?")
            .with_delay(Duration::from_millis(200));
        let temp_dir = TempDir::new().unwrap();
        let orchestrator = ConversationOrchestrator::new(
            Arc::new(generator),
            Arc::new(FileSnapshotStore::new(temp_dir.path())),
        )
        .with_generation_timeout(Duration::from_millis(20));

        let mut session = Session::new();
        let mut outcome = TurnOutcome::default();
        for answer in INTAKE_ANSWERS {
            outcome = orchestrator.process_turn(&mut session, answer).await;
        }

        assert!(outcome.replies[0].ends_with("No questions generated."));
    }

    #[tokio::test]
    async fn question_walk_advances_and_completes_with_one_snapshot() {
        let fixture = fixture(MockQuestionGenerator::new().with_response("Q1?\nQ2?"));
        let mut session = Session::new();
        run_intake(&fixture, &mut session).await;

        let first = fixture.orchestrator.process_turn(&mut session, "A1").await;
        assert_eq!(first.replies, vec!["Thanks. Next question:\nQ2?".to_string()]);
        assert_eq!(snapshot_count(&fixture.snapshot_dir), 0);

        let last = fixture.orchestrator.process_turn(&mut session, "A2").await;
        assert_eq!(
            last.replies,
            vec!["Thank you. That's all the questions I had for now.".to_string()]
        );
        assert!(last.snapshot_path.is_some());
        assert!(session.is_completed());
        assert_eq!(snapshot_count(&fixture.snapshot_dir), 1);

        // Frozen: nothing further is processed or recorded.
        let messages_before = session.messages().len();
        let after = fixture.orchestrator.process_turn(&mut session, "more").await;
        assert!(after.replies.is_empty());
        assert_eq!(session.messages().len(), messages_before);
    }

    #[tokio::test]
    async fn quit_snapshots_once_and_freezes() {
        let fixture = fixture(MockQuestionGenerator::new());
        let mut session = Session::new();
        fixture.orchestrator.process_turn(&mut session, "Ada Lovelace").await;

        let outcome = fixture.orchestrator.quit(&mut session).await;

        assert_eq!(outcome.replies, vec![FAREWELL_MESSAGE.to_string()]);
        assert!(outcome.notice.unwrap().starts_with("Session saved to "));
        assert!(session.is_completed());
        assert_eq!(snapshot_count(&fixture.snapshot_dir), 1);

        // A second quit is a no-op and writes nothing further.
        let again = fixture.orchestrator.quit(&mut session).await;
        assert!(again.replies.is_empty());
        assert_eq!(snapshot_count(&fixture.snapshot_dir), 1);
    }

    #[tokio::test]
    async fn restart_snapshots_prior_state_and_resets() {
        let fixture = fixture(MockQuestionGenerator::new());
        let mut session = Session::new();
        fixture.orchestrator.process_turn(&mut session, "Ada Lovelace").await;
        let old_id = session.id();

        let outcome = fixture.orchestrator.restart(&mut session).await;

        assert_ne!(session.id(), old_id);
        assert_eq!(outcome.replies, vec![ProfileField::FullName.prompt().to_string()]);
        assert!(session.profile().get(ProfileField::FullName).is_none());
        assert_eq!(snapshot_count(&fixture.snapshot_dir), 1);
    }

    #[tokio::test]
    async fn storage_failure_is_a_notice_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"file, not dir").unwrap();

        let orchestrator = ConversationOrchestrator::new(
            Arc::new(MockQuestionGenerator::new()),
            Arc::new(FileSnapshotStore::new(&blocker)),
        );
        let mut session = Session::new();
        orchestrator.process_turn(&mut session, "Ada Lovelace").await;

        let outcome = orchestrator.quit(&mut session).await;

        assert!(outcome.notice.unwrap().starts_with("Warning:"));
        assert!(outcome.snapshot_path.is_none());
        // Conversation state unaffected: farewell still delivered, frozen.
        assert_eq!(outcome.replies, vec![FAREWELL_MESSAGE.to_string()]);
        assert!(session.is_completed());
    }
}

//! TalentScout CLI entrypoint.
//!
//! Wires configuration, the Gemini generator, and the file snapshot store
//! into a single-session terminal loop. One utterance is processed to
//! completion before the next prompt appears, so input during question
//! generation is naturally held back.
//!
//! Commands: `/quit` saves and ends the session, `/restart` saves and
//! starts over, `/preview` prints the masked profile collected so far.

use std::io::{BufRead, Write as _};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use talent_scout::adapters::ai::{GeminiConfig, GeminiProvider};
use talent_scout::adapters::storage::FileSnapshotStore;
use talent_scout::application::{ConversationOrchestrator, TurnOutcome};
use talent_scout::config::AppConfig;
use talent_scout::domain::conversation::Session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let api_key = config.ai.gemini_api_key.clone().unwrap_or_default();
    let gemini_config = GeminiConfig::new(api_key)
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout());

    let orchestrator = ConversationOrchestrator::new(
        Arc::new(GeminiProvider::new(gemini_config)),
        Arc::new(FileSnapshotStore::new(config.storage.snapshot_path())),
    )
    .with_generation_timeout(config.ai.timeout());

    let mut session = Session::new();
    tracing::info!(session_id = %session.id(), "session started");

    for message in session.messages() {
        println!("{}", message.text);
    }

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            // EOF behaves like an explicit quit.
            None => {
                let outcome = orchestrator.quit(&mut session).await;
                print_outcome(&outcome);
                break;
            }
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let outcome = match input {
            "/quit" => {
                let outcome = orchestrator.quit(&mut session).await;
                print_outcome(&outcome);
                break;
            }
            "/restart" => orchestrator.restart(&mut session).await,
            "/preview" => {
                println!("{}", serde_json::to_string_pretty(&session.masked_preview())?);
                continue;
            }
            _ => orchestrator.process_turn(&mut session, input).await,
        };

        print_outcome(&outcome);

        if session.is_completed() {
            break;
        }
    }

    Ok(())
}

fn print_outcome(outcome: &TurnOutcome) {
    for reply in &outcome.replies {
        println!("{}", reply);
    }
    if let Some(notice) = &outcome.notice {
        eprintln!("{}", notice);
    }
}

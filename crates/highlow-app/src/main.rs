//! `highlow` binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing
//! 3. Build the skill dispatcher over an in-memory session store
//! 4. Replay request files or play interactively on stdin

mod cli;

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use highlow_core::config::HighLowConfig;
use highlow_skill::{SkillDispatcher, SkillRequest, SkillResponse};
use highlow_storage::{InMemorySessionStore, SessionId};

use cli::{CliArgs, Command};

type Dispatcher = SkillDispatcher<InMemorySessionStore>;

/// Run request files through the dispatcher, echoing attributes between turns.
async fn replay(
    dispatcher: &Dispatcher,
    files: &[PathBuf],
    session_id: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut previous: Option<SkillResponse> = None;

    for file in files {
        let content = tokio::fs::read_to_string(file).await?;
        let mut request: SkillRequest = serde_json::from_str(&content)?;
        if let Some(ref id) = session_id {
            request.session.session_id = id.clone();
        }
        if let Some(ref previous) = previous {
            request.session.attributes = Some(previous.session_attributes.clone());
        }

        tracing::debug!(file = %file.display(), "Replaying request");
        let response = dispatcher.handle(&request).await?;
        println!("{}", serde_json::to_string_pretty(&response)?);
        previous = Some(response);
    }

    Ok(())
}

fn print_spoken(response: &SkillResponse) {
    match &response.response.output_speech {
        Some(speech) => println!("< {}", speech.text()),
        None => println!("< (silence)"),
    }
}

/// Interactive loop: one utterance per stdin line until the session ends.
async fn play(
    dispatcher: &Dispatcher,
    session_id: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let session_id = session_id
        .map(SessionId::new)
        .unwrap_or_else(SessionId::generate);
    tracing::info!(session_id = %session_id, "Starting interactive session");

    let welcome = dispatcher
        .handle(&SkillRequest::launch(session_id.as_str()))
        .await?;
    print_spoken(&welcome);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(request) = cli::play_request(session_id.as_str(), &line) else {
            continue;
        };

        match dispatcher.handle(&request).await {
            Ok(response) => {
                print_spoken(&response);
                if response.response.should_end_session {
                    break;
                }
            }
            Err(e) => tracing::warn!(error = %e, "Turn failed"),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing so its log level can apply.
    let config_file = args.resolve_config_path();
    let loaded = HighLowConfig::load(&config_file);
    let log_level = args.resolve_log_level().unwrap_or_else(|| match &loaded {
        Ok(config) => config.general.log_level.clone(),
        Err(_) => "info".to_string(),
    });

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting highlow v{}", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => {
            tracing::info!(path = %config_file.display(), "Configuration loaded");
            config
        }
        Err(e) => {
            tracing::warn!(
                path = %config_file.display(),
                error = %e,
                "Failed to load config. Using defaults."
            );
            HighLowConfig::default()
        }
    };

    let dispatcher = SkillDispatcher::new(InMemorySessionStore::new(), config.dispatch.clone());

    match args.command {
        Command::Replay { files, session_id } => replay(&dispatcher, &files, session_id).await?,
        Command::Play { session_id } => play(&dispatcher, session_id).await?,
    }

    Ok(())
}

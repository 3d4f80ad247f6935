//! CLI argument definitions for the `highlow` binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use highlow_dialog::NUMBER_SLOT;
use highlow_skill::SkillRequest;

/// High Low: a number guessing game for voice assistants, driven locally.
#[derive(Parser, Debug)]
#[command(name = "highlow", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Feed request JSON files through the skill in order, chaining session
    /// attributes from each response into the next request.
    Replay {
        /// Request files, one platform request per file.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Override the session id of every request.
        #[arg(short = 's', long = "session-id")]
        session_id: Option<String>,
    },
    /// Play interactively: one utterance per line on stdin
    /// (yes, no, help, launch, end, or a number).
    Play {
        /// Session id to play under; generated when omitted.
        #[arg(short = 's', long = "session-id")]
        session_id: Option<String>,
    },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > HIGHLOW_CONFIG env var > ~/.highlow/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("HIGHLOW_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Returns `None` if not overridden on the command line.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".highlow").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".highlow").join("config.toml");
    }
    PathBuf::from("config.toml")
}

/// Translate one line typed in `play` mode into a platform request.
///
/// Returns `None` for blank lines.
pub fn play_request(session_id: &str, line: &str) -> Option<SkillRequest> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let request = match line.to_lowercase().as_str() {
        "launch" | "start" | "open" => SkillRequest::launch(session_id),
        "yes" | "y" => SkillRequest::intent(session_id, "AMAZON.YesIntent"),
        "no" | "n" => SkillRequest::intent(session_id, "AMAZON.NoIntent"),
        "help" | "?" => SkillRequest::intent(session_id, "AMAZON.HelpIntent"),
        "end" | "quit" | "exit" => SkillRequest::session_ended(session_id),
        lower => match lower.strip_prefix("guess ") {
            Some(value) => SkillRequest::intent(session_id, "NumberGuessIntent")
                .with_slot(NUMBER_SLOT, value.trim()),
            None if lower.parse::<i64>().is_ok() => {
                SkillRequest::intent(session_id, "NumberGuessIntent").with_slot(NUMBER_SLOT, lower)
            }
            None => SkillRequest::intent(session_id, line),
        },
    };
    Some(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use highlow_skill::RequestType;

    fn intent_name(request: &SkillRequest) -> &str {
        &request.request.intent.as_ref().unwrap().name
    }

    #[test]
    fn test_parse_replay() {
        let args = CliArgs::parse_from(["highlow", "-l", "debug", "replay", "a.json", "b.json"]);
        assert_eq!(args.resolve_log_level().as_deref(), Some("debug"));
        match args.command {
            Command::Replay { files, session_id } => {
                assert_eq!(files.len(), 2);
                assert!(session_id.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_play_with_session() {
        let args = CliArgs::parse_from(["highlow", "play", "--session-id", "abc"]);
        match args.command {
            Command::Play { session_id } => assert_eq!(session_id.as_deref(), Some("abc")),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_config_flag_wins() {
        let args = CliArgs::parse_from(["highlow", "-c", "/tmp/x.toml", "play"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/x.toml"));
    }

    #[test]
    fn test_play_request_keywords() {
        assert_eq!(
            play_request("s", "launch").unwrap().request.kind,
            RequestType::LaunchRequest
        );
        assert_eq!(
            intent_name(&play_request("s", "Yes").unwrap()),
            "AMAZON.YesIntent"
        );
        assert_eq!(
            intent_name(&play_request("s", " no ").unwrap()),
            "AMAZON.NoIntent"
        );
        assert_eq!(
            intent_name(&play_request("s", "help").unwrap()),
            "AMAZON.HelpIntent"
        );
        assert_eq!(
            play_request("s", "quit").unwrap().request.kind,
            RequestType::SessionEndedRequest
        );
        assert!(play_request("s", "   ").is_none());
    }

    #[test]
    fn test_play_request_numbers() {
        let request = play_request("s", "42").unwrap();
        assert_eq!(intent_name(&request), "NumberGuessIntent");
        let slot = &request.request.intent.as_ref().unwrap().slots[NUMBER_SLOT];
        assert_eq!(slot.text(), "42");

        let request = play_request("s", "guess forty").unwrap();
        let slot = &request.request.intent.as_ref().unwrap().slots[NUMBER_SLOT];
        assert_eq!(slot.text(), "forty");
    }

    #[test]
    fn test_play_request_other_text_is_raw_intent() {
        let request = play_request("s", "Dance").unwrap();
        assert_eq!(intent_name(&request), "Dance");
    }
}

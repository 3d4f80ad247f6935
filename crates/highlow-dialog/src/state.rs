//! Conversation states of the guessing game.
//!
//! - None -> Start (launch or new session)
//! - Start -> Guess (user agrees to play)
//! - Guess -> Start (correct guess, or a new session mid-game)
//!
//! There is no terminal state: ending a session leaves the state untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dialog state persisted in the session attributes under `STATE`.
///
/// The serialized form is the mode string the hosting platform stores:
/// `""`, `"_STARTMODE"` or `"_GUESSMODE"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FsmState {
    /// No state recorded: the conversation has not started or was reset.
    #[default]
    #[serde(rename = "")]
    None,
    /// Waiting for a yes/no answer to start a round.
    #[serde(rename = "_STARTMODE")]
    Start,
    /// Waiting for a numeric guess.
    #[serde(rename = "_GUESSMODE")]
    Guess,
}

impl FsmState {
    /// The persisted mode string for this state.
    pub fn mode(&self) -> &'static str {
        match self {
            FsmState::None => "",
            FsmState::Start => "_STARTMODE",
            FsmState::Guess => "_GUESSMODE",
        }
    }
}

impl fmt::Display for FsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsmState::None => write!(f, "NONE"),
            FsmState::Start => write!(f, "START"),
            FsmState::Guess => write!(f, "GUESS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(FsmState::None.to_string(), "NONE");
        assert_eq!(FsmState::Start.to_string(), "START");
        assert_eq!(FsmState::Guess.to_string(), "GUESS");
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(FsmState::default(), FsmState::None);
    }

    #[test]
    fn test_serialized_mode_strings() {
        assert_eq!(serde_json::to_string(&FsmState::None).unwrap(), r#""""#);
        assert_eq!(
            serde_json::to_string(&FsmState::Start).unwrap(),
            r#""_STARTMODE""#
        );
        assert_eq!(
            serde_json::to_string(&FsmState::Guess).unwrap(),
            r#""_GUESSMODE""#
        );
    }

    #[test]
    fn test_deserialize_mode_strings() {
        let state: FsmState = serde_json::from_str(r#""_GUESSMODE""#).unwrap();
        assert_eq!(state, FsmState::Guess);
        let state: FsmState = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(state, FsmState::None);
        assert!(serde_json::from_str::<FsmState>(r#""_OTHERMODE""#).is_err());
    }

    #[test]
    fn test_mode_matches_serialization() {
        for state in [FsmState::None, FsmState::Start, FsmState::Guess] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.mode()));
        }
    }
}

//! Typed view of the per-session attribute map.
//!
//! The map is persisted by the session store between turns. Keys this crate
//! does not know about are carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::state::FsmState;

/// Session attributes as exchanged with the session store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionAttributes {
    /// Current dialog state; absent on a brand-new conversation.
    #[serde(rename = "STATE", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<FsmState>,
    /// Completed games for this user. Initialized once, never reset.
    #[serde(
        rename = "gamesPlayed",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub games_played: Option<u64>,
    /// Turns that ended through session termination.
    #[serde(
        rename = "endedSessionCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ended_session_count: Option<u64>,
    /// Secret target in `[0, 100)`, only meaningful while guessing.
    #[serde(
        rename = "guessNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub guess_number: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionAttributes {
    /// True when no key at all is present (the very first turn).
    pub fn is_empty(&self) -> bool {
        self.state.is_none()
            && self.games_played.is_none()
            && self.ended_session_count.is_none()
            && self.guess_number.is_none()
            && self.extra.is_empty()
    }

    /// The recorded dialog state, `None` when nothing is recorded.
    pub fn fsm_state(&self) -> FsmState {
        self.state.unwrap_or_default()
    }

    /// Initialize both counters to zero where they are absent.
    ///
    /// Existing values are never overwritten.
    pub fn ensure_counters(&mut self) {
        self.games_played.get_or_insert(0);
        self.ended_session_count.get_or_insert(0);
    }

    /// Record one more session termination.
    pub fn record_session_end(&mut self) -> u64 {
        let count = self.ended_session_count.unwrap_or(0) + 1;
        self.ended_session_count = Some(count);
        count
    }

    /// Record one more completed game.
    pub fn record_game_won(&mut self) -> u64 {
        let count = self.games_played.unwrap_or(0) + 1;
        self.games_played = Some(count);
        count
    }
}

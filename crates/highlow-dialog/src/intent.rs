//! Normalized intent events.
//!
//! Incoming intent names are free-form strings; they are mapped onto a closed
//! vocabulary here so the router can match exhaustively.

use std::collections::HashMap;
use std::fmt;

/// Slot carrying the spoken number of a `NumberGuess` intent.
pub const NUMBER_SLOT: &str = "number";

/// The fixed intent vocabulary of the game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IntentName {
    LaunchOrNewSession,
    Help,
    Yes,
    No,
    NumberGuess,
    SessionEnded,
    /// Anything outside the vocabulary; keeps the raw name for logging.
    Unrecognized(String),
}

impl IntentName {
    /// Map a wire intent name onto the vocabulary.
    ///
    /// Accepts both the canonical names and the voice platform's built-in
    /// names (`AMAZON.YesIntent`, `SessionEndedRequest`, ...).
    pub fn from_wire(name: &str) -> Self {
        match name {
            "LaunchOrNewSession" | "LaunchRequest" | "NewSession" => IntentName::LaunchOrNewSession,
            "Help" | "AMAZON.HelpIntent" => IntentName::Help,
            "Yes" | "AMAZON.YesIntent" => IntentName::Yes,
            "No" | "AMAZON.NoIntent" => IntentName::No,
            "NumberGuess" | "NumberGuessIntent" => IntentName::NumberGuess,
            "SessionEnded" | "SessionEndedRequest" => IntentName::SessionEnded,
            other => IntentName::Unrecognized(other.to_string()),
        }
    }

    /// Canonical name, or the raw name for unrecognized intents.
    pub fn as_str(&self) -> &str {
        match self {
            IntentName::LaunchOrNewSession => "LaunchOrNewSession",
            IntentName::Help => "Help",
            IntentName::Yes => "Yes",
            IntentName::No => "No",
            IntentName::NumberGuess => "NumberGuess",
            IntentName::SessionEnded => "SessionEnded",
            IntentName::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for IntentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One incoming turn, normalized by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentEvent {
    pub name: IntentName,
    /// True on the first turn of a platform session.
    pub is_new_session: bool,
    /// Slot name to raw spoken value.
    pub slots: HashMap<String, String>,
    pub locale: Option<String>,
}

impl IntentEvent {
    pub fn new(name: IntentName) -> Self {
        Self {
            name,
            is_new_session: false,
            slots: HashMap::new(),
            locale: None,
        }
    }

    /// A `NumberGuess` event carrying `value` in the number slot.
    pub fn number_guess(value: impl Into<String>) -> Self {
        Self::new(IntentName::NumberGuess).with_slot(NUMBER_SLOT, value)
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    pub fn with_new_session(mut self, is_new_session: bool) -> Self {
        self.is_new_session = is_new_session;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Raw value of a slot, if present.
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }
}

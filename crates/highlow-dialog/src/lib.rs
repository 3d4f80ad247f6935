//! Dialog core for the High Low guessing game.
//!
//! A pure state machine: the current [`FsmState`], one [`IntentEvent`] and the
//! turn's [`SessionAttributes`] go in, a [`TurnResult`] comes out. No I/O and
//! no state is retained between calls.

pub mod attributes;
pub mod error;
pub mod intent;
pub mod machine;
pub mod prompts;
pub mod response;
pub mod state;

pub use attributes::SessionAttributes;
pub use error::DialogError;
pub use intent::{IntentEvent, IntentName, NUMBER_SLOT};
pub use machine::{handle_turn, route, transition};
pub use response::{OutputSpeech, Reprompt, SpokenResponse, TurnResult};
pub use state::FsmState;

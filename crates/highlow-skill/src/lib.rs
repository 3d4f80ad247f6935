//! Skill dispatcher for the High Low guessing game.
//!
//! Normalizes voice platform requests into intent events, loads and saves
//! session attributes around each turn, runs the dialog core and renders the
//! platform response envelope.

pub mod dispatcher;
pub mod envelope;
pub mod error;

pub use dispatcher::{normalize, SkillDispatcher};
pub use envelope::{
    Intent, RequestBody, RequestSession, RequestType, SkillRequest, SkillResponse, Slot,
};
pub use error::SkillError;

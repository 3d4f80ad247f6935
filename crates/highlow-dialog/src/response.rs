//! Turn results and their spoken rendering.

use serde::{Deserialize, Serialize};

use crate::attributes::SessionAttributes;
use crate::state::FsmState;

// =============================================================================
// TurnResult
// =============================================================================

/// Outcome of one dialog turn.
///
/// `reprompt_text` is `None` exactly when `should_end_session` is true.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult {
    pub next_state: FsmState,
    /// Full replacement for the session's attributes.
    pub attributes: SessionAttributes,
    /// Primary utterance; empty for a silent turn.
    pub output_text: String,
    pub reprompt_text: Option<String>,
    pub should_end_session: bool,
}

impl TurnResult {
    /// Speak and keep the session open, waiting for an answer.
    pub fn ask(
        next_state: FsmState,
        attributes: SessionAttributes,
        output: impl Into<String>,
        reprompt: impl Into<String>,
    ) -> Self {
        Self {
            next_state,
            attributes,
            output_text: output.into(),
            reprompt_text: Some(reprompt.into()),
            should_end_session: false,
        }
    }

    /// Speak and end the session.
    pub fn tell(next_state: FsmState, attributes: SessionAttributes, output: impl Into<String>) -> Self {
        Self {
            next_state,
            attributes,
            output_text: output.into(),
            reprompt_text: None,
            should_end_session: true,
        }
    }

    /// End the session without speaking.
    pub fn silent(next_state: FsmState, attributes: SessionAttributes) -> Self {
        Self::tell(next_state, attributes, String::new())
    }

    pub fn is_silent(&self) -> bool {
        self.output_text.is_empty()
    }
}

// =============================================================================
// SpokenResponse
// =============================================================================

/// Speech payload handed to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl OutputSpeech {
    /// Wrap plain text as an SSML utterance.
    pub fn ssml(text: &str) -> Self {
        OutputSpeech::Ssml {
            ssml: format!("<speak> {} </speak>", text),
        }
    }

    /// The plain text inside the `<speak>` envelope.
    pub fn text(&self) -> &str {
        match self {
            OutputSpeech::Ssml { ssml } => ssml
                .strip_prefix("<speak> ")
                .and_then(|s| s.strip_suffix(" </speak>"))
                .unwrap_or(ssml),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Rendered form of a [`TurnResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpokenResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

impl From<&TurnResult> for SpokenResponse {
    fn from(turn: &TurnResult) -> Self {
        let output_speech = (!turn.is_silent()).then(|| OutputSpeech::ssml(&turn.output_text));
        let reprompt = if turn.should_end_session {
            None
        } else {
            turn.reprompt_text.as_deref().map(|text| Reprompt {
                output_speech: OutputSpeech::ssml(text),
            })
        };

        Self {
            output_speech,
            reprompt,
            should_end_session: turn.should_end_session,
        }
    }
}

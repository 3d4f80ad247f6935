//! Voice platform request and response envelopes.
//!
//! Only the fields the game reads or writes are modelled; everything else in
//! a platform request is ignored on deserialization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use highlow_dialog::{SessionAttributes, SpokenResponse, TurnResult};

const ENVELOPE_VERSION: &str = "1.0";

fn default_version() -> String {
    ENVELOPE_VERSION.to_string()
}

// =============================================================================
// Request
// =============================================================================

/// One inbound platform request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequest {
    #[serde(default = "default_version")]
    pub version: String,
    pub session: RequestSession,
    pub request: RequestBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSession {
    #[serde(default)]
    pub new: bool,
    pub session_id: String,
    /// Attributes echoed back by the platform from the previous response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<SessionAttributes>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    LaunchRequest,
    IntentRequest,
    SessionEndedRequest,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub kind: RequestType,
    #[serde(default)]
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    /// Why the platform ended the session (`SessionEndedRequest` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    /// Spoken value; platforms send strings, test harnesses sometimes numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Slot {
    /// The slot value as text; an unfilled slot reads as an empty string.
    pub fn text(&self) -> String {
        match &self.value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => i.to_string(),
                // Integral floats such as `42.0` read as the integer.
                (None, Some(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                    (f as i64).to_string()
                }
                _ => n.to_string(),
            },
            Some(other) => other.to_string(),
        }
    }
}

impl SkillRequest {
    fn with_body(session_id: &str, kind: RequestType, intent: Option<Intent>) -> Self {
        Self {
            version: default_version(),
            session: RequestSession {
                new: false,
                session_id: session_id.to_string(),
                attributes: None,
            },
            request: RequestBody {
                kind,
                request_id: format!("EdwRequestId.{}", Uuid::new_v4()),
                locale: None,
                intent,
                reason: None,
            },
        }
    }

    /// A `LaunchRequest` opening a new platform session.
    pub fn launch(session_id: &str) -> Self {
        let mut request = Self::with_body(session_id, RequestType::LaunchRequest, None);
        request.session.new = true;
        request
    }

    /// An `IntentRequest` for the named intent.
    pub fn intent(session_id: &str, name: &str) -> Self {
        Self::with_body(
            session_id,
            RequestType::IntentRequest,
            Some(Intent {
                name: name.to_string(),
                slots: HashMap::new(),
            }),
        )
    }

    pub fn session_ended(session_id: &str) -> Self {
        let mut request = Self::with_body(session_id, RequestType::SessionEndedRequest, None);
        request.request.reason = Some("USER_INITIATED".to_string());
        request
    }

    /// Fill a slot of the intent; no-op for requests without an intent.
    pub fn with_slot(mut self, name: &str, value: impl Into<Value>) -> Self {
        if let Some(intent) = self.request.intent.as_mut() {
            intent.slots.insert(
                name.to_string(),
                Slot {
                    name: name.to_string(),
                    value: Some(value.into()),
                },
            );
        }
        self
    }

    pub fn with_attributes(mut self, attributes: SessionAttributes) -> Self {
        self.session.attributes = Some(attributes);
        self
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.request.locale = Some(locale.to_string());
        self
    }
}

// =============================================================================
// Response
// =============================================================================

/// One outbound platform response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    pub version: String,
    pub session_attributes: SessionAttributes,
    pub response: SpokenResponse,
}

impl SkillResponse {
    pub fn from_turn(turn: &TurnResult) -> Self {
        Self {
            version: default_version(),
            session_attributes: turn.attributes.clone(),
            response: SpokenResponse::from(turn),
        }
    }

    /// SSML of the primary utterance, if any.
    pub fn output_ssml(&self) -> Option<&str> {
        match &self.response.output_speech {
            Some(highlow_dialog::OutputSpeech::Ssml { ssml }) => Some(ssml.as_str()),
            None => None,
        }
    }

    /// SSML of the reprompt, if any.
    pub fn reprompt_ssml(&self) -> Option<&str> {
        match &self.response.reprompt {
            Some(reprompt) => match &reprompt.output_speech {
                highlow_dialog::OutputSpeech::Ssml { ssml } => Some(ssml.as_str()),
            },
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_launch_request() {
        let request: SkillRequest = serde_json::from_value(json!({
            "session": {
                "sessionId": "SessionId.1",
                "application": { "applicationId": "1234" },
                "attributes": {},
                "user": { "userId": "amzn1.ask.account.TEST" },
                "new": true
            },
            "request": {
                "type": "LaunchRequest",
                "requestId": "EdwRequestId.1",
                "locale": "en-GB",
                "timestamp": "2017-03-26T14:31:05Z"
            },
            "version": "1.0"
        }))
        .unwrap();

        assert!(request.session.new);
        assert_eq!(request.session.session_id, "SessionId.1");
        assert!(request.session.attributes.unwrap().is_empty());
        assert_eq!(request.request.kind, RequestType::LaunchRequest);
        assert_eq!(request.request.locale.as_deref(), Some("en-GB"));
    }

    #[test]
    fn test_deserialize_intent_request_with_numeric_slot() {
        let request: SkillRequest = serde_json::from_value(json!({
            "session": { "sessionId": "SessionId.1", "new": false },
            "request": {
                "type": "IntentRequest",
                "requestId": "EdwRequestId.2",
                "intent": {
                    "name": "NumberGuessIntent",
                    "slots": { "number": { "name": "number", "value": 42 } }
                }
            }
        }))
        .unwrap();

        let intent = request.request.intent.unwrap();
        assert_eq!(intent.name, "NumberGuessIntent");
        assert_eq!(intent.slots["number"].text(), "42");
        assert_eq!(request.version, "1.0");
    }

    #[test]
    fn test_unknown_request_type_is_other() {
        let request: SkillRequest = serde_json::from_value(json!({
            "session": { "sessionId": "s" },
            "request": { "type": "Display.ElementSelected" }
        }))
        .unwrap();
        assert_eq!(request.request.kind, RequestType::Other);
    }

    #[test]
    fn test_slot_text_variants() {
        let slot = |value: Option<Value>| Slot {
            name: "number".to_string(),
            value,
        };
        assert_eq!(slot(None).text(), "");
        assert_eq!(slot(Some(Value::Null)).text(), "");
        assert_eq!(slot(Some(json!("Foo"))).text(), "Foo");
        assert_eq!(slot(Some(json!(-3))).text(), "-3");
        assert_eq!(slot(Some(json!(42.0))).text(), "42");
        assert_eq!(slot(Some(json!(41.5))).text(), "41.5");
    }

    #[test]
    fn test_builders() {
        let request = SkillRequest::intent("s", "NumberGuessIntent").with_slot("number", "7");
        assert_eq!(request.request.kind, RequestType::IntentRequest);
        assert_eq!(request.request.intent.unwrap().slots["number"].text(), "7");
        assert!(SkillRequest::launch("s").session.new);
        assert_eq!(
            SkillRequest::session_ended("s").request.kind,
            RequestType::SessionEndedRequest
        );
    }
}

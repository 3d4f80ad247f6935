//! Error types for the dialog core.
//!
//! Only contract violations surface here. Business cases such as an
//! unparsable guess or an unknown intent are ordinary turns.

use highlow_core::error::HighLowError;

/// Errors from the dialog state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    #[error("malformed {intent} event: {reason}")]
    MalformedEvent { intent: String, reason: String },
    #[error("session attribute '{key}' is required in state {state}")]
    MissingAttribute { key: &'static str, state: String },
}

impl From<DialogError> for HighLowError {
    fn from(err: DialogError) -> Self {
        HighLowError::Dialog(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_event_display() {
        let err = DialogError::MalformedEvent {
            intent: "NumberGuess".to_string(),
            reason: "missing slot 'number'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed NumberGuess event: missing slot 'number'"
        );
    }

    #[test]
    fn test_missing_attribute_display() {
        let err = DialogError::MissingAttribute {
            key: "guessNumber",
            state: "GUESS".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "session attribute 'guessNumber' is required in state GUESS"
        );
    }

    #[test]
    fn test_into_highlow_error() {
        let err: HighLowError = DialogError::MissingAttribute {
            key: "guessNumber",
            state: "GUESS".to_string(),
        }
        .into();
        assert!(matches!(err, HighLowError::Dialog(_)));
        assert!(err.to_string().contains("guessNumber"));
    }
}

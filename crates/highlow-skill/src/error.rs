//! Error types for the skill dispatcher.

use highlow_core::error::HighLowError;
use highlow_dialog::DialogError;

/// Errors surfaced to the caller of the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("dialog error: {0}")]
    Dialog(#[from] DialogError),
    #[error("session store error: {0}")]
    Store(#[from] HighLowError),
    #[error("invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("turn timed out after {0} ms")]
    Timeout(u64),
}

impl From<SkillError> for HighLowError {
    fn from(err: SkillError) -> Self {
        match err {
            SkillError::Store(inner) => inner,
            SkillError::Timeout(ms) => HighLowError::Timeout(ms),
            SkillError::Json(e) => HighLowError::Serialization(e.to_string()),
            SkillError::Dialog(e) => e.into(),
            SkillError::MalformedRequest(reason) => HighLowError::Dialog(reason),
        }
    }
}

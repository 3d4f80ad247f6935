use thiserror::Error;

/// Top-level error type for the High Low skill.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for HighLowError` (or the reverse) so that the `?`
/// operator works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HighLowError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session store error: {0}")]
    Store(String),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Turn timed out after {0} ms")]
    Timeout(u64),
}

impl From<toml::de::Error> for HighLowError {
    fn from(err: toml::de::Error) -> Self {
        HighLowError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for HighLowError {
    fn from(err: toml::ser::Error) -> Self {
        HighLowError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for HighLowError {
    fn from(err: serde_json::Error) -> Self {
        HighLowError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for High Low operations.
pub type Result<T> = std::result::Result<T, HighLowError>;

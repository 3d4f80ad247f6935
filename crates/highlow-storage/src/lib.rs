//! Session attribute storage for the High Low skill.
//!
//! The dialog core never persists anything itself. The dispatcher loads a
//! full attribute snapshot before a turn and saves the replacement after it
//! through a [`SessionStore`].

pub mod memory;

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use highlow_core::error::HighLowError;
use highlow_dialog::SessionAttributes;

pub use memory::InMemorySessionStore;

// =============================================================================
// SessionId
// =============================================================================

/// Identifier of one conversation, as assigned by the voice platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh identifier in the platform's `SessionId.<uuid>` format.
    pub fn generate() -> Self {
        Self(format!("SessionId.{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// =============================================================================
// Traits
// =============================================================================

/// Durable key-value store of session attributes.
///
/// For a single session the caller must not issue `load` while a `save` for
/// the same session is still in flight; the store itself gives no ordering
/// guarantee across concurrent callers.
pub trait SessionStore: Send + Sync {
    /// Load the attributes of a session, or empty attributes if none exist.
    fn load(
        &self,
        session_id: &SessionId,
    ) -> impl Future<Output = Result<SessionAttributes, HighLowError>> + Send;

    /// Replace the stored attributes of a session.
    fn save(
        &self,
        session_id: &SessionId,
        attributes: SessionAttributes,
    ) -> impl Future<Output = Result<(), HighLowError>> + Send;
}

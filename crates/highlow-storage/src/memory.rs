//! In-process session store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use highlow_core::error::HighLowError;
use highlow_dialog::SessionAttributes;

use crate::{SessionId, SessionStore};

#[derive(Debug, Clone)]
struct StoredSession {
    attributes: SessionAttributes,
    updated_at: DateTime<Utc>,
}

/// Session store backed by a shared in-memory map.
///
/// Cloning yields another handle to the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, StoredSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions with saved attributes.
    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// When the session was last saved, if ever.
    pub fn updated_at(&self, session_id: &SessionId) -> Option<DateTime<Utc>> {
        self.sessions
            .lock()
            .ok()
            .and_then(|s| s.get(session_id).map(|stored| stored.updated_at))
    }

    /// Forget a session. Returns whether it existed.
    pub fn remove(&self, session_id: &SessionId) -> Result<bool, HighLowError> {
        let mut sessions = self.lock()?;
        Ok(sessions.remove(session_id).is_some())
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, StoredSession>>, HighLowError> {
        self.sessions
            .lock()
            .map_err(|e| HighLowError::Store(format!("session lock poisoned: {}", e)))
    }
}

impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: &SessionId) -> Result<SessionAttributes, HighLowError> {
        let sessions = self.lock()?;
        let attributes = sessions
            .get(session_id)
            .map(|stored| stored.attributes.clone())
            .unwrap_or_default();
        tracing::trace!(session_id = %session_id, "Session attributes loaded");
        Ok(attributes)
    }

    async fn save(
        &self,
        session_id: &SessionId,
        attributes: SessionAttributes,
    ) -> Result<(), HighLowError> {
        let mut sessions = self.lock()?;
        sessions.insert(
            session_id.clone(),
            StoredSession {
                attributes,
                updated_at: Utc::now(),
            },
        );
        tracing::trace!(session_id = %session_id, "Session attributes saved");
        Ok(())
    }
}

//! Turn dispatcher: request in, response out.
//!
//! Each turn runs load -> transition -> save under a per-session lock, so a
//! session's attributes are never read while a previous save for the same
//! session is still in flight. Different sessions run concurrently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info, warn};

use highlow_core::config::DispatchConfig;
use highlow_core::error::HighLowError;
use highlow_dialog::{IntentEvent, IntentName};
use highlow_storage::{SessionId, SessionStore};

use crate::envelope::{RequestType, SkillRequest, SkillResponse};
use crate::error::SkillError;

type SessionLock = Arc<tokio::sync::Mutex<()>>;

/// Convert a platform request into the dialog core's intent event.
pub fn normalize(request: &SkillRequest, default_locale: &str) -> Result<IntentEvent, SkillError> {
    let body = &request.request;
    let mut event = match body.kind {
        RequestType::LaunchRequest => IntentEvent::new(IntentName::LaunchOrNewSession),
        RequestType::SessionEndedRequest => IntentEvent::new(IntentName::SessionEnded),
        RequestType::IntentRequest => {
            let intent = body.intent.as_ref().ok_or_else(|| {
                SkillError::MalformedRequest("IntentRequest without an intent".to_string())
            })?;
            let mut event = IntentEvent::new(IntentName::from_wire(&intent.name));
            for (name, slot) in &intent.slots {
                event.slots.insert(name.clone(), slot.text());
            }
            event
        }
        RequestType::Other => IntentEvent::new(IntentName::Unrecognized("Other".to_string())),
    };

    event.is_new_session = request.session.new;
    event.locale = Some(
        body.locale
            .clone()
            .unwrap_or_else(|| default_locale.to_string()),
    );
    Ok(event)
}

/// Runs dialog turns against a session store.
pub struct SkillDispatcher<S: SessionStore> {
    store: S,
    locks: Mutex<HashMap<SessionId, SessionLock>>,
    config: DispatchConfig,
}

impl<S: SessionStore> SkillDispatcher<S> {
    pub fn new(store: S, config: DispatchConfig) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one platform request, bounded by the configured turn timeout.
    pub async fn handle(&self, request: &SkillRequest) -> Result<SkillResponse, SkillError> {
        let timeout_ms = self.config.turn_timeout_ms;
        match tokio::time::timeout(Duration::from_millis(timeout_ms), self.run_turn(request)).await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    session_id = %request.session.session_id,
                    timeout_ms,
                    "Turn timed out"
                );
                Err(SkillError::Timeout(timeout_ms))
            }
        }
    }

    /// Handle a request given as JSON, returning the response as JSON.
    pub async fn handle_json(&self, request: &str) -> Result<String, SkillError> {
        let request: SkillRequest = serde_json::from_str(request)?;
        let response = self.handle(&request).await?;
        Ok(serde_json::to_string(&response)?)
    }

    async fn run_turn(&self, request: &SkillRequest) -> Result<SkillResponse, SkillError> {
        let session_id = SessionId::new(request.session.session_id.as_str());
        let event = normalize(request, &self.config.default_locale)?;
        debug!(
            session_id = %session_id,
            request_id = %request.request.request_id,
            intent = %event.name,
            new_session = event.is_new_session,
            "Dispatching request"
        );

        let lease = self.lease(&session_id)?;
        let _guard = lease.lock.lock().await;
        let result = self.locked_turn(&session_id, request, &event).await;
        result
    }

    /// Load, transition and save. Caller holds the session's lock.
    async fn locked_turn(
        &self,
        session_id: &SessionId,
        request: &SkillRequest,
        event: &IntentEvent,
    ) -> Result<SkillResponse, SkillError> {
        let attributes = match &request.session.attributes {
            Some(attributes) if !attributes.is_empty() => attributes.clone(),
            _ => self.store.load(session_id).await?,
        };

        let turn = {
            let mut rng = rand::rng();
            highlow_dialog::handle_turn(event, attributes, &mut rng)?
        };

        self.store
            .save(session_id, turn.attributes.clone())
            .await?;

        info!(
            session_id = %session_id,
            state = %turn.next_state,
            end_session = turn.should_end_session,
            "Turn complete"
        );
        Ok(SkillResponse::from_turn(&turn))
    }

    fn lease(&self, session_id: &SessionId) -> Result<LockLease<'_, S>, HighLowError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|e| HighLowError::Store(format!("session lock map poisoned: {}", e)))?;
        let lock = Arc::clone(locks.entry(session_id.clone()).or_default());
        Ok(LockLease {
            dispatcher: self,
            session_id: session_id.clone(),
            lock,
        })
    }

    /// Drop the session's lock once no turn holds or awaits it.
    fn release_lock(&self, session_id: &SessionId) {
        if let Ok(mut locks) = self.locks.lock() {
            if locks
                .get(session_id)
                .is_some_and(|lock| Arc::strong_count(lock) == 1)
            {
                locks.remove(session_id);
            }
        }
    }

    /// Number of sessions with a turn currently in flight or queued.
    pub fn active_sessions(&self) -> usize {
        self.locks.lock().map(|l| l.len()).unwrap_or(0)
    }
}

/// A turn's claim on its session lock.
///
/// Dropping it, including when a timed-out turn is cancelled, removes the
/// map entry if no other turn holds or awaits the same lock.
struct LockLease<'a, S: SessionStore> {
    dispatcher: &'a SkillDispatcher<S>,
    session_id: SessionId,
    lock: SessionLock,
}

impl<S: SessionStore> Drop for LockLease<'_, S> {
    fn drop(&mut self) {
        // Release our reference first so the count check can see it gone.
        drop(std::mem::take(&mut self.lock));
        self.dispatcher.release_lock(&self.session_id);
    }
}

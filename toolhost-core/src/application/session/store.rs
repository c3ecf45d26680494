use super::error::SessionError;
use crate::types::ChatMessage;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, info};

/// One conversation: an append-only, ordered list of messages.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

struct SessionSlot {
    turn: Arc<AsyncMutex<()>>,
    session: Mutex<Session>,
}

/// Shared handle to a live session slot.
///
/// Appends through a handle obtained before a `delete` land in the detached
/// session and are not visible through the store anymore.
#[derive(Clone)]
pub struct SessionHandle {
    slot: Arc<SessionSlot>,
}

impl SessionHandle {
    pub fn id(&self) -> String {
        self.lock().id.clone()
    }

    /// Waits for exclusive use of this session for one chat turn.
    pub async fn begin_turn(&self) -> SessionTurn {
        SessionTurn {
            _guard: Arc::clone(&self.slot.turn).lock_owned().await,
        }
    }

    pub fn append(&self, message: ChatMessage) -> usize {
        let mut session = self.lock();
        session.messages.push(message);
        session.updated_at = Utc::now();
        session.messages.len()
    }

    /// Copy of the current history, in append order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().messages.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.slot
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Proof of exclusive access to a session for the duration of one chat turn.
pub struct SessionTurn {
    _guard: OwnedMutexGuard<()>,
}

#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Arc<SessionSlot>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, session_id: &str) -> SessionHandle {
        let mut sessions = self.map();
        let slot = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                info!(session_id, "Creating new session");
                Arc::new(SessionSlot {
                    turn: Arc::new(AsyncMutex::new(())),
                    session: Mutex::new(Session::new(session_id)),
                })
            })
            .clone();
        SessionHandle { slot }
    }

    pub fn handle(&self, session_id: &str) -> Result<SessionHandle, SessionError> {
        self.map()
            .get(session_id)
            .cloned()
            .map(|slot| SessionHandle { slot })
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    /// Appends to a session, creating it first if needed. Returns the new length.
    pub fn append(&self, session_id: &str, message: ChatMessage) -> usize {
        let total = self.get_or_create(session_id).append(message);
        debug!(session_id, total_messages = total, "Appended message to session");
        total
    }

    pub fn get(&self, session_id: &str) -> Result<Session, SessionError> {
        self.handle(session_id).map(|handle| handle.snapshot())
    }

    pub fn delete(&self, session_id: &str) -> Result<(), SessionError> {
        match self.map().remove(session_id) {
            Some(_) => {
                info!(session_id, "Deleted session");
                Ok(())
            }
            None => Err(SessionError::NotFound(session_id.to_string())),
        }
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.map().contains_key(session_id)
    }

    pub fn count(&self) -> usize {
        self.map().len()
    }

    fn map(&self) -> MutexGuard<'_, HashMap<String, Arc<SessionSlot>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

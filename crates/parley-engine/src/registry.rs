//! Session registry — checkpointed flows keyed by session id.
//!
//! A single injected service instance owns the only state shared across
//! sessions. Entries are swept lazily before every access; an idle session
//! simply stays checkpointed until the TTL reclaims it. Creation never
//! evicts live sessions to make room — at capacity it is rejected instead.
//!
//! Entries are *taken out* of the map while a step sequence runs, so no lock
//! is held across an oracle call. A racing resume on the same session id
//! observes the entry as absent; the caller is expected to serialize resumes
//! per session.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::record::FlowState;
use parley_types::{config, ParleyError, Persona, Result};

// ---------------------------------------------------------------------------
// SessionEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub persona: Persona,
    /// The most recent prompt shown to the candidate.
    pub last_prompt: String,
    pub state: FlowState,
    last_access: Instant,
}

impl SessionEntry {
    pub fn new(persona: Persona, last_prompt: String, state: FlowState) -> Self {
        Self {
            persona,
            last_prompt,
            state,
            last_access: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_access = Instant::now();
    }

    fn expired(&self, ttl: Duration) -> bool {
        self.last_access.elapsed() > ttl
    }
}

// ---------------------------------------------------------------------------
// SessionRegistry
// ---------------------------------------------------------------------------

pub struct SessionRegistry {
    inner: RwLock<HashMap<Uuid, SessionEntry>>,
    ttl: Duration,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            ttl,
            max_sessions,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(config::SESSION_TTL, config::MAX_SESSIONS)
    }

    /// Sweep, then fail if a new session would exceed the capacity ceiling.
    pub async fn ensure_capacity(&self) -> Result<()> {
        let mut map = self.inner.write().await;
        Self::sweep_locked(&mut map, self.ttl);
        if map.len() >= self.max_sessions {
            return Err(ParleyError::CapacityExceeded {
                max: self.max_sessions,
            });
        }
        Ok(())
    }

    /// Insert a freshly created session. Enforces the capacity ceiling.
    pub async fn insert(&self, id: Uuid, entry: SessionEntry) -> Result<()> {
        let mut map = self.inner.write().await;
        Self::sweep_locked(&mut map, self.ttl);
        if map.len() >= self.max_sessions {
            return Err(ParleyError::CapacityExceeded {
                max: self.max_sessions,
            });
        }
        map.insert(id, entry);
        Ok(())
    }

    /// Remove and return the session's checkpoint for a step sequence.
    pub async fn take(&self, id: Uuid) -> Result<SessionEntry> {
        let mut map = self.inner.write().await;
        Self::sweep_locked(&mut map, self.ttl);
        map.remove(&id).ok_or_else(|| ParleyError::SessionNotFound {
            session_id: id.to_string(),
        })
    }

    /// Store a checkpoint back after a step sequence, refreshing last access.
    pub async fn restore(&self, id: Uuid, mut entry: SessionEntry) {
        entry.touch();
        self.inner.write().await.insert(id, entry);
    }

    /// Clone the session's entry without removing it, refreshing last access.
    pub async fn peek(&self, id: Uuid) -> Result<SessionEntry> {
        let mut map = self.inner.write().await;
        Self::sweep_locked(&mut map, self.ttl);
        match map.get_mut(&id) {
            Some(entry) => {
                entry.touch();
                Ok(entry.clone())
            }
            None => Err(ParleyError::SessionNotFound {
                session_id: id.to_string(),
            }),
        }
    }

    /// Evict every entry past the TTL.
    pub async fn sweep(&self) {
        let mut map = self.inner.write().await;
        Self::sweep_locked(&mut map, self.ttl);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    fn sweep_locked(map: &mut HashMap<Uuid, SessionEntry>, ttl: Duration) {
        let before = map.len();
        map.retain(|_, entry| !entry.expired(ttl));
        let evicted = before - map.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = map.len(), "Swept expired sessions");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

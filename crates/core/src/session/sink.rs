//! Persistence sinks for the token store
//!
//! The store fans every `save`/`clear` out to two sinks behind one interface:
//! durable storage and the cookie mirror consumed by the edge route gate.
//! Callers never write to a sink directly.

use crate::error::AuthResult;
use crate::types::User;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Exact field set persisted for a session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at_ms: i64,
    pub user: User,
}

/// What a sink found on disk at load time
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoredSession {
    /// Current token-pair format
    Full(SessionRecord),
    /// Pre-token-pair format: a flat access token with no expiry or refresh
    /// metadata. Accepted as a best-effort partial session and migrated on
    /// the next successful save.
    Legacy { access_token: String },
}

/// One persistence surface for session state
pub trait PersistenceSink: Send + Sync {
    /// Persist the full record, replacing any previous state
    fn write(&self, record: &SessionRecord) -> AuthResult<()>;

    /// Remove all persisted state; must be idempotent
    fn clear(&self) -> AuthResult<()>;

    /// Read back persisted state, if any
    ///
    /// Only the durable sink is expected to produce data here; the cookie
    /// mirror is write-only from the client runtime's point of view.
    fn read(&self) -> AuthResult<Option<StoredSession>>;
}

/// In-memory sink used in tests and as a reference implementation
#[derive(Debug, Default)]
pub struct MemorySink {
    state: Mutex<Option<StoredSession>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the sink with pre-existing state, as if left by an earlier run
    pub fn with_stored(stored: StoredSession) -> Self {
        Self {
            state: Mutex::new(Some(stored)),
        }
    }

    /// Current record, if a full record is stored
    pub fn record(&self) -> Option<SessionRecord> {
        match &*self.state.lock().expect("memory sink lock") {
            Some(StoredSession::Full(record)) => Some(record.clone()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().expect("memory sink lock").is_none()
    }
}

impl PersistenceSink for MemorySink {
    fn write(&self, record: &SessionRecord) -> AuthResult<()> {
        *self.state.lock().expect("memory sink lock") = Some(StoredSession::Full(record.clone()));
        Ok(())
    }

    fn clear(&self) -> AuthResult<()> {
        *self.state.lock().expect("memory sink lock") = None;
        Ok(())
    }

    fn read(&self) -> AuthResult<Option<StoredSession>> {
        Ok(self.state.lock().expect("memory sink lock").clone())
    }
}

//! Single authoritative holder of session state
//!
//! The store is constructed once at application bootstrap and shared by
//! reference; there is exactly one session per browser context. All other
//! components read through it and only `save`/`clear` mutate it.

use crate::clock::Clock;
use crate::error::AuthResult;
use crate::session::sink::{PersistenceSink, SessionRecord, StoredSession};
use crate::types::{SessionPayload, User};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Tokens are treated as unusable this long before their actual expiry, so a
/// request never goes out with a token that expires mid-flight.
pub const EXPIRY_BUFFER_MS: i64 = 5 * 60 * 1000;

/// Renewal is attempted this long before expiry, giving the refresh exchange
/// a head start while the current token is still usable.
pub const RENEWAL_BUFFER_MS: i64 = 10 * 60 * 1000;

#[derive(Debug, Default)]
struct SessionFields {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at_ms: Option<i64>,
    user: Option<User>,
}

/// Process-wide session state with fan-out persistence
pub struct TokenStore {
    fields: Mutex<SessionFields>,
    clock: Arc<dyn Clock>,
    durable: Arc<dyn PersistenceSink>,
    cookies: Arc<dyn PersistenceSink>,
}

impl TokenStore {
    pub fn new(
        clock: Arc<dyn Clock>,
        durable: Arc<dyn PersistenceSink>,
        cookies: Arc<dyn PersistenceSink>,
    ) -> Self {
        Self {
            fields: Mutex::new(SessionFields::default()),
            clock,
            durable,
            cookies,
        }
    }

    /// Populate in-memory state from durable storage.
    ///
    /// A legacy flat-token record is accepted as a best-effort partial
    /// session. Corrupt or unreadable data wipes the store instead of being
    /// operated on; this never propagates an error into initialization.
    pub fn load(&self) {
        match self.durable.read() {
            Ok(Some(StoredSession::Full(record))) => {
                let mut fields = self.lock_fields();
                fields.access_token = Some(record.access_token);
                fields.refresh_token = Some(record.refresh_token);
                fields.expires_at_ms = Some(record.expires_at_ms);
                fields.user = Some(record.user);
            }
            Ok(Some(StoredSession::Legacy { access_token })) => {
                let mut fields = self.lock_fields();
                fields.access_token = Some(access_token);
                fields.refresh_token = None;
                fields.expires_at_ms = None;
                fields.user = None;
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "failed to load persisted session; clearing");
                self.clear();
            }
        }
    }

    /// Persist a freshly issued token pair and adopt it in memory.
    ///
    /// The absolute expiry is derived from the server lifetime at the moment
    /// of issuance. In-memory fields are replaced in one step, after the
    /// persistence writes have been issued, so no reader ever observes a
    /// half-updated session.
    pub fn save(&self, payload: &SessionPayload) {
        let expires_at_ms = self.clock.now_ms() + payload.expires_in_secs * 1000;
        let record = SessionRecord {
            access_token: payload.access_token.clone(),
            refresh_token: payload.refresh_token.clone(),
            expires_at_ms,
            user: payload.user.clone(),
        };

        self.persist(|sink| sink.write(&record), "write");

        let mut fields = self.lock_fields();
        fields.access_token = Some(record.access_token);
        fields.refresh_token = Some(record.refresh_token);
        fields.expires_at_ms = Some(record.expires_at_ms);
        fields.user = Some(record.user);
    }

    /// Wipe persisted and in-memory state. Idempotent.
    pub fn clear(&self) {
        self.persist(|sink| sink.clear(), "clear");
        *self.lock_fields() = SessionFields::default();
    }

    pub fn access_token(&self) -> Option<String> {
        self.lock_fields().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.lock_fields().refresh_token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.lock_fields().user.clone()
    }

    pub fn expires_at_ms(&self) -> Option<i64> {
        self.lock_fields().expires_at_ms
    }

    pub fn has_access_token(&self) -> bool {
        self.lock_fields().access_token.is_some()
    }

    /// True when no token is held or the token is within the safety buffer
    /// of its expiry.
    ///
    /// A legacy session with no recorded expiry is not reported as expired;
    /// its validity is settled by the identity check at startup.
    pub fn is_expired(&self) -> bool {
        let fields = self.lock_fields();
        match (&fields.access_token, fields.expires_at_ms) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(_), Some(expires_at)) => self.clock.now_ms() + EXPIRY_BUFFER_MS >= expires_at,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.has_access_token() && !self.is_expired()
    }

    /// True when renewal should be attempted ahead of expiry. Strictly wider
    /// than [`is_expired`](Self::is_expired) by construction.
    pub fn should_renew_soon(&self) -> bool {
        let fields = self.lock_fields();
        match (&fields.access_token, fields.expires_at_ms) {
            (Some(_), Some(expires_at)) => self.clock.now_ms() + RENEWAL_BUFFER_MS >= expires_at,
            _ => false,
        }
    }

    /// Seconds until the held token expires; zero when absent or past due
    pub fn time_until_expiry_secs(&self) -> i64 {
        let fields = self.lock_fields();
        match (&fields.access_token, fields.expires_at_ms) {
            (Some(_), Some(expires_at)) => ((expires_at - self.clock.now_ms()) / 1000).max(0),
            _ => 0,
        }
    }

    fn persist<F>(&self, op: F, what: &str)
    where
        F: Fn(&dyn PersistenceSink) -> AuthResult<()>,
    {
        // The two surfaces are side-effecting but not transactional; a
        // failure on one is logged and the other still proceeds.
        for (name, sink) in [("durable", &self.durable), ("cookie", &self.cookies)] {
            if let Err(err) = op(sink.as_ref()) {
                warn!(sink = name, error = %err, "session {what} failed");
            }
        }
    }

    fn lock_fields(&self) -> std::sync::MutexGuard<'_, SessionFields> {
        self.fields.lock().expect("token store lock")
    }
}

//! Shared fakes for session tests

use crate::clock::Clock;
use crate::error::{AuthError, AuthResult};
use crate::session::api::AuthApi;
use crate::session::navigate::LoginNavigator;
use crate::types::{Role, SessionPayload, User};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Semaphore;

pub(crate) struct FakeClock {
    now_ms: AtomicI64,
}

impl FakeClock {
    pub fn at(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        self.now_ms.fetch_add(secs * 1000, Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

pub(crate) fn student() -> User {
    User {
        id: "u-1".into(),
        email: "ana@example.edu".into(),
        name: "Ana".into(),
        role: Role::Student,
    }
}

pub(crate) fn payload(access: &str, refresh: &str, expires_in_secs: i64) -> SessionPayload {
    SessionPayload {
        access_token: access.into(),
        refresh_token: refresh.into(),
        user: student(),
        expires_in_secs,
    }
}

/// Scripted auth API: each call pops the next queued outcome. The optional
/// gate lets a test hold the refresh exchange open while more callers pile up.
pub(crate) struct ScriptedApi {
    refresh_outcomes: Mutex<VecDeque<AuthResult<SessionPayload>>>,
    pub refresh_calls: AtomicUsize,
    login_outcome: Mutex<Option<AuthResult<SessionPayload>>>,
    pub login_calls: AtomicUsize,
    me_outcome: Mutex<Option<AuthResult<User>>>,
    pub me_calls: AtomicUsize,
    pub gate: Semaphore,
    gated: bool,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            refresh_outcomes: Mutex::new(VecDeque::new()),
            refresh_calls: AtomicUsize::new(0),
            login_outcome: Mutex::new(None),
            login_calls: AtomicUsize::new(0),
            me_outcome: Mutex::new(None),
            me_calls: AtomicUsize::new(0),
            gate: Semaphore::new(0),
            gated: false,
        }
    }

    /// Make refresh calls block until the test releases the gate
    pub fn gated() -> Self {
        Self {
            gated: true,
            ..Self::new()
        }
    }

    pub fn push_refresh(&self, outcome: AuthResult<SessionPayload>) {
        self.refresh_outcomes
            .lock()
            .expect("scripted api lock")
            .push_back(outcome);
    }

    pub fn set_login(&self, outcome: AuthResult<SessionPayload>) {
        *self.login_outcome.lock().expect("scripted api lock") = Some(outcome);
    }

    pub fn set_me(&self, outcome: AuthResult<User>) {
        *self.me_outcome.lock().expect("scripted api lock") = Some(outcome);
    }
}

#[async_trait]
impl AuthApi for ScriptedApi {
    async fn login(&self, _email: &str, _password: &str) -> AuthResult<SessionPayload> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_outcome
            .lock()
            .expect("scripted api lock")
            .clone()
            .unwrap_or(Err(AuthError::transient("no login scripted")))
    }

    async fn refresh(&self, _refresh_token: &str) -> AuthResult<SessionPayload> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if self.gated {
            let permit = self.gate.acquire().await.expect("gate closed");
            permit.forget();
        }
        self.refresh_outcomes
            .lock()
            .expect("scripted api lock")
            .pop_front()
            .unwrap_or(Err(AuthError::transient("no refresh scripted")))
    }

    async fn me(&self, _access_token: &str) -> AuthResult<User> {
        self.me_calls.fetch_add(1, Ordering::SeqCst);
        self.me_outcome
            .lock()
            .expect("scripted api lock")
            .clone()
            .unwrap_or(Err(AuthError::transient("no identity scripted")))
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    pub redirects: AtomicUsize,
    pub on_login: std::sync::atomic::AtomicBool,
}

impl LoginNavigator for RecordingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }

    fn on_login_page(&self) -> bool {
        self.on_login.load(Ordering::SeqCst)
    }
}

//! Session facade
//!
//! The one object the rest of the application is allowed to depend on. It
//! composes the token store, the refresh coordinator, and the renewal
//! scheduler, and never leaks a raw transport error to its callers.

use crate::error::{AuthError, AuthResult};
use crate::session::api::AuthApi;
use crate::session::navigate::LoginNavigator;
use crate::session::refresh::RefreshCoordinator;
use crate::session::scheduler::{RenewalScheduler, RENEWAL_CHECK_INTERVAL};
use crate::session::store::TokenStore;
use crate::types::User;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Structured login result surfaced to the UI
#[derive(Clone, Debug, PartialEq)]
pub struct LoginOutcome {
    pub success: bool,
    pub user: Option<User>,
    pub error: Option<AuthError>,
}

impl LoginOutcome {
    fn ok(user: User) -> Self {
        Self {
            success: true,
            user: Some(user),
            error: None,
        }
    }

    fn failed(error: AuthError) -> Self {
        Self {
            success: false,
            user: None,
            error: Some(error),
        }
    }
}

/// Entry point for everything session-related
pub struct SessionManager {
    store: Arc<TokenStore>,
    api: Arc<dyn AuthApi>,
    coordinator: RefreshCoordinator,
    scheduler: RenewalScheduler,
    navigator: Arc<dyn LoginNavigator>,
    current_user: Mutex<Option<User>>,
    #[cfg(not(target_arch = "wasm32"))]
    renewal_task: Mutex<Option<crate::session::scheduler::SchedulerHandle>>,
}

impl SessionManager {
    /// Construct the facade and hydrate in-memory state from storage.
    ///
    /// Built exactly once at application bootstrap and shared by reference;
    /// a hydrated session stays unauthenticated until
    /// [`check_auth`](Self::check_auth) confirms the identity.
    pub fn new(
        store: Arc<TokenStore>,
        api: Arc<dyn AuthApi>,
        navigator: Arc<dyn LoginNavigator>,
    ) -> Self {
        store.load();
        let coordinator =
            RefreshCoordinator::new(store.clone(), api.clone(), navigator.clone());
        let scheduler = RenewalScheduler::new(store.clone(), coordinator.clone());
        Self {
            store,
            api,
            coordinator,
            scheduler,
            navigator,
            current_user: Mutex::new(None),
            #[cfg(not(target_arch = "wasm32"))]
            renewal_task: Mutex::new(None),
        }
    }

    /// Exchange credentials for a session.
    ///
    /// On success the store is populated and the current user flips together
    /// with it; background renewal starts. Failures come back as a structured
    /// outcome, never as a raw error.
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        match self.api.login(email, password).await {
            Ok(payload) => {
                self.store.save(&payload);
                *self.lock_user() = Some(payload.user.clone());
                self.start_renewal();
                info!(user = %payload.user.email, "login succeeded");
                LoginOutcome::ok(payload.user)
            }
            Err(err) => {
                debug!(error = %err, "login failed");
                LoginOutcome::failed(err)
            }
        }
    }

    /// Drop the session: stop renewal, wipe storage and cookies
    pub fn logout(&self) {
        self.stop_renewal();
        self.store.clear();
        *self.lock_user() = None;
        info!("logged out");
    }

    /// Re-validate the stored session against the server at startup.
    ///
    /// Any failure clears the session so the application never presents a
    /// stale identity as authenticated. Returns whether a user is signed in.
    pub async fn check_auth(&self) -> bool {
        let Some(token) = self.store.access_token() else {
            return false;
        };
        match self.api.me(&token).await {
            Ok(user) => {
                *self.lock_user() = Some(user);
                self.start_renewal();
                true
            }
            Err(err) => {
                warn!(error = %err, "identity check failed; clearing session");
                self.stop_renewal();
                self.store.clear();
                *self.lock_user() = None;
                false
            }
        }
    }

    /// Session invalidation triggered by a 401 observed outside the refresh
    /// exchange itself: clears everything and sends the user to login
    pub fn invalidate_session(&self) {
        warn!("session invalidated by API response");
        self.logout();
        if !self.navigator.on_login_page() {
            self.navigator.redirect_to_login();
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.lock_user().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock_user().is_some()
    }

    /// Force an immediate token refresh; true on success
    pub async fn force_token_refresh(&self) -> bool {
        self.coordinator.refresh().await.is_ok()
    }

    /// Refresh through the coordinator, exposing the error taxonomy
    pub async fn refresh_token(&self) -> AuthResult<String> {
        self.coordinator.refresh().await
    }

    pub fn is_token_valid(&self) -> bool {
        self.store.is_valid()
    }

    pub fn time_until_expiry_secs(&self) -> i64 {
        self.store.time_until_expiry_secs()
    }

    pub fn is_refreshing(&self) -> bool {
        self.coordinator.is_refreshing()
    }

    /// The renewal driver, for hosts that own their own timer (browser)
    pub fn scheduler(&self) -> &RenewalScheduler {
        &self.scheduler
    }

    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    /// Start the background renewal loop. No-op without a session; starting
    /// again replaces the running timer rather than stacking a second one.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn start_renewal(&self) {
        if !self.store.has_access_token() {
            return;
        }
        let handle = self.scheduler.clone().spawn(RENEWAL_CHECK_INTERVAL);
        // Replacing the slot drops (and thereby cancels) any previous timer.
        *self.renewal_task.lock().expect("renewal task lock") = Some(handle);
    }

    /// Stop the background renewal loop. Idempotent.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn stop_renewal(&self) {
        *self.renewal_task.lock().expect("renewal task lock") = None;
    }

    // In the browser the Yew provider owns the interval and drives
    // `scheduler().tick()`; there is no task to manage here.
    #[cfg(target_arch = "wasm32")]
    pub fn start_renewal(&self) {}

    #[cfg(target_arch = "wasm32")]
    pub fn stop_renewal(&self) {}

    fn lock_user(&self) -> std::sync::MutexGuard<'_, Option<User>> {
        self.current_user.lock().expect("current user lock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::sink::{MemorySink, PersistenceSink};
    use crate::session::testutil::{payload, student, FakeClock, RecordingNavigator, ScriptedApi};
    use crate::types::Role;
    use std::sync::atomic::Ordering;

    struct Harness {
        manager: SessionManager,
        api: Arc<ScriptedApi>,
        durable: Arc<MemorySink>,
        cookies: Arc<MemorySink>,
        navigator: Arc<RecordingNavigator>,
    }

    fn harness() -> Harness {
        harness_with_durable(Arc::new(MemorySink::new()))
    }

    fn harness_with_durable(durable: Arc<MemorySink>) -> Harness {
        let cookies = Arc::new(MemorySink::new());
        let store = Arc::new(TokenStore::new(
            Arc::new(FakeClock::at(0)),
            durable.clone(),
            cookies.clone(),
        ));
        let api = Arc::new(ScriptedApi::new());
        let navigator = Arc::new(RecordingNavigator::default());
        let manager = SessionManager::new(store, api.clone(), navigator.clone());
        Harness {
            manager,
            api,
            durable,
            cookies,
            navigator,
        }
    }

    #[tokio::test]
    async fn login_round_trip_populates_store_and_cookie_mirror() {
        let h = harness();
        h.api.set_login(Ok(payload("A", "B", 3600)));

        let outcome = h.manager.login("ana@example.edu", "pw").await;

        assert!(outcome.success);
        assert_eq!(outcome.user.unwrap().role, Role::Student);
        assert!(h.manager.is_authenticated());
        assert!(h.manager.is_token_valid());
        assert_eq!(h.manager.store().access_token().as_deref(), Some("A"));
        assert_eq!(h.manager.time_until_expiry_secs(), 3600);

        let cookie = h.cookies.record().unwrap();
        assert_eq!(cookie.access_token, "A");
        assert_eq!(cookie.user.role, Role::Student);
        assert_eq!(h.durable.record().unwrap().refresh_token, "B");
    }

    #[tokio::test]
    async fn login_rejection_surfaces_structured_failure() {
        let h = harness();
        h.api.set_login(Err(AuthError::AuthRejection));

        let outcome = h.manager.login("ana@example.edu", "wrong").await;

        assert!(!outcome.success);
        assert_eq!(outcome.error, Some(AuthError::AuthRejection));
        assert!(!h.manager.is_authenticated());
        assert!(h.manager.store().access_token().is_none());
        assert!(h.durable.is_empty());
    }

    #[tokio::test]
    async fn logout_clears_everything() {
        let h = harness();
        h.api.set_login(Ok(payload("A", "B", 3600)));
        h.manager.login("ana@example.edu", "pw").await;

        h.manager.logout();

        assert!(!h.manager.is_authenticated());
        assert!(h.manager.store().access_token().is_none());
        assert!(h.durable.is_empty());
        assert!(h.cookies.is_empty());
    }

    #[tokio::test]
    async fn check_auth_adopts_server_identity() {
        let durable = Arc::new(MemorySink::new());
        durable
            .write(&crate::session::sink::SessionRecord {
                access_token: "A".into(),
                refresh_token: "B".into(),
                expires_at_ms: 3_600_000,
                user: student(),
            })
            .unwrap();
        let h = harness_with_durable(durable);
        h.api.set_me(Ok(student()));

        assert!(h.manager.check_auth().await);
        assert!(h.manager.is_authenticated());
        assert_eq!(h.manager.current_user().unwrap().email, "ana@example.edu");
        assert_eq!(h.api.me_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn check_auth_clears_on_any_failure() {
        let durable = Arc::new(MemorySink::new());
        durable
            .write(&crate::session::sink::SessionRecord {
                access_token: "A".into(),
                refresh_token: "B".into(),
                expires_at_ms: 3_600_000,
                user: student(),
            })
            .unwrap();
        let h = harness_with_durable(durable);
        h.api.set_me(Err(AuthError::AuthRejection));

        assert!(!h.manager.check_auth().await);
        assert!(!h.manager.is_authenticated());
        assert!(h.manager.store().access_token().is_none());
        assert!(h.durable.is_empty());
    }

    #[tokio::test]
    async fn check_auth_without_stored_session_reports_unauthenticated() {
        let h = harness();
        assert!(!h.manager.check_auth().await);
        assert_eq!(h.api.me_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn force_refresh_reports_outcome_as_bool() {
        let h = harness();
        h.api.set_login(Ok(payload("A", "B", 3600)));
        h.manager.login("ana@example.edu", "pw").await;

        h.api.push_refresh(Ok(payload("A2", "B2", 3600)));
        assert!(h.manager.force_token_refresh().await);
        assert_eq!(h.manager.store().access_token().as_deref(), Some("A2"));

        h.api.push_refresh(Err(AuthError::transient("down")));
        assert!(!h.manager.force_token_refresh().await);
        assert!(!h.manager.is_refreshing());
    }

    #[tokio::test]
    async fn invalidate_session_behaves_like_logout() {
        let h = harness();
        h.api.set_login(Ok(payload("A", "B", 3600)));
        h.manager.login("ana@example.edu", "pw").await;

        h.manager.invalidate_session();

        assert!(!h.manager.is_authenticated());
        assert!(h.cookies.is_empty());
        assert_eq!(h.navigator.redirects.load(Ordering::SeqCst), 1);
    }
}

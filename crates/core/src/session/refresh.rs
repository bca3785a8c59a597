//! Single-flight refresh coordination
//!
//! Page guards, the API layer's 401 handling, the background scheduler, and
//! manual force-refresh triggers can all decide "refresh now" within the same
//! tick. Servers treat refresh tokens as single-use, so racing exchanges
//! would log the user out spuriously: at most one exchange may be in flight,
//! and every concurrent caller must observe its result.

use crate::error::{AuthError, AuthResult};
use crate::session::api::AuthApi;
use crate::session::navigate::LoginNavigator;
use crate::session::store::TokenStore;
use futures::future::Shared;
use futures::FutureExt;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

#[cfg(not(target_arch = "wasm32"))]
type RefreshFuture = Shared<futures::future::BoxFuture<'static, AuthResult<String>>>;
#[cfg(target_arch = "wasm32")]
type RefreshFuture = Shared<futures::future::LocalBoxFuture<'static, AuthResult<String>>>;

/// Deduplicates concurrent refresh attempts into one network exchange
#[derive(Clone)]
pub struct RefreshCoordinator {
    store: Arc<TokenStore>,
    api: Arc<dyn AuthApi>,
    navigator: Arc<dyn LoginNavigator>,
    in_flight: Arc<Mutex<Option<RefreshFuture>>>,
}

impl RefreshCoordinator {
    pub fn new(
        store: Arc<TokenStore>,
        api: Arc<dyn AuthApi>,
        navigator: Arc<dyn LoginNavigator>,
    ) -> Self {
        Self {
            store,
            api,
            navigator,
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    /// Whether an exchange is currently in flight
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.lock().expect("refresh slot lock").is_some()
    }

    /// Obtain a fresh access token.
    ///
    /// Joins the in-flight exchange when one exists; otherwise starts one.
    /// On success the token store has already been updated with the new pair.
    /// An authentication rejection clears the session and signals navigation
    /// to login; transient failures leave the session untouched so a later
    /// attempt can succeed.
    pub async fn refresh(&self) -> AuthResult<String> {
        let fut = {
            let mut slot = self.in_flight.lock().expect("refresh slot lock");
            if let Some(existing) = slot.as_ref() {
                debug!("joining in-flight token refresh");
                existing.clone()
            } else {
                let store = Arc::clone(&self.store);
                let api = Arc::clone(&self.api);
                let navigator = Arc::clone(&self.navigator);
                let in_flight = Arc::clone(&self.in_flight);
                let exchange = async move {
                    let result = run_exchange(&store, api.as_ref(), navigator.as_ref()).await;
                    // Resolve-then-clear: a later caller starts a fresh
                    // exchange instead of observing this one's result.
                    *in_flight.lock().expect("refresh slot lock") = None;
                    result
                };
                #[cfg(not(target_arch = "wasm32"))]
                let fut = exchange.boxed().shared();
                #[cfg(target_arch = "wasm32")]
                let fut = exchange.boxed_local().shared();
                *slot = Some(fut.clone());
                fut
            }
        };
        fut.await
    }
}

async fn run_exchange(
    store: &TokenStore,
    api: &dyn AuthApi,
    navigator: &dyn LoginNavigator,
) -> AuthResult<String> {
    let refresh_token = store.refresh_token().ok_or(AuthError::NoRefreshToken)?;

    match api.refresh(&refresh_token).await {
        Ok(payload) => {
            store.save(&payload);
            debug!("token refresh succeeded");
            Ok(payload.access_token)
        }
        Err(err) if err.is_rejection() => {
            warn!("refresh token rejected; clearing session");
            store.clear();
            if !navigator.on_login_page() {
                navigator.redirect_to_login();
            }
            Err(err)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::sink::MemorySink;
    use crate::session::testutil::{payload, FakeClock, RecordingNavigator, ScriptedApi};
    use std::sync::atomic::Ordering;

    fn coordinator(
        api: Arc<ScriptedApi>,
    ) -> (RefreshCoordinator, Arc<TokenStore>, Arc<RecordingNavigator>) {
        let store = Arc::new(TokenStore::new(
            Arc::new(FakeClock::at(0)),
            Arc::new(MemorySink::new()),
            Arc::new(MemorySink::new()),
        ));
        store.save(&payload("A0", "R0", 60));
        let navigator = Arc::new(RecordingNavigator::default());
        let coordinator = RefreshCoordinator::new(store.clone(), api, navigator.clone());
        (coordinator, store, navigator)
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_exchange() {
        let api = Arc::new(ScriptedApi::gated());
        api.push_refresh(Ok(payload("A1", "R1", 3600)));
        let (coordinator, store, _) = coordinator(api.clone());

        let mut handles = Vec::new();
        for _ in 0..5 {
            let c = coordinator.clone();
            handles.push(tokio::spawn(async move { c.refresh().await }));
        }

        // Let every caller reach the coordinator before the exchange resolves.
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert!(coordinator.is_refreshing());
        api.gate.add_permits(1);

        for handle in handles {
            let token = handle.await.unwrap().unwrap();
            assert_eq!(token, "A1");
        }
        assert_eq!(api.refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.access_token().as_deref(), Some("A1"));
        assert!(!coordinator.is_refreshing());
    }

    #[tokio::test]
    async fn sequential_refreshes_each_run_an_exchange() {
        let api = Arc::new(ScriptedApi::new());
        api.push_refresh(Ok(payload("A1", "R1", 3600)));
        api.push_refresh(Ok(payload("A2", "R2", 3600)));
        let (coordinator, store, _) = coordinator(api.clone());

        assert_eq!(coordinator.refresh().await.unwrap(), "A1");
        assert_eq!(coordinator.refresh().await.unwrap(), "A2");
        assert_eq!(api.refresh_calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.refresh_token().as_deref(), Some("R2"));
    }

    #[tokio::test]
    async fn refresh_without_token_fails_fast() {
        let api = Arc::new(ScriptedApi::new());
        let (coordinator, store, navigator) = coordinator(api.clone());
        store.clear();

        let err = coordinator.refresh().await.unwrap_err();
        assert_eq!(err, AuthError::NoRefreshToken);
        assert_eq!(api.refresh_calls.load(Ordering::SeqCst), 0);
        assert_eq!(navigator.redirects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejection_clears_session_and_redirects_once() {
        let api = Arc::new(ScriptedApi::new());
        api.push_refresh(Err(AuthError::AuthRejection));
        let (coordinator, store, navigator) = coordinator(api);

        let err = coordinator.refresh().await.unwrap_err();
        assert_eq!(err, AuthError::AuthRejection);
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
        assert_eq!(navigator.redirects.load(Ordering::SeqCst), 1);

        // The session is gone, so the follow-up fails before the network.
        let err = coordinator.refresh().await.unwrap_err();
        assert_eq!(err, AuthError::NoRefreshToken);
        assert_eq!(navigator.redirects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejection_on_login_page_does_not_redirect() {
        let api = Arc::new(ScriptedApi::new());
        api.push_refresh(Err(AuthError::AuthRejection));
        let (coordinator, _, navigator) = coordinator(api);
        navigator.on_login.store(true, Ordering::SeqCst);

        coordinator.refresh().await.unwrap_err();
        assert_eq!(navigator.redirects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn transient_failure_leaves_session_intact() {
        let api = Arc::new(ScriptedApi::new());
        api.push_refresh(Err(AuthError::transient("connection reset")));
        api.push_refresh(Ok(payload("A1", "R1", 3600)));
        let (coordinator, store, navigator) = coordinator(api);

        let err = coordinator.refresh().await.unwrap_err();
        assert!(matches!(err, AuthError::Transient { .. }));
        assert_eq!(store.access_token().as_deref(), Some("A0"));
        assert_eq!(navigator.redirects.load(Ordering::SeqCst), 0);

        // Retry succeeds against the same stored refresh token.
        assert_eq!(coordinator.refresh().await.unwrap(), "A1");
    }
}

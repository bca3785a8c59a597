//! Global session context and provider
//!
//! Wraps the `SessionManager` facade for Yew components: startup identity
//! check, login/logout/force-refresh actions, and the renewal interval that
//! drives the background scheduler while a user is signed in.

use crate::auth::error_handler;
use crate::auth::error_messages::login_error_message;
use crate::auth::navigate::WindowNavigator;
use crate::client::set_auth_token;
use crate::clock::BrowserClock;
use crate::config::AuthConfig;
use crate::cookies::CookieSink;
use crate::services::AuthApiService;
use crate::storage::BrowserStorageSink;
use examina_core::{SessionManager, TokenStore, User};
use gloo::timers::callback::Interval;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Session state visible to components
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_refreshing: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            // Start loading until the stored session has been re-validated.
            is_loading: true,
            error: None,
            is_refreshing: false,
        }
    }
}

/// Session state transitions
pub enum SessionAction {
    Authenticated(User),
    Unauthenticated,
    Loading(bool),
    Error(Option<String>),
    Refreshing(bool),
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            SessionAction::Authenticated(user) => Rc::new(Self {
                user: Some(user),
                is_loading: false,
                error: None,
                is_refreshing: false,
            }),
            SessionAction::Unauthenticated => Rc::new(Self {
                user: None,
                is_loading: false,
                error: None,
                is_refreshing: false,
            }),
            SessionAction::Loading(is_loading) => Rc::new(Self {
                is_loading,
                ..(*self).clone()
            }),
            SessionAction::Error(error) => Rc::new(Self {
                error,
                is_loading: false,
                ..(*self).clone()
            }),
            SessionAction::Refreshing(is_refreshing) => Rc::new(Self {
                is_refreshing,
                ..(*self).clone()
            }),
        }
    }
}

/// Handle handed to components through context
#[derive(Clone)]
pub struct SessionHandle {
    state: UseReducerHandle<SessionState>,
    manager: Rc<SessionManager>,
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && Rc::ptr_eq(&self.manager, &other.manager)
    }
}

impl SessionHandle {
    pub fn user(&self) -> Option<User> {
        self.state.user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.error.clone()
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.is_refreshing || self.manager.is_refreshing()
    }

    pub fn is_token_valid(&self) -> bool {
        self.manager.is_token_valid()
    }

    pub fn time_until_expiry_secs(&self) -> i64 {
        self.manager.time_until_expiry_secs()
    }

    /// Sign in; the outcome lands in the context state
    pub fn login(&self, email: String, password: String) {
        let state = self.state.clone();
        let manager = self.manager.clone();
        state.dispatch(SessionAction::Loading(true));
        spawn_local(async move {
            let outcome = manager.login(&email, &password).await;
            if let Some(user) = outcome.user {
                let _ = set_auth_token(manager.store().access_token().as_deref());
                state.dispatch(SessionAction::Authenticated(user));
            } else {
                state.dispatch(SessionAction::Error(Some(login_error_message(
                    outcome.error.as_ref(),
                ))));
            }
        });
    }

    /// Sign out and drop all persisted session state
    pub fn logout(&self) {
        self.manager.logout();
        let _ = set_auth_token(None);
        self.state.dispatch(SessionAction::Unauthenticated);
    }

    /// Manually trigger a token refresh
    pub fn force_refresh(&self) {
        let state = self.state.clone();
        let manager = self.manager.clone();
        state.dispatch(SessionAction::Refreshing(true));
        spawn_local(async move {
            let refreshed = manager.force_token_refresh().await;
            // A renewed (or cleared) token must reach the API client.
            let _ = set_auth_token(manager.store().access_token().as_deref());
            if !refreshed && !manager.is_authenticated() {
                state.dispatch(SessionAction::Unauthenticated);
            } else {
                state.dispatch(SessionAction::Refreshing(false));
            }
        });
    }
}

/// Session provider props
#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

fn build_session_manager() -> SessionManager {
    let store = Arc::new(TokenStore::new(
        Arc::new(BrowserClock),
        Arc::new(BrowserStorageSink),
        Arc::new(CookieSink),
    ));
    SessionManager::new(
        store,
        Arc::new(AuthApiService::new()),
        Arc::new(WindowNavigator),
    )
}

/// Session provider component
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let state = use_reducer(SessionState::default);
    let manager = use_memo((), |_| build_session_manager());

    // Global invalidation handler: a 401 anywhere drops the session.
    {
        let state = state.clone();
        let manager = manager.clone();
        use_effect_with((), move |_| {
            let callback: Rc<dyn Fn()> = {
                let state = state.clone();
                let manager = manager.clone();
                Rc::new(move || {
                    manager.invalidate_session();
                    let _ = set_auth_token(None);
                    state.dispatch(SessionAction::Unauthenticated);
                })
            };
            error_handler::set_session_invalidated_callback(callback);

            move || {
                error_handler::clear_session_invalidated_callback();
            }
        });
    }

    // Re-validate any stored session at startup; never present a stale
    // identity as authenticated.
    {
        let state = state.clone();
        let manager = manager.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if manager.check_auth().await {
                    let _ = set_auth_token(manager.store().access_token().as_deref());
                    if let Some(user) = manager.current_user() {
                        state.dispatch(SessionAction::Authenticated(user));
                        return;
                    }
                }
                state.dispatch(SessionAction::Loading(false));
            });

            || {}
        });
    }

    // Renewal interval, alive exactly while a user is signed in. Starting a
    // new one replaces the old; the single-flight coordinator keeps a tick
    // from overlapping an in-flight refresh.
    {
        let manager = manager.clone();
        use_effect_with(state.user.is_some(), move |signed_in: &bool| {
            let interval = signed_in.then(|| {
                let manager = manager.clone();
                Interval::new(AuthConfig::RENEWAL_CHECK_INTERVAL_MS, move || {
                    let manager = manager.clone();
                    spawn_local(async move {
                        manager.scheduler().tick().await;
                        let _ = set_auth_token(manager.store().access_token().as_deref());
                    });
                })
            });

            move || drop(interval)
        });
    }

    let handle = SessionHandle {
        state: state.clone(),
        manager: manager.clone(),
    };

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            {props.children.clone()}
        </ContextProvider<SessionHandle>>
    }
}

/// Hook to use the session context
#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
        .expect("SessionHandle not found. Wrap your component with SessionProvider")
}

/// Hook to get the current user
#[hook]
pub fn use_session_user() -> Option<User> {
    use_session().user()
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    use_session().is_authenticated()
}

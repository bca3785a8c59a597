//! Client configuration and initialization

use crate::client_wrapper::WrappedAuthClient;
pub use examina_http::client::ClientError;
use examina_http::client::{PublicExaminaClient, TypedClientBuilder};
use once_cell::sync::Lazy;
use std::sync::Mutex;
use web_sys::window;

/// Global client instances
static PUBLIC_CLIENT: Lazy<Mutex<Option<PublicExaminaClient>>> = Lazy::new(|| Mutex::new(None));
static AUTH_CLIENT: Lazy<Mutex<Option<WrappedAuthClient>>> = Lazy::new(|| Mutex::new(None));

/// Get the base URL for API calls
pub(crate) fn get_base_url() -> String {
    // Same-origin by default.
    if let Some(window) = window() {
        if let Ok(location) = window.location().origin() {
            return location;
        }
    }
    String::new()
}

/// Get the public client instance (for the unauthenticated auth endpoints)
pub fn create_public_client() -> Result<PublicExaminaClient, ClientError> {
    let mut client_lock = PUBLIC_CLIENT
        .lock()
        .expect("Failed to acquire public client lock");

    if let Some(client) = client_lock.as_ref() {
        Ok(client.clone())
    } else {
        let client = TypedClientBuilder::new()
            .base_url(get_base_url())
            .build_public()?;
        *client_lock = Some(client.clone());
        Ok(client)
    }
}

/// Get the authenticated client instance (None while signed out)
pub fn create_authenticated_client() -> Result<Option<WrappedAuthClient>, ClientError> {
    let client_lock = AUTH_CLIENT
        .lock()
        .expect("Failed to acquire auth client lock");
    Ok(client_lock.clone())
}

/// Swap the bearer token carried by the authenticated client.
///
/// Called after login, after every refresh, and with `None` on logout or
/// invalidation; ordinary API calls always pick up the current token.
pub fn set_auth_token(token: Option<&str>) -> Result<(), ClientError> {
    let mut auth_lock = AUTH_CLIENT
        .lock()
        .expect("Failed to acquire auth client lock");

    if let Some(token) = token {
        let client = TypedClientBuilder::new()
            .base_url(get_base_url())
            .build_authenticated(token)?;
        *auth_lock = Some(WrappedAuthClient::new(client));
    } else {
        *auth_lock = None;
    }

    Ok(())
}

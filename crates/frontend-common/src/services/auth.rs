//! Authentication API service
//!
//! Implements the core's `AuthApi` seam over the typed HTTP clients.

use crate::client::{create_public_client, get_base_url};
use async_trait::async_trait;
use examina_core::{AuthApi, AuthError, AuthResult, SessionPayload, User};
use examina_http::client::TypedClientBuilder;
use examina_http::types::{LoginRequest, RefreshRequest};

/// Authentication API service
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthApiService;

impl AuthApiService {
    pub fn new() -> Self {
        Self
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl AuthApi for AuthApiService {
    async fn login(&self, email: &str, password: &str) -> AuthResult<SessionPayload> {
        let client = create_public_client()
            .map_err(|e| AuthError::transient(format!("client init: {e}")))?;
        let response = client
            .login(LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .map_err(AuthError::from)?;
        response.try_into()
    }

    async fn refresh(&self, refresh_token: &str) -> AuthResult<SessionPayload> {
        let client = create_public_client()
            .map_err(|e| AuthError::transient(format!("client init: {e}")))?;
        let response = client
            .refresh(RefreshRequest {
                refresh_token: refresh_token.to_string(),
            })
            .await
            .map_err(AuthError::from)?;
        response.try_into()
    }

    async fn me(&self, access_token: &str) -> AuthResult<User> {
        // Built from the supplied token: the startup identity check runs
        // before the shared authenticated client exists.
        let client = TypedClientBuilder::new()
            .base_url(get_base_url())
            .build_authenticated(access_token)
            .map_err(|e| AuthError::transient(format!("client init: {e}")))?;
        let response = client.me().await.map_err(AuthError::from)?;
        response.try_into()
    }
}

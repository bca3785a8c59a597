//! Upstream authentication API seam
//!
//! The network exchanges the session core performs (login, refresh, identity
//! check) sit behind this trait so the core stays transport-agnostic. The
//! browser runtime implements it over the typed HTTP client; tests script it.

use crate::error::AuthResult;
use crate::types::{SessionPayload, User};
use async_trait::async_trait;

/// Authentication endpoints of the Examina API
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token pair and identity
    async fn login(&self, email: &str, password: &str) -> AuthResult<SessionPayload>;

    /// Exchange a refresh token for a new token pair
    async fn refresh(&self, refresh_token: &str) -> AuthResult<SessionPayload>;

    /// Confirm the identity behind an access token
    async fn me(&self, access_token: &str) -> AuthResult<User>;
}

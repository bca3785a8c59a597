//! Wrapped client that reports session invalidation automatically
//!
//! Any 401 observed on an ordinary API call, outside the refresh exchange,
//! must invalidate the session globally. Routing every authenticated request
//! through this wrapper is what enforces that.

use examina_http::client::{AuthenticatedExaminaClient, ClientError};
use examina_http::types::UserResponse;

/// Wrapper around `AuthenticatedExaminaClient` that handles auth errors
#[derive(Clone)]
pub struct WrappedAuthClient {
    inner: AuthenticatedExaminaClient,
}

impl WrappedAuthClient {
    pub fn new(client: AuthenticatedExaminaClient) -> Self {
        Self { inner: client }
    }

    /// Execute a request; a credential rejection triggers the global
    /// invalidation handler before the error is returned
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        match self.inner.execute(request).await {
            Ok(result) => Ok(result),
            Err(error) => {
                if error.is_auth_expired() {
                    tracing::warn!("authenticated request rejected; invalidating session");
                    crate::auth::error_handler::notify_session_invalidated();
                }
                Err(error)
            }
        }
    }

    /// Create a request builder with authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.inner.request(method, path)
    }

    /// Identity behind the current token
    pub async fn me(&self) -> Result<UserResponse, ClientError> {
        let request = self.request(reqwest::Method::GET, "/api/users/me");
        self.execute(request).await
    }

    /// Reference to the inner client (prefer the wrapped methods)
    pub fn inner(&self) -> &AuthenticatedExaminaClient {
        &self.inner
    }
}

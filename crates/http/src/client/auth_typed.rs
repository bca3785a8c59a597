//! Auth endpoint extensions for the typed clients

use super::error::ClientError;
use super::typed::{AuthenticatedExaminaClient, PublicExaminaClient};
use crate::types::{LoginRequest, RefreshRequest, TokenResponse, UserResponse};

impl PublicExaminaClient {
    /// Exchange credentials for a token pair
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/auth/login")
            .json(&request);
        self.execute(req).await
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh(&self, request: RefreshRequest) -> Result<TokenResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/api/auth/refresh")
            .json(&request);
        self.execute(req).await
    }
}

impl AuthenticatedExaminaClient {
    /// Identity behind the current access token
    pub async fn me(&self) -> Result<UserResponse, ClientError> {
        let req = self.request(reqwest::Method::GET, "/api/users/me");
        self.execute(req).await
    }
}

//! Type-safe API clients that enforce the bearer contract at compile time

use super::error::ClientError;
use reqwest::{header, Client, ClientBuilder};

/// Client for the public auth endpoints (login, refresh)
#[derive(Clone)]
pub struct PublicExaminaClient {
    client: Client,
    base_url: String,
}

/// Client for authenticated endpoints; every request carries
/// `Authorization: Bearer <accessToken>`
#[derive(Clone)]
pub struct AuthenticatedExaminaClient {
    client: Client,
    base_url: String,
    access_token: String,
}

/// Builder for the typed clients
#[derive(Default)]
pub struct TypedClientBuilder {
    base_url: String,
}

impl TypedClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn build_public(self) -> Result<PublicExaminaClient, ClientError> {
        Ok(PublicExaminaClient {
            client: build_client()?,
            base_url: normalize(self.base_url),
        })
    }

    pub fn build_authenticated(
        self,
        access_token: impl Into<String>,
    ) -> Result<AuthenticatedExaminaClient, ClientError> {
        Ok(AuthenticatedExaminaClient {
            client: build_client()?,
            base_url: normalize(self.base_url),
            access_token: access_token.into(),
        })
    }
}

fn build_client() -> Result<Client, ClientError> {
    ClientBuilder::new()
        .user_agent("examina-client/0.1.0")
        .build()
        .map_err(ClientError::from)
}

fn normalize(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

impl PublicExaminaClient {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        execute(request).await
    }
}

impl AuthenticatedExaminaClient {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder carrying the bearer token
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.access_token),
            )
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        execute(request).await
    }
}

async fn execute<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        Err(ClientError::from_status(status, message))
    }
}

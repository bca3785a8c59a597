//! Client error types

use examina_core::AuthError;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed (401)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Forbidden (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// True when the response means the session credential is no longer
    /// accepted; any ordinary API call seeing this must invalidate the
    /// session globally
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// True for the authentication-rejection class on the refresh exchange
    /// (the server rejects the refresh token itself)
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_) | Self::Forbidden(_))
    }
}

impl From<ClientError> for AuthError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::AuthenticationFailed(_) | ClientError::Forbidden(_) => {
                AuthError::AuthRejection
            }
            ClientError::Serialization(e) => AuthError::corrupt(e.to_string()),
            other => AuthError::transient(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_the_rejection_classes() {
        let unauthorized =
            ClientError::from_status(reqwest::StatusCode::UNAUTHORIZED, "nope".into());
        assert!(unauthorized.is_auth_expired());
        assert!(unauthorized.is_auth_rejection());
        assert_eq!(AuthError::from(unauthorized), AuthError::AuthRejection);

        let forbidden = ClientError::from_status(reqwest::StatusCode::FORBIDDEN, "no".into());
        assert!(!forbidden.is_auth_expired());
        assert!(forbidden.is_auth_rejection());

        let gateway = ClientError::from_status(reqwest::StatusCode::BAD_GATEWAY, "down".into());
        assert!(!gateway.is_auth_rejection());
        assert!(matches!(
            AuthError::from(gateway),
            AuthError::Transient { .. }
        ));
    }
}

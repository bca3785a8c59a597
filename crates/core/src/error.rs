//! Session error taxonomy
//!
//! Low-level storage and network failures are translated into these variants
//! at the token-store / refresh-coordinator boundary; nothing above the
//! session facade ever sees a raw transport error.

/// Standard result type for session operations
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Session lifecycle errors
///
/// `Clone` is required because the refresh coordinator hands the same result
/// to every caller that joined an in-flight exchange.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, thiserror::Error)]
pub enum AuthError {
    /// Refresh was attempted with no refresh token on record
    #[error("no refresh token available")]
    NoRefreshToken,

    /// The server rejected the credential as invalid or expired
    #[error("authentication rejected by server")]
    AuthRejection,

    /// Network, timeout, or server-side failure; safe to retry
    #[error("transient failure: {message}")]
    Transient { message: String },

    /// Malformed persisted session data detected at load time
    #[error("corrupt session data: {message}")]
    CorruptSession { message: String },

    /// The persistence layer itself failed
    #[error("storage failure: {message}")]
    Storage { message: String },
}

impl AuthError {
    /// Create a transient error
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    /// Create a corrupt-session error
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptSession {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// True when the server explicitly rejected the credential, meaning the
    /// session must be cleared rather than retried
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::AuthRejection)
    }
}

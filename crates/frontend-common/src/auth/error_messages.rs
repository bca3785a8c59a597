//! User-facing messages for session failures
//!
//! The facade reports the error taxonomy; only here does it become copy.

use examina_core::AuthError;

/// Message shown on the login form for a failed attempt
pub fn login_error_message(error: Option<&AuthError>) -> String {
    match error {
        Some(AuthError::AuthRejection) => "Invalid email or password.".to_string(),
        _ => "Something went wrong. Please try again.".to_string(),
    }
}

//! Upstream auth API wire contract

use examina_core::{AuthError, Role, SessionPayload, User};
use serde::{Deserialize, Serialize};

/// `POST /api/auth/login` request body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/refresh` request body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair issued on login and on refresh; both endpoints share the shape
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: UserResponse,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// User record as returned by the API
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl TryFrom<UserResponse> for User {
    type Error = AuthError;

    fn try_from(value: UserResponse) -> Result<Self, Self::Error> {
        let role: Role = value
            .role
            .parse()
            .map_err(|_| AuthError::corrupt(format!("unknown role '{}'", value.role)))?;
        Ok(User {
            id: value.id,
            email: value.email,
            name: value.name,
            role,
        })
    }
}

impl TryFrom<TokenResponse> for SessionPayload {
    type Error = AuthError;

    fn try_from(value: TokenResponse) -> Result<Self, Self::Error> {
        Ok(SessionPayload {
            access_token: value.token,
            refresh_token: value.refresh_token,
            user: value.user.try_into()?,
            expires_in_secs: value.expires_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_converts_to_payload() {
        let response: TokenResponse = serde_json::from_str(
            r#"{
                "token": "A",
                "refresh_token": "B",
                "user": {"id": "u-1", "email": "ana@example.edu", "name": "Ana", "role": "student"},
                "expires_in": 3600
            }"#,
        )
        .unwrap();

        let payload = SessionPayload::try_from(response).unwrap();
        assert_eq!(payload.access_token, "A");
        assert_eq!(payload.user.role, Role::Student);
        assert_eq!(payload.expires_in_secs, 3600);
    }

    #[test]
    fn unknown_role_is_rejected_as_corrupt() {
        let user = UserResponse {
            id: "u-1".into(),
            email: "x@example.edu".into(),
            name: "X".into(),
            role: "wizard".into(),
        };
        assert!(matches!(
            User::try_from(user),
            Err(AuthError::CorruptSession { .. })
        ));
    }
}

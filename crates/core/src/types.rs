//! Identity and session types shared across the workspace

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role assigned to an authenticated user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Professor,
    Student,
}

impl Role {
    /// Stable string form used in cookies and the wire contract
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Professor => "professor",
            Self::Student => "student",
        }
    }

    /// Canonical dashboard path for this role
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::Professor => "/professor/dashboard",
            Self::Student => "/student/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "professor" => Ok(Self::Professor),
            "student" => Ok(Self::Student),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Error returned when a persisted role string is not recognized
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Authenticated user identity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Token material issued by the server on login or refresh
///
/// The canonical internal representation is a full token pair plus the
/// server-provided lifetime; the absolute expiry is derived at save time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionPayload {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
    pub expires_in_secs: i64,
}

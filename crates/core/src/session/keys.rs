//! Persistence contract shared by the client runtime and the edge route gate
//!
//! The route gate runs in a separate execution context and never sees the
//! in-memory token store; these names are the entire contract between the
//! two sides.

/// Durable storage key for the access token
pub const ACCESS_TOKEN: &str = "accessToken";
/// Durable storage key for the refresh token
pub const REFRESH_TOKEN: &str = "refreshToken";
/// Durable storage key for the absolute expiry, epoch milliseconds as string
pub const TOKEN_EXPIRES_AT: &str = "tokenExpiresAt";
/// Durable storage key for the serialized user record
pub const USER: &str = "user";
/// Legacy single-token key; accepted at load time, never written back
pub const LEGACY_TOKEN: &str = "token";

/// Cookie carrying the access token
pub const COOKIE_TOKEN: &str = "token";
/// Cookie carrying the user's role
pub const COOKIE_USER_ROLE: &str = "userRole";
/// Cookie mirroring the refresh token
pub const COOKIE_REFRESH_TOKEN: &str = "refreshToken";

/// Cookie path attribute
pub const COOKIE_PATH: &str = "/";
/// Cookie SameSite attribute
pub const COOKIE_SAME_SITE: &str = "Lax";

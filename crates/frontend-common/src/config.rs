//! Frontend configuration

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// How often the browser checks whether the token should be renewed,
    /// in milliseconds
    pub const RENEWAL_CHECK_INTERVAL_MS: u32 = 5 * 60 * 1000;
}

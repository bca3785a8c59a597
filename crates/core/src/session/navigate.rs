//! Navigation seam for involuntary redirects
//!
//! Session invalidation ends with a redirect to the login entry point. The
//! redirect is suppressed when the user is already there, to avoid loops.

/// Sink for the "navigate to login" signal
pub trait LoginNavigator: Send + Sync {
    /// Send the user to the login entry point
    fn redirect_to_login(&self);

    /// Whether the current location already is the login entry point
    fn on_login_page(&self) -> bool {
        false
    }
}

//! Browser glue for the Examina session core
//!
//! Everything in this crate is a thin binding layer: persistence sinks over
//! localStorage and `document.cookie`, the typed-client singletons, the
//! upstream API implementation, and the Yew provider that exposes the
//! session facade to components.

pub mod auth;
pub mod client;
pub mod client_wrapper;
pub mod clock;
pub mod config;
pub mod cookies;
pub mod services;
pub mod storage;

pub use auth::context::{
    use_is_authenticated, use_session, use_session_user, SessionHandle, SessionProvider,
    SessionState,
};
pub use client::{create_authenticated_client, create_public_client, set_auth_token};
pub use client_wrapper::WrappedAuthClient;
pub use config::AuthConfig;

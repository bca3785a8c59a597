//! Session provider and its browser seams

pub mod context;
pub mod error_handler;
pub mod error_messages;
pub mod navigate;

pub use context::{
    use_is_authenticated, use_session, use_session_user, SessionHandle, SessionProvider,
    SessionState,
};
pub use navigate::WindowNavigator;

//! Typed HTTP clients for the Examina API

pub mod auth_typed;
pub mod error;
pub mod typed;

pub use error::ClientError;
pub use typed::{AuthenticatedExaminaClient, PublicExaminaClient, TypedClientBuilder};

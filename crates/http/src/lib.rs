//! HTTP surfaces of the Examina session core
//!
//! Wire types for the upstream auth API, typed clients enforcing the bearer
//! contract, and the edge middleware that consumes the cookie-mirrored
//! session on each navigation.

pub mod types;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "server")]
pub mod middleware;

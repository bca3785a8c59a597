//! Session lifecycle: store, refresh coordination, renewal, facade

pub mod api;
pub mod facade;
pub mod keys;
pub mod navigate;
pub mod refresh;
pub mod scheduler;
pub mod sink;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

pub use api::AuthApi;
pub use facade::{LoginOutcome, SessionManager};
pub use navigate::LoginNavigator;
pub use refresh::RefreshCoordinator;
pub use scheduler::RenewalScheduler;
pub use sink::{MemorySink, PersistenceSink, SessionRecord, StoredSession};
pub use store::TokenStore;

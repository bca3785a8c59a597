//! Examina core session types and utilities
//!
//! This crate owns the client-side session lifecycle: the token store, the
//! single-flight refresh coordinator, the background renewal scheduler, and
//! the session facade the rest of the application depends on. It is platform
//! independent; browser bindings live in `examina-frontend-common` and the
//! edge route gate consumer in `examina-http`.

pub mod clock;
pub mod error;
pub mod routes;
pub mod session;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use error::{AuthError, AuthResult};
pub use routes::{GateInput, RouteDecision, RouteGate};
pub use session::{
    AuthApi, LoginNavigator, LoginOutcome, MemorySink, PersistenceSink, RefreshCoordinator,
    RenewalScheduler, SessionManager, SessionRecord, StoredSession, TokenStore,
};
pub use types::{Role, SessionPayload, User};

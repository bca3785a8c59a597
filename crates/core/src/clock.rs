//! Time source abstraction
//!
//! Expiry math lives behind a trait so the store and scheduler can be tested
//! against a manually advanced clock. The browser runtime supplies a
//! `js_sys::Date` backed implementation.

use std::sync::Arc;

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    /// Current time as epoch milliseconds
    fn now_ms(&self) -> i64;
}

/// System clock backed by `chrono`
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

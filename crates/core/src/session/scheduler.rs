//! Background token renewal
//!
//! A cooperative timer periodically asks the store whether renewal is due and
//! hands the work to the refresh coordinator. A tick must never surface an
//! error to the host application: rejection is already handled by the
//! coordinator, anything else is logged and retried on the next tick.

use crate::error::AuthError;
use crate::session::refresh::RefreshCoordinator;
use crate::session::store::TokenStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// How often the renewal check runs
pub const RENEWAL_CHECK_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Periodic renewal driver
///
/// On native targets [`spawn`](Self::spawn) runs the loop on a tokio timer;
/// in the browser the frontend drives [`tick`](Self::tick) from a `gloo`
/// interval instead.
#[derive(Clone)]
pub struct RenewalScheduler {
    store: Arc<TokenStore>,
    coordinator: RefreshCoordinator,
}

impl RenewalScheduler {
    pub fn new(store: Arc<TokenStore>, coordinator: RefreshCoordinator) -> Self {
        Self { store, coordinator }
    }

    /// One renewal check: refresh if the token is inside the renewal window
    pub async fn tick(&self) {
        if !self.store.should_renew_soon() {
            return;
        }
        if self.store.refresh_token().is_none() {
            // Legacy session with nothing to exchange; the identity check at
            // startup owns its fate.
            return;
        }
        match self.coordinator.refresh().await {
            Ok(_) => debug!("background token renewal succeeded"),
            Err(AuthError::AuthRejection) => {
                // Coordinator already cleared the session and redirected.
                warn!("background renewal rejected; session cleared");
            }
            Err(err) => {
                warn!(error = %err, "background renewal failed; retrying next tick");
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::SchedulerHandle;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use tokio::time::MissedTickBehavior;

    impl RenewalScheduler {
        /// Start the renewal loop on the given period.
        ///
        /// Dropping or stopping the returned handle cancels the timer; an
        /// in-flight refresh is left to resolve on its own so storage is
        /// never abandoned mid-write.
        pub fn spawn(self, period: Duration) -> SchedulerHandle {
            let task = tokio::spawn(async move {
                let mut interval = tokio::time::interval(period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                // The first tick of a tokio interval fires immediately.
                interval.tick().await;
                loop {
                    interval.tick().await;
                    self.tick().await;
                }
            });
            SchedulerHandle { task }
        }
    }

    /// Cancellation handle for a spawned renewal loop
    pub struct SchedulerHandle {
        task: tokio::task::JoinHandle<()>,
    }

    impl SchedulerHandle {
        /// Stop the timer. Idempotent.
        pub fn stop(&self) {
            self.task.abort();
        }
    }

    impl Drop for SchedulerHandle {
        fn drop(&mut self) {
            self.task.abort();
        }
    }
}

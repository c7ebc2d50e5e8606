//! Bounded-retry liveness probe
//!
//! One probe is up to `max_attempts` sequential checks against one address.
//! The first successful check ends the probe; there is no backoff between
//! attempts.

use std::sync::Arc;

use hatsync_core::domain::ProbeResult;
use hatsync_core::ports::{IReachabilityCheck, SUCCESS_CODE};
use tracing::{debug, info, warn};

/// Classifies an address as responsive or not
#[derive(Clone)]
pub struct Prober {
    check: Arc<dyn IReachabilityCheck>,
}

impl Prober {
    pub fn new(check: Arc<dyn IReachabilityCheck>) -> Self {
        Self { check }
    }

    /// Probes `address` up to `max_attempts` times
    ///
    /// Returns [`ProbeResult::Responsive`] on the first attempt that yields
    /// [`SUCCESS_CODE`]. An attempt that returns another code, or fails to
    /// run, counts as failed. `max_attempts == 0` is treated as 1.
    #[tracing::instrument(skip(self))]
    pub async fn probe(&self, address: &str, max_attempts: u32) -> ProbeResult {
        let max_attempts = max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.check.check(address).await {
                Ok(SUCCESS_CODE) => {
                    debug!(attempt, "Host responded");
                    return ProbeResult::Responsive;
                }
                Ok(code) => {
                    debug!(attempt, max_attempts, code, "Host did not respond");
                }
                Err(e) => {
                    warn!(attempt, max_attempts, error = %e, "Reachability check failed to run");
                }
            }
        }

        info!(max_attempts, "Host unresponsive after all attempts");
        ProbeResult::Unresponsive
    }
}

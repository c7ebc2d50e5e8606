//! Reachability check port (driven/secondary port)
//!
//! A single, non-retrying liveness check. Retry policy lives in the prober;
//! adapters only report what one attempt returned.

/// The only code that counts as a successful attempt
pub const SUCCESS_CODE: i32 = 0;

/// Port trait for a single reachability attempt
#[async_trait::async_trait]
pub trait IReachabilityCheck: Send + Sync {
    /// Checks `address` once and returns the status code of the attempt
    ///
    /// [`SUCCESS_CODE`] means reachable; any other value is a failed attempt.
    /// An `Err` means the check could not be performed at all, which the
    /// prober also treats as a failed attempt.
    async fn check(&self, address: &str) -> anyhow::Result<i32>;
}

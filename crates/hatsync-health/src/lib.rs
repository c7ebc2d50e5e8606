//! hatsync Health - Host liveness probing and offline alerts
//!
//! Provides:
//! - Bounded-retry probing of a single address
//! - Concurrent classification of every configured host
//! - Repeated "offline" alerts on the remote display
//!
//! ## Modules
//!
//! - [`prober`] - [`Prober`](prober::Prober), up to `max_attempts` sequential checks
//! - [`monitor`] - [`HealthMonitor`](monitor::HealthMonitor), one prober per host
//! - [`alerter`] - [`Alerter`](alerter::Alerter), offline messages for the display
//! - [`ping`] - [`PingCommand`](ping::PingCommand), the default reachability check

pub mod alerter;
pub mod monitor;
pub mod ping;
pub mod prober;

use thiserror::Error;

/// Errors raised while setting up or running a reachability check
#[derive(Debug, Error)]
pub enum HealthError {
    /// No program was configured for the check
    #[error("Ping command is empty")]
    EmptyCommand,

    /// The check program could not be started
    #[error("Failed to run {command}: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

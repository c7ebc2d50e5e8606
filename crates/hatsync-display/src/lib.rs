//! hatsync Display - Remote status display client
//!
//! Provides an async HTTP client for the LED status display that reports
//! backup and health-check outcomes.
//!
//! ## Modules
//!
//! - [`client`] - [`DisplayClient`](client::DisplayClient), the `IDisplayNotifier` adapter

pub mod client;

pub use client::DisplayClient;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the display
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The display answered with something other than 200 OK
    #[error("Display rejected {endpoint}: HTTP {status}")]
    Rejected {
        /// Endpoint path that was called
        endpoint: &'static str,
        /// Status returned by the display
        status: StatusCode,
    },

    /// A network-level error occurred (connection refused, timeout, DNS)
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The configured address cannot be turned into a base URL
    #[error("Invalid display address: {0:?}")]
    InvalidAddress(String),
}

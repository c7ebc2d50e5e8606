//! Port definitions (hexagonal architecture interfaces)
//!
//! Traits the orchestration core depends on; implementations live in the
//! adapter crates.
//!
//! ## Ports Overview
//!
//! - [`ISynchronizer`] - Copies one source directory onto one destination
//! - [`IReachabilityCheck`] - Runs a single liveness check against an address
//! - [`IDisplayNotifier`] - Drives the remote status display

pub mod display;
pub mod reachability;
pub mod synchronizer;

pub use display::{DisplayText, IDisplayNotifier, Rgb};
pub use reachability::{IReachabilityCheck, SUCCESS_CODE};
pub use synchronizer::ISynchronizer;

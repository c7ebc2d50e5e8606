//! Domain types
//!
//! - Sync units, options and the aggregated outcome of a run
//! - Probe results and the per-run health report
//! - The notification disposition and marker file naming
//! - Domain-specific error types

pub mod disposition;
pub mod errors;
pub mod marker;
pub mod probe;
pub mod sync_unit;

pub use disposition::Disposition;
pub use errors::DomainError;
pub use marker::{marker_file_name, render_group_keys, sanitize_marker_component, MarkerKind};
pub use probe::{HealthReport, ProbeResult, DEFAULT_MAX_ATTEMPTS};
pub use sync_unit::{unit_id, SyncOptions, SyncOutcome, SyncUnit, DEFAULT_EXCLUDE_PATTERN};

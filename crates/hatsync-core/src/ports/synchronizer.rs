//! Directory synchronizer port (driven/secondary port)
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because transfer errors are adapter-specific.
//! - Implementations must be safe to call concurrently for disjoint
//!   source/destination pairs: the orchestrator runs one call per sync unit
//!   in parallel.
//! - Returning `Ok(())` is the only signal the orchestrator counts as a
//!   completed unit.

use std::path::Path;

use crate::domain::SyncOptions;

/// Port trait for one-shot directory synchronization
#[async_trait::async_trait]
pub trait ISynchronizer: Send + Sync {
    /// Makes `destination` reflect `source`
    ///
    /// # Arguments
    /// * `source` - Directory to read from
    /// * `destination` - Directory to write into (created if missing)
    /// * `options` - Exclusion patterns and verbosity
    async fn synchronize(
        &self,
        source: &Path,
        destination: &Path,
        options: &SyncOptions,
    ) -> anyhow::Result<()>;
}

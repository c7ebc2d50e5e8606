//! Concurrent sync orchestration
//!
//! The [`SyncOrchestrator`] turns the requested group keys into a flat list
//! of [`SyncUnit`]s, spawns one tokio task per unit and waits for every one
//! of them before reporting a [`SyncOutcome`].
//!
//! ## Flow
//!
//! ```text
//! group keys ──→ plan() ──→ [sync_local_0, sync_local_1, sync_backup_0, ...]
//!                                 │ spawn one task each
//!                                 ▼
//!                  ISynchronizer::synchronize(source, destination, options)
//!                                 │ join every handle, in launch order
//!                                 ▼
//!                    SyncOutcome { attempted, completed_without_error }
//! ```
//!
//! A failing unit is logged and left uncounted; it never aborts its siblings
//! or the barrier. Each task reports its own success through its join
//! handle, and the count is folded only after the join, so no two units ever
//! write the same counter.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use hatsync_core::config::{OrderedMap, SyncConfig};
use hatsync_core::domain::{SyncOutcome, SyncUnit};
use hatsync_core::ports::ISynchronizer;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::SyncError;

/// Runs sync units concurrently and counts how many completed
pub struct SyncOrchestrator {
    /// Performs the actual transfer for each unit
    synchronizer: Arc<dyn ISynchronizer>,
    /// Group key -> ordered `source: destination` pairs
    groups: OrderedMap<OrderedMap<PathBuf>>,
    /// How long a unit may run, measured from launch; `None` waits forever
    unit_timeout: Option<Duration>,
}

impl SyncOrchestrator {
    /// Creates an orchestrator over the groups of `config`
    ///
    /// # Arguments
    /// * `synchronizer` - Transfer implementation shared by every unit
    /// * `config` - Sync section of the configuration; groups are copied in
    pub fn new(synchronizer: Arc<dyn ISynchronizer>, config: &SyncConfig) -> Self {
        Self {
            synchronizer,
            groups: config.groups.clone(),
            unit_timeout: config.unit_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Overrides the per-unit wait limit
    pub fn with_unit_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.unit_timeout = timeout;
        self
    }

    /// Expands `group_keys` into sync units, in configuration order
    ///
    /// Unit ids are `sync_{group}_{index}` with a zero-based index per
    /// group. A repeated key is planned once, at its first position. Fails on
    /// the first unknown key, before anything is launched.
    pub fn plan<S: AsRef<str>>(
        &self,
        group_keys: &[S],
        exclude_pattern: &str,
    ) -> Result<Vec<SyncUnit>, SyncError> {
        let mut units = Vec::new();
        let mut planned: Vec<&str> = Vec::new();
        for key in group_keys {
            let key = key.as_ref();
            if planned.contains(&key) {
                debug!(group = key, "Skipping repeated group key");
                continue;
            }
            planned.push(key);
            let pairs = self
                .groups
                .get(key)
                .ok_or_else(|| SyncError::UnknownGroup(key.to_string()))?;

            for (index, (source, destination)) in pairs.iter().enumerate() {
                units.push(SyncUnit::new(
                    key,
                    index,
                    source,
                    destination.clone(),
                    exclude_pattern,
                ));
            }
        }
        Ok(units)
    }

    /// Runs every unit of `group_keys` concurrently and waits for all of them
    ///
    /// `attempted` is the number of planned units, fixed before any task is
    /// spawned. A unit counts as completed only if its synchronize call
    /// returned `Ok`. Panicked and timed-out units count as failed.
    ///
    /// # Errors
    /// Returns [`SyncError::UnknownGroup`] if a key is not configured. Unit
    /// failures are never returned as errors.
    #[tracing::instrument(skip_all, fields(groups = group_keys.len()))]
    pub async fn run<S: AsRef<str>>(
        &self,
        group_keys: &[S],
        exclude_pattern: &str,
    ) -> Result<SyncOutcome, SyncError> {
        let units = self.plan(group_keys, exclude_pattern)?;
        let attempted = units.len();

        info!(units = attempted, "Launching sync units");

        // One deadline for every unit, measured from launch.
        let deadline = self.unit_timeout.map(|limit| Instant::now() + limit);
        let handles: Vec<(String, JoinHandle<bool>)> = units
            .into_iter()
            .map(|unit| (unit.id().to_string(), self.spawn_unit(unit)))
            .collect();

        let mut completed = 0usize;
        for (id, handle) in handles {
            if self.join_unit(&id, handle, deadline).await {
                completed += 1;
            }
        }

        let outcome = SyncOutcome::new(attempted, completed)?;
        if outcome.is_fully_successful() {
            info!(%outcome, "All sync units completed");
        } else {
            warn!(%outcome, failed = outcome.failed(), "Some sync units failed");
        }
        Ok(outcome)
    }

    fn spawn_unit(&self, unit: SyncUnit) -> JoinHandle<bool> {
        let synchronizer = Arc::clone(&self.synchronizer);
        tokio::spawn(async move {
            debug!(unit = %unit, "Sync unit started");
            match synchronizer
                .synchronize(unit.source(), unit.destination(), &unit.options())
                .await
            {
                Ok(()) => {
                    debug!(unit = unit.id(), "Sync unit completed");
                    true
                }
                Err(e) => {
                    let cause = format!("{e:#}");
                    error!(unit = %unit, error = %cause, "Sync unit failed");
                    false
                }
            }
        })
    }

    /// Waits for one unit until `deadline`; returns whether it completed
    /// without error
    async fn join_unit(
        &self,
        id: &str,
        handle: JoinHandle<bool>,
        deadline: Option<Instant>,
    ) -> bool {
        let joined = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    // The task keeps running detached; it is no longer counted.
                    warn!(
                        unit = id,
                        timeout_secs = self.unit_timeout.map(|l| l.as_secs()),
                        "Sync unit did not finish in time, counting as failed"
                    );
                    return false;
                }
            },
            None => handle.await,
        };

        match joined {
            Ok(success) => success,
            Err(e) => {
                error!(unit = id, error = %e, "Sync unit task aborted");
                false
            }
        }
    }
}

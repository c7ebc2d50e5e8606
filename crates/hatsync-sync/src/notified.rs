//! Notified sync use case
//!
//! Wraps a [`SyncOrchestrator`] run with the remote display:
//!
//! 1. Create the marker output directory (a failure here aborts the run).
//! 2. Post the "working" image and start the rotation animation. The display
//!    counts as reachable only if both commands were accepted.
//! 3. Run every sync unit of the requested groups.
//! 4. Reduce (reachable, fully synced) into a [`Disposition`] and apply its
//!    side effects.
//!
//! The sync always runs, whatever the display said in step 2.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use hatsync_core::config::Config;
use hatsync_core::domain::{Disposition, SyncOutcome};
use hatsync_core::ports::{IDisplayNotifier, ISynchronizer};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::engine::SyncOrchestrator;
use crate::marker::MarkerWriter;
use crate::reducer::NotificationReducer;
use crate::SyncError;

/// Animation started while the sync runs
pub fn working_animation() -> Value {
    json!({
        "cmd": "simple",
        "rotate_vals": [0, 90, 180, 270],
        "re_draw": true,
        "background": true
    })
}

/// Result of one notified sync run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifiedRun {
    pub outcome: SyncOutcome,
    pub notifier_reachable: bool,
    pub disposition: Disposition,
    /// Marker file written for a non-green disposition
    pub marker: Option<PathBuf>,
}

impl NotifiedRun {
    /// Whether the caller must report a process-level failure
    pub fn is_fatal(&self) -> bool {
        self.disposition.is_fatal()
    }
}

/// Sync run with display notification and failure markers
pub struct NotifiedSync {
    orchestrator: SyncOrchestrator,
    display: Arc<dyn IDisplayNotifier>,
    reducer: NotificationReducer,
    markers: MarkerWriter,
    sync_image: Value,
    exclude_pattern: String,
}

impl NotifiedSync {
    /// Wires the use case from configuration
    pub fn new(
        synchronizer: Arc<dyn ISynchronizer>,
        display: Arc<dyn IDisplayNotifier>,
        config: &Config,
    ) -> Self {
        let markers = MarkerWriter::new(&config.sync.output_dir);
        let reducer = NotificationReducer::new(
            Arc::clone(&display),
            markers.clone(),
            Duration::from_secs(config.notifier.hold_secs),
        );
        Self {
            orchestrator: SyncOrchestrator::new(synchronizer, &config.sync),
            display,
            reducer,
            markers,
            sync_image: config.notifier.sync_image.clone(),
            exclude_pattern: config.sync.exclude_pattern.clone(),
        }
    }

    /// Posts the working image and animation; true iff both were accepted
    ///
    /// Never fails: errors are logged and reported as unreachable.
    pub async fn check_notifier(&self) -> bool {
        if let Err(e) = self.display.set_image(&self.sync_image).await {
            warn!(error = %e, "Display did not accept the sync image");
            return false;
        }
        if let Err(e) = self.display.set_rotation(&working_animation()).await {
            warn!(error = %e, "Display did not accept the sync animation");
            return false;
        }
        true
    }

    /// Runs the full notified sync for `group_keys`
    ///
    /// # Errors
    /// - [`SyncError::UnknownGroup`] before anything is sent or launched
    /// - [`SyncError::MarkerWrite`] if the output directory or a marker
    ///   cannot be created
    ///
    /// A [`Disposition::Catastrophic`] run is returned as `Ok`; callers check
    /// [`NotifiedRun::is_fatal`].
    #[tracing::instrument(skip_all, fields(groups = group_keys.len()))]
    pub async fn run<S: AsRef<str>>(&self, group_keys: &[S]) -> Result<NotifiedRun, SyncError> {
        self.orchestrator.plan(group_keys, &self.exclude_pattern)?;
        self.markers.ensure_output_dir().await?;

        let notifier_reachable = self.check_notifier().await;
        info!(notifier_reachable, "Display checked, starting sync");

        let outcome = self
            .orchestrator
            .run(group_keys, &self.exclude_pattern)
            .await?;

        let at = chrono::Local::now().naive_local();
        let resolution = self
            .reducer
            .reduce(
                notifier_reachable,
                outcome.is_fully_successful(),
                group_keys,
                at,
            )
            .await?;

        if resolution.disposition.is_fatal() {
            warn!(%outcome, "Sync and display both failed");
        }

        Ok(NotifiedRun {
            outcome,
            notifier_reachable,
            disposition: resolution.disposition,
            marker: resolution.marker,
        })
    }
}

//! Notification reducer
//!
//! Turns the pair (display reachable before the sync, sync fully succeeded)
//! into a [`Disposition`] and the ordered list of [`SideEffect`]s that go
//! with it. Deciding is pure; [`NotificationReducer::apply`] is the only
//! part that talks to the display or the filesystem.
//!
//! | reachable | synced | disposition                 | effects                                         |
//! |-----------|--------|-----------------------------|-------------------------------------------------|
//! | yes       | yes    | `AllGreen`                  | stop animation, green, hold, default view       |
//! | yes       | no     | `SyncFailedNotifierUp`      | stop animation, red, `SyncFailed` marker        |
//! | no        | yes    | `SyncSucceededNotifierDown` | warn operator, `NotifierDead` marker            |
//! | no        | no     | `Catastrophic`              | `SyncAndNotifierFailed` marker                  |

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use hatsync_core::domain::marker::MARKER_TIMESTAMP_FORMAT;
use hatsync_core::domain::{Disposition, MarkerKind};
use hatsync_core::ports::{IDisplayNotifier, Rgb};
use serde_json::json;
use tracing::{info, warn};

use crate::marker::MarkerWriter;
use crate::SyncError;

/// Solid colour shown after a successful sync
pub const SUCCESS_COLOR: Rgb = [0, 120, 0];
/// Solid colour shown after a failed sync
pub const FAILURE_COLOR: Rgb = [200, 0, 0];

/// One step performed after the sync finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Kill the "working" animation
    StopAnimation,
    /// Fill the display with a solid colour
    SetImage(Rgb),
    /// Leave the current image up for a while
    Hold(Duration),
    /// Restore the display's default view
    ShowDefault,
    /// Tell the operator the display is unreachable but data is safe
    WarnOperator,
    /// Create an empty marker file of this kind in the output directory
    WriteMarker(MarkerKind),
}

/// Side effects for `disposition`, in the order they are applied
pub fn side_effects(disposition: Disposition, hold: Duration) -> Vec<SideEffect> {
    let mut effects = Vec::new();
    match disposition {
        Disposition::AllGreen => effects.extend([
            SideEffect::StopAnimation,
            SideEffect::SetImage(SUCCESS_COLOR),
            SideEffect::Hold(hold),
            SideEffect::ShowDefault,
        ]),
        Disposition::SyncFailedNotifierUp => {
            effects.extend([SideEffect::StopAnimation, SideEffect::SetImage(FAILURE_COLOR)])
        }
        Disposition::SyncSucceededNotifierDown => effects.push(SideEffect::WarnOperator),
        Disposition::Catastrophic => {}
    }
    if let Some(kind) = disposition.marker_kind() {
        effects.push(SideEffect::WriteMarker(kind));
    }
    effects
}

/// What the reducer did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub disposition: Disposition,
    /// Path of the marker file, when one was written
    pub marker: Option<PathBuf>,
}

/// Applies the final display commands and marker files of a notified sync
pub struct NotificationReducer {
    display: Arc<dyn IDisplayNotifier>,
    markers: MarkerWriter,
    hold: Duration,
}

impl NotificationReducer {
    pub fn new(display: Arc<dyn IDisplayNotifier>, markers: MarkerWriter, hold: Duration) -> Self {
        Self {
            display,
            markers,
            hold,
        }
    }

    /// Pure decision: disposition plus the effects that go with it
    pub fn decide(
        &self,
        notifier_reachable: bool,
        sync_fully_succeeded: bool,
    ) -> (Disposition, Vec<SideEffect>) {
        let disposition = Disposition::decide(notifier_reachable, sync_fully_succeeded);
        (disposition, side_effects(disposition, self.hold))
    }

    /// Performs `effects` in order
    ///
    /// Display commands are best-effort: a failure is logged and the
    /// remaining effects still run.
    ///
    /// # Errors
    /// Returns [`SyncError::MarkerWrite`] if a marker file cannot be created.
    pub async fn apply<S: AsRef<str>>(
        &self,
        effects: &[SideEffect],
        group_keys: &[S],
        at: NaiveDateTime,
    ) -> Result<Option<PathBuf>, SyncError> {
        let mut marker = None;

        for effect in effects {
            match *effect {
                SideEffect::StopAnimation => {
                    if let Err(e) = self.display.set_rotation(&json!({"cmd": "kill"})).await {
                        warn!(error = %e, "Failed to stop display animation");
                    }
                }
                SideEffect::SetImage(color) => {
                    if let Err(e) = self.display.set_image(&json!({"base": color})).await {
                        warn!(error = %e, ?color, "Failed to set display colour");
                    }
                }
                SideEffect::Hold(duration) => tokio::time::sleep(duration).await,
                SideEffect::ShowDefault => {
                    if let Err(e) = self.display.show_default().await {
                        warn!(error = %e, "Failed to restore default display view");
                    }
                }
                SideEffect::WarnOperator => {
                    warn!(
                        at = %at.format(MARKER_TIMESTAMP_FORMAT),
                        "Display may be dead, but the sync completed"
                    );
                }
                SideEffect::WriteMarker(kind) => {
                    marker = Some(self.markers.write(kind, group_keys, at).await?);
                }
            }
        }

        Ok(marker)
    }

    /// Decides and applies in one step
    #[tracing::instrument(skip(self, group_keys, at))]
    pub async fn reduce<S: AsRef<str>>(
        &self,
        notifier_reachable: bool,
        sync_fully_succeeded: bool,
        group_keys: &[S],
        at: NaiveDateTime,
    ) -> Result<Resolution, SyncError> {
        let (disposition, effects) = self.decide(notifier_reachable, sync_fully_succeeded);
        info!(%disposition, "Sync run resolved");

        let marker = self.apply(&effects, group_keys, at).await?;
        Ok(Resolution {
            disposition,
            marker,
        })
    }
}

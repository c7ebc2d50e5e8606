//! Final disposition of a notified sync run
//!
//! The disposition is a pure function of two booleans captured at different
//! times: whether the display accepted the "working" commands before the sync
//! started, and whether every sync unit completed afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::marker::MarkerKind;

/// The four possible endings of a notified sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Sync succeeded and the display shows green
    AllGreen,
    /// Sync failed, display reachable: red screen and a failure marker
    SyncFailedNotifierUp,
    /// Sync succeeded but the display never answered: operator note and marker
    SyncSucceededNotifierDown,
    /// Nothing worked; the caller must surface a process-level failure
    Catastrophic,
}

impl Disposition {
    /// Reduces reachability and sync success into a disposition
    pub fn decide(notifier_reachable: bool, sync_fully_succeeded: bool) -> Self {
        match (notifier_reachable, sync_fully_succeeded) {
            (true, true) => Disposition::AllGreen,
            (true, false) => Disposition::SyncFailedNotifierUp,
            (false, true) => Disposition::SyncSucceededNotifierDown,
            (false, false) => Disposition::Catastrophic,
        }
    }

    /// Marker file written for this disposition, if any
    pub fn marker_kind(&self) -> Option<MarkerKind> {
        match self {
            Disposition::AllGreen => None,
            Disposition::SyncFailedNotifierUp => Some(MarkerKind::SyncFailed),
            Disposition::SyncSucceededNotifierDown => Some(MarkerKind::NotifierDead),
            Disposition::Catastrophic => Some(MarkerKind::SyncAndNotifierFailed),
        }
    }

    /// Whether the run must end in a process-level failure
    pub fn is_fatal(&self) -> bool {
        matches!(self, Disposition::Catastrophic)
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Disposition::AllGreen => "all_green",
            Disposition::SyncFailedNotifierUp => "sync_failed_notifier_up",
            Disposition::SyncSucceededNotifierDown => "sync_succeeded_notifier_down",
            Disposition::Catastrophic => "catastrophic",
        };
        write!(f, "{}", s)
    }
}

//! Sync units and their aggregated outcome
//!
//! A [`SyncUnit`] is one source → destination job. The orchestrator builds
//! one per configured pair, runs them concurrently and folds the results
//! into a [`SyncOutcome`].

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Default exclude pattern: log files, git metadata and jar archives
pub const DEFAULT_EXCLUDE_PATTERN: &str = r".+\.(log|git|jar)$";

/// Builds the task id of the `index`-th pair in `group`
///
/// Ids are unique within one orchestrator run: planning drops repeated group
/// keys and indices are positional.
pub fn unit_id(group: &str, index: usize) -> String {
    format!("sync_{group}_{index}")
}

/// Options handed to the synchronizer for a single unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Regex patterns; matching relative paths are skipped
    pub exclude: Vec<String>,
    /// Whether the synchronizer should log each transferred file
    pub verbose: bool,
}

impl SyncOptions {
    /// Non-verbose options excluding a single pattern
    pub fn excluding(pattern: impl Into<String>) -> Self {
        Self {
            exclude: vec![pattern.into()],
            verbose: false,
        }
    }
}

/// One source → destination synchronization job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncUnit {
    id: String,
    source: PathBuf,
    destination: PathBuf,
    exclude_pattern: String,
}

impl SyncUnit {
    /// Creates the unit for the `index`-th pair of `group`
    pub fn new(
        group: &str,
        index: usize,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        exclude_pattern: impl Into<String>,
    ) -> Self {
        Self {
            id: unit_id(group, index),
            source: source.into(),
            destination: destination.into(),
            exclude_pattern: exclude_pattern.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &PathBuf {
        &self.source
    }

    pub fn destination(&self) -> &PathBuf {
        &self.destination
    }

    pub fn exclude_pattern(&self) -> &str {
        &self.exclude_pattern
    }

    /// Options passed to the synchronizer: this unit's pattern, non-verbose
    pub fn options(&self) -> SyncOptions {
        SyncOptions::excluding(self.exclude_pattern.clone())
    }
}

impl fmt::Display for SyncUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} -> {})",
            self.id,
            self.source.display(),
            self.destination.display()
        )
    }
}

/// Aggregated result of one orchestrator run
///
/// `completed_without_error <= attempted` always holds; the run is fully
/// successful iff the two are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    attempted: usize,
    completed_without_error: usize,
}

impl SyncOutcome {
    /// Builds an outcome, rejecting counts that break the invariant
    pub fn new(attempted: usize, completed_without_error: usize) -> Result<Self, DomainError> {
        if completed_without_error > attempted {
            return Err(DomainError::InvalidOutcome {
                attempted,
                completed: completed_without_error,
            });
        }
        Ok(Self {
            attempted,
            completed_without_error,
        })
    }

    /// Total units launched
    pub fn attempted(&self) -> usize {
        self.attempted
    }

    /// Units whose synchronize call returned without error
    pub fn completed_without_error(&self) -> usize {
        self.completed_without_error
    }

    pub fn failed(&self) -> usize {
        self.attempted - self.completed_without_error
    }

    /// True when every launched unit completed without error
    pub fn is_fully_successful(&self) -> bool {
        self.completed_without_error == self.attempted
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} units synced",
            self.completed_without_error, self.attempted
        )
    }
}

//! hatsync Sync - Concurrent backup synchronization
//!
//! Provides:
//! - Fan-out of configured source/destination pairs into concurrent sync units
//! - A full barrier and exact completion count per run
//! - Reduction of (display reachability, sync success) into a final disposition
//! - Failure marker files
//!
//! ## Modules
//!
//! - [`engine`] - [`SyncOrchestrator`](engine::SyncOrchestrator), one task per sync unit
//! - [`filesystem`] - [`DirMirror`](filesystem::DirMirror), the default one-way directory copier
//! - [`marker`] - [`MarkerWriter`](marker::MarkerWriter), empty failure marker files
//! - [`reducer`] - [`NotificationReducer`](reducer::NotificationReducer), disposition side effects
//! - [`notified`] - [`NotifiedSync`](notified::NotifiedSync), the end-to-end notified run

pub mod engine;
pub mod filesystem;
pub mod marker;
pub mod notified;
pub mod reducer;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during synchronization operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// An I/O error occurred during file operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A requested group key is not present in the configuration
    #[error("Unknown sync group: {0}")]
    UnknownGroup(String),

    /// An exclude pattern failed to compile
    #[error("Invalid exclude pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A marker file could not be created
    #[error("Failed to write marker file {path}: {source}")]
    MarkerWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A domain-level error propagated from hatsync-core
    #[error("Domain error: {0}")]
    DomainError(#[from] hatsync_core::domain::DomainError),
}

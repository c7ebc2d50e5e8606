//! Failure marker files
//!
//! Markers are empty files dropped into the output directory. Their names,
//! built by [`marker_file_name`], carry the group keys and the local time.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use hatsync_core::domain::{marker_file_name, MarkerKind};
use tracing::info;

use crate::SyncError;

/// Writes marker files into a fixed output directory
#[derive(Debug, Clone)]
pub struct MarkerWriter {
    output_dir: PathBuf,
}

impl MarkerWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Creates the output directory if it is missing
    pub async fn ensure_output_dir(&self) -> Result<(), SyncError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| SyncError::MarkerWrite {
                path: self.output_dir.clone(),
                source,
            })
    }

    /// Creates the empty marker for `kind` and returns its path
    ///
    /// An existing marker with the same name is truncated, so two failures
    /// within the same second leave a single file.
    pub async fn write<S: AsRef<str>>(
        &self,
        kind: MarkerKind,
        group_keys: &[S],
        at: NaiveDateTime,
    ) -> Result<PathBuf, SyncError> {
        self.ensure_output_dir().await?;

        let path = self.output_dir.join(marker_file_name(kind, group_keys, at));
        tokio::fs::File::create(&path)
            .await
            .map_err(|source| SyncError::MarkerWrite {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), ?kind, "Marker file written");
        Ok(path)
    }
}

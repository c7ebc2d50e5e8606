//! One-way directory mirror (secondary/driven adapter)
//!
//! Implements [`ISynchronizer`] using `tokio::fs`. The destination tree is
//! brought up to date with the source; nothing is ever deleted from it.
//!
//! ## Design Decisions
//!
//! - **Exclusion**: each pattern is matched against the path relative to the
//!   source root, anchored at its start. A matching directory is not entered.
//! - **Change detection**: a file is copied when the target is missing, the
//!   sizes differ, or the source was modified after the target.
//! - **Atomic writes**: copies go to a temporary sibling and are renamed
//!   into place.
//! - **Symlinks** are skipped.

use std::path::{Path, PathBuf};

use hatsync_core::domain::SyncOptions;
use hatsync_core::ports::ISynchronizer;
use regex::Regex;
use tracing::{debug, info, instrument};

use crate::SyncError;

/// Per-run counters reported by [`DirMirror::mirror`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorStats {
    pub files_copied: usize,
    pub files_skipped: usize,
    /// Files and directories matched by an exclude pattern
    pub files_excluded: usize,
    pub dirs_created: usize,
}

/// Adapter that mirrors one directory tree into another.
///
/// Zero-sized: the source, destination and patterns all come with each call.
#[derive(Debug, Clone, Default)]
pub struct DirMirror;

impl DirMirror {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Copies new and changed files from `source` into `destination`
    ///
    /// # Errors
    /// - [`SyncError::PathNotFound`] / [`SyncError::NotADirectory`] for a bad source
    /// - [`SyncError::InvalidPattern`] if an exclude pattern does not compile
    /// - [`SyncError::IoError`] for any failure while walking or copying
    #[instrument(skip(self, options), fields(source = %source.display(), destination = %destination.display()))]
    pub async fn mirror(
        &self,
        source: &Path,
        destination: &Path,
        options: &SyncOptions,
    ) -> Result<MirrorStats, SyncError> {
        let metadata = match tokio::fs::metadata(source).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SyncError::PathNotFound(source.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_dir() {
            return Err(SyncError::NotADirectory(source.to_path_buf()));
        }

        let excludes = compile_excludes(&options.exclude)?;
        let mut stats = MirrorStats::default();

        if tokio::fs::metadata(destination).await.is_err() {
            tokio::fs::create_dir_all(destination).await?;
            stats.dirs_created += 1;
        }

        // Iterative walk over directories relative to the source root.
        let mut pending: Vec<PathBuf> = vec![PathBuf::new()];
        while let Some(relative_dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(source.join(&relative_dir)).await?;

            while let Some(entry) = entries.next_entry().await? {
                let relative = relative_dir.join(entry.file_name());
                if is_excluded(&excludes, &relative) {
                    debug!(path = %relative.display(), "Excluded");
                    stats.files_excluded += 1;
                    continue;
                }

                let file_type = entry.file_type().await?;
                let target = destination.join(&relative);

                if file_type.is_dir() {
                    if tokio::fs::metadata(&target).await.is_err() {
                        tokio::fs::create_dir_all(&target).await?;
                        stats.dirs_created += 1;
                    }
                    pending.push(relative);
                } else if file_type.is_file() {
                    if needs_copy(&entry.path(), &target).await? {
                        copy_atomic(&entry.path(), &target).await?;
                        stats.files_copied += 1;
                        if options.verbose {
                            info!(path = %relative.display(), "Copied");
                        }
                    } else {
                        stats.files_skipped += 1;
                    }
                } else {
                    debug!(path = %relative.display(), "Skipping non-regular file");
                }
            }
        }

        debug!(?stats, "Mirror complete");
        Ok(stats)
    }
}

#[async_trait::async_trait]
impl ISynchronizer for DirMirror {
    async fn synchronize(
        &self,
        source: &Path,
        destination: &Path,
        options: &SyncOptions,
    ) -> anyhow::Result<()> {
        self.mirror(source, destination, options).await?;
        Ok(())
    }
}

fn compile_excludes(patterns: &[String]) -> Result<Vec<Regex>, SyncError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(&format!("^(?:{pattern})")).map_err(|source| SyncError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

fn is_excluded(excludes: &[Regex], relative: &Path) -> bool {
    let relative = relative.to_string_lossy();
    excludes.iter().any(|re| re.is_match(&relative))
}

async fn needs_copy(source: &Path, target: &Path) -> Result<bool, SyncError> {
    let target_meta = match tokio::fs::metadata(target).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(true),
        Err(e) => return Err(e.into()),
    };
    let source_meta = tokio::fs::metadata(source).await?;

    if source_meta.len() != target_meta.len() {
        return Ok(true);
    }
    match (source_meta.modified(), target_meta.modified()) {
        (Ok(src), Ok(dst)) => Ok(src > dst),
        // Without timestamps, equal sizes are trusted.
        _ => Ok(false),
    }
}

async fn copy_atomic(source: &Path, target: &Path) -> Result<(), SyncError> {
    let tmp_path = {
        let mut p = target.as_os_str().to_owned();
        p.push(".hatsync-tmp");
        PathBuf::from(p)
    };
    tokio::fs::copy(source, &tmp_path).await?;
    tokio::fs::rename(&tmp_path, target).await?;
    Ok(())
}

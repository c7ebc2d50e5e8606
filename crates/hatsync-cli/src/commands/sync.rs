//! Sync command - Mirror directory groups and report on the display
//!
//! Provides the `hatsync sync` CLI command which:
//! 1. Applies command-line overrides to the loaded configuration
//! 2. Builds the display client and directory mirror adapters
//! 3. Runs the notified sync and prints its disposition
//!
//! A run where both the sync and the display failed exits non-zero.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use hatsync_core::config::Config;
use hatsync_core::domain::Disposition;
use hatsync_display::DisplayClient;
use hatsync_sync::filesystem::DirMirror;
use hatsync_sync::notified::{NotifiedRun, NotifiedSync};
use serde_json::Value;
use tracing::info;

use crate::commands::ensure_valid;
use crate::output::{get_formatter, to_json, OutputFormat, OutputFormatter};

#[derive(Debug, Args)]
pub struct SyncCommand {
    /// Group keys to sync, comma separated (e.g. "local, backup")
    pub keys: String,

    /// Display address (host:port), overriding notifier.address
    #[arg(long)]
    pub notifier: Option<String>,

    /// JSON file with the image shown while syncing
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Regex of relative paths to skip, overriding sync.exclude_pattern
    #[arg(long)]
    pub exclude: Option<String>,
}

/// Splits `"local, backup"` or `"local,backup"` into group keys
pub fn parse_group_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn load_image(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sync image {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in sync image {}", path.display()))
}

impl SyncCommand {
    fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(address) = &self.notifier {
            config.notifier.address = address.clone();
        }
        if let Some(pattern) = &self.exclude {
            config.sync.exclude_pattern = pattern.clone();
        }
        if let Some(path) = &self.image {
            config.notifier.sync_image = load_image(path)?;
        }
        Ok(())
    }

    pub async fn execute(&self, mut config: Config, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);

        let keys = parse_group_keys(&self.keys);
        if keys.is_empty() {
            anyhow::bail!("No group keys given");
        }

        self.apply_overrides(&mut config)?;
        ensure_valid(&config)?;

        info!(?keys, notifier = %config.notifier.address, "Starting notified sync");

        let display = DisplayClient::new(
            &config.notifier.address,
            Duration::from_secs(config.notifier.request_timeout_secs),
        )
        .context("Failed to create display client")?;

        let run = NotifiedSync::new(Arc::new(DirMirror::new()), Arc::new(display), &config)
            .run(&keys)
            .await
            .context("Sync run failed")?;

        if format.is_json() {
            formatter.print_json(&to_json(&run)?);
        } else {
            report_human(&*formatter, &run);
        }

        if run.is_fatal() {
            anyhow::bail!(
                "Sync and display both failed ({} of {} units synced)",
                run.outcome.completed_without_error(),
                run.outcome.attempted()
            );
        }
        Ok(())
    }
}

fn report_human(formatter: &dyn OutputFormatter, run: &NotifiedRun) {
    match run.disposition {
        Disposition::AllGreen => formatter.success(&format!("Sync complete: {}", run.outcome)),
        Disposition::SyncFailedNotifierUp => formatter.error(&format!(
            "Sync failed: {} ({} failed)",
            run.outcome,
            run.outcome.failed()
        )),
        Disposition::SyncSucceededNotifierDown => {
            formatter.success(&format!("Sync complete: {}", run.outcome));
            formatter.warn("Display did not respond; the sync still completed");
        }
        Disposition::Catastrophic => formatter.error(&format!(
            "Sync failed and display unreachable: {}",
            run.outcome
        )),
    }
    if let Some(marker) = &run.marker {
        formatter.info(&format!("Marker: {}", marker.display()));
    }
}

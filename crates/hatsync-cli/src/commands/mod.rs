//! CLI subcommands

pub mod config;
pub mod ping;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hatsync_core::config::Config;

/// Loads the configuration for this invocation
///
/// An explicit `--config` path must exist and parse. Without one, the
/// default path is used and a missing file falls back to defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<(PathBuf, Config)> {
    match explicit {
        Some(path) => {
            let config = Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            Ok((path.to_path_buf(), config))
        }
        None => {
            let path = Config::default_path();
            let config = Config::load_or_default(&path);
            Ok((path, config))
        }
    }
}

/// Fails with every validation error joined into one message
pub fn ensure_valid(config: &Config) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    anyhow::bail!("Invalid configuration: {}", messages.join("; "))
}

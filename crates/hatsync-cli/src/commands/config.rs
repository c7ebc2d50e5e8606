//! Config command - View and validate hatsync configuration
//!
//! Provides the `hatsync config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON)
//! 2. Validates it and reports every error found

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use hatsync_core::config::Config;
use tracing::info;

use crate::output::{get_formatter, to_json, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration
    Show,
    /// Validate the configuration
    Validate,
}

impl ConfigCommand {
    pub async fn execute(&self, path: &Path, config: &Config, format: OutputFormat) -> Result<()> {
        match self {
            ConfigCommand::Show => execute_show(path, config, format),
            ConfigCommand::Validate => execute_validate(path, config, format),
        }
    }
}

fn execute_show(path: &Path, config: &Config, format: OutputFormat) -> Result<()> {
    let formatter = get_formatter(format);
    info!(config_path = %path.display(), "Showing configuration");

    if format.is_json() {
        formatter.print_json(&to_json(config)?);
        return Ok(());
    }

    formatter.success(&format!("Configuration ({})", path.display()));
    formatter.info("");
    let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;
    for line in yaml.lines() {
        formatter.info(line);
    }
    Ok(())
}

fn execute_validate(path: &Path, config: &Config, format: OutputFormat) -> Result<()> {
    let formatter = get_formatter(format);
    let errors = config.validate();
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();

    if format.is_json() {
        formatter.print_json(&serde_json::json!({
            "config_path": path.display().to_string(),
            "valid": messages.is_empty(),
            "errors": messages,
        }));
    } else if messages.is_empty() {
        formatter.success(&format!("Configuration is valid ({})", path.display()));
    } else {
        formatter.error(&format!(
            "Configuration has {} error(s) ({})",
            messages.len(),
            path.display()
        ));
        for message in &messages {
            formatter.info(&format!("- {message}"));
        }
    }

    if !messages.is_empty() {
        anyhow::bail!("Configuration is invalid");
    }
    Ok(())
}

//! hatsync CLI - Backup sync and host health checks with a status display
//!
//! Provides commands for:
//! - Running a notified sync of configured directory groups
//! - Probing monitored hosts and alerting on the display
//! - Viewing and validating the configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{config::ConfigCommand, ping::PingCommand, sync::SyncCommand};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "hatsync",
    version,
    about = "Backup sync and host health checks reported to a remote status display"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file (YAML, or JSON with a .json extension)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Synchronize directory groups and report the outcome on the display
    Sync(SyncCommand),
    /// Probe monitored hosts and alert on the display for offline ones
    Ping(PingCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Installs the global subscriber; logs go to stderr so stdout stays parseable
fn init_tracing(verbose: u8, configured_level: &str, json: bool) {
    let level = match verbose {
        0 => configured_level,
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = commands::load_config(cli.config.as_deref());
    let level = match &loaded {
        Ok((_, config)) => config.logging.level.clone(),
        Err(_) => "info".to_string(),
    };
    init_tracing(cli.verbose, &level, cli.json);

    let (config_path, config) = loaded?;
    let format = OutputFormat::from_flag(cli.json);

    match cli.command {
        Commands::Sync(cmd) => cmd.execute(config, format).await,
        Commands::Ping(cmd) => cmd.execute(config, format).await,
        Commands::Config(cmd) => cmd.execute(&config_path, &config, format).await,
    }
}

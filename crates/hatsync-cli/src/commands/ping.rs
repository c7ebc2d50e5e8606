//! Ping command - Probe monitored hosts and alert on the display
//!
//! Provides the `hatsync ping` CLI command which:
//! 1. Probes every host in `health.hosts` with bounded retries
//! 2. Posts offline alerts to the display when any host is unresponsive
//! 3. Prints the health report
//!
//! Unresponsive hosts are reported, not treated as a command failure.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use hatsync_core::config::Config;
use hatsync_display::DisplayClient;
use hatsync_health::alerter::Alerter;
use hatsync_health::monitor::HealthMonitor;
use hatsync_health::ping::PingCommand as PingAdapter;
use hatsync_health::prober::Prober;
use tracing::info;

use crate::commands::ensure_valid;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct PingCommand {
    /// Passes over the offline list on the display, overriding health.repeat_count
    #[arg(long)]
    pub repeat: Option<u32>,

    /// Probe attempts per host, overriding health.max_attempts
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Display address (host:port), overriding notifier.address
    #[arg(long)]
    pub notifier: Option<String>,

    /// Only print the report; do not alert on the display
    #[arg(long)]
    pub no_alert: bool,
}

impl PingCommand {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(repeat) = self.repeat {
            config.health.repeat_count = repeat;
        }
        if let Some(attempts) = self.attempts {
            config.health.max_attempts = attempts;
        }
        if let Some(address) = &self.notifier {
            config.notifier.address = address.clone();
        }
    }

    pub async fn execute(&self, mut config: Config, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);

        self.apply_overrides(&mut config);
        ensure_valid(&config)?;

        let health = &config.health;
        let check = PingAdapter::from_config(health).context("Failed to set up ping command")?;
        let monitor = HealthMonitor::new(Prober::new(Arc::new(check)));

        info!(hosts = health.hosts.len(), "Checking hosts");
        let report = monitor.check(&health.hosts, health.max_attempts).await;

        let alerts = if report.is_empty() || self.no_alert {
            None
        } else {
            let display = DisplayClient::new(
                &config.notifier.address,
                Duration::from_secs(config.notifier.request_timeout_secs),
            )
            .context("Failed to create display client")?;
            let alerter = Alerter::new(Arc::new(display), &config.alert);
            Some(alerter.alert(report.names(), health.repeat_count).await)
        };

        if format.is_json() {
            formatter.print_json(&serde_json::json!({
                "checked": health.hosts.len(),
                "unresponsive": report.names(),
                "alerts": alerts,
            }));
            return Ok(());
        }

        if report.is_empty() {
            formatter.success(&format!("All {} hosts responsive", health.hosts.len()));
            return Ok(());
        }

        formatter.warn(&format!(
            "{} of {} hosts unresponsive",
            report.len(),
            health.hosts.len()
        ));
        for name in report.names() {
            formatter.info(&format!("- {name}"));
        }
        if let Some(summary) = alerts {
            if summary.failed > 0 || !summary.orientation_set {
                formatter.warn(&format!(
                    "Display alerts: {} delivered, {} failed",
                    summary.delivered, summary.failed
                ));
            } else {
                formatter.info(&format!("Display alerts delivered: {}", summary.delivered));
            }
        }
        Ok(())
    }
}

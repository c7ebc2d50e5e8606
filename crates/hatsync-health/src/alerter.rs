//! Offline alerts on the remote display
//!
//! Sets the display orientation once, then cycles `repeat_count` times over
//! the unresponsive host names, posting one scrolling message per name.
//! Every post is best-effort.

use std::sync::Arc;

use hatsync_core::config::AlertConfig;
use hatsync_core::ports::{DisplayText, IDisplayNotifier, Rgb};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Message shown for an unresponsive host
pub fn offline_message(name: &str) -> String {
    format!("!! {name} is offline !!")
}

/// Delivery counts for one alert run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub orientation_set: bool,
    pub delivered: usize,
    pub failed: usize,
}

/// Posts offline alerts to the display
pub struct Alerter {
    display: Arc<dyn IDisplayNotifier>,
    orientation: Value,
    text_color: Rgb,
    back_color: Rgb,
    scroll: bool,
}

impl Alerter {
    pub fn new(display: Arc<dyn IDisplayNotifier>, config: &AlertConfig) -> Self {
        Self {
            display,
            orientation: config.orientation.clone(),
            text_color: config.text_color,
            back_color: config.back_color,
            scroll: config.scroll,
        }
    }

    fn message_for(&self, name: &str) -> DisplayText {
        DisplayText {
            text_str: offline_message(name),
            text_color: self.text_color,
            back_color: self.back_color,
            scroll: self.scroll,
        }
    }

    /// Alerts on every name in `names`, `repeat_count` passes
    ///
    /// Names are shown in the given order within a pass. A failed post is
    /// logged and counted; later posts are still attempted.
    #[tracing::instrument(skip_all, fields(hosts = names.len(), repeat_count = repeat_count))]
    pub async fn alert(&self, names: &[String], repeat_count: u32) -> AlertSummary {
        let mut summary = AlertSummary::default();

        match self.display.set_orientation(&self.orientation).await {
            Ok(()) => summary.orientation_set = true,
            Err(e) => warn!(error = %e, "Failed to set display orientation"),
        }

        for pass in 1..=repeat_count {
            for name in names {
                match self.display.display_text(&self.message_for(name)).await {
                    Ok(()) => {
                        debug!(pass, host = %name, "Alert shown");
                        summary.delivered += 1;
                    }
                    Err(e) => {
                        warn!(pass, host = %name, error = %e, "Failed to show alert");
                        summary.failed += 1;
                    }
                }
            }
        }

        info!(delivered = summary.delivered, failed = summary.failed, "Alerts sent");
        summary
    }
}

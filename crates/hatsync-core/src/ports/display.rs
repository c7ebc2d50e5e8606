//! Remote display port (driven/secondary port)
//!
//! The display is a small HTTP-controlled LED matrix. Each method maps to
//! one endpoint; an implementation returns `Ok(())` only when the display
//! accepted the command.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because transport errors are adapter-specific.
//! - A rejected command (non-success status) is an `Err`, the same as a
//!   connection failure. Callers that only need reachability treat both
//!   alike.
//! - Image, animation and orientation payloads are opaque JSON owned by the
//!   display firmware, so they are passed through as `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An RGB colour triple as understood by the display
pub type Rgb = [u8; 3];

/// A scrolling text message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayText {
    /// Message shown on the display
    pub text_str: String,
    /// Foreground colour
    pub text_color: Rgb,
    /// Background colour
    pub back_color: Rgb,
    /// Whether the text scrolls
    pub scroll: bool,
}

/// Port trait for driving the remote status display
#[async_trait::async_trait]
pub trait IDisplayNotifier: Send + Sync {
    /// Replaces the displayed image (`POST /post-set-img/`)
    async fn set_image(&self, image: &Value) -> anyhow::Result<()>;

    /// Starts or stops an animation (`POST /post_rotation/`)
    async fn set_rotation(&self, rotation: &Value) -> anyhow::Result<()>;

    /// Restores the display's default view (`GET /show_temp/`)
    async fn show_default(&self) -> anyhow::Result<()>;

    /// Sets the display orientation (`POST /post_orientation/`)
    async fn set_orientation(&self, orientation: &Value) -> anyhow::Result<()>;

    /// Shows a text message (`POST /post_display_text/`)
    async fn display_text(&self, text: &DisplayText) -> anyhow::Result<()>;
}

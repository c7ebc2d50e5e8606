//! Remote display HTTP client
//!
//! Wraps `reqwest::Client` with endpoint construction for the display's
//! small HTTP API. Every call is a single request with no retry: the display
//! is best-effort and callers decide what a failure means.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use hatsync_display::DisplayClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = DisplayClient::new("192.168.1.155:8082", Duration::from_secs(10))?;
//! client.show_default_view().await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use hatsync_core::ports::{DisplayText, IDisplayNotifier};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::DisplayError;

/// `POST` - replace the displayed image
pub const SET_IMAGE_PATH: &str = "/post-set-img/";
/// `POST` - start or kill an animation
pub const ROTATION_PATH: &str = "/post_rotation/";
/// `GET` - restore the default (temperature) view
pub const SHOW_DEFAULT_PATH: &str = "/show_temp/";
/// `POST` - set the display orientation
pub const ORIENTATION_PATH: &str = "/post_orientation/";
/// `POST` - show scrolling text
pub const DISPLAY_TEXT_PATH: &str = "/post_display_text/";

/// HTTP client for the remote status display
pub struct DisplayClient {
    client: Client,
    base_url: String,
}

impl DisplayClient {
    /// Creates a client for the display listening on `address`
    ///
    /// # Arguments
    /// * `address` - `host:port`, or a full `http://` URL
    /// * `timeout` - Per-request timeout
    pub fn new(address: &str, timeout: Duration) -> Result<Self, DisplayError> {
        let address = address.trim().trim_end_matches('/');
        if address.is_empty() {
            return Err(DisplayError::InvalidAddress(address.to_string()));
        }
        let base_url = if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("http://{address}")
        };
        Self::with_base_url(base_url, timeout)
    }

    /// Creates a client with an explicit base URL (useful for testing)
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DisplayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Returns the base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a request builder for `path` relative to the base URL
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<(), DisplayError> {
        let response = request.send().await.map_err(|e| {
            warn!(endpoint, error = %e, "Display request failed");
            DisplayError::NetworkError(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(endpoint, status = status.as_u16(), "Display rejected command");
            return Err(DisplayError::Rejected { endpoint, status });
        }

        debug!(endpoint, "Display accepted command");
        Ok(())
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &'static str,
        body: &T,
    ) -> Result<(), DisplayError> {
        let request = self.request(Method::POST, endpoint).json(body);
        self.send(endpoint, request).await
    }

    /// Replaces the displayed image
    pub async fn post_image(&self, image: &Value) -> Result<(), DisplayError> {
        self.post_json(SET_IMAGE_PATH, image).await
    }

    /// Starts or kills an animation
    pub async fn post_rotation(&self, rotation: &Value) -> Result<(), DisplayError> {
        self.post_json(ROTATION_PATH, rotation).await
    }

    /// Restores the default view
    pub async fn show_default_view(&self) -> Result<(), DisplayError> {
        let request = self.request(Method::GET, SHOW_DEFAULT_PATH);
        self.send(SHOW_DEFAULT_PATH, request).await
    }

    /// Sets the display orientation
    pub async fn post_orientation(&self, orientation: &Value) -> Result<(), DisplayError> {
        self.post_json(ORIENTATION_PATH, orientation).await
    }

    /// Shows scrolling text
    pub async fn post_text(&self, text: &DisplayText) -> Result<(), DisplayError> {
        self.post_json(DISPLAY_TEXT_PATH, text).await
    }
}

#[async_trait::async_trait]
impl IDisplayNotifier for DisplayClient {
    async fn set_image(&self, image: &Value) -> anyhow::Result<()> {
        Ok(self.post_image(image).await?)
    }

    async fn set_rotation(&self, rotation: &Value) -> anyhow::Result<()> {
        Ok(self.post_rotation(rotation).await?)
    }

    async fn show_default(&self) -> anyhow::Result<()> {
        Ok(self.show_default_view().await?)
    }

    async fn set_orientation(&self, orientation: &Value) -> anyhow::Result<()> {
        Ok(self.post_orientation(orientation).await?)
    }

    async fn display_text(&self, text: &DisplayText) -> anyhow::Result<()> {
        Ok(self.post_text(text).await?)
    }
}

//! Document delivery configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for locating and serving private document assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Root directory holding the private assets.
    #[serde(default = "default_asset_root")]
    pub asset_root: String,
    /// File-name template. `{slug}` is replaced by the slug, `{SLUG}` by its
    /// uppercase form.
    #[serde(default = "default_file_name_template")]
    pub file_name_template: String,
    /// Content type of delivered assets.
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Overall deadline for session lookup and asset read, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Echo internal error detail in responses. Never enable in production.
    #[serde(default)]
    pub development_mode: bool,
}

impl DeliveryConfig {
    /// Request deadline as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            asset_root: default_asset_root(),
            file_name_template: default_file_name_template(),
            content_type: default_content_type(),
            request_timeout_ms: default_request_timeout_ms(),
            development_mode: false,
        }
    }
}

fn default_asset_root() -> String {
    "./private_storage/documents".to_string()
}

fn default_file_name_template() -> String {
    "{slug}.pdf".to_string()
}

fn default_content_type() -> String {
    "application/pdf".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

use std::{env, time::Duration};

use crate::endpoints::DEFAULT_DATA_CENTRE;

/// Default API domain.
pub const DEFAULT_API_DOMAIN: &str = "caldera.io";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token sent with every request (default: empty)
    pub access_token: String,
    /// Data centre id (default: "us")
    pub data_centre: String,
    /// Domain the data-centre hosts live under (default: "caldera.io")
    pub api_domain: String,
    /// Per-request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CALDERA_ACCESS_TOKEN` - Bearer token (default: empty)
    /// - `CALDERA_DATA_CENTRE` - Data centre id (default: "us")
    /// - `CALDERA_API_DOMAIN` - API domain (default: "caldera.io")
    /// - `CALDERA_TIMEOUT_SECONDS` - Request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        Self {
            access_token: env::var("CALDERA_ACCESS_TOKEN").unwrap_or_default(),
            data_centre: env::var("CALDERA_DATA_CENTRE")
                .unwrap_or_else(|_| DEFAULT_DATA_CENTRE.to_string()),
            api_domain: env::var("CALDERA_API_DOMAIN")
                .unwrap_or_else(|_| DEFAULT_API_DOMAIN.to_string()),
            timeout_seconds: env::var("CALDERA_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

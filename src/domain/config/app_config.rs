//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::recording::Duration;

/// Default backend address, matching a local development server
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server_url: Option<String>,
    pub max_duration: Option<String>,
    pub prep_time: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            server_url: Some(DEFAULT_SERVER_URL.to_string()),
            max_duration: Some("2m".to_string()),
            prep_time: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            server_url: other.server_url.or(self.server_url),
            max_duration: other.max_duration.or(self.max_duration),
            prep_time: other.prep_time.or(self.prep_time),
        }
    }

    /// Get the server URL, or the local default if not set
    pub fn server_url_or_default(&self) -> String {
        self.server_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    /// Get max_duration as parsed Duration, or the default answer window
    pub fn max_duration_or_default(&self) -> Duration {
        self.max_duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_max_response)
    }

    /// Get prep_time as parsed Duration; None means no prep countdown
    pub fn prep_time_parsed(&self) -> Option<Duration> {
        self.prep_time.as_ref().and_then(|s| s.parse().ok())
    }
}

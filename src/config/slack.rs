//! Slack configuration (period announcements)

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Slack configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SlackConfig {
    /// Web API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bot token; announcements are disabled when empty
    #[serde(default)]
    pub bot_token: String,

    /// Channel that receives period announcements
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SlackConfig {
    /// Returns true when a bot token is configured
    pub fn is_enabled(&self) -> bool {
        !self.bot_token.is_empty()
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate Slack configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_enabled() {
            return Ok(());
        }
        if !self.bot_token.starts_with("xoxb-") {
            return Err(ValidationError::InvalidSlackToken);
        }
        if !self.channel.starts_with('#') {
            return Err(ValidationError::InvalidSlackChannel);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            bot_token: String::new(),
            channel: default_channel(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://slack.com/api".to_string()
}

fn default_channel() -> String {
    "#general".to_string()
}

fn default_timeout() -> u64 {
    10
}

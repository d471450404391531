//! Client configuration.
//!
//! Built in code or loaded from TOML:
//!
//! ```toml
//! api_key = "9d2b38a5-..."
//! base_url = "https://public-api.robopost.app"
//! timeout_ms = 30000
//! channel_policy = "require_at_least_one"
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ApiError, ConfigError};

pub const DEFAULT_BASE_URL: &str = "https://public-api.robopost.app";

/// Whether a scheduled post may target zero channels.
///
/// The strictest server revision requires at least one channel id; older
/// ones accept an empty list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelPolicy {
    #[default]
    RequireAtLeastOne,
    AllowEmpty,
}

#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds. Absent means the transport never
    /// times out.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub channel_policy: ChannelPolicy,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_ms: None,
            channel_policy: ChannelPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_channel_policy(mut self, policy: ChannelPolicy) -> Self {
        self.channel_policy = policy;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ApiError> {
        let config: ClientConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Read)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField("api_key".to_string()).into());
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("base_url".to_string()).into());
        }
        if self.timeout_ms == Some(0) {
            return Err(ApiError::Config(ConfigError::Invalid(
                "timeout_ms must be at least 1".to_string(),
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("channel_policy", &self.channel_policy)
            .finish()
    }
}

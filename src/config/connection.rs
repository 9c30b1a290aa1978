//! Connection settings for a JIRA instance.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ConfigError, Result};

/// Directory name under the platform configuration directory.
const CONFIG_DIR_NAME: &str = "jira-rest-client";

/// File name of the connection configuration.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Base URL and credentials used for every request of a client.
///
/// Immutable once handed to [`JiraClient`](crate::JiraClient).
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// The JIRA instance URL (e.g., "https://jira.example.com").
    pub base_url: String,

    /// The username used for Basic authentication.
    pub username: String,

    /// The password or API token.
    pub password: String,

    /// Request timeout in seconds. No timeout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ConnectionConfig {
    /// Create a configuration without a timeout.
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            timeout_secs: None,
        }
    }

    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if the text is not a valid configuration.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading connection configuration");

        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from [`ConnectionConfig::default_path`].
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined or the file cannot
    /// be loaded.
    pub fn load_default() -> Result<Self> {
        Self::load(Self::default_path()?)
    }

    /// Path of the configuration file in the platform configuration directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if the platform has no configuration directory.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Validate this configuration.
    ///
    /// Checks that:
    /// - The URL is non-empty and starts with http:// or https://
    /// - The username is non-empty
    /// - The password is non-empty
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "base URL cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "base URL '{}' must start with http:// or https://",
                self.base_url
            )));
        }

        if self.username.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "username cannot be empty".to_string(),
            ));
        }

        if self.password.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "password for '{}' cannot be empty",
                self.username
            )));
        }

        Ok(())
    }

    /// The configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

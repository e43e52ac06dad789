/// Application configuration
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use vibebeat_client::{ClientConfig, RetryPolicy};
use vibebeat_playback::PlaybackConfig;

/// Default config file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "vibebeat.toml";

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Retries for idempotent requests after a network failure or timeout
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionSettings {
    /// JSON file holding the remembered user, likes and history
    #[serde(default = "default_session_path")]
    pub path: PathBuf,

    #[serde(default = "default_autosave_interval_secs")]
    pub autosave_interval_secs: u64,
}

impl AppConfig {
    /// Load configuration from file and environment.
    ///
    /// `path` overrides the default `vibebeat.toml`; an explicit path must
    /// exist. Environment variables use the `VIBEBEAT_` prefix and `__`
    /// between sections, e.g. `VIBEBEAT_SERVER__URL`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("VIBEBEAT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.server.url.trim();
        if url.is_empty() {
            return Err(AppError::Config(
                "Server URL is required (set VIBEBEAT_SERVER__URL)".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "Server URL must start with http:// or https://: {}",
                url
            )));
        }
        if self.server.request_timeout_secs == 0 || self.server.connect_timeout_secs == 0 {
            return Err(AppError::Config("Timeouts must be non-zero".to_string()));
        }
        if self.playback.volume > 100 {
            return Err(AppError::Config(format!(
                "Volume must be between 0 and 100, got {}",
                self.playback.volume
            )));
        }
        if self.session.autosave_interval_secs == 0 {
            return Err(AppError::Config(
                "Autosave interval must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.server.url.trim())
            .with_request_timeout(Duration::from_secs(self.server.request_timeout_secs))
            .with_retry(RetryPolicy {
                max_retries: self.server.max_retries,
                backoff: Duration::from_millis(self.server.retry_backoff_ms),
            });
        config.connect_timeout = Duration::from_secs(self.server.connect_timeout_secs);
        config
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.session.autosave_interval_secs)
    }
}

// Default values
fn default_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    1
}

fn default_retry_backoff_ms() -> u64 {
    250
}

fn default_session_path() -> PathBuf {
    PathBuf::from("./data/session.json")
}

fn default_autosave_interval_secs() -> u64 {
    30
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            path: default_session_path(),
            autosave_interval_secs: default_autosave_interval_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.autosave_interval(), Duration::from_secs(30));

        let client = config.client_config();
        assert_eq!(client.request_timeout, Duration::from_secs(30));
        assert_eq!(client.connect_timeout, Duration::from_secs(10));
        assert_eq!(client.retry.max_retries, 1);
    }

    #[test]
    fn rejects_bad_url() {
        let mut config = AppConfig::default();
        config.server.url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.server.url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.server.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}

//! Configuration management for circulars

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::share::ShareTemplate;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/circulars";

pub const ENDPOINT_ENV: &str = "CIRCULARS_ENDPOINT";
pub const SHARE_COMMAND_ENV: &str = "CIRCULARS_SHARE_COMMAND";
/// Overrides the directory holding preferences and the TUI log
pub const DATA_DIR_ENV: &str = "CIRCULARS_DATA_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("ui.tick_ms must be greater than zero")]
    ZeroTick,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub share: ShareConfig,
    pub viewer: ViewerConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub endpoint: String,
    /// Request timeout; unset means the request waits as long as the server does
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// External command that receives the share message on stdin
    pub command: Option<String>,
    pub header: String,
    pub footer: String,
    /// Allow the OSC 52 escape sequence when no system clipboard is reachable
    pub osc52: bool,
}

impl Default for ShareConfig {
    fn default() -> Self {
        let template = ShareTemplate::default();
        Self {
            command: None,
            header: template.header,
            footer: template.footer,
            osc52: true,
        }
    }
}

impl ShareConfig {
    pub fn template(&self) -> ShareTemplate {
        ShareTemplate {
            header: self.header.clone(),
            footer: self.footer.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Probe documents over HTTP when the viewer opens
    pub probe: bool,
    /// Command used to open a document outside the terminal
    pub opener: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            probe: true,
            opener: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_ms: u64,
    pub toast_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            toast_secs: 3,
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }
}

impl Config {
    /// Load configuration from default location or fall back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "circulars") {
            Ok(proj_dirs.config_dir().join("config.toml"))
        } else {
            Ok(PathBuf::from("config.toml"))
        }
    }

    /// Directory for preferences and logs, created on demand
    pub fn data_dir() -> Result<PathBuf> {
        let dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => match directories::ProjectDirs::from("", "", "circulars") {
                Some(proj_dirs) => proj_dirs.data_dir().to_path_buf(),
                None => PathBuf::from(".circulars"),
            },
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        Ok(dir)
    }

    /// Apply environment overrides on top of the file values
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENDPOINT_ENV).ok(),
            std::env::var(SHARE_COMMAND_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, endpoint: Option<String>, share_command: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.http.endpoint = endpoint.trim().to_string();
        }
        if let Some(command) = share_command.filter(|c| !c.trim().is_empty()) {
            self.share.command = Some(command);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = &self.http.endpoint;
        let url = url::Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: endpoint.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.ui.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.http.endpoint, DEFAULT_ENDPOINT);
        assert!(config.http.timeout_secs.is_none());
        assert!(config.share.command.is_none());
        assert_eq!(config.share.template(), ShareTemplate::default());
        assert_eq!(config.ui.toast_duration(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config.http.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[http]
endpoint = "https://circulars.example/api/circulars"
timeout_secs = 10

[share]
command = "wl-copy"
footer = "Sent from my terminal"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.http.endpoint, "https://circulars.example/api/circulars");
        assert_eq!(config.http.timeout_secs, Some(10));
        assert_eq!(config.share.command.as_deref(), Some("wl-copy"));
        assert_eq!(config.share.header, "DTE Karnataka Circular");
        assert_eq!(config.share.footer, "Sent from my terminal");
        assert!(config.viewer.probe);
        assert_eq!(config.ui.tick_ms, 100);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[http\nendpoint = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let mut config = Config::default();
        config.apply_overrides(Some("  ".to_string()), Some(String::new()));
        assert_eq!(config.http.endpoint, DEFAULT_ENDPOINT);
        assert!(config.share.command.is_none());

        config.apply_overrides(
            Some(" http://10.0.0.2:5000/api/circulars ".to_string()),
            Some("termux-share".to_string()),
        );
        assert_eq!(config.http.endpoint, "http://10.0.0.2:5000/api/circulars");
        assert_eq!(config.share.command.as_deref(), Some("termux-share"));
    }

    #[test]
    fn test_validate_rejects_bad_endpoints() {
        let mut config = Config::default();
        config.http.endpoint = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));

        config.http.endpoint = "ftp://example.com/circulars".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        let mut config = Config::default();
        config.ui.tick_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTick)));
    }
}

//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.
//!
//! Configuration is resolved once at startup and handed to the components
//! that need it; nothing mutates it afterwards.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Base address used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Request timeout applied to every call
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Environment variable holding the backend base address
pub const BASE_URL_ENV: &str = "PASTURE_API_URL";

/// Environment variable holding the request timeout in milliseconds
pub const TIMEOUT_ENV: &str = "PASTURE_TIMEOUT_MS";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Shared API client configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra headers sent on every request, on top of the JSON content type
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            headers: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at a specific backend, other settings default
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            ..Default::default()
        }
    }

    /// Client config from the process environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }

    /// Headers sent on every request
    ///
    /// Always starts with `Content-Type: application/json`; configured
    /// headers are layered on top.
    pub fn default_headers(&self) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigError::InvalidHeader {
                    name: name.clone(),
                    error: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeader {
                    name: name.clone(),
                    error: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    fn apply_env_overrides(&mut self) {
        let env_url = std::env::var(BASE_URL_ENV).ok();
        self.base_url = resolve_base_url(env_url.as_deref(), &self.base_url);

        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            match timeout.parse() {
                Ok(ms) => self.timeout_ms = ms,
                Err(e) => tracing::warn!(
                    value = %timeout,
                    error = %e,
                    timeout_ms = self.timeout_ms,
                    "Ignoring invalid {}", TIMEOUT_ENV
                ),
            }
        }
    }
}

/// Pick the base address from an environment-provided value
///
/// An absent or empty value keeps `fallback`. Either way a trailing `/`
/// is trimmed.
pub fn resolve_base_url(env_value: Option<&str>, fallback: &str) -> String {
    match env_value {
        Some(url) if !url.is_empty() => normalize_base_url(url),
        _ => normalize_base_url(fallback),
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(content)?;
        config.client.base_url = normalize_base_url(&config.client.base_url);
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("pasture").join("config.toml")),
            Some(PathBuf::from("/etc/pasture/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.client.apply_env_overrides();

        if let Ok(level) = std::env::var("PASTURE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PASTURE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid header {name:?}: {error}")]
    InvalidHeader { name: String, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Pasture Dashboard Configuration
#
# Environment variables override these settings:
# - PASTURE_API_URL
# - PASTURE_TIMEOUT_MS
# - PASTURE_LOG_LEVEL
# - PASTURE_LOG_FORMAT

[client]
# Backend API base address
base_url = "http://localhost:8000"

# Timeout applied to every request (ms)
timeout_ms = 10000

# Extra headers sent with every request.
# Content-Type: application/json is always sent.
[client.headers]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

//! TOML-based configuration for GreenAyu
//!
//! All settings live in one file (`greenayu.toml`). Every section and field
//! has a default, so a missing file is not an error: the client then talks
//! to a backend on `http://127.0.0.1:8000` and keeps its session under
//! `./data/session.json`.
//!
//! # Environment
//!
//! `.env` is loaded first (see [`load_dotenv`]). `GREENAYU_BASE_URL`, when
//! set, replaces `backend.base_url`.

use greenayu_core::RouteGuard;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable overriding `backend.base_url`.
pub const BASE_URL_ENV: &str = "GREENAYU_BASE_URL";

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "greenayu.toml";

/// Root configuration structure loaded from greenayu.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GreenAyuConfig {
    /// Inference backend.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Session persistence.
    #[serde(default)]
    pub session: SessionConfig,

    /// Route guard behaviour.
    #[serde(default)]
    pub guard: GuardConfig,

    /// Static shell host.
    #[serde(default)]
    pub server: ServerConfig,
}

// ============= Backend Configuration =============

/// Where feature requests go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL every feature endpoint is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client-side request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============= Session Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// JSON file emulating browser local storage.
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

fn default_session_path() -> PathBuf {
    PathBuf::from("./data/session.json")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

// ============= Guard Configuration =============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Append `?next=<path>` to login redirects.
    #[serde(default)]
    pub preserve_destination: bool,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Built frontend served by `greenayu serve`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("ui/dist")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            log_level: default_log_level(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Loads `.env` from the working directory (or a parent) if present.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => debug!("Ignoring unreadable .env: {}", e),
    }
}

impl GreenAyuConfig {
    /// Load configuration from a TOML file, apply env overrides and validate.
    ///
    /// A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::load_file(path)?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a file without env overrides or validation.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            info!(
                "No configuration at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Renders the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Applies overrides read through `lookup` (normally the process env).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            debug!("{} overrides backend.base_url", BASE_URL_ENV);
            self.backend.base_url = url.trim().to_string();
        }
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "backend.base_url must start with http:// or https://, got '{}'",
                self.backend.base_url
            )));
        }
        if url.len() <= "https://".len() && url.trim_end_matches('/').ends_with(':') {
            return Err(ConfigError::ValidationError(
                "backend.base_url has no host".to_string(),
            ));
        }

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "backend.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".to_string(),
            ));
        }

        if self.session.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "session.path must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Route guard configured from `[guard]`.
    pub fn route_guard(&self) -> RouteGuard {
        RouteGuard::new().preserve_destination(self.guard.preserve_destination)
    }

    /// `host:port` the shell host binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn create_test_config() -> String {
        r#"
[backend]
base_url = "http://10.0.0.5:5000"
timeout_secs = 12

[session]
path = "/tmp/greenayu/session.json"

[guard]
preserve_destination = true

[server]
host = "0.0.0.0"
port = 8080
static_dir = "dist"
log_level = "debug"
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config = GreenAyuConfig::from_toml(&create_test_config()).expect("Failed to parse config");

        assert_eq!(config.backend.base_url, "http://10.0.0.5:5000");
        assert_eq!(config.backend.timeout(), Duration::from_secs(12));
        assert_eq!(config.session.path, PathBuf::from("/tmp/greenayu/session.json"));
        assert!(config.guard.preserve_destination);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.server.static_dir, PathBuf::from("dist"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = GreenAyuConfig::from_toml("").unwrap();

        assert_eq!(config, GreenAyuConfig::default());
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.session.path, PathBuf::from("./data/session.json"));
        assert!(!config.guard.preserve_destination);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_level, "info");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = GreenAyuConfig::from_toml("[backend]\ntimeout_secs = 5\n").unwrap();

        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_env_override() {
        let env: HashMap<&str, &str> = [(BASE_URL_ENV, " https://api.greenayu.lk ")].into();
        let mut config = GreenAyuConfig::default();

        config.apply_env_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.backend.base_url, "https://api.greenayu.lk");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let mut config = GreenAyuConfig::default();
        config.apply_env_overrides(|_| Some("   ".to_string()));
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = GreenAyuConfig::default();
        config.backend.base_url = "ftp://example.com".into();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = GreenAyuConfig::default();
        config.backend.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = GreenAyuConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = GreenAyuConfig::default();
        config.backend.base_url = "http://".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let result = GreenAyuConfig::from_toml("[backend\nbase_url = 1");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = GreenAyuConfig::from_toml(&create_test_config()).unwrap();
        let rendered = config.to_toml().unwrap();
        assert_eq!(GreenAyuConfig::from_toml(&rendered).unwrap(), config);
    }

    #[test]
    fn test_route_guard_follows_config() {
        let mut config = GreenAyuConfig::default();
        config.guard.preserve_destination = true;

        let access = config.route_guard().authorize("/features/yield", None);
        assert_eq!(
            access,
            greenayu_core::Access::Redirect {
                to: "/login?next=/features/yield".to_string()
            }
        );
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = GreenAyuConfig::load_file(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, GreenAyuConfig::default());
    }
}

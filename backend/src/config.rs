//! Service configuration.
//!
//! Settings come from an optional TOML file, then environment variables
//! override individual values:
//!
//! - `DINING_CONFIG`: path to the TOML file (otherwise `dining.toml` is
//!   searched for in the standard locations, and defaults apply if absent)
//! - `HOST`, `PORT`: listen address (default `0.0.0.0:5010`)
//! - `REFRESH_INTERVAL_SECS`: refresh period (default 600)
//! - `DINING_SOURCE_FILE`: read locations from this JSON file
//! - `DINING_SOURCE_URL`: fetch locations from this URL (wins over the file)
//! - `STRICT_TIME_PARAMS`: `true`/`false`

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::guard::DEFAULT_MAX_RECORD_DROP;
use crate::query::TimeParamPolicy;
use crate::scheduler::DEFAULT_REFRESH_INTERVAL;

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub refresh: RefreshSettings,
    pub source: SourceSettings,
    pub query: QuerySettings,
}

/// Listen address settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Refresh cycle settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_max_record_drop")]
    pub max_record_drop: usize,
}

/// Which upstream the snapshot is fetched from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    File,
    Http,
}

/// Snapshot source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default = "default_source_path")]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Query handling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySettings {
    /// Reject malformed or out-of-range time path parameters
    #[serde(default = "default_true")]
    pub strict_time_params: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5010
}

fn default_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL.as_secs()
}

fn default_max_record_drop() -> usize {
    DEFAULT_MAX_RECORD_DROP
}

fn default_source_path() -> Option<PathBuf> {
    Some(PathBuf::from("data/locations.json"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_record_drop: default_max_record_drop(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            path: default_source_path(),
            url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            strict_time_params: default_true(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the file named by `DINING_CONFIG` or found in a standard
    /// location, apply environment overrides and validate.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os("DINING_CONFIG") {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::from_default_location()?,
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Searches for `dining.toml` in the current directory and `backend/`;
    /// falls back to defaults when none exists.
    fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("dining.toml"),
            PathBuf::from("backend/dining.toml"),
        ];

        match search_paths.iter().find(|path| path.exists()) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_env("PORT", &port)?;
        }
        if let Some(secs) = lookup("REFRESH_INTERVAL_SECS") {
            self.refresh.interval_secs = parse_env("REFRESH_INTERVAL_SECS", &secs)?;
        }
        if let Some(path) = lookup("DINING_SOURCE_FILE") {
            self.source.kind = SourceKind::File;
            self.source.path = Some(PathBuf::from(path));
        }
        if let Some(url) = lookup("DINING_SOURCE_URL") {
            self.source.kind = SourceKind::Http;
            self.source.url = Some(url);
        }
        if let Some(strict) = lookup("STRICT_TIME_PARAMS") {
            self.query.strict_time_params = parse_env("STRICT_TIME_PARAMS", &strict)?;
        }
        Ok(())
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "refresh.interval_secs must be greater than zero".to_string(),
            ));
        }
        match self.source.kind {
            SourceKind::File if self.source.path.is_none() => Err(ConfigError::Invalid(
                "source.path is required for a file source".to_string(),
            )),
            SourceKind::Http if self.source.url.as_deref().map_or(true, str::is_empty) => {
                Err(ConfigError::Invalid(
                    "source.url is required for an http source".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh.interval_secs)
    }

    pub fn time_param_policy(&self) -> TimeParamPolicy {
        if self.query.strict_time_params {
            TimeParamPolicy::Strict
        } else {
            TimeParamPolicy::Permissive
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.host.trim().parse().map_err(|e| {
            ConfigError::Invalid(format!("Invalid listen host {:?}: {}", self.server.host, e))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

fn parse_env<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::Invalid(format!("{}={:?}: {}", key, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5010);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.refresh_interval(), Duration::from_secs(600));
        assert_eq!(config.refresh.max_record_drop, 1);
        assert_eq!(config.source.kind, SourceKind::File);
        assert_eq!(config.time_param_policy(), TimeParamPolicy::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[refresh]
interval_secs = 60
max_record_drop = 3

[source]
kind = "http"
url = "https://example.org/locations.json"
timeout_secs = 5

[query]
strict_time_params = false
"#;
        let config = AppConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.refresh.max_record_drop, 3);
        assert_eq!(config.source.kind, SourceKind::Http);
        assert_eq!(config.source.timeout(), Duration::from_secs(5));
        assert_eq!(config.time_param_policy(), TimeParamPolicy::Permissive);
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let config = AppConfig::from_toml_str("[server]\nport = 6000\n").unwrap();
        assert_eq!(config.server.port, 6000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            AppConfig::from_toml_str("[server\nport = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            AppConfig::from_file("/nonexistent/dining.toml"),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("PORT", "7000"),
                ("REFRESH_INTERVAL_SECS", "30"),
                ("DINING_SOURCE_URL", "http://upstream/locations"),
                ("STRICT_TIME_PARAMS", "false"),
            ]))
            .unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.refresh.interval_secs, 30);
        assert_eq!(config.source.kind, SourceKind::Http);
        assert_eq!(config.source.url.as_deref(), Some("http://upstream/locations"));
        assert!(!config.query.strict_time_params);
    }

    #[test]
    fn test_url_override_wins_over_file() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("DINING_SOURCE_FILE", "/tmp/locations.json"),
                ("DINING_SOURCE_URL", "http://upstream/locations"),
            ]))
            .unwrap();
        assert_eq!(config.source.kind, SourceKind::Http);
    }

    #[test]
    fn test_bad_port_override() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[("PORT", "not-a-port")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_socket_addr_accepts_ipv6_host() {
        let mut config = AppConfig::default();
        config.server.host = "::".to_string();
        let addr = config.socket_addr().unwrap();
        assert!(addr.is_ipv6());
        assert_eq!(addr.port(), 5010);
        assert_eq!(addr.to_string(), "[::]:5010");

        config.server.host = "::1".to_string();
        assert_eq!(config.socket_addr().unwrap().to_string(), "[::1]:5010");
    }

    #[test]
    fn test_socket_addr_rejects_hostname() {
        let mut config = AppConfig::default();
        config.server.host = "not a host".to_string();
        assert!(matches!(config.socket_addr(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = AppConfig::default();
        config.refresh.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_url_for_http() {
        let mut config = AppConfig::default();
        config.source.kind = SourceKind::Http;
        assert!(config.validate().is_err());
        config.source.url = Some(String::new());
        assert!(config.validate().is_err());
    }
}

//! `AppConfig::load` against the process environment.

mod support;

use std::io::Write;
use std::time::Duration;

use dining_api::config::SourceKind;
use dining_api::{AppConfig, ConfigError, TimeParamPolicy};

use support::with_config_env;

#[test]
fn test_load_with_env_overrides() {
    let config = with_config_env(
        &[
            ("PORT", "6123"),
            ("REFRESH_INTERVAL_SECS", "120"),
            ("DINING_SOURCE_URL", "https://upstream.example/locations"),
            ("STRICT_TIME_PARAMS", "false"),
        ],
        AppConfig::load,
    )
    .unwrap();

    assert_eq!(config.server.port, 6123);
    assert_eq!(config.refresh_interval(), Duration::from_secs(120));
    assert_eq!(config.source.kind, SourceKind::Http);
    assert_eq!(config.time_param_policy(), TimeParamPolicy::Permissive);
}

#[test]
fn test_load_from_config_file_then_env() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[server]\nport = 7001\n\n[source]\nkind = \"file\"\npath = \"/srv/dining/locations.json\"\n"
    )
    .unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let config = with_config_env(
        &[("DINING_CONFIG", path.as_str()), ("HOST", "127.0.0.1")],
        AppConfig::load,
    )
    .unwrap();

    assert_eq!(config.server.port, 7001);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(
        config.source.path.as_deref(),
        Some(std::path::Path::new("/srv/dining/locations.json"))
    );
}

#[test]
fn test_load_rejects_zero_interval() {
    let err = with_config_env(&[("REFRESH_INTERVAL_SECS", "0")], AppConfig::load).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_load_rejects_missing_config_file() {
    let err = with_config_env(
        &[("DINING_CONFIG", "/nonexistent/dining.toml")],
        AppConfig::load,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

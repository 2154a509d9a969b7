use std::collections::HashMap;
use std::path::PathBuf;

use hedsheet::state::config::{self, AppConfig, ConfigError};
use hedsheet::state::i18n::Language;

#[test]
fn test_load_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"service_url": "http://localhost:5000/hed/", "language": "zh-Hant"}"#,
    )
    .unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.service_url, "http://localhost:5000/hed/");
    assert_eq!(config.language(), Language::ZhHant);
    assert_eq!(config.validation_path, AppConfig::default().validation_path);
    assert_eq!(config.timeout_secs, None);
}

#[test]
fn test_load_invalid_json_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.json"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::load_from(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_env_overrides() {
    let vars = HashMap::from([
        (config::SERVICE_URL_ENV, "http://127.0.0.1:8080"),
        (config::DOWNLOAD_DIR_ENV, "/tmp/reports"),
        (config::LANGUAGE_ENV, "klingon"),
        (config::LOG_ENV, "debug"),
    ]);

    let mut config = AppConfig::default();
    config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(config.service_url, "http://127.0.0.1:8080");
    assert_eq!(config.download_dir(), PathBuf::from("/tmp/reports"));
    assert_eq!(config.language(), Language::En);
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_endpoint_joins_slashes() {
    let config = AppConfig {
        service_url: "http://host/hed/".to_string(),
        ..AppConfig::default()
    };
    assert_eq!(config.endpoint("/columns_info_results"), "http://host/hed/columns_info_results");
    assert_eq!(config.endpoint("versions"), "http://host/hed/versions");
}

#[test]
fn test_download_dir_falls_back_to_current_dir() {
    let config = AppConfig {
        download_dir: None,
        ..AppConfig::default()
    };
    assert_eq!(config.download_dir(), PathBuf::from("."));
}

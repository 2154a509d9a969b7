// Application configuration
// Loaded from $HEDSHEET_CONFIG or ~/.config/hedsheet/config.json, then overridden by env vars.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::state::i18n::Language;

pub const CONFIG_ENV: &str = "HEDSHEET_CONFIG";
pub const SERVICE_URL_ENV: &str = "HEDSHEET_SERVICE_URL";
pub const DOWNLOAD_DIR_ENV: &str = "HEDSHEET_DOWNLOAD_DIR";
pub const LANGUAGE_ENV: &str = "HEDSHEET_LANG";
pub const LOG_ENV: &str = "HEDSHEET_LOG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the validation service, without a trailing slash
    pub service_url: String,

    pub columns_info_path: String,
    pub validation_path: String,
    pub hed_versions_path: String,

    /// Where issue reports are written; falls back to the working directory
    pub download_dir: Option<PathBuf>,

    /// "en" or "zh-Hant"
    pub language: String,

    /// trace, debug, info, warn or error
    pub log_level: String,

    /// Whole-request timeout. None waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_url: "https://hedtools.org/hed".to_string(),
            columns_info_path: "/columns_info_results".to_string(),
            validation_path: "/spreadsheet_validation_results".to_string(),
            hed_versions_path: "/schema_versions_results".to_string(),
            download_dir: dirs::download_dir(),
            language: Language::En.code().to_string(),
            log_level: "info".to_string(),
            timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Reads the config file (if any) and applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(SERVICE_URL_ENV).filter(|v| !v.is_empty()) {
            self.service_url = url;
        }
        if let Some(dir) = lookup(DOWNLOAD_DIR_ENV).filter(|v| !v.is_empty()) {
            self.download_dir = Some(PathBuf::from(dir));
        }
        if let Some(lang) = lookup(LANGUAGE_ENV).filter(|v| Language::from_code(v).is_some()) {
            self.language = lang;
        }
        if let Some(level) = lookup(LOG_ENV).filter(|v| !v.is_empty()) {
            self.log_level = level;
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        let base = self.service_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    pub fn language(&self) -> Language {
        Language::from_code(&self.language).unwrap_or_default()
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("hedsheet").join("config.json"))
}

//! Configuration
//!
//! Resolution order: explicit overrides, then environment variables, then
//! `config.json` in the data directory, then defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::query::DEFAULT_RECENT_LIMIT;
use crate::repository::DEFAULT_STORAGE_KEY;

pub const CONFIG_FILE: &str = "config.json";
pub const ENV_DATA_DIR: &str = "AREA_MONITOR_DATA_DIR";
pub const ENV_LOG_DIR: &str = "AREA_MONITOR_LOG_DIR";
pub const ENV_BACKEND: &str = "AREA_MONITOR_BACKEND";
pub const ENV_STORAGE_KEY: &str = "AREA_MONITOR_STORAGE_KEY";

/// Where the snapshot is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Sqlite,
    /// Nothing survives the process; useful for demos and tests
    Memory,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown backend '{}' (expected sqlite or memory)", other)),
        }
    }
}

/// Credential pair checked by the configured authenticator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_file: String,
    pub storage_key: String,
    /// Defaults to `<data_dir>/logs`
    pub log_dir: Option<PathBuf>,
    pub recent_limit: usize,
    pub backend: BackendKind,
    pub credentials: Credentials,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            db_file: "area_monitor.db".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_dir: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
            backend: BackendKind::default(),
            credentials: Credentials::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".area-monitor"),
        None => PathBuf::from(".area-monitor"),
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub backend: Option<BackendKind>,
    pub storage_key: Option<String>,
}

/// Loaded config plus anything worth logging once a logger exists
#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub config: AppConfig,
    pub warnings: Vec<String>,
}

impl AppConfig {
    /// Resolve configuration from the process environment
    pub fn load(overrides: &ConfigOverrides) -> ConfigLoadResult {
        Self::load_with_env(overrides, |key| std::env::var(key).ok())
    }

    pub fn load_with_env<F>(overrides: &ConfigOverrides, env: F) -> ConfigLoadResult
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        let data_dir = overrides
            .data_dir
            .clone()
            .or_else(|| env(ENV_DATA_DIR).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        let mut config = match read_config_file(&data_dir.join(CONFIG_FILE)) {
            Ok(Some(config)) => config,
            Ok(None) => AppConfig::default(),
            Err(e) => {
                warnings.push(e);
                AppConfig::default()
            }
        };
        config.data_dir = data_dir;

        if let Some(dir) = env(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(value) = env(ENV_BACKEND) {
            match value.parse() {
                Ok(kind) => config.backend = kind,
                Err(e) => warnings.push(format!("{}: {}", ENV_BACKEND, e)),
            }
        }
        if let Some(key) = env(ENV_STORAGE_KEY) {
            config.storage_key = key;
        }

        if let Some(dir) = &overrides.log_dir {
            config.log_dir = Some(dir.clone());
        }
        if let Some(kind) = overrides.backend {
            config.backend = kind;
        }
        if let Some(key) = &overrides.storage_key {
            config.storage_key = key.clone();
        }

        if config.storage_key.trim().is_empty() {
            warnings.push("empty storage key, using default".to_string());
            config.storage_key = DEFAULT_STORAGE_KEY.to_string();
        }

        ConfigLoadResult { config, warnings }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("logs"))
    }
}

fn read_config_file(path: &Path) -> Result<Option<AppConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| format!("Ignoring invalid {}: {}", path.display(), e))
}

//! Settings service
//!
//! Manages application settings persistence using JSON file storage.

use crate::config::{DEFAULT_DATABASE_FILE, DEFAULT_KV_DIR, DEFAULT_LOG_FILTER, SETTINGS_FILE};
use crate::database::CorruptDataPolicy;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

/// Where the recipe collection is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    File,
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    /// SQLite file name, relative to the app data directory
    #[serde(default = "default_database_file")]
    pub database_file: String,
    /// Directory for the file backend, relative to the app data directory
    #[serde(default = "default_kv_dir")]
    pub kv_dir: String,
}

fn default_database_file() -> String {
    DEFAULT_DATABASE_FILE.to_string()
}

fn default_kv_dir() -> String {
    DEFAULT_KV_DIR.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_file: default_database_file(),
            kv_dir: default_kv_dir(),
        }
    }
}

/// Behavior when stored data cannot be read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecoverySettings {
    #[serde(default)]
    pub on_corrupt_data: CorruptDataPolicy,
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub recovery: RecoverySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Service for managing application settings
#[derive(Clone)]
pub struct SettingsService {
    settings_path: PathBuf,
}

impl SettingsService {
    pub fn new(app_data_dir: PathBuf) -> Self {
        Self {
            settings_path: app_data_dir.join(SETTINGS_FILE),
        }
    }

    /// Load settings from disk or create default if not exists
    pub async fn load(&self) -> Result<AppSettings> {
        if !self.settings_path.exists() {
            tracing::info!("Settings file not found, creating default settings");
            let default = AppSettings::default();
            self.save(&default).await?;
            return Ok(default);
        }

        let content = fs::read_to_string(&self.settings_path).await?;
        let settings: AppSettings = serde_json::from_str(&content)
            .map_err(|e| AppError::Generic(format!("Failed to parse settings: {}", e)))?;

        Ok(settings)
    }

    /// Save settings to disk
    pub async fn save(&self, settings: &AppSettings) -> Result<()> {
        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| AppError::Generic(format!("Failed to serialize settings: {}", e)))?;

        fs::write(&self.settings_path, content).await?;
        tracing::info!("Settings saved to {:?}", self.settings_path);

        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::LedgerError,
    storage::{DEFAULT_RETENTION_DAYS, DEFAULT_STORAGE_KEY, MAX_RETENTION_DAYS},
    utils::paths::{app_data_dir, config_file_in, ensure_dir, store_file_in, write_file_atomic},
};

/// User-adjustable settings, stored as JSON next to the data store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_storage_key")]
    pub storage_key: String,
    #[serde(default = "Config::default_retention_days")]
    pub retention_days: i64,
    /// Optional custom location for the key-value store document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_file: Option<PathBuf>,
    #[serde(default = "Config::default_color_output")]
    pub color_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: Self::default_storage_key(),
            retention_days: Self::default_retention_days(),
            store_file: None,
            color_output: Self::default_color_output(),
        }
    }
}

impl Config {
    pub fn default_storage_key() -> String {
        DEFAULT_STORAGE_KEY.into()
    }

    pub fn default_retention_days() -> i64 {
        DEFAULT_RETENTION_DAYS
    }

    pub fn default_color_output() -> bool {
        true
    }

    pub fn resolve_store_file(&self, base: &Path) -> PathBuf {
        self.store_file
            .clone()
            .unwrap_or_else(|| store_file_in(base))
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.storage_key.trim().is_empty() {
            return Err(LedgerError::Config("storage_key must not be empty".into()));
        }
        if !(1..=MAX_RETENTION_DAYS).contains(&self.retention_days) {
            return Err(LedgerError::Config(format!(
                "retention_days must be between 1 and {} (got {})",
                MAX_RETENTION_DAYS, self.retention_days
            )));
        }
        Ok(())
    }
}

/// Loads and saves [`Config`] under the application data directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the saved config, or defaults when none has been written yet.
    pub fn load(&self) -> Result<Config, LedgerError> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| LedgerError::Config(err.to_string()))?
        } else {
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_file_atomic(&self.path, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage_key, "transactions");
        assert_eq!(config.retention_days, 365);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            storage_key: "household".into(),
            retention_days: 30,
            store_file: Some(dir.path().join("custom.json")),
            color_output: false,
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert_eq!(
            config.resolve_store_file(manager.base_dir()),
            dir.path().join("custom.json")
        );
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "color_output": false }"#).unwrap();
        let config = manager.load().unwrap();
        assert!(!config.color_output);
        assert_eq!(config.storage_key, "transactions");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "retention_days": 0 }"#).unwrap();
        assert!(matches!(manager.load(), Err(LedgerError::Config(_))));
    }

    #[test]
    fn oversized_retention_is_rejected_on_load_and_save() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "retention_days": 100000000 }"#).unwrap();
        assert!(matches!(manager.load(), Err(LedgerError::Config(_))));

        let config = Config {
            retention_days: MAX_RETENTION_DAYS + 1,
            ..Config::default()
        };
        assert!(matches!(manager.save(&config), Err(LedgerError::Config(_))));
    }
}

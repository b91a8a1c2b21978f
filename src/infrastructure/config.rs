// src/infrastructure/config.rs
use crate::constants::{APP_DIR_NAME, BACKUP_FILE_NAME, NOTES_FILE_NAME};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// TOML configuration for the photo notes store
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the mirror files and pictures; empty means the
    /// platform data directory.
    #[serde(default)]
    pub data_dir: String,
    #[serde(default = "default_notes_file")]
    pub notes_file: String,
    #[serde(default = "default_backup_file")]
    pub backup_file: String,
}

fn default_notes_file() -> String { NOTES_FILE_NAME.to_string() }
fn default_backup_file() -> String { BACKUP_FILE_NAME.to_string() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            notes_file: default_notes_file(),
            backup_file: default_backup_file(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Data directory, falling back to the platform data dir
    pub fn data_dir(&self) -> Result<PathBuf> {
        if !self.storage.data_dir.is_empty() {
            return Ok(PathBuf::from(&self.storage.data_dir));
        }
        default_data_dir()
    }
}

/// `<config dir>/photonotes/config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not find config directory")?;
    Ok(dir.join(APP_DIR_NAME).join("config.toml"))
}

/// `<data dir>/photonotes`
pub fn default_data_dir() -> Result<PathBuf> {
    let dir = dirs::data_dir().context("Could not find data directory")?;
    Ok(dir.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_default_config_when_created_then_uses_standard_file_names() {
        let config = Config::default();

        assert_eq!(config.storage.notes_file, "photo_notes.json");
        assert_eq!(config.storage.backup_file, "photo_notes_backup.json");
        assert!(config.storage.data_dir.is_empty());
    }

    #[test]
    fn given_partial_toml_when_loading_then_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\ndata_dir = \"/srv/notes\"\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.storage.data_dir, "/srv/notes");
        assert_eq!(config.storage.notes_file, "photo_notes.json");
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/srv/notes"));
    }

    #[test]
    fn given_saved_config_when_loading_then_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let mut config = Config::default();
        config.storage.notes_file = "mine.json".to_string();

        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn given_missing_file_when_loading_or_default_then_returns_default() {
        let temp_dir = TempDir::new().unwrap();

        let config = Config::load_or_default(temp_dir.path().join("absent.toml")).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn given_invalid_toml_when_loading_then_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[storage\n").unwrap();

        assert!(Config::load(&path).is_err());
    }
}

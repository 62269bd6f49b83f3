//! Settings persistence in the platform configuration directory.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "vecdraw";
const CONFIG_FILE: &str = "config.toml";

/// Reads and writes the user's [`Config`] at a fixed location
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at `<config_dir>/vecdraw/config.toml`
    pub fn new() -> SettingsResult<Self> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::at(dir.join(APP_DIR).join(CONFIG_FILE)))
    }

    /// Store at an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored config, falling back to defaults when the file does
    /// not exist yet. An unreadable or invalid file is an error.
    pub fn load_or_default(&self) -> SettingsResult<Config> {
        if !self.path.exists() {
            tracing::info!(
                "No config at {}, using defaults",
                self.path.display()
            );
            return Ok(Config::default());
        }
        Config::load_from_file(&self.path)
    }

    /// Write `config`, creating the directory if needed
    pub fn save(&self, config: &Config) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        config.save_to_file(&self.path)?;
        tracing::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

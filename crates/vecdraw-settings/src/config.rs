//! Configuration and settings management for VecDraw
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Editor defaults (paste offset, hit tolerance, new-shape style)
//! - Grid display
//! - Logging

use serde::{Deserialize, Serialize};
use std::path::Path;
use vecdraw_core::constants::{DEFAULT_HIT_TOLERANCE, DEFAULT_PASTE_OFFSET};
use vecdraw_core::ColorData;

use crate::error::{SettingsError, SettingsResult};

/// Editor defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Horizontal displacement of pasted and duplicated shapes
    pub paste_offset_x: f64,
    /// Vertical displacement of pasted and duplicated shapes
    pub paste_offset_y: f64,
    /// Distance within which a line counts as hit
    pub hit_tolerance: f64,
    /// Stroke color for new shapes
    pub default_stroke: ColorData,
    /// Fill color for new shapes, if any
    pub default_fill: Option<ColorData>,
    /// Font family for new text
    pub default_font_name: String,
    /// Font size for new text
    pub default_font_size: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            paste_offset_x: DEFAULT_PASTE_OFFSET.0,
            paste_offset_y: DEFAULT_PASTE_OFFSET.1,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            default_stroke: ColorData::BLACK,
            default_fill: None,
            default_font_name: "Sans".to_string(),
            default_font_size: 12.0,
        }
    }
}

/// Grid display settings for new documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub visible: bool,
    pub spacing: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            spacing: 10.0,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Editor defaults
    pub editor: EditorSettings,
    /// Grid display
    pub grid: GridSettings,
    /// Logging
    pub logging: LoggingSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let editor = &self.editor;
        if !editor.paste_offset_x.is_finite() || !editor.paste_offset_y.is_finite() {
            return Err(SettingsError::invalid(
                "editor.paste_offset",
                "must be finite",
            ));
        }

        if !(editor.hit_tolerance.is_finite() && editor.hit_tolerance > 0.0) {
            return Err(SettingsError::invalid(
                "editor.hit_tolerance",
                "must be > 0",
            ));
        }

        if !(editor.default_font_size.is_finite() && editor.default_font_size > 0.0) {
            return Err(SettingsError::invalid(
                "editor.default_font_size",
                "must be > 0",
            ));
        }

        if editor.default_font_name.trim().is_empty() {
            return Err(SettingsError::invalid(
                "editor.default_font_name",
                "must not be empty",
            ));
        }

        if !(self.grid.spacing.is_finite() && self.grid.spacing > 0.0) {
            return Err(SettingsError::invalid("grid.spacing", "must be > 0"));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(SettingsError::invalid(
                "logging.filter",
                "must not be empty",
            ));
        }

        Ok(())
    }
}

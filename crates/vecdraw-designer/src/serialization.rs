//! Serialization and deserialization for design files.
//!
//! A design file is a JSON snapshot of the whole document: every shape in
//! Z-order with its full state, plus grid settings and metadata. Loading
//! goes through [`Drawing::load_design`], which validates everything
//! before the drawing is touched and emits a single `LOAD` notification.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use vecdraw_core::constants::DESIGN_FILE_VERSION;

use crate::drawing::{Drawing, GridState};
use crate::model::Shape;

/// Complete design file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignFile {
    pub version: String,
    pub metadata: DesignMetadata,
    #[serde(default)]
    pub grid: GridState,
    pub shapes: Vec<Shape>,
}

/// Design metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
}

impl DesignFile {
    /// Create an empty design
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: DESIGN_FILE_VERSION.to_string(),
            metadata: DesignMetadata {
                name: name.into(),
                created: now,
                modified: now,
                author: String::new(),
                description: String::new(),
            },
            grid: GridState::default(),
            shapes: Vec::new(),
        }
    }

    /// Snapshot a drawing
    pub fn from_drawing(drawing: &Drawing, name: impl Into<String>) -> Self {
        Self {
            grid: drawing.grid(),
            shapes: drawing.snapshot(),
            ..Self::new(name)
        }
    }

    /// Replace the drawing's grid and shapes with this design's.
    /// On error the drawing is left untouched.
    pub fn apply_to(&self, drawing: &mut Drawing) -> Result<()> {
        self.grid
            .validate()
            .context("Design contains invalid grid settings")?;
        drawing
            .load_design(self.shapes.clone(), self.grid)
            .context("Design contains invalid shapes")?;
        Ok(())
    }

    /// Save design to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize design")?;

        std::fs::write(path.as_ref(), json).context("Failed to write design file")?;

        tracing::info!(
            "Saved design '{}' ({} shapes) to {}",
            self.metadata.name,
            self.shapes.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Load design from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read design file")?;

        let design: DesignFile =
            serde_json::from_str(&content).context("Failed to parse design file")?;

        if design.version != DESIGN_FILE_VERSION {
            tracing::warn!(
                "Design file version {} differs from supported {}",
                design.version,
                DESIGN_FILE_VERSION
            );
        }

        Ok(design)
    }

    /// Mark the design as modified now
    pub fn touch(&mut self) {
        self.metadata.modified = Utc::now();
    }
}

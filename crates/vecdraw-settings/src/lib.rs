//! VecDraw Settings Crate
//!
//! Handles application configuration and its persistence.

pub mod config;
pub mod error;
pub mod store;

pub use config::{Config, EditorSettings, GridSettings, LoggingSettings};
pub use error::{SettingsError, SettingsResult};
pub use store::SettingsStore;

//! # VecDraw
//!
//! A 2D vector drawing document core with undoable editing:
//! - Rectangles, ellipses, lines, polygons, text and nested groups
//! - Rotation-aware hit testing
//! - Z-ordered documents with change notifications
//! - Reversible commands with undo/redo history and a shared clipboard
//!
//! ## Architecture
//!
//! VecDraw is organized as a workspace with multiple crates:
//!
//! 1. **vecdraw-core** - Geometry, identifiers, errors, change events
//! 2. **vecdraw-designer** - Shapes, drawing, commands, history, editor
//! 3. **vecdraw-settings** - Configuration and its persistence
//! 4. **vecdraw** - Logging setup, wiring and the demo binary

pub use vecdraw_designer as designer;
pub use vecdraw_settings as settings;

pub use vecdraw_core::{
    ChangeKind, ColorData, CommandError, DrawingError, DrawingEvent, EventFilter, Point2D, Rect,
    ShapeError, ShapeId, Vector2D,
};
pub use vecdraw_designer::{
    Clipboard, DesignFile, Drawing, DrawingEditor, EditorOptions, GridState, Shape,
    SharedClipboard, SharedEditor,
};
pub use vecdraw_settings::{Config, LoggingSettings, SettingsStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging from the logging settings
///
/// Sets up structured logging with:
/// - `RUST_LOG` taking precedence over the configured filter
/// - Pretty console output, or JSON lines when `json` is set
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use anyhow::Context;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.filter)
            .with_context(|| format!("Invalid log filter '{}'", settings.filter))?,
    };

    let (pretty, json) = if settings.json {
        let layer = fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_thread_ids(true);
        (None, Some(layer))
    } else {
        let layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();
        (Some(layer), None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty)
        .with(json)
        .try_init()
        .context("Logging was already initialized")?;

    Ok(())
}

/// Editor defaults taken from the configuration
pub fn editor_options(config: &Config) -> EditorOptions {
    let editor = &config.editor;
    EditorOptions {
        paste_offset: Vector2D::new(editor.paste_offset_x, editor.paste_offset_y),
        hit_tolerance: editor.hit_tolerance,
        default_stroke: editor.default_stroke,
        default_fill: editor.default_fill,
        default_font_name: editor.default_font_name.clone(),
        default_font_size: editor.default_font_size,
    }
}

/// A new editor configured from `config`, sharing `clipboard`
pub fn open_editor(config: &Config, clipboard: SharedClipboard) -> anyhow::Result<DrawingEditor> {
    use anyhow::Context;

    config.validate().context("Invalid configuration")?;
    let mut editor = DrawingEditor::with_options(clipboard, editor_options(config));
    editor
        .set_grid(GridState {
            visible: config.grid.visible,
            spacing: config.grid.spacing,
        })
        .context("Invalid grid settings")?;
    Ok(editor)
}

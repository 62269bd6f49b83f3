use anyhow::Context;
use std::path::PathBuf;
use vecdraw::designer::ShapeCensus;
use vecdraw::{init_logging, open_editor, Clipboard, Config, Point2D, SettingsStore, Vector2D};

/// Load user settings, falling back to defaults when no config directory
/// exists or the file cannot be used.
fn load_config() -> Config {
    match SettingsStore::new().and_then(|store| store.load_or_default()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Using default settings: {e}");
            Config::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = load_config();
    init_logging(&config.logging)?;
    tracing::info!("VecDraw {} (built {})", vecdraw::VERSION, vecdraw::BUILD_DATE);

    let mut editor = open_editor(&config, Clipboard::shared())?;
    editor.design_name = "Demo".to_string();

    let frame = editor.add_rectangle(10.0, 10.0, 200.0, 120.0)?;
    let badge = editor.add_ellipse(150.0, 20.0, 40.0, 40.0)?;
    let title = editor.add_text("Hello, VecDraw", Point2D::new(20.0, 20.0))?;
    editor.rotate(badge, 45.0)?;
    editor.move_shapes(&[frame, title], Vector2D::new(5.0, 5.0))?;

    let group = editor.group(vec![frame, badge])?;
    editor.copy(group)?;
    let pasted = editor.paste()?;
    editor.reflect_horizontal(pasted)?;
    editor.send_to_back(pasted)?;

    let census = ShapeCensus::of(editor.drawing().iter());
    tracing::info!(
        "{} top-level shapes, {} in total, {} undo steps",
        editor.drawing().len(),
        census.total(),
        editor.history().undo_depth()
    );

    while editor.undo().context("Undo failed")? {}
    tracing::info!("Undone to {} shapes", editor.drawing().len());
    while editor.redo().context("Redo failed")? {}

    if let Some(path) = std::env::args().nth(1).map(PathBuf::from) {
        editor.save_to_file(&path)?;
        println!("Saved {} shapes to {}", editor.drawing().len(), path.display());
    }

    Ok(())
}

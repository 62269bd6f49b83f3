//! Editing session for a single document.
//!
//! `DrawingEditor` owns a [`Drawing`] and its [`CommandManager`] and shares
//! a clipboard with any other open editors. Every visible change goes
//! through a command so it lands in the history.

use std::path::{Path, PathBuf};
use vecdraw_core::constants::{DEFAULT_HIT_TOLERANCE, DEFAULT_PASTE_OFFSET};
use vecdraw_core::{
    thread_safe, ColorData, CommandError, DrawingError, DrawingObserver, EventFilter, Point2D,
    Rect, ShapeId, SubscriptionId, ThreadSafe, Vector2D,
};

use crate::clipboard::{Clipboard, SharedClipboard};
use crate::commands::{
    AddShapeCommand, BringToFrontCommand, ChangeFillColorCommand, ChangeFontSizeCommand,
    ChangeStrokeColorCommand, ChangeTextCommand, Command, CompositeCommand, CopyCommand,
    CutCommand, DeleteShapeCommand, DrawingCommand, DuplicateCommand, EditContext, GroupCommand,
    MoveShapeCommand, PasteCommand, ReflectHorizontalCommand, ReflectVerticalCommand,
    ResizeShapeCommand, RotateShapeCommand, SendToBackCommand, UngroupCommand,
};
use crate::drawing::{Drawing, GridState};
use crate::history::CommandManager;
use crate::model::Shape;
use crate::serialization::DesignFile;

/// An editor behind the per-document mutex
pub type SharedEditor = ThreadSafe<DrawingEditor>;

const UNTITLED: &str = "Untitled";

/// Defaults applied to shapes created through the editor
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    pub paste_offset: Vector2D,
    pub hit_tolerance: f64,
    pub default_stroke: ColorData,
    pub default_fill: Option<ColorData>,
    pub default_font_name: String,
    pub default_font_size: f64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            paste_offset: Vector2D::from(DEFAULT_PASTE_OFFSET),
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            default_stroke: ColorData::BLACK,
            default_fill: None,
            default_font_name: "Sans".to_string(),
            default_font_size: 12.0,
        }
    }
}

#[derive(Debug)]
pub struct DrawingEditor {
    drawing: Drawing,
    history: CommandManager,
    clipboard: SharedClipboard,
    options: EditorOptions,
    pub design_name: String,
    pub is_modified: bool,
    pub current_file_path: Option<PathBuf>,
}

impl DrawingEditor {
    pub fn new(clipboard: SharedClipboard) -> Self {
        Self::with_options(clipboard, EditorOptions::default())
    }

    pub fn with_options(clipboard: SharedClipboard, options: EditorOptions) -> Self {
        Self {
            drawing: Drawing::new(),
            history: CommandManager::new(),
            clipboard,
            options,
            design_name: UNTITLED.to_string(),
            is_modified: false,
            current_file_path: None,
        }
    }

    /// An editor with a clipboard of its own
    pub fn standalone() -> Self {
        Self::new(Clipboard::shared())
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn history(&self) -> &CommandManager {
        &self.history
    }

    pub fn clipboard(&self) -> &SharedClipboard {
        &self.clipboard
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: EditorOptions) {
        self.options = options;
    }

    pub fn into_shared(self) -> SharedEditor {
        thread_safe(self)
    }

    pub fn subscribe<O>(&mut self, filter: EventFilter, observer: O) -> SubscriptionId
    where
        O: DrawingObserver + 'static,
    {
        self.drawing.subscribe(filter, observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.drawing.unsubscribe(id)
    }

    /// Run a command through the history
    pub fn execute(&mut self, command: impl Into<DrawingCommand>) -> Result<(), CommandError> {
        self.execute_with(command.into(), |_| ())
    }

    /// Prepare `command`, read something off it, then run it through the
    /// history. Lets callers learn identities minted at prepare time.
    fn execute_with<C, T>(
        &mut self,
        mut command: C,
        outcome: impl FnOnce(&C) -> T,
    ) -> Result<T, CommandError>
    where
        C: Command + Into<DrawingCommand>,
    {
        let mut clipboard = self.clipboard.lock();
        let mut ctx = EditContext::new(&mut self.drawing, &mut clipboard);
        if !command.is_prepared() {
            command.prepare(&ctx)?;
        }
        let result = outcome(&command);
        self.history.execute_command(command, &mut ctx)?;
        self.is_modified = true;
        Ok(result)
    }

    pub fn undo(&mut self) -> Result<bool, CommandError> {
        let mut clipboard = self.clipboard.lock();
        let mut ctx = EditContext::new(&mut self.drawing, &mut clipboard);
        let undone = self.history.undo(&mut ctx)?;
        self.is_modified |= undone;
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, CommandError> {
        let mut clipboard = self.clipboard.lock();
        let mut ctx = EditContext::new(&mut self.drawing, &mut clipboard);
        let redone = self.history.redo(&mut ctx)?;
        self.is_modified |= redone;
        Ok(redone)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Change grid settings. Not recorded in the history.
    pub fn set_grid(&mut self, grid: GridState) -> Result<(), DrawingError> {
        self.drawing.set_grid(grid)
    }

    /// Top-most shape under `p`, using the configured hit tolerance
    pub fn shape_at(&self, p: &Point2D) -> Option<&Shape> {
        self.drawing
            .shape_at_with_tolerance(p, self.options.hit_tolerance)
    }

    fn styled(&self, shape: Shape) -> Shape {
        let shape = shape.with_stroke(self.options.default_stroke);
        match self.options.default_fill {
            Some(fill) => shape.with_fill(fill),
            None => shape,
        }
    }

    /// Add a shape as-is, returning its identity
    pub fn add_shape(&mut self, shape: Shape) -> Result<ShapeId, CommandError> {
        let id = shape.id();
        self.execute(AddShapeCommand::new(shape))?;
        Ok(id)
    }

    pub fn add_rectangle(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<ShapeId, CommandError> {
        let shape = Shape::rectangle(Rect::from_xywh(x, y, width, height)?)?;
        self.add_shape(self.styled(shape))
    }

    pub fn add_ellipse(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<ShapeId, CommandError> {
        let shape = Shape::ellipse(Rect::from_xywh(x, y, width, height)?)?;
        self.add_shape(self.styled(shape))
    }

    pub fn add_line(&mut self, start: Point2D, end: Point2D) -> Result<ShapeId, CommandError> {
        let shape = Shape::line(start, end)?;
        self.add_shape(self.styled(shape))
    }

    pub fn add_polygon(&mut self, vertices: Vec<Point2D>) -> Result<ShapeId, CommandError> {
        let shape = Shape::polygon(vertices)?;
        self.add_shape(self.styled(shape))
    }

    /// Text in the default font at the default size
    pub fn add_text(
        &mut self,
        content: impl Into<String>,
        origin: Point2D,
    ) -> Result<ShapeId, CommandError> {
        let shape = Shape::text(
            content,
            origin,
            self.options.default_font_size,
            self.options.default_font_name.clone(),
        )?;
        self.add_shape(self.styled(shape))
    }

    /// Place a new-identity copy of a library prototype
    pub fn place_prototype(
        &mut self,
        prototype: &Shape,
        offset: Vector2D,
    ) -> Result<ShapeId, CommandError> {
        let command = AddShapeCommand::from_prototype(prototype, offset);
        let id = command.shape_id();
        self.execute(command)?;
        Ok(id)
    }

    /// Delete shapes as one undoable step
    pub fn delete(&mut self, ids: &[ShapeId]) -> Result<(), CommandError> {
        match ids {
            [id] => self.execute(DeleteShapeCommand::new(*id)),
            _ => self.execute(CompositeCommand::new(
                "Delete",
                ids.iter()
                    .map(|&id| DrawingCommand::from(DeleteShapeCommand::new(id)))
                    .collect(),
            )),
        }
    }

    /// Move shapes by the same delta as one undoable step
    pub fn move_shapes(&mut self, ids: &[ShapeId], delta: Vector2D) -> Result<(), CommandError> {
        match ids {
            [id] => self.execute(MoveShapeCommand::new(*id, delta)),
            _ => self.execute(CompositeCommand::new(
                "Move",
                ids.iter()
                    .map(|&id| DrawingCommand::from(MoveShapeCommand::new(id, delta)))
                    .collect(),
            )),
        }
    }

    pub fn resize(&mut self, id: ShapeId, bounds: Rect) -> Result<(), CommandError> {
        self.execute(ResizeShapeCommand::new(id, bounds))
    }

    pub fn rotate(&mut self, id: ShapeId, degrees: f64) -> Result<(), CommandError> {
        self.execute(RotateShapeCommand::new(id, degrees))
    }

    pub fn set_stroke_color(&mut self, id: ShapeId, color: ColorData) -> Result<(), CommandError> {
        self.execute(ChangeStrokeColorCommand::new(id, color))
    }

    pub fn set_fill_color(&mut self, id: ShapeId, color: ColorData) -> Result<(), CommandError> {
        self.execute(ChangeFillColorCommand::new(id, color))
    }

    pub fn set_font_size(&mut self, id: ShapeId, size: f64) -> Result<(), CommandError> {
        let command = ChangeFontSizeCommand::new(&self.drawing, id, size)?;
        self.execute(command)
    }

    pub fn set_text(
        &mut self,
        id: ShapeId,
        content: impl Into<String>,
    ) -> Result<(), CommandError> {
        let command = ChangeTextCommand::new(&self.drawing, id, content)?;
        self.execute(command)
    }

    pub fn reflect_horizontal(&mut self, id: ShapeId) -> Result<(), CommandError> {
        self.execute(ReflectHorizontalCommand::new(id))
    }

    pub fn reflect_vertical(&mut self, id: ShapeId) -> Result<(), CommandError> {
        self.execute(ReflectVerticalCommand::new(id))
    }

    pub fn bring_to_front(&mut self, id: ShapeId) -> Result<(), CommandError> {
        self.execute(BringToFrontCommand::new(id))
    }

    pub fn send_to_back(&mut self, id: ShapeId) -> Result<(), CommandError> {
        self.execute(SendToBackCommand::new(id))
    }

    pub fn copy(&mut self, id: ShapeId) -> Result<(), CommandError> {
        self.execute(CopyCommand::new(id))
    }

    pub fn cut(&mut self, id: ShapeId) -> Result<(), CommandError> {
        self.execute(CutCommand::new(id))
    }

    /// Paste the clipboard content at the configured offset
    pub fn paste(&mut self) -> Result<ShapeId, CommandError> {
        let offset = self.options.paste_offset;
        self.execute_with(PasteCommand::new(offset), PasteCommand::pasted_id)?
            .ok_or_else(|| CommandError::not_prepared("Paste"))
    }

    pub fn duplicate(&mut self, id: ShapeId) -> Result<ShapeId, CommandError> {
        let offset = self.options.paste_offset;
        self.execute_with(
            DuplicateCommand::new(id, offset),
            DuplicateCommand::duplicate_id,
        )?
        .ok_or_else(|| CommandError::not_prepared("Duplicate"))
    }

    /// Group shapes, returning the new group's identity
    pub fn group(&mut self, ids: Vec<ShapeId>) -> Result<ShapeId, CommandError> {
        let command = GroupCommand::new(&self.drawing, ids)?;
        self.execute_with(command, GroupCommand::group_id)?
            .ok_or_else(|| CommandError::not_prepared("Group"))
    }

    /// Dissolve a group, returning the released children
    pub fn ungroup(&mut self, group_id: ShapeId) -> Result<Vec<ShapeId>, CommandError> {
        let command = UngroupCommand::new(&self.drawing, group_id)?;
        self.execute_with(command, |c| c.child_ids().to_vec())
    }

    /// Start an empty document. History is discarded.
    pub fn new_document(&mut self) {
        self.drawing.clear();
        self.history.clear_stacks();
        self.design_name = UNTITLED.to_string();
        self.is_modified = false;
        self.current_file_path = None;
    }

    /// Save design to file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        DesignFile::from_drawing(&self.drawing, &self.design_name).save_to_file(&path)?;
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Load design from file. History is discarded.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let design = DesignFile::load_from_file(&path)?;
        design.apply_to(&mut self.drawing)?;
        self.history.clear_stacks();
        self.design_name = design.metadata.name;
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        tracing::info!(
            "Loaded '{}' with {} shapes",
            self.design_name,
            self.drawing.len()
        );
        Ok(())
    }
}

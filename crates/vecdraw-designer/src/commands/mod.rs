//! Reversible document edits.
//!
//! Every command runs in two phases. [`Command::prepare`] validates the
//! command against the current document and snapshots whatever undo will
//! need. After that, `execute` and `undo` may alternate any number of
//! times against the same snapshot. Running an unprepared command fails
//! with [`CommandError::NotPrepared`].
//!
//! The clipboard is injected through [`EditContext`] rather than looked up
//! globally.

use vecdraw_core::{CommandError, DrawingError, ShapeId, Vector2D};

use crate::clipboard::Clipboard;
use crate::drawing::Drawing;
use crate::model::Shape;

mod clipboard_ops;
mod composite;
mod grouping;
mod lifecycle;
mod ordering;
mod style;
mod transform;

pub use clipboard_ops::{CopyCommand, CutCommand, DuplicateCommand, PasteCommand};
pub use composite::CompositeCommand;
pub use grouping::{GroupCommand, UngroupCommand};
pub use lifecycle::{AddShapeCommand, DeleteShapeCommand};
pub use ordering::{BringToFrontCommand, SendToBackCommand};
pub use style::{
    ChangeFillColorCommand, ChangeFontSizeCommand, ChangeStrokeColorCommand, ChangeTextCommand,
};
pub use transform::{
    MoveShapeCommand, ReflectHorizontalCommand, ReflectVerticalCommand, ResizeShapeCommand,
    RotateShapeCommand,
};

/// The document and clipboard a command operates on.
pub struct EditContext<'a> {
    pub drawing: &'a mut Drawing,
    pub clipboard: &'a mut Clipboard,
}

impl<'a> EditContext<'a> {
    pub fn new(drawing: &'a mut Drawing, clipboard: &'a mut Clipboard) -> Self {
        Self { drawing, clipboard }
    }
}

/// A command that can be executed and undone on a drawing.
pub trait Command {
    /// Returns the name of the command for display.
    fn name(&self) -> &str;

    /// Validates and captures the "before" state. Called once, before the
    /// first `execute`.
    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError>;

    /// Applies the edit.
    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError>;

    /// Reverses the most recent `execute`.
    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError>;

    fn is_prepared(&self) -> bool;
}

pub(crate) fn require_shape<'d>(
    drawing: &'d Drawing,
    id: ShapeId,
) -> Result<&'d Shape, CommandError> {
    drawing
        .get(id)
        .ok_or(CommandError::Drawing(DrawingError::ShapeNotFound { id }))
}

pub(crate) fn require_prepared(prepared: bool, name: &str) -> Result<(), CommandError> {
    if prepared {
        Ok(())
    } else {
        Err(CommandError::not_prepared(name))
    }
}

pub(crate) fn require_finite_offset(offset: Vector2D, name: &str) -> Result<(), CommandError> {
    if offset.is_finite() {
        Ok(())
    } else {
        Err(CommandError::precondition(
            name,
            format!("offset ({}, {}) must be finite", offset.dx, offset.dy),
        ))
    }
}

/// Every concrete command, so history stacks hold plain values
#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum DrawingCommand {
    Add(AddShapeCommand),
    Delete(DeleteShapeCommand),
    Move(MoveShapeCommand),
    Resize(ResizeShapeCommand),
    Rotate(RotateShapeCommand),
    ChangeStrokeColor(ChangeStrokeColorCommand),
    ChangeFillColor(ChangeFillColorCommand),
    ChangeFontSize(ChangeFontSizeCommand),
    ChangeText(ChangeTextCommand),
    Cut(CutCommand),
    Copy(CopyCommand),
    Paste(PasteCommand),
    Duplicate(DuplicateCommand),
    BringToFront(BringToFrontCommand),
    SendToBack(SendToBackCommand),
    Group(GroupCommand),
    Ungroup(UngroupCommand),
    ReflectHorizontal(ReflectHorizontalCommand),
    ReflectVertical(ReflectVerticalCommand),
    Composite(CompositeCommand),
}

macro_rules! dispatch {
    ($value:expr, $cmd:ident => $body:expr) => {
        match $value {
            DrawingCommand::Add($cmd) => $body,
            DrawingCommand::Delete($cmd) => $body,
            DrawingCommand::Move($cmd) => $body,
            DrawingCommand::Resize($cmd) => $body,
            DrawingCommand::Rotate($cmd) => $body,
            DrawingCommand::ChangeStrokeColor($cmd) => $body,
            DrawingCommand::ChangeFillColor($cmd) => $body,
            DrawingCommand::ChangeFontSize($cmd) => $body,
            DrawingCommand::ChangeText($cmd) => $body,
            DrawingCommand::Cut($cmd) => $body,
            DrawingCommand::Copy($cmd) => $body,
            DrawingCommand::Paste($cmd) => $body,
            DrawingCommand::Duplicate($cmd) => $body,
            DrawingCommand::BringToFront($cmd) => $body,
            DrawingCommand::SendToBack($cmd) => $body,
            DrawingCommand::Group($cmd) => $body,
            DrawingCommand::Ungroup($cmd) => $body,
            DrawingCommand::ReflectHorizontal($cmd) => $body,
            DrawingCommand::ReflectVertical($cmd) => $body,
            DrawingCommand::Composite($cmd) => $body,
        }
    };
}

impl Command for DrawingCommand {
    fn name(&self) -> &str {
        dispatch!(self, cmd => cmd.name())
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        dispatch!(self, cmd => cmd.prepare(ctx))
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        dispatch!(self, cmd => cmd.execute(ctx))
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        dispatch!(self, cmd => cmd.undo(ctx))
    }

    fn is_prepared(&self) -> bool {
        dispatch!(self, cmd => cmd.is_prepared())
    }
}

macro_rules! into_drawing_command {
    ($($variant:ident($command:ty)),* $(,)?) => {
        $(
            impl From<$command> for DrawingCommand {
                fn from(command: $command) -> Self {
                    DrawingCommand::$variant(command)
                }
            }
        )*
    };
}

into_drawing_command!(
    Add(AddShapeCommand),
    Delete(DeleteShapeCommand),
    Move(MoveShapeCommand),
    Resize(ResizeShapeCommand),
    Rotate(RotateShapeCommand),
    ChangeStrokeColor(ChangeStrokeColorCommand),
    ChangeFillColor(ChangeFillColorCommand),
    ChangeFontSize(ChangeFontSizeCommand),
    ChangeText(ChangeTextCommand),
    Cut(CutCommand),
    Copy(CopyCommand),
    Paste(PasteCommand),
    Duplicate(DuplicateCommand),
    BringToFront(BringToFrontCommand),
    SendToBack(SendToBackCommand),
    Group(GroupCommand),
    Ungroup(UngroupCommand),
    ReflectHorizontal(ReflectHorizontalCommand),
    ReflectVertical(ReflectVerticalCommand),
    Composite(CompositeCommand),
);

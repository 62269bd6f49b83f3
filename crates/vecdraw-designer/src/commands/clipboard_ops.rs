use vecdraw_core::{CommandError, DrawingError, ShapeId, Vector2D};

use super::{require_finite_offset, require_prepared, require_shape, Command, EditContext};
use crate::drawing::Placement;
use crate::model::Shape;

/// Copies a shape to the clipboard and removes it from the drawing.
///
/// Undo puts the shape back at its former index but leaves the clipboard
/// holding the cut shape.
#[derive(Debug, Clone)]
pub struct CutCommand {
    shape_id: ShapeId,
    removed: Option<(usize, Shape)>,
    last_restore: Option<Placement>,
    prepared: bool,
}

impl CutCommand {
    pub fn new(shape_id: ShapeId) -> Self {
        Self {
            shape_id,
            removed: None,
            last_restore: None,
            prepared: false,
        }
    }

    pub fn last_restore(&self) -> Option<Placement> {
        self.last_restore
    }
}

impl Command for CutCommand {
    fn name(&self) -> &str {
        "Cut"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        require_shape(ctx.drawing, self.shape_id)?;
        self.prepared = true;
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.prepared, self.name())?;
        ctx.clipboard.set(require_shape(ctx.drawing, self.shape_id)?);
        let removed = ctx
            .drawing
            .take_shape(self.shape_id)
            .ok_or(DrawingError::ShapeNotFound { id: self.shape_id })?;
        self.removed = Some(removed);
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.prepared, self.name())?;
        if ctx.drawing.contains(self.shape_id) {
            return Err(DrawingError::DuplicateShape { id: self.shape_id }.into());
        }
        let (index, shape) = self
            .removed
            .take()
            .ok_or_else(|| CommandError::precondition(self.name(), "nothing to restore"))?;
        self.last_restore = Some(ctx.drawing.insert_or_append(shape, index)?);
        Ok(())
    }

    fn is_prepared(&self) -> bool {
        self.prepared
    }
}

/// Puts a clone of a shape on the clipboard. Undo does nothing.
#[derive(Debug, Clone)]
pub struct CopyCommand {
    shape_id: ShapeId,
    prepared: bool,
}

impl CopyCommand {
    pub fn new(shape_id: ShapeId) -> Self {
        Self {
            shape_id,
            prepared: false,
        }
    }
}

impl Command for CopyCommand {
    fn name(&self) -> &str {
        "Copy"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        require_shape(ctx.drawing, self.shape_id)?;
        self.prepared = true;
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.prepared, self.name())?;
        ctx.clipboard.set(require_shape(ctx.drawing, self.shape_id)?);
        Ok(())
    }

    fn undo(&mut self, _ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.prepared, self.name())
    }

    fn is_prepared(&self) -> bool {
        self.prepared
    }
}

/// Tracks one freshly identified instance through add and remove cycles.
/// Redo re-adds the same instance instead of minting another.
#[derive(Debug, Clone, Default)]
struct PlacedInstance {
    instance_id: Option<ShapeId>,
    pending: Option<Shape>,
}

impl PlacedInstance {
    fn stage(&mut self, mut shape: Shape, offset: Vector2D) {
        shape.translate(offset);
        self.instance_id = Some(shape.id());
        self.pending = Some(shape);
    }

    fn add(&mut self, ctx: &mut EditContext<'_>, name: &str) -> Result<(), CommandError> {
        let id = self.instance_id.ok_or_else(|| CommandError::not_prepared(name))?;
        if ctx.drawing.contains(id) {
            return Err(DrawingError::DuplicateShape { id }.into());
        }
        let shape = self
            .pending
            .take()
            .ok_or_else(|| CommandError::precondition(name, "instance is already placed"))?;
        ctx.drawing.add_shape(shape)?;
        Ok(())
    }

    fn remove(&mut self, ctx: &mut EditContext<'_>, name: &str) -> Result<(), CommandError> {
        let id = self.instance_id.ok_or_else(|| CommandError::not_prepared(name))?;
        let shape = ctx
            .drawing
            .remove_shape(id)
            .ok_or(DrawingError::ShapeNotFound { id })?;
        self.pending = Some(shape);
        Ok(())
    }
}

/// Adds a new-identity clone of the clipboard content, offset from the
/// original. Undo removes exactly that instance.
#[derive(Debug, Clone)]
pub struct PasteCommand {
    offset: Vector2D,
    placed: PlacedInstance,
}

impl PasteCommand {
    pub fn new(offset: Vector2D) -> Self {
        Self {
            offset,
            placed: PlacedInstance::default(),
        }
    }

    /// Identity of the pasted shape, known after prepare
    pub fn pasted_id(&self) -> Option<ShapeId> {
        self.placed.instance_id
    }
}

impl Command for PasteCommand {
    fn name(&self) -> &str {
        "Paste"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        require_finite_offset(self.offset, self.name())?;
        let content = ctx.clipboard.get().ok_or(CommandError::ClipboardEmpty)?;
        self.placed.stage(content.clone_with_new_id(), self.offset);
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        self.placed.add(ctx, "Paste")
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        self.placed.remove(ctx, "Paste")
    }

    fn is_prepared(&self) -> bool {
        self.placed.instance_id.is_some()
    }
}

/// Adds an offset, new-identity copy of a shape without touching the
/// clipboard.
#[derive(Debug, Clone)]
pub struct DuplicateCommand {
    source_id: ShapeId,
    offset: Vector2D,
    placed: PlacedInstance,
}

impl DuplicateCommand {
    pub fn new(source_id: ShapeId, offset: Vector2D) -> Self {
        Self {
            source_id,
            offset,
            placed: PlacedInstance::default(),
        }
    }

    pub fn duplicate_id(&self) -> Option<ShapeId> {
        self.placed.instance_id
    }
}

impl Command for DuplicateCommand {
    fn name(&self) -> &str {
        "Duplicate"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        require_finite_offset(self.offset, self.name())?;
        let source = require_shape(ctx.drawing, self.source_id)?;
        self.placed.stage(source.clone_with_new_id(), self.offset);
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        self.placed.add(ctx, "Duplicate")
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        self.placed.remove(ctx, "Duplicate")
    }

    fn is_prepared(&self) -> bool {
        self.placed.instance_id.is_some()
    }
}

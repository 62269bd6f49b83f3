use vecdraw_core::{CommandError, DrawingError, ShapeId, Vector2D};

use super::{require_finite_offset, require_prepared, require_shape, Command, EditContext};
use crate::drawing::Placement;
use crate::model::Shape;

/// Adds a shape on top of the Z-order, or at a given index.
#[derive(Debug, Clone)]
pub struct AddShapeCommand {
    shape_id: ShapeId,
    index: Option<usize>,
    /// Offset applied when instantiated from a prototype
    offset: Vector2D,
    /// Held while the shape is outside the drawing
    pending: Option<Shape>,
    prepared: bool,
}

impl AddShapeCommand {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape_id: shape.id(),
            index: None,
            offset: Vector2D::ZERO,
            pending: Some(shape),
            prepared: false,
        }
    }

    /// Insert at `index` instead of on top
    pub fn at_index(shape: Shape, index: usize) -> Self {
        Self {
            index: Some(index),
            ..Self::new(shape)
        }
    }

    /// Instantiate a stored template as a new, independent shape
    pub fn from_prototype(prototype: &Shape, offset: Vector2D) -> Self {
        let mut shape = prototype.clone_with_new_id();
        shape.translate(offset);
        Self {
            offset,
            ..Self::new(shape)
        }
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }
}

impl Command for AddShapeCommand {
    fn name(&self) -> &str {
        "Add Shape"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        require_finite_offset(self.offset, self.name())?;
        if let Some(shape) = &self.pending {
            shape.validate()?;
        }
        if ctx.drawing.contains(self.shape_id) {
            return Err(DrawingError::DuplicateShape { id: self.shape_id }.into());
        }
        if let Some(index) = self.index {
            if index > ctx.drawing.len() {
                return Err(DrawingError::IndexOutOfRange {
                    index,
                    len: ctx.drawing.len(),
                }
                .into());
            }
        }
        self.prepared = true;
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.prepared, self.name())?;
        if ctx.drawing.contains(self.shape_id) {
            return Err(DrawingError::DuplicateShape { id: self.shape_id }.into());
        }
        let shape = self
            .pending
            .take()
            .ok_or_else(|| CommandError::precondition(self.name(), "shape is already added"))?;
        match self.index {
            Some(index) => {
                ctx.drawing.insert_or_append(shape, index)?;
            }
            None => {
                ctx.drawing.add_shape(shape)?;
            }
        }
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.prepared, self.name())?;
        let shape = ctx
            .drawing
            .remove_shape(self.shape_id)
            .ok_or(DrawingError::ShapeNotFound { id: self.shape_id })?;
        self.pending = Some(shape);
        Ok(())
    }

    fn is_prepared(&self) -> bool {
        self.prepared
    }
}

/// Removes a shape, reinserting it at its former index on undo.
#[derive(Debug, Clone)]
pub struct DeleteShapeCommand {
    shape_id: ShapeId,
    /// Index at execute time and the removed shape
    removed: Option<(usize, Shape)>,
    last_restore: Option<Placement>,
    prepared: bool,
}

impl DeleteShapeCommand {
    pub fn new(shape_id: ShapeId) -> Self {
        Self {
            shape_id,
            removed: None,
            last_restore: None,
            prepared: false,
        }
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }

    /// Where the most recent undo put the shape back
    pub fn last_restore(&self) -> Option<Placement> {
        self.last_restore
    }
}

impl Command for DeleteShapeCommand {
    fn name(&self) -> &str {
        "Delete Shape"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        require_shape(ctx.drawing, self.shape_id)?;
        self.prepared = true;
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.prepared, self.name())?;
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

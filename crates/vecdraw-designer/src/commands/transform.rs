use vecdraw_core::{CommandError, Rect, ShapeId, Vector2D};

use super::{require_finite_offset, require_prepared, require_shape, Command, EditContext};
use crate::model::{RotationState, Shape};

/// Translates a shape. Undo applies the opposite displacement.
#[derive(Debug, Clone)]
pub struct MoveShapeCommand {
    shape_id: ShapeId,
    delta: Vector2D,
    prepared: bool,
}

impl MoveShapeCommand {
    pub fn new(shape_id: ShapeId, delta: Vector2D) -> Self {
        Self {
            shape_id,
            delta,
            prepared: false,
        }
    }

    pub fn delta(&self) -> Vector2D {
        self.delta
    }
}

impl Command for MoveShapeCommand {
    fn name(&self) -> &str {
        "Move Shape"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        require_finite_offset(self.delta, self.name())?;
        require_shape(ctx.drawing, self.shape_id)?;
        self.prepared = true;
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.prepared, self.name())?;
        ctx.drawing.move_shape(self.shape_id, self.delta)?;
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.prepared, self.name())?;
        ctx.drawing.move_shape(self.shape_id, self.delta.inverse())?;
        Ok(())
    }

    fn is_prepared(&self) -> bool {
        self.prepared
    }
}

/// Replaces a shape's unrotated bounding box.
///
/// Prepare keeps an identity-preserving clone of the shape, so undo is
/// exact even for lines and groups whose resize is not invertible.
#[derive(Debug, Clone)]
pub struct ResizeShapeCommand {
    shape_id: ShapeId,
    new_bounds: Rect,
    before: Option<Shape>,
}

impl ResizeShapeCommand {
    pub fn new(shape_id: ShapeId, new_bounds: Rect) -> Self {
        Self {
            shape_id,
            new_bounds,
            before: None,
        }
    }

    /// Bounds captured at prepare time
    pub fn old_bounds(&self) -> Option<Rect> {
        self.before.as_ref().map(Shape::bounds)
    }
}

impl Command for ResizeShapeCommand {
    fn name(&self) -> &str {
        "Resize Shape"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        let shape = require_shape(ctx.drawing, self.shape_id)?;
        let mut probe = shape.clone();
        probe.resize(&self.new_bounds)?;
        self.before = Some(shape.clone());
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.before.is_some(), self.name())?;
        ctx.drawing.resize_shape(self.shape_id, &self.new_bounds)?;
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        let before = self
            .before
            .clone()
            .ok_or_else(|| CommandError::not_prepared(self.name()))?;
        ctx.drawing.replace_shape(before)?;
        Ok(())
    }

    fn is_prepared(&self) -> bool {
        self.before.is_some()
    }
}

/// Sets a shape's rotation. Groups propagate it to their children.
#[derive(Debug, Clone)]
pub struct RotateShapeCommand {
    shape_id: ShapeId,
    degrees: f64,
    before: Option<RotationState>,
}

impl RotateShapeCommand {
    pub fn new(shape_id: ShapeId, degrees: f64) -> Self {
        Self {
            shape_id,
            degrees,
            before: None,
        }
    }
}

impl Command for RotateShapeCommand {
    fn name(&self) -> &str {
        "Rotate Shape"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        if !self.degrees.is_finite() {
            return Err(CommandError::precondition(
                self.name(),
                "rotation must be finite",
            ));
        }
        let shape = require_shape(ctx.drawing, self.shape_id)?;
        self.before = Some(shape.rotation_state());
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.before.is_some(), self.name())?;
        ctx.drawing.set_shape_rotation(self.shape_id, self.degrees)?;
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        let before = self
            .before
            .as_ref()
            .ok_or_else(|| CommandError::not_prepared(self.name()))?;
        ctx.drawing.restore_shape_rotation(self.shape_id, before)?;
        Ok(())
    }

    fn is_prepared(&self) -> bool {
        self.before.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Shared body of the two reflection commands. Reflection is its own
/// inverse, so execute and undo do the same thing.
#[derive(Debug, Clone)]
struct Reflection {
    shape_id: ShapeId,
    axis: Axis,
    prepared: bool,
}

impl Reflection {
    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        require_shape(ctx.drawing, self.shape_id)?;
        self.prepared = true;
        Ok(())
    }

    fn apply(&self, ctx: &mut EditContext<'_>, name: &str) -> Result<(), CommandError> {
        require_prepared(self.prepared, name)?;
        match self.axis {
            Axis::Horizontal => ctx.drawing.reflect_shape_horizontal(self.shape_id)?,
            Axis::Vertical => ctx.drawing.reflect_shape_vertical(self.shape_id)?,
        }
        Ok(())
    }
}

/// Mirrors a shape left-to-right about its own center.
#[derive(Debug, Clone)]
pub struct ReflectHorizontalCommand(Reflection);

impl ReflectHorizontalCommand {
    pub fn new(shape_id: ShapeId) -> Self {
        Self(Reflection {
            shape_id,
            axis: Axis::Horizontal,
            prepared: false,
        })
    }
}

impl Command for ReflectHorizontalCommand {
    fn name(&self) -> &str {
        "Reflect Horizontal"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        self.0.prepare(ctx)
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        self.0.apply(ctx, "Reflect Horizontal")
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        self.0.apply(ctx, "Reflect Horizontal")
    }

    fn is_prepared(&self) -> bool {
        self.0.prepared
    }
}

/// Mirrors a shape top-to-bottom about its own center.
#[derive(Debug, Clone)]
pub struct ReflectVerticalCommand(Reflection);

impl ReflectVerticalCommand {
    pub fn new(shape_id: ShapeId) -> Self {
        Self(Reflection {
            shape_id,
            axis: Axis::Vertical,
            prepared: false,
        })
    }
}

impl Command for ReflectVerticalCommand {
    fn name(&self) -> &str {
        "Reflect Vertical"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        self.0.prepare(ctx)
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        self.0.apply(ctx, "Reflect Vertical")
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        self.0.apply(ctx, "Reflect Vertical")
    }

    fn is_prepared(&self) -> bool {
        self.0.prepared
    }
}

use vecdraw_core::{CommandError, ShapeId};

use super::{require_prepared, require_shape, Command, EditContext};
use crate::drawing::Placement;

#[derive(Debug, Clone, Copy)]
enum Target {
    Front,
    Back,
}

/// Shared body of the Z-order commands: capture the original index once,
/// relocate on execute, restore that index on undo.
#[derive(Debug, Clone)]
struct Restack {
    shape_id: ShapeId,
    target: Target,
    original_index: Option<usize>,
    last_restore: Option<Placement>,
}

impl Restack {
    fn new(shape_id: ShapeId, target: Target) -> Self {
        Self {
            shape_id,
            target,
            original_index: None,
            last_restore: None,
        }
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        require_shape(ctx.drawing, self.shape_id)?;
        self.original_index = ctx.drawing.shape_index(self.shape_id);
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>, name: &str) -> Result<(), CommandError> {
        require_prepared(self.original_index.is_some(), name)?;
        match self.target {
            Target::Front => ctx.drawing.bring_to_front(self.shape_id)?,
            Target::Back => ctx.drawing.send_to_back(self.shape_id)?,
        };
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>, name: &str) -> Result<(), CommandError> {
        let index = self
            .original_index
            .ok_or_else(|| CommandError::not_prepared(name))?;
        self.last_restore = Some(ctx.drawing.relocate_shape(self.shape_id, index)?);
        Ok(())
    }
}

/// Moves a shape to the top of the Z-order.
#[derive(Debug, Clone)]
pub struct BringToFrontCommand(Restack);

impl BringToFrontCommand {
    pub fn new(shape_id: ShapeId) -> Self {
        Self(Restack::new(shape_id, Target::Front))
    }

    /// Index captured at prepare time
    pub fn original_index(&self) -> Option<usize> {
        self.0.original_index
    }

    /// Where the most recent undo put the shape
    pub fn last_restore(&self) -> Option<Placement> {
        self.0.last_restore
    }
}

impl Command for BringToFrontCommand {
    fn name(&self) -> &str {
        "Bring to Front"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        self.0.prepare(ctx)
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        self.0.execute(ctx, "Bring to Front")
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        self.0.undo(ctx, "Bring to Front")
    }

    fn is_prepared(&self) -> bool {
        self.0.original_index.is_some()
    }
}

/// Moves a shape to the bottom of the Z-order.
#[derive(Debug, Clone)]
pub struct SendToBackCommand(Restack);

impl SendToBackCommand {
    pub fn new(shape_id: ShapeId) -> Self {
        Self(Restack::new(shape_id, Target::Back))
    }

    pub fn original_index(&self) -> Option<usize> {
        self.0.original_index
    }

    pub fn last_restore(&self) -> Option<Placement> {
        self.0.last_restore
    }
}

impl Command for SendToBackCommand {
    fn name(&self) -> &str {
        "Send to Back"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        self.0.prepare(ctx)
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        self.0.execute(ctx, "Send to Back")
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        self.0.undo(ctx, "Send to Back")
    }

    fn is_prepared(&self) -> bool {
        self.0.original_index.is_some()
    }
}

use std::collections::HashSet;
use vecdraw_core::{CommandError, DrawingError, ShapeId};

use super::{require_prepared, require_shape, Command, EditContext};
use crate::drawing::{Drawing, Placement};
use crate::model::{GroupShape, Shape, ShapeKind};

/// Wraps two or more shapes in a new group placed on top.
///
/// Execute records every member's original index. Undo dissolves the group
/// and reinserts each member at that index in ascending order, which puts
/// back the exact interleaving with unrelated shapes. Members whose index
/// went stale are appended.
#[derive(Debug, Clone)]
pub struct GroupCommand {
    member_ids: Vec<ShapeId>,
    group_id: Option<ShapeId>,
    /// (original index, member) in ascending index order
    originals: Vec<(usize, ShapeId)>,
    last_restore: Vec<Placement>,
}

impl GroupCommand {
    /// Fails unless at least two distinct shapes are named and all are present
    pub fn new(drawing: &Drawing, member_ids: Vec<ShapeId>) -> Result<Self, CommandError> {
        let distinct: HashSet<ShapeId> = member_ids.iter().copied().collect();
        if distinct.len() != member_ids.len() {
            return Err(CommandError::precondition(
                "Group",
                "a shape is listed more than once",
            ));
        }
        if member_ids.len() < 2 {
            return Err(CommandError::precondition(
                "Group",
                "at least two shapes are needed",
            ));
        }
        for &id in &member_ids {
            require_shape(drawing, id)?;
        }
        Ok(Self {
            member_ids,
            group_id: None,
            originals: Vec::new(),
            last_restore: Vec::new(),
        })
    }

    /// Identity of the group, minted at prepare time
    pub fn group_id(&self) -> Option<ShapeId> {
        self.group_id
    }

    /// Where the most recent undo put each member back
    pub fn last_restore(&self) -> &[Placement] {
        &self.last_restore
    }
}

impl Command for GroupCommand {
    fn name(&self) -> &str {
        "Group"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        for &id in &self.member_ids {
            require_shape(ctx.drawing, id)?;
        }
        self.group_id = Some(ShapeId::new());
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        let group_id = self
            .group_id
            .ok_or_else(|| CommandError::not_prepared(self.name()))?;

        let mut originals = self
            .member_ids
            .iter()
            .map(|&id| {
                ctx.drawing
                    .shape_index(id)
                    .map(|index| (index, id))
                    .ok_or(DrawingError::ShapeNotFound { id })
            })
            .collect::<Result<Vec<_>, _>>()?;
        originals.sort_unstable_by_key(|&(index, _)| index);

        // Build from clones first so a failure leaves the drawing untouched
        let children = originals
            .iter()
            .map(|&(_, id)| require_shape(ctx.drawing, id).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        let group = Shape::with_id(group_id, ShapeKind::Group(GroupShape::new(children)?));

        // Descending index order keeps the remaining indices valid
        for &(_, id) in originals.iter().rev() {
            ctx.drawing.remove_shape(id);
        }
        ctx.drawing.add_shape(group)?;
        tracing::debug!("Grouped {} shapes into {}", originals.len(), group_id);
        self.originals = originals;
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        let group_id = self
            .group_id
            .ok_or_else(|| CommandError::not_prepared(self.name()))?;
        if !require_shape(ctx.drawing, group_id)?.is_group() {
            return Err(CommandError::precondition(
                self.name(),
                format!("{group_id} is no longer a group"),
            ));
        }
        if let Some(&(_, id)) = self.originals.iter().find(|(_, id)| ctx.drawing.contains(*id)) {
            return Err(DrawingError::DuplicateShape { id }.into());
        }

        let mut group = ctx
            .drawing
            .remove_shape(group_id)
            .ok_or(DrawingError::ShapeNotFound { id: group_id })?;
        let mut children = group.take_group_children().unwrap_or_default();

        let mut placements = Vec::with_capacity(self.originals.len());
        for &(index, id) in &self.originals {
            if let Some(pos) = children.iter().position(|c| c.id() == id) {
                let child = children.remove(pos);
                placements.push(ctx.drawing.insert_or_append(child, index)?);
            }
        }
        self.last_restore = placements;
        Ok(())
    }

    fn is_prepared(&self) -> bool {
        self.group_id.is_some()
    }
}

/// Dissolves a group, inserting its children where the group was.
///
/// Undo removes the children and reinserts the group at its captured
/// index.
#[derive(Debug, Clone)]
pub struct UngroupCommand {
    group_id: ShapeId,
    child_ids: Vec<ShapeId>,
    /// Index of the group at execute time and the emptied group
    shell: Option<(usize, Shape)>,
    last_restore: Option<Placement>,
    prepared: bool,
}

impl UngroupCommand {
    /// Fails unless `group_id` names a group in the drawing
    pub fn new(drawing: &Drawing, group_id: ShapeId) -> Result<Self, CommandError> {
        let child_ids = require_group(drawing, group_id, "Ungroup")?;
        Ok(Self {
            group_id,
            child_ids,
            shell: None,
            last_restore: None,
            prepared: false,
        })
    }

    pub fn child_ids(&self) -> &[ShapeId] {
        &self.child_ids
    }

    pub fn last_restore(&self) -> Option<Placement> {
        self.last_restore
    }
}

fn require_group(
    drawing: &Drawing,
    group_id: ShapeId,
    command: &str,
) -> Result<Vec<ShapeId>, CommandError> {
    let shape = require_shape(drawing, group_id)?;
    shape.as_group().map(GroupShape::child_ids).ok_or_else(|| {
        CommandError::precondition(
            command,
            format!("{} is a {}, not a group", group_id, shape.kind_name()),
        )
    })
}

impl Command for UngroupCommand {
    fn name(&self) -> &str {
        "Ungroup"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        self.child_ids = require_group(ctx.drawing, self.group_id, self.name())?;
        self.prepared = true;
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.prepared, self.name())?;
        require_group(ctx.drawing, self.group_id, self.name())?;
        if let Some(&id) = self.child_ids.iter().find(|&&id| ctx.drawing.contains(id)) {
            return Err(DrawingError::DuplicateShape { id }.into());
        }

        let (index, mut shell) = ctx
            .drawing
            .take_shape(self.group_id)
            .ok_or(DrawingError::ShapeNotFound { id: self.group_id })?;
        let children = shell.take_group_children().unwrap_or_default();
        self.child_ids = children.iter().map(Shape::id).collect();
        for (offset, child) in children.into_iter().enumerate() {
            ctx.drawing.add_shape_at(child, index + offset)?;
        }
        tracing::debug!(
            "Ungrouped {} into {} shapes at index {}",
            self.group_id,
            self.child_ids.len(),
            index
        );
        self.shell = Some((index, shell));
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.prepared, self.name())?;
        if ctx.drawing.contains(self.group_id) {
            return Err(DrawingError::DuplicateShape { id: self.group_id }.into());
        }
        for &id in &self.child_ids {
            require_shape(ctx.drawing, id)?;
        }
        let (index, mut shell) = self
            .shell
            .take()
            .ok_or_else(|| CommandError::precondition(self.name(), "nothing to restore"))?;

        let children = self
            .child_ids
            .iter()
            .filter_map(|&id| ctx.drawing.remove_shape(id))
            .collect();
        shell.restore_group_children(children);
        self.last_restore = Some(ctx.drawing.insert_or_append(shell, index)?);
        Ok(())
    }

    fn is_prepared(&self) -> bool {
        self.prepared
    }
}

use vecdraw_core::{ColorData, CommandError, ShapeId};

use super::{require_prepared, require_shape, Command, EditContext};
use crate::drawing::Drawing;
use crate::model::{Shape, StyleState};

/// Sets the stroke (ink) color.
#[derive(Debug, Clone)]
pub struct ChangeStrokeColorCommand {
    shape_id: ShapeId,
    color: ColorData,
    before: Option<StyleState>,
}

impl ChangeStrokeColorCommand {
    pub fn new(shape_id: ShapeId, color: ColorData) -> Self {
        Self {
            shape_id,
            color,
            before: None,
        }
    }
}

impl Command for ChangeStrokeColorCommand {
    fn name(&self) -> &str {
        "Change Stroke Color"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        self.before = Some(require_shape(ctx.drawing, self.shape_id)?.style_state());
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.before.is_some(), self.name())?;
        ctx.drawing.set_shape_stroke_color(self.shape_id, self.color)?;
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        let before = self
            .before
            .as_ref()
            .ok_or_else(|| CommandError::not_prepared(self.name()))?;
        ctx.drawing.restore_shape_style(self.shape_id, before)?;
        Ok(())
    }

    fn is_prepared(&self) -> bool {
        self.before.is_some()
    }
}

/// Sets the fill color. No visible effect on lines and text.
#[derive(Debug, Clone)]
pub struct ChangeFillColorCommand {
    shape_id: ShapeId,
    color: ColorData,
    before: Option<StyleState>,
}

impl ChangeFillColorCommand {
    pub fn new(shape_id: ShapeId, color: ColorData) -> Self {
        Self {
            shape_id,
            color,
            before: None,
        }
    }
}

impl Command for ChangeFillColorCommand {
    fn name(&self) -> &str {
        "Change Fill Color"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        self.before = Some(require_shape(ctx.drawing, self.shape_id)?.style_state());
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.before.is_some(), self.name())?;
        ctx.drawing.set_shape_fill_color(self.shape_id, self.color)?;
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        let before = self
            .before
            .as_ref()
            .ok_or_else(|| CommandError::not_prepared(self.name()))?;
        ctx.drawing.restore_shape_style(self.shape_id, before)?;
        Ok(())
    }

    fn is_prepared(&self) -> bool {
        self.before.is_some()
    }
}

fn require_text(drawing: &Drawing, shape_id: ShapeId, command: &str) -> Result<(), CommandError> {
    let shape = require_shape(drawing, shape_id)?;
    if shape.is_text() {
        Ok(())
    } else {
        Err(CommandError::precondition(
            command,
            format!("{} is a {}, not text", shape_id, shape.kind_name()),
        ))
    }
}

/// Changes a text shape's font size, rescaling its frame.
#[derive(Debug, Clone)]
pub struct ChangeFontSizeCommand {
    shape_id: ShapeId,
    font_size: f64,
    before: Option<Shape>,
}

impl ChangeFontSizeCommand {
    /// Fails unless `shape_id` names a text shape and `font_size` is positive
    pub fn new(
        drawing: &Drawing,
        shape_id: ShapeId,
        font_size: f64,
    ) -> Result<Self, CommandError> {
        require_text(drawing, shape_id, "Change Font Size")?;
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(CommandError::precondition(
                "Change Font Size",
                format!("font size must be positive, got {font_size}"),
            ));
        }
        Ok(Self {
            shape_id,
            font_size,
            before: None,
        })
    }
}

impl Command for ChangeFontSizeCommand {
    fn name(&self) -> &str {
        "Change Font Size"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        require_text(ctx.drawing, self.shape_id, self.name())?;
        self.before = Some(require_shape(ctx.drawing, self.shape_id)?.clone());
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.before.is_some(), self.name())?;
        ctx.drawing.set_shape_font_size(self.shape_id, self.font_size)?;
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

/// Replaces a text shape's content.
#[derive(Debug, Clone)]
pub struct ChangeTextCommand {
    shape_id: ShapeId,
    content: String,
    before: Option<Shape>,
}

impl ChangeTextCommand {
    /// Fails unless `shape_id` names a text shape
    pub fn new(
        drawing: &Drawing,
        shape_id: ShapeId,
        content: impl Into<String>,
    ) -> Result<Self, CommandError> {
        require_text(drawing, shape_id, "Change Text")?;
        Ok(Self {
            shape_id,
            content: content.into(),
            before: None,
        })
    }
}

impl Command for ChangeTextCommand {
    fn name(&self) -> &str {
        "Change Text"
    }

    fn prepare(&mut self, ctx: &EditContext<'_>) -> Result<(), CommandError> {
        require_text(ctx.drawing, self.shape_id, self.name())?;
        self.before = Some(require_shape(ctx.drawing, self.shape_id)?.clone());
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.before.is_some(), self.name())?;
        ctx.drawing.set_shape_text(self.shape_id, &self.content)?;
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

use serde::{Deserialize, Serialize};
use vecdraw_core::constants::{TEXT_CHAR_WIDTH_RATIO, TEXT_LINE_HEIGHT_RATIO};
use vecdraw_core::{Point2D, Rect, ShapeError, Vector2D};

use super::{require_area, ShapeGeometry};

/// A single run of text laid out in a frame derived from its font size.
///
/// The stroke color is the ink color. Fill does not apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    content: String,
    font_name: String,
    font_size: f64,
    /// Font size the text was created with
    base_font_size: f64,
    frame: Rect,
}

fn require_font_size(size: f64) -> Result<(), ShapeError> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(ShapeError::invalid(
            "font_size",
            format!("must be positive and finite, got {size}"),
        ))
    }
}

fn derived_width(content: &str, font_size: f64) -> f64 {
    content.chars().count().max(1) as f64 * font_size * TEXT_CHAR_WIDTH_RATIO
}

impl TextShape {
    /// Lay out `content` with its top-left corner at `origin`
    pub fn new(
        content: impl Into<String>,
        origin: Point2D,
        font_size: f64,
        font_name: impl Into<String>,
    ) -> Result<Self, ShapeError> {
        let content = content.into();
        let font_name = font_name.into();
        require_font_size(font_size)?;
        if font_name.trim().is_empty() {
            return Err(ShapeError::invalid("font_name", "must not be empty"));
        }
        let frame = Rect::new(
            origin,
            derived_width(&content, font_size),
            font_size * TEXT_LINE_HEIGHT_RATIO,
        )?;
        Ok(Self {
            content,
            font_name,
            font_size,
            base_font_size: font_size,
            frame,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn base_font_size(&self) -> f64 {
        self.base_font_size
    }

    /// Change the font size, rescaling the frame about its top-left corner
    pub fn set_font_size(&mut self, size: f64) -> Result<(), ShapeError> {
        require_font_size(size)?;
        let factor = size / self.font_size;
        let frame = Rect::new(
            self.frame.top_left(),
            self.frame.width() * factor,
            self.frame.height() * factor,
        )?;
        require_area("text", &frame)?;
        self.frame = frame;
        self.font_size = size;
        Ok(())
    }

    /// Replace the content, re-deriving the frame width
    pub fn set_content(&mut self, content: impl Into<String>) -> Result<(), ShapeError> {
        let content = content.into();
        let frame = Rect::new(
            self.frame.top_left(),
            derived_width(&content, self.font_size),
            self.frame.height(),
        )?;
        self.frame = frame;
        self.content = content;
        Ok(())
    }
}

impl ShapeGeometry for TextShape {
    fn bounds(&self) -> Rect {
        self.frame
    }

    fn translate(&mut self, delta: Vector2D) {
        self.frame = self.frame.translate(delta);
    }

    /// The font size follows the frame height
    fn resize(&mut self, new_bounds: &Rect) -> Result<(), ShapeError> {
        require_area("text", new_bounds)?;
        let font_size = self.font_size * new_bounds.height() / self.frame.height();
        require_font_size(font_size)?;
        self.frame = *new_bounds;
        self.font_size = font_size;
        Ok(())
    }

    fn contains_local(&self, p: &Point2D, _tolerance: f64) -> bool {
        self.frame.contains(p)
    }

    fn mirror_x(&mut self, axis: f64) {
        self.frame = self.frame.mirror_x(axis);
    }

    fn mirror_y(&mut self, axis: f64) {
        self.frame = self.frame.mirror_y(axis);
    }

    fn validate(&self) -> Result<(), ShapeError> {
        require_font_size(self.font_size)?;
        require_font_size(self.base_font_size)?;
        if self.font_name.trim().is_empty() {
            return Err(ShapeError::invalid("font_name", "must not be empty"));
        }
        require_area("text", &self.frame)
    }
}

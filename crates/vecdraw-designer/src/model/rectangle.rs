use serde::{Deserialize, Serialize};
use vecdraw_core::{Point2D, Rect, ShapeError, Vector2D};

use super::{require_area, ShapeGeometry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleShape {
    bounds: Rect,
}

impl RectangleShape {
    pub fn new(bounds: Rect) -> Result<Self, ShapeError> {
        require_area("rectangle", &bounds)?;
        Ok(Self { bounds })
    }
}

impl ShapeGeometry for RectangleShape {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn translate(&mut self, delta: Vector2D) {
        self.bounds = self.bounds.translate(delta);
    }

    fn resize(&mut self, new_bounds: &Rect) -> Result<(), ShapeError> {
        require_area("rectangle", new_bounds)?;
        self.bounds = *new_bounds;
        Ok(())
    }

    fn contains_local(&self, p: &Point2D, _tolerance: f64) -> bool {
        self.bounds.contains(p)
    }

    fn mirror_x(&mut self, axis: f64) {
        self.bounds = self.bounds.mirror_x(axis);
    }

    fn mirror_y(&mut self, axis: f64) {
        self.bounds = self.bounds.mirror_y(axis);
    }

    fn validate(&self) -> Result<(), ShapeError> {
        require_area("rectangle", &self.bounds)
    }
}

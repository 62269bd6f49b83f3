use serde::{Deserialize, Serialize};
use vecdraw_core::{Point2D, Rect, ShapeError, Vector2D};

use super::{require_area, ShapeGeometry};

/// Ellipse inscribed in its bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseShape {
    bounds: Rect,
}

impl EllipseShape {
    pub fn new(bounds: Rect) -> Result<Self, ShapeError> {
        require_area("ellipse", &bounds)?;
        Ok(Self { bounds })
    }

    pub fn center(&self) -> Point2D {
        self.bounds.center()
    }

    pub fn radius_x(&self) -> f64 {
        self.bounds.width() / 2.0
    }

    pub fn radius_y(&self) -> f64 {
        self.bounds.height() / 2.0
    }
}

impl ShapeGeometry for EllipseShape {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn translate(&mut self, delta: Vector2D) {
        self.bounds = self.bounds.translate(delta);
    }

    fn resize(&mut self, new_bounds: &Rect) -> Result<(), ShapeError> {
        require_area("ellipse", new_bounds)?;
        self.bounds = *new_bounds;
        Ok(())
    }

    fn contains_local(&self, p: &Point2D, _tolerance: f64) -> bool {
        // (x/a)^2 + (y/b)^2 <= 1
        let c = self.center();
        let nx = (p.x - c.x) / self.radius_x();
        let ny = (p.y - c.y) / self.radius_y();
        nx * nx + ny * ny <= 1.0
    }

    fn mirror_x(&mut self, axis: f64) {
        self.bounds = self.bounds.mirror_x(axis);
    }

    fn mirror_y(&mut self, axis: f64) {
        self.bounds = self.bounds.mirror_y(axis);
    }

    fn validate(&self) -> Result<(), ShapeError> {
        require_area("ellipse", &self.bounds)
    }
}

use serde::{Deserialize, Serialize};
use vecdraw_core::constants::GEOMETRY_EPSILON;
use vecdraw_core::{Point2D, Rect, ShapeError, Vector2D};

use super::ShapeGeometry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    start: Point2D,
    end: Point2D,
}

fn require_length(start: &Point2D, end: &Point2D) -> Result<(), ShapeError> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ShapeError::invalid("endpoints", "must be finite"));
    }
    if start.distance_to(end) < GEOMETRY_EPSILON {
        return Err(ShapeError::degenerate("line", "endpoints coincide"));
    }
    Ok(())
}

impl LineSegment {
    pub fn new(start: Point2D, end: Point2D) -> Result<Self, ShapeError> {
        require_length(&start, &end)?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Point2D {
        self.start
    }

    pub fn end(&self) -> Point2D {
        self.end
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Shortest distance from `p` to the segment
    pub fn distance_to_point(&self, p: &Point2D) -> f64 {
        let seg = self.start.vector_to(&self.end);
        let len_sq = seg.dot(&seg);
        let t = (self.start.vector_to(p).dot(&seg) / len_sq).clamp(0.0, 1.0);
        let closest = self.start.translate(seg.scale(t));
        closest.distance_to(p)
    }
}

impl ShapeGeometry for LineSegment {
    fn bounds(&self) -> Rect {
        Rect::from_corners(self.start, self.end)
    }

    fn translate(&mut self, delta: Vector2D) {
        self.start = self.start.translate(delta);
        self.end = self.end.translate(delta);
    }

    fn resize(&mut self, new_bounds: &Rect) -> Result<(), ShapeError> {
        let old = self.bounds();
        let start = old.map_point(&self.start, new_bounds);
        let end = old.map_point(&self.end, new_bounds);
        require_length(&start, &end)?;
        self.start = start;
        self.end = end;
        Ok(())
    }

    fn contains_local(&self, p: &Point2D, tolerance: f64) -> bool {
        self.distance_to_point(p) <= tolerance
    }

    fn mirror_x(&mut self, axis: f64) {
        self.start = self.start.mirror_x(axis);
        self.end = self.end.mirror_x(axis);
    }

    fn mirror_y(&mut self, axis: f64) {
        self.start = self.start.mirror_y(axis);
        self.end = self.end.mirror_y(axis);
    }

    fn validate(&self) -> Result<(), ShapeError> {
        require_length(&self.start, &self.end)
    }
}

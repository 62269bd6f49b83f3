use serde::{Deserialize, Serialize};
use vecdraw_core::constants::GEOMETRY_EPSILON;
use vecdraw_core::{Point2D, Rect, ShapeError, Vector2D};

use super::ShapeGeometry;

/// Closed polygon over an ordered vertex list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonShape {
    vertices: Vec<Point2D>,
}

/// Shoelace formula, signed
fn signed_area(vertices: &[Point2D]) -> f64 {
    let n = vertices.len();
    let mut twice_area = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        twice_area += a.x * b.y - b.x * a.y;
    }
    twice_area / 2.0
}

fn require_polygon(vertices: &[Point2D]) -> Result<(), ShapeError> {
    if vertices.len() < 3 {
        return Err(ShapeError::invalid(
            "vertices",
            format!("a polygon needs at least 3 vertices, got {}", vertices.len()),
        ));
    }
    if vertices.iter().any(|v| !v.is_finite()) {
        return Err(ShapeError::invalid("vertices", "must be finite"));
    }
    if signed_area(vertices).abs() < GEOMETRY_EPSILON {
        return Err(ShapeError::degenerate("polygon", "vertices enclose no area"));
    }
    Ok(())
}

fn distance_to_segment(p: &Point2D, a: &Point2D, b: &Point2D) -> f64 {
    let seg = a.vector_to(b);
    let len_sq = seg.dot(&seg);
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (a.vector_to(p).dot(&seg) / len_sq).clamp(0.0, 1.0);
    a.translate(seg.scale(t)).distance_to(p)
}

impl PolygonShape {
    pub fn new(vertices: Vec<Point2D>) -> Result<Self, ShapeError> {
        require_polygon(&vertices)?;
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    pub fn area(&self) -> f64 {
        signed_area(&self.vertices).abs()
    }

    fn edges(&self) -> impl Iterator<Item = (&Point2D, &Point2D)> {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }
}

impl ShapeGeometry for PolygonShape {
    fn bounds(&self) -> Rect {
        Rect::enclosing(&self.vertices)
            .unwrap_or_else(|| Rect::from_corners(Point2D::ORIGIN, Point2D::ORIGIN))
    }

    fn translate(&mut self, delta: Vector2D) {
        for v in &mut self.vertices {
            *v = v.translate(delta);
        }
    }

    fn resize(&mut self, new_bounds: &Rect) -> Result<(), ShapeError> {
        let old = self.bounds();
        let mapped: Vec<Point2D> = self
            .vertices
            .iter()
            .map(|v| old.map_point(v, new_bounds))
            .collect();
        require_polygon(&mapped)?;
        self.vertices = mapped;
        Ok(())
    }

    fn contains_local(&self, p: &Point2D, _tolerance: f64) -> bool {
        // Points on an edge count as inside, matching Rect::contains
        if self
            .edges()
            .any(|(a, b)| distance_to_segment(p, a, b) < GEOMETRY_EPSILON)
        {
            return true;
        }

        // Ray casting, even-odd rule
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
                inside = !inside;
            }
        }
        inside
    }

    fn mirror_x(&mut self, axis: f64) {
        for v in &mut self.vertices {
            *v = v.mirror_x(axis);
        }
    }

    fn mirror_y(&mut self, axis: f64) {
        for v in &mut self.vertices {
            *v = v.mirror_y(axis);
        }
    }

    fn validate(&self) -> Result<(), ShapeError> {
        require_polygon(&self.vertices)
    }
}

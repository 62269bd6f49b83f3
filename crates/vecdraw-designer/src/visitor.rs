//! Visitor dispatch over the shape variants.
//!
//! Renderers and exporters implement [`ShapeVisitor`] and call
//! [`Shape::accept`](crate::model::Shape::accept). The core never draws
//! anything itself.

use serde::Serialize;

use crate::model::{
    EllipseShape, GroupShape, LineSegment, PolygonShape, RectangleShape, Shape, TextShape,
};

/// One method per shape variant. Each receives the owning [`Shape`] for
/// identity, rotation and style, plus the variant's geometry.
pub trait ShapeVisitor {
    fn visit_rectangle(&mut self, shape: &Shape, rectangle: &RectangleShape);
    fn visit_ellipse(&mut self, shape: &Shape, ellipse: &EllipseShape);
    fn visit_line(&mut self, shape: &Shape, line: &LineSegment);
    fn visit_polygon(&mut self, shape: &Shape, polygon: &PolygonShape);
    fn visit_text(&mut self, shape: &Shape, text: &TextShape);

    /// Visits the children in order by default
    fn visit_group(&mut self, _shape: &Shape, group: &GroupShape) {
        for child in group.children() {
            child.accept(self);
        }
    }
}

/// Per-variant shape counts, recursing into groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShapeCensus {
    pub rectangles: usize,
    pub ellipses: usize,
    pub lines: usize,
    pub polygons: usize,
    pub texts: usize,
    pub groups: usize,
}

impl ShapeCensus {
    /// Count every shape reachable from `shapes`
    pub fn of<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Self {
        let mut census = Self::default();
        for shape in shapes {
            shape.accept(&mut census);
        }
        census
    }

    /// Leaf shapes plus groups
    pub fn total(&self) -> usize {
        self.rectangles + self.ellipses + self.lines + self.polygons + self.texts + self.groups
    }
}

impl ShapeVisitor for ShapeCensus {
    fn visit_rectangle(&mut self, _shape: &Shape, _rectangle: &RectangleShape) {
        self.rectangles += 1;
    }

    fn visit_ellipse(&mut self, _shape: &Shape, _ellipse: &EllipseShape) {
        self.ellipses += 1;
    }

    fn visit_line(&mut self, _shape: &Shape, _line: &LineSegment) {
        self.lines += 1;
    }

    fn visit_polygon(&mut self, _shape: &Shape, _polygon: &PolygonShape) {
        self.polygons += 1;
    }

    fn visit_text(&mut self, _shape: &Shape, _text: &TextShape) {
        self.texts += 1;
    }

    fn visit_group(&mut self, _shape: &Shape, group: &GroupShape) {
        self.groups += 1;
        for child in group.children() {
            child.accept(self);
        }
    }
}

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use vecdraw_core::{Point2D, Rect, ShapeError, ShapeId, Vector2D};

use super::{Shape, ShapeGeometry};

/// Ordered collection of child shapes treated as one.
///
/// The group's identity is independent of its children's. Bounds are the
/// union of the children's unrotated bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupShape {
    children: Vec<Shape>,
}

fn require_children(children: &[Shape]) -> Result<(), ShapeError> {
    if children.is_empty() {
        return Err(ShapeError::invalid("children", "a group needs at least one child"));
    }
    let mut seen = HashSet::with_capacity(children.len());
    for child in children {
        if !seen.insert(child.id()) {
            return Err(ShapeError::invalid(
                "children",
                format!("{} appears more than once", child.id()),
            ));
        }
    }
    Ok(())
}

impl GroupShape {
    pub fn new(children: Vec<Shape>) -> Result<Self, ShapeError> {
        require_children(&children)?;
        Ok(Self { children })
    }

    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child_ids(&self) -> Vec<ShapeId> {
        self.children.iter().map(Shape::id).collect()
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Shape] {
        &mut self.children
    }

    /// Leaves an empty shell; only ungrouping does this
    pub(crate) fn take_children(&mut self) -> Vec<Shape> {
        std::mem::take(&mut self.children)
    }

    pub(crate) fn restore_children(&mut self, children: Vec<Shape>) {
        self.children = children;
    }

    pub(crate) fn renew_child_ids(&mut self) {
        for child in &mut self.children {
            *child = child.clone_with_new_id();
        }
    }
}

impl ShapeGeometry for GroupShape {
    fn bounds(&self) -> Rect {
        let mut iter = self.children.iter().map(Shape::bounds);
        match iter.next() {
            Some(first) => iter.fold(first, |acc, b| acc.union(&b)),
            None => Rect::from_corners(Point2D::ORIGIN, Point2D::ORIGIN),
        }
    }

    fn translate(&mut self, delta: Vector2D) {
        for child in &mut self.children {
            child.translate(delta);
        }
    }

    /// Children are scaled proportionally into the new box
    fn resize(&mut self, new_bounds: &Rect) -> Result<(), ShapeError> {
        let old = self.bounds();
        let resized = self
            .children
            .iter()
            .map(|child| {
                let mut next = child.clone();
                next.resize(&old.map_rect(&child.bounds(), new_bounds))?;
                Ok(next)
            })
            .collect::<Result<Vec<_>, ShapeError>>()?;
        self.children = resized;
        Ok(())
    }

    /// Children apply their own rotation
    fn contains_local(&self, p: &Point2D, tolerance: f64) -> bool {
        self.children.iter().any(|c| c.contains_point(p, tolerance))
    }

    fn mirror_x(&mut self, axis: f64) {
        for child in &mut self.children {
            child.mirror_x(axis);
        }
    }

    fn mirror_y(&mut self, axis: f64) {
        for child in &mut self.children {
            child.mirror_y(axis);
        }
    }

    fn validate(&self) -> Result<(), ShapeError> {
        require_children(&self.children)?;
        self.children.iter().try_for_each(Shape::validate)
    }
}

//! Shape model.
//!
//! A [`Shape`] carries identity, rotation and style, and wraps a closed
//! [`ShapeKind`] variant holding the geometry. Per-variant geometry lives
//! behind [`ShapeGeometry`], dispatched by `match` in [`ShapeKind`].

use vecdraw_core::{Point2D, Rect, ShapeError, Vector2D};

mod ellipse;
mod group;
mod line;
mod polygon;
mod rectangle;
mod shape;
mod text;

pub use ellipse::EllipseShape;
pub use group::GroupShape;
pub use line::LineSegment;
pub use polygon::PolygonShape;
pub use rectangle::RectangleShape;
pub use shape::{RotationState, Shape, ShapeKind, StyleState};
pub use text::TextShape;

/// Geometry contract shared by every shape variant.
///
/// All coordinates are unrotated. Rotation is applied by [`Shape`] before
/// delegating hit tests here.
pub trait ShapeGeometry {
    /// Axis-aligned, unrotated bounding box
    fn bounds(&self) -> Rect;

    fn translate(&mut self, delta: Vector2D);

    /// Fit the geometry into `new_bounds`.
    ///
    /// On error `self` is left unchanged.
    fn resize(&mut self, new_bounds: &Rect) -> Result<(), ShapeError>;

    /// Hit test against an already inverse-rotated point
    fn contains_local(&self, p: &Point2D, tolerance: f64) -> bool;

    /// Mirror across the vertical line `x = axis`
    fn mirror_x(&mut self, axis: f64);

    /// Mirror across the horizontal line `y = axis`
    fn mirror_y(&mut self, axis: f64);

    /// Check the non-degeneracy invariants, for deserialized input
    fn validate(&self) -> Result<(), ShapeError>;
}

pub(crate) fn require_area(kind: &str, bounds: &Rect) -> Result<(), ShapeError> {
    if !bounds.top_left().is_finite() {
        return Err(ShapeError::invalid(
            "bounds",
            format!("{kind} origin must be finite"),
        ));
    }
    if bounds.has_area() {
        Ok(())
    } else {
        Err(ShapeError::degenerate(
            kind,
            format!(
                "bounds {}x{} are below the minimum size",
                bounds.width(),
                bounds.height()
            ),
        ))
    }
}

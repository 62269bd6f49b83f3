use super::{Point2D, Vector2D};
use crate::constants::GEOMETRY_EPSILON;
use crate::error::ShapeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    top_left: Point2D,
    width: f64,
    height: f64,
}

impl Rect {
    /// Build a rectangle, rejecting negative or non-finite extents
    pub fn new(top_left: Point2D, width: f64, height: f64) -> Result<Self, ShapeError> {
        if !top_left.is_finite() {
            return Err(ShapeError::invalid("top_left", "must be finite"));
        }
        if !width.is_finite() || width < 0.0 {
            return Err(ShapeError::invalid(
                "width",
                format!("must be finite and non-negative, got {width}"),
            ));
        }
        if !height.is_finite() || height < 0.0 {
            return Err(ShapeError::invalid(
                "height",
                format!("must be finite and non-negative, got {height}"),
            ));
        }
        Ok(Self {
            top_left,
            width,
            height,
        })
    }

    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Result<Self, ShapeError> {
        Self::new(Point2D::new(x, y), width, height)
    }

    /// Smallest rectangle spanning two opposite corners, in any order
    pub fn from_corners(a: Point2D, b: Point2D) -> Self {
        Self {
            top_left: Point2D::new(a.x.min(b.x), a.y.min(b.y)),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Bounding box of a point set, `None` when empty
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Point2D>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (mut min, mut max) = (first, first);
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self::from_corners(min, max))
    }

    pub fn top_left(&self) -> Point2D {
        self.top_left
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn left(&self) -> f64 {
        self.top_left.x
    }

    pub fn top(&self) -> f64 {
        self.top_left.y
    }

    pub fn right(&self) -> f64 {
        self.top_left.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top_left.y + self.height
    }

    pub fn bottom_right(&self) -> Point2D {
        Point2D::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            self.top_left.x + self.width / 2.0,
            self.top_left.y + self.height / 2.0,
        )
    }

    /// Inclusive of all four edges
    pub fn contains(&self, p: &Point2D) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Self::from_corners(
            Point2D::new(self.left().min(other.left()), self.top().min(other.top())),
            Point2D::new(
                self.right().max(other.right()),
                self.bottom().max(other.bottom()),
            ),
        )
    }

    pub fn translate(&self, delta: Vector2D) -> Rect {
        Self {
            top_left: self.top_left.translate(delta),
            ..*self
        }
    }

    /// True when both extents reach the minimum shape size
    pub fn has_area(&self) -> bool {
        self.width >= GEOMETRY_EPSILON && self.height >= GEOMETRY_EPSILON
    }

    /// Map `p` from this rectangle's frame into `target`'s frame.
    ///
    /// A collapsed axis maps everything onto the target's near edge.
    pub fn map_point(&self, p: &Point2D, target: &Rect) -> Point2D {
        let tx = if self.width >= GEOMETRY_EPSILON {
            (p.x - self.left()) / self.width
        } else {
            0.0
        };
        let ty = if self.height >= GEOMETRY_EPSILON {
            (p.y - self.top()) / self.height
        } else {
            0.0
        };
        Point2D::new(
            target.left() + tx * target.width,
            target.top() + ty * target.height,
        )
    }

    /// Map a whole rectangle from this frame into `target`'s frame
    pub fn map_rect(&self, r: &Rect, target: &Rect) -> Rect {
        Self::from_corners(
            self.map_point(&r.top_left, target),
            self.map_point(&r.bottom_right(), target),
        )
    }

    /// Mirror across the vertical line `x = axis`
    pub fn mirror_x(&self, axis: f64) -> Rect {
        Self::from_corners(self.top_left.mirror_x(axis), self.bottom_right().mirror_x(axis))
    }

    /// Mirror across the horizontal line `y = axis`
    pub fn mirror_y(&self, axis: f64) -> Rect {
        Self::from_corners(self.top_left.mirror_y(axis), self.bottom_right().mirror_y(axis))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {:.3}x{:.3}]",
            self.top_left, self.width, self.height
        )
    }
}

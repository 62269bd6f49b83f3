use crate::constants::GEOMETRY_EPSILON;
use crate::error::ShapeError;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg};

/// A displacement on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub dx: f64,
    pub dy: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn length(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Unit vector in the same direction.
    ///
    /// Fails for vectors shorter than the geometry epsilon.
    pub fn normalize(&self) -> Result<Vector2D, ShapeError> {
        let len = self.length();
        if !len.is_finite() || len < GEOMETRY_EPSILON {
            return Err(ShapeError::invalid(
                "vector",
                "cannot normalize a zero-length vector",
            ));
        }
        Ok(Self::new(self.dx / len, self.dy / len))
    }

    /// The opposite displacement
    pub fn inverse(&self) -> Vector2D {
        Self::new(-self.dx, -self.dy)
    }

    pub fn scale(&self, factor: f64) -> Vector2D {
        Self::new(self.dx * factor, self.dy * factor)
    }

    pub fn dot(&self, other: &Vector2D) -> f64 {
        self.dx * other.dx + self.dy * other.dy
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        self.inverse()
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, rhs: Vector2D) -> Vector2D {
        Vector2D::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f64) -> Vector2D {
        self.scale(rhs)
    }
}

impl From<(f64, f64)> for Vector2D {
    fn from((dx, dy): (f64, f64)) -> Self {
        Self::new(dx, dy)
    }
}

//! Geometry value types.
//!
//! All types here are `Copy`, so every hand-off is a defensive copy.

mod color;
mod point;
mod rect;
mod vector;

pub use color::ColorData;
pub use point::Point2D;
pub use rect::Rect;
pub use vector::Vector2D;

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

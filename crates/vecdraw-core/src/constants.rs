//! Geometry and editing constants.

/// Smallest extent (width, height, length, area) a shape may have before
/// it is considered degenerate.
pub const GEOMETRY_EPSILON: f64 = 1e-6;

/// Default distance, in drawing units, within which a line counts as hit.
pub const DEFAULT_HIT_TOLERANCE: f64 = 3.0;

/// Default displacement applied to pasted and duplicated shapes.
pub const DEFAULT_PASTE_OFFSET: (f64, f64) = (10.0, 10.0);

/// Average glyph advance as a fraction of the font size.
pub const TEXT_CHAR_WIDTH_RATIO: f64 = 0.6;

/// Line height as a fraction of the font size.
pub const TEXT_LINE_HEIGHT_RATIO: f64 = 1.2;

/// Current design file format version.
pub const DESIGN_FILE_VERSION: &str = "1.0";

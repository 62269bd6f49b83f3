use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color. Channels are 0-255, alpha is 0.0-1.0.
///
/// Construction clamps out-of-range input instead of failing, including
/// when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawColor")]
pub struct ColorData {
    r: u8,
    g: u8,
    b: u8,
    a: f64,
}

#[derive(Deserialize)]
struct RawColor {
    r: i64,
    g: i64,
    b: i64,
    #[serde(default = "opaque")]
    a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl From<RawColor> for ColorData {
    fn from(raw: RawColor) -> Self {
        ColorData::new(raw.r, raw.g, raw.b, raw.a)
    }
}

fn clamp_channel(value: i64) -> u8 {
    value.clamp(0, 255) as u8
}

fn clamp_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() {
        1.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}

impl ColorData {
    pub const BLACK: ColorData = ColorData::opaque_rgb(0, 0, 0);
    pub const WHITE: ColorData = ColorData::opaque_rgb(255, 255, 255);
    pub const RED: ColorData = ColorData::opaque_rgb(255, 0, 0);
    pub const GREEN: ColorData = ColorData::opaque_rgb(0, 255, 0);
    pub const BLUE: ColorData = ColorData::opaque_rgb(0, 0, 255);

    const fn opaque_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build a color, silently clamping every component into range.
    ///
    /// A NaN alpha is treated as fully opaque.
    pub fn new(r: i64, g: i64, b: i64, a: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: clamp_alpha(a),
        }
    }

    pub fn rgb(r: i64, g: i64, b: i64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn alpha(&self) -> f64 {
        self.a
    }

    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self {
            a: clamp_alpha(alpha),
            ..*self
        }
    }

    /// `#rrggbb`, alpha omitted
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for ColorData {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for ColorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a < 1.0 {
            write!(f, "{}@{:.2}", self.to_hex(), self.a)
        } else {
            write!(f, "{}", self.to_hex())
        }
    }
}

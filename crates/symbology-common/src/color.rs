//! RGBA colors and the fixed default colors used by vector symbologies.
//!
//! Colors travel through dictionaries as `[r, g, b, a]` arrays where the
//! channels are bytes and alpha is a fraction in `0..=1`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dictionary form of a color: `[r, g, b, a]`.
pub type RgbaTuple = (u8, u8, u8, f64);

/// An RGBA color with byte channels and fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "RgbaTuple")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

pub const BLACK: Color = Color::new(0, 0, 0, 1.0);
pub const WHITE: Color = Color::new(255, 255, 255, 1.0);
pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0.0);

pub const DEFAULT_VECTOR_STROKE_COLOR: Color = Color::new(0, 0, 0, 1.0);
pub const DEFAULT_VECTOR_FILL_COLOR: Color = Color::new(255, 0, 0, 1.0);
pub const DEFAULT_VECTOR_HIGHLIGHT_STROKE_COLOR: Color = Color::new(255, 255, 255, 1.0);
pub const DEFAULT_VECTOR_HIGHLIGHT_FILL_COLOR: Color = Color::new(0, 153, 255, 1.0);
pub const DEFAULT_VECTOR_HIGHLIGHT_TEXT_COLOR: Color = Color::new(255, 255, 255, 1.0);

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba_tuple((r, g, b, a): RgbaTuple) -> Self {
        Self::new(r, g, b, a.clamp(0.0, 1.0))
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(s.get(i..i + 2)?, 16).ok();

        match s.len() {
            6 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, 1.0)),
            8 => {
                let alpha = channel(6)? as f64 / 255.0;
                Some(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
            }
            _ => None,
        }
    }

    pub fn rgba_tuple(&self) -> RgbaTuple {
        (self.r, self.g, self.b, self.a)
    }

    /// CSS notation, e.g. `rgba(255,0,0,1)`.
    pub fn css_rgba(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }

    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r,
            self.g,
            self.b,
            (self.a * 255.0).round() as u8
        )
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Linear interpolation between two colors, `t` clamped to `0..=1`.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let lerp_u8 = |a: u8, b: u8| -> u8 { ((a as f64) * (1.0 - t) + (b as f64) * t).round() as u8 };

        Color {
            r: lerp_u8(self.r, other.r),
            g: lerp_u8(self.g, other.g),
            b: lerp_u8(self.b, other.b),
            a: self.a * (1.0 - t) + other.a * t,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_rgba())
    }
}

impl From<Color> for RgbaTuple {
    fn from(color: Color) -> Self {
        color.rgba_tuple()
    }
}

impl TryFrom<Vec<f64>> for Color {
    type Error = String;

    /// Accepts `[r, g, b]` (opaque) or `[r, g, b, a]`.
    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        if values.len() != 3 && values.len() != 4 {
            return Err(format!(
                "color must have 3 or 4 components, got {}",
                values.len()
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err("color components must be finite".to_string());
        }

        let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        let alpha = values.get(3).copied().unwrap_or(1.0).clamp(0.0, 1.0);
        Ok(Color::new(
            channel(values[0]),
            channel(values[1]),
            channel(values[2]),
            alpha,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#FF5500"), Some(Color::new(255, 85, 0, 1.0)));
        assert_eq!(Color::from_hex("00000000"), Some(TRANSPARENT));
        assert_eq!(Color::from_hex("#GGGGGG"), None);
        assert_eq!(Color::from_hex("#123"), None);
    }

    #[test]
    fn test_dict_form() {
        let color: Color = serde_json::from_str("[0, 153, 255, 0.5]").unwrap();
        assert_eq!(color, Color::new(0, 153, 255, 0.5));

        let opaque: Color = serde_json::from_str("[10, 20, 30]").unwrap();
        assert_eq!(opaque.a, 1.0);

        assert!(serde_json::from_str::<Color>("[1, 2]").is_err());
        assert_eq!(serde_json::to_string(&WHITE).unwrap(), "[255,255,255,1.0]");
    }

    #[test]
    fn test_lerp() {
        let mid = BLACK.lerp(&WHITE, 0.5);
        assert_eq!((mid.r, mid.g, mid.b), (128, 128, 128));
        assert_eq!(BLACK.lerp(&WHITE, 2.0), WHITE);
    }

    #[test]
    fn test_css_and_hex() {
        assert_eq!(DEFAULT_VECTOR_FILL_COLOR.css_rgba(), "rgba(255,0,0,1)");
        assert_eq!(TRANSPARENT.to_hex(), "#00000000");
        assert!(TRANSPARENT.is_transparent());
    }
}

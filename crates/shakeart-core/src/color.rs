//! Stroke color value type.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Missing '#' prefix in color: {0}")]
    MissingPrefix(String),
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

/// Opaque RGB color of a stroke, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StrokeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl StrokeColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Parse `#rgb` or `#rrggbb`.
    pub fn from_hex(color: &str) -> Result<Self, ColorError> {
        let hex = color
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingPrefix(color.to_string()))?;
        if !hex.is_ascii() {
            return Err(ColorError::InvalidHex(color.to_string()));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHex(color.to_string()))
        };

        match hex.len() {
            3 => Ok(Self::new(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
            )),
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(ColorError::InvalidHex(color.to_string())),
        }
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Build a color from hue (degrees), saturation and value (percent).
    ///
    /// Out-of-range inputs are clamped (`h` to `[0, 360]`, `s`/`v` to `[0, 100]`).
    pub fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let h = h.clamp(0.0, 360.0) / 360.0;
        let s = s.clamp(0.0, 100.0) / 100.0;
        let v = v.clamp(0.0, 100.0) / 100.0;

        let c = v * s;
        let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = if h < 1.0 / 6.0 {
            (c, x, 0.0)
        } else if h < 2.0 / 6.0 {
            (x, c, 0.0)
        } else if h < 3.0 / 6.0 {
            (0.0, c, x)
        } else if h < 4.0 / 6.0 {
            (0.0, x, c)
        } else if h < 5.0 / 6.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        let to_u8 = |n: f64| ((n + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }
}

impl Default for StrokeColor {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for StrokeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for StrokeColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for StrokeColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<StrokeColor> for String {
    fn from(color: StrokeColor) -> Self {
        color.to_hex()
    }
}

impl From<StrokeColor> for Color {
    fn from(color: StrokeColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

impl From<Color> for StrokeColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(StrokeColor::from_hex("#A8A8FF").unwrap(), StrokeColor::new(168, 168, 255));
        assert_eq!(StrokeColor::from_hex("#f0f").unwrap(), StrokeColor::new(255, 0, 255));
        assert_eq!(" #000000 ".parse::<StrokeColor>().unwrap(), StrokeColor::black());
    }

    #[test]
    fn test_parse_hex_errors() {
        assert!(matches!(StrokeColor::from_hex("ffffff"), Err(ColorError::MissingPrefix(_))));
        assert!(matches!(StrokeColor::from_hex("#ffff"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(StrokeColor::from_hex("#gg0000"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(StrokeColor::from_hex("#ééé"), Err(ColorError::InvalidHex(_))));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(StrokeColor::new(255, 0, 16).to_hex(), "#ff0010");
        assert_eq!(StrokeColor::white().to_string(), "#ffffff");
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(StrokeColor::from_hsv(0.0, 100.0, 100.0), StrokeColor::new(255, 0, 0));
        assert_eq!(StrokeColor::from_hsv(120.0, 100.0, 100.0), StrokeColor::new(0, 255, 0));
        assert_eq!(StrokeColor::from_hsv(240.0, 100.0, 100.0), StrokeColor::new(0, 0, 255));
        assert_eq!(StrokeColor::from_hsv(0.0, 0.0, 100.0), StrokeColor::white());
        assert_eq!(StrokeColor::from_hsv(200.0, 50.0, 0.0), StrokeColor::black());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&StrokeColor::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        let back: StrokeColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StrokeColor::new(1, 2, 3));
        assert!(serde_json::from_str::<StrokeColor>("\"red\"").is_err());
    }

    #[test]
    fn test_peniko_conversion() {
        let color: Color = StrokeColor::new(10, 20, 30).into();
        let rgba = color.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (10, 20, 30, 255));
        assert_eq!(StrokeColor::from(color), StrokeColor::new(10, 20, 30));
    }
}

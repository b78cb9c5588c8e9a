//! Canvas configuration with defaults matching the classic tool.

use crate::color::StrokeColor;
use crate::input::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::stroke::StrokeStyle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Startup configuration for a [`Canvas`](crate::Canvas).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub background_color: StrokeColor,
    /// Style of the first stroke.
    pub stroke: StrokeStyle,
    pub intensity: f64,
    /// Extra hit distance for the eraser beyond the stroke width.
    pub eraser_tolerance: f64,
    /// Color of the stroke under the eraser.
    pub highlight_color: StrokeColor,
    /// Maximum undo depth; `None` keeps every snapshot.
    pub history_limit: Option<usize>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH as u32,
            height: CANVAS_HEIGHT as u32,
            background_color: StrokeColor::white(),
            stroke: StrokeStyle::default(),
            intensity: 1.0,
            eraser_tolerance: 5.0,
            highlight_color: StrokeColor::new(255, 0, 255),
            history_limit: None,
        }
    }
}

impl CanvasConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that cannot describe a drawable canvas.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                field: "width/height",
                reason: format!("canvas size {}x{} is empty", self.width, self.height),
            });
        }
        if !(self.stroke.width > 0.0) {
            return Err(ConfigError::Invalid {
                field: "stroke.width",
                reason: format!("{} is not positive", self.stroke.width),
            });
        }
        if !(self.stroke.shake_speed > 0.0) {
            return Err(ConfigError::Invalid {
                field: "stroke.shake_speed",
                reason: format!("{} is not positive", self.stroke.shake_speed),
            });
        }
        if !(self.stroke.shake_offset >= 0.0) || !(self.intensity >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "stroke.shake_offset/intensity",
                reason: "must not be negative".to_string(),
            });
        }
        if !(self.eraser_tolerance >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "eraser_tolerance",
                reason: format!("{} is negative", self.eraser_tolerance),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CanvasConfig::default();
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.background_color, StrokeColor::white());
        assert_eq!(config.history_limit, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = CanvasConfig::from_json(
            r##"{ "background_color": "#000000", "history_limit": 20, "stroke": { "color": "#ff0000", "width": 5.0, "shake_offset": 1.0, "shake_speed": 2.0 } }"##,
        )
        .unwrap();
        assert_eq!(config.background_color, StrokeColor::black());
        assert_eq!(config.history_limit, Some(20));
        assert_eq!(config.stroke.color, StrokeColor::new(255, 0, 0));
        assert_eq!(config.width, 640);
    }

    #[test]
    fn test_json_round_trip() {
        let config = CanvasConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(CanvasConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_bad_color() {
        let err = CanvasConfig::from_json(r#"{ "highlight_color": "pink" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_values() {
        let err = CanvasConfig::from_json(r#"{ "width": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        let err = CanvasConfig::from_json(r#"{ "intensity": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}

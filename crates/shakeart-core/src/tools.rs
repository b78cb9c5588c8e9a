//! Tool system and the style parameters applied to new strokes.

use crate::color::StrokeColor;
use crate::shake::MIN_SHAKE_SPEED;
use crate::stroke::StrokeStyle;
use serde::{Deserialize, Serialize};

/// Smallest accepted stroke width.
pub const MIN_STROKE_WIDTH: f64 = 1.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Freehand,
    /// Straight line from press to current pointer, shaking.
    Line,
    /// Straight line without shake.
    LineNoShake,
    /// Freehand path without shake, composited behind everything else.
    LineBehind,
    Eraser,
    /// Not implemented; pressing does nothing.
    Fill,
    /// Not implemented; pressing does nothing.
    Eyedropper,
}

impl ToolKind {
    /// All tools in toolbar order.
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Freehand,
        ToolKind::Line,
        ToolKind::LineNoShake,
        ToolKind::LineBehind,
        ToolKind::Eraser,
        ToolKind::Fill,
        ToolKind::Eyedropper,
    ];

    /// Whether pressing with this tool starts a stroke.
    pub fn draws(self) -> bool {
        matches!(
            self,
            ToolKind::Freehand | ToolKind::Line | ToolKind::LineNoShake | ToolKind::LineBehind
        )
    }

    /// Straight-line tools keep exactly a start and an end point.
    pub fn is_straight(self) -> bool {
        matches!(self, ToolKind::Line | ToolKind::LineNoShake)
    }

    /// Whether strokes from this tool jitter.
    pub fn shakes(self) -> bool {
        !matches!(self, ToolKind::LineNoShake | ToolKind::LineBehind)
    }

    /// Whether strokes from this tool go to the back of the drawing.
    pub fn is_behind(self) -> bool {
        self == ToolKind::LineBehind
    }

    /// Fewest points a finished gesture needs to be committed.
    ///
    /// Freehand keeps single clicks as invisible one-point strokes; every
    /// line tool needs a second point.
    pub fn min_commit_points(self) -> usize {
        match self {
            ToolKind::Freehand => 1,
            ToolKind::Line | ToolKind::LineNoShake | ToolKind::LineBehind => 2,
            ToolKind::Eraser | ToolKind::Fill | ToolKind::Eyedropper => usize::MAX,
        }
    }

    /// Display name for toolbars.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Freehand => "Freehand",
            ToolKind::Line => "Line",
            ToolKind::LineNoShake => "Line (No Shake)",
            ToolKind::LineBehind => "Line Behind",
            ToolKind::Eraser => "Eraser",
            ToolKind::Fill => "Fill",
            ToolKind::Eyedropper => "Eyedropper",
        }
    }
}

/// Active tool plus the style values the style collaborators edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    tool: ToolKind,
    style: StrokeStyle,
    /// Global jitter multiplier (0 disables all shake).
    intensity: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            style: StrokeStyle::default(),
            intensity: 1.0,
        }
    }
}

impl ToolSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings with the given style and intensity, clamped to valid ranges.
    pub fn with_style(style: StrokeStyle, intensity: f64) -> Self {
        let mut settings = Self::default();
        settings.set_color(style.color);
        settings.set_stroke_width(style.width);
        settings.set_shake_offset(style.shake_offset);
        settings.set_shake_speed(style.shake_speed);
        settings.set_intensity(intensity);
        settings
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn color(&self) -> StrokeColor {
        self.style.color
    }

    pub fn set_color(&mut self, color: StrokeColor) {
        self.style.color = color;
    }

    /// Set the color from hue (degrees), saturation and value (percent).
    pub fn set_hsv_color(&mut self, h: f64, s: f64, v: f64) {
        self.style.color = StrokeColor::from_hsv(h, s, v);
    }

    pub fn stroke_width(&self) -> f64 {
        self.style.width
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.style.width = clamp_min(width, MIN_STROKE_WIDTH);
    }

    pub fn shake_offset(&self) -> f64 {
        self.style.shake_offset
    }

    pub fn set_shake_offset(&mut self, offset: f64) {
        self.style.shake_offset = clamp_min(offset, 0.0);
    }

    pub fn shake_speed(&self) -> f64 {
        self.style.shake_speed
    }

    pub fn set_shake_speed(&mut self, speed: f64) {
        self.style.shake_speed = clamp_min(speed, MIN_SHAKE_SPEED);
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: f64) {
        self.intensity = clamp_min(intensity, 0.0);
    }

    /// Style applied to the next stroke.
    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

/// `value.max(min)`, mapping NaN to `min`.
fn clamp_min(value: f64, min: f64) -> f64 {
    if value.is_nan() { min } else { value.max(min) }
}

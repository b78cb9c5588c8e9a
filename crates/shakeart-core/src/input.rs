//! Input events from the host layer: pointer gestures, key intents and the
//! device-to-canvas coordinate mapping.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Default canvas resolution.
pub const CANVAS_WIDTH: f64 = 640.0;
pub const CANVAS_HEIGHT: f64 = 480.0;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Move { position: Point },
    Up { position: Point, button: MouseButton },
    /// Pointer left the canvas; commits the gesture like a left-button up.
    Leave,
    /// Out-of-band abort of the current gesture (e.g. pointer capture lost).
    Cancel,
}

/// Keyboard intents understood by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyIntent {
    Undo,
    Redo,
    Clear,
}

impl KeyIntent {
    /// Map a key press to an intent.
    ///
    /// Ctrl+Z undoes, Ctrl+Shift+Z or Ctrl+Y redoes, a bare R clears.
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Self> {
        if modifiers.command() {
            match key {
                "z" | "Z" if modifiers.shift => Some(KeyIntent::Redo),
                "z" | "Z" => Some(KeyIntent::Undo),
                "y" | "Y" => Some(KeyIntent::Redo),
                _ => None,
            }
        } else if !modifiers.alt && matches!(key, "r" | "R") {
            Some(KeyIntent::Clear)
        } else {
            None
        }
    }

    /// Shortcut text for tooltips (e.g., "Ctrl+Z").
    pub fn shortcut(self) -> &'static str {
        match self {
            KeyIntent::Undo => "Ctrl+Z",
            KeyIntent::Redo => "Ctrl+Shift+Z",
            KeyIntent::Clear => "R",
        }
    }
}

/// Maps device pointer positions onto the fixed-resolution canvas.
///
/// The canvas may be displayed scaled; `display` is where it sits on the
/// device surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub canvas_size: Size,
    pub display: Rect,
}

impl Default for Viewport {
    fn default() -> Self {
        let canvas_size = Size::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        Self {
            canvas_size,
            display: canvas_size.to_rect(),
        }
    }
}

impl Viewport {
    pub fn new(canvas_size: Size, display: Rect) -> Self {
        Self {
            canvas_size,
            display,
        }
    }

    /// Update where the canvas is displayed on the device.
    pub fn set_display(&mut self, display: Rect) {
        self.display = display;
    }

    /// Convert a device position to canvas coordinates.
    ///
    /// A degenerate display rect maps everything to the canvas origin.
    pub fn to_canvas(&self, device: Point) -> Point {
        let width = self.display.width();
        let height = self.display.height();
        if width <= 0.0 || height <= 0.0 {
            return Point::ZERO;
        }
        Point::new(
            (device.x - self.display.x0) * self.canvas_size.width / width,
            (device.y - self.display.y0) * self.canvas_size.height / height,
        )
    }

    /// Whether a canvas-space point lies on the canvas.
    pub fn contains(&self, point: Point) -> bool {
        self.canvas_size.to_rect().contains(point)
    }
}

//! Canvas session state: strokes, history, style and tool interaction.

use crate::color::StrokeColor;
use crate::config::CanvasConfig;
use crate::history::History;
use crate::input::{KeyIntent, MouseButton, PointerEvent};
use crate::store::StrokeStore;
use crate::stroke::{Stroke, StrokeId};
use crate::tools::{ToolKind, ToolSettings};
use kurbo::{Point, Size};

/// The drawing session shared by the input layer, style widgets and the
/// compositor.
///
/// All state changes go through its methods; every method is total and
/// reports whether it had an effect.
#[derive(Debug, Clone)]
pub struct Canvas {
    store: StrokeStore,
    settings: ToolSettings,
    size: Size,
    background_color: StrokeColor,
    highlight_color: StrokeColor,
    eraser_tolerance: f64,
    /// Stroke under the pointer while the eraser is active.
    hovered: Option<StrokeId>,
    /// Last pointer position in canvas coordinates.
    pointer: Point,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::with_config(&CanvasConfig::default())
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &CanvasConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => History::with_limit(limit),
            None => History::new(),
        };
        Self {
            store: StrokeStore::with_history(history),
            settings: ToolSettings::with_style(config.stroke, config.intensity),
            size: Size::new(f64::from(config.width), f64::from(config.height)),
            background_color: config.background_color,
            highlight_color: config.highlight_color,
            eraser_tolerance: config.eraser_tolerance.max(0.0),
            hovered: None,
            pointer: Point::ZERO,
        }
    }

    /// Route a pointer event to the active tool.
    /// Returns true if the drawing or the hover state changed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer = position;
                match button {
                    MouseButton::Left => self.press(position),
                    MouseButton::Right => self.store.cancel_stroke(),
                    MouseButton::Middle => false,
                }
            }
            PointerEvent::Move { position } => {
                self.pointer = position;
                let hover_changed = if self.settings.tool() == ToolKind::Eraser && !self.store.is_drawing() {
                    self.update_hover(position)
                } else {
                    false
                };
                self.store.extend_stroke(position) || hover_changed
            }
            PointerEvent::Up { position, button } => {
                self.pointer = position;
                button == MouseButton::Left && self.store.finalize_stroke().is_some()
            }
            PointerEvent::Leave => {
                let hover_changed = self.hovered.take().is_some();
                self.store.finalize_stroke().is_some() || hover_changed
            }
            PointerEvent::Cancel => self.store.cancel_stroke(),
        }
    }

    /// Apply a keyboard intent.
    pub fn handle_key(&mut self, intent: KeyIntent) -> bool {
        match intent {
            KeyIntent::Undo => self.undo(),
            KeyIntent::Redo => self.redo(),
            KeyIntent::Clear => self.clear(),
        }
    }

    fn press(&mut self, position: Point) -> bool {
        let tool = self.settings.tool();
        match tool {
            ToolKind::Freehand | ToolKind::Line | ToolKind::LineNoShake | ToolKind::LineBehind => self
                .store
                .begin_stroke(tool, position, self.settings.style())
                .is_some(),
            ToolKind::Eraser => self.erase_hovered(),
            ToolKind::Fill | ToolKind::Eyedropper => {
                log::debug!("{} tool is not implemented", tool.name());
                false
            }
        }
    }

    fn erase_hovered(&mut self) -> bool {
        let Some(id) = self.hovered.take() else {
            return false;
        };
        self.store.delete_stroke(id)
    }

    fn update_hover(&mut self, position: Point) -> bool {
        let hovered = self.store.stroke_at(position, self.eraser_tolerance);
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    /// Undo the last change. A gesture in progress is left untouched.
    pub fn undo(&mut self) -> bool {
        let changed = self.store.undo();
        if changed {
            self.revalidate_hover();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.store.redo();
        if changed {
            self.revalidate_hover();
        }
        changed
    }

    /// Remove every stroke (no-op on an empty drawing).
    pub fn clear(&mut self) -> bool {
        let changed = self.store.clear();
        if changed {
            self.hovered = None;
        }
        changed
    }

    /// Delete a stroke by id.
    pub fn delete_stroke(&mut self, id: StrokeId) -> bool {
        let changed = self.store.delete_stroke(id);
        if changed && self.hovered == Some(id) {
            self.hovered = None;
        }
        changed
    }

    /// Abort the current gesture without committing anything.
    pub fn cancel_stroke(&mut self) -> bool {
        self.store.cancel_stroke()
    }

    /// Drop hover if its stroke disappeared after undo/redo.
    fn revalidate_hover(&mut self) {
        if let Some(id) = self.hovered {
            if self.store.stroke(id).is_none() {
                self.hovered = None;
            }
        }
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.store.strokes()
    }

    pub fn current_stroke(&self) -> Option<&Stroke> {
        self.store.current_stroke()
    }

    pub fn hovered_stroke(&self) -> Option<StrokeId> {
        self.hovered
    }

    /// Color a stroke should be drawn with, accounting for eraser highlight.
    pub fn display_color(&self, stroke: &Stroke) -> StrokeColor {
        if self.settings.tool() == ToolKind::Eraser && self.hovered == Some(stroke.id()) {
            self.highlight_color
        } else {
            stroke.color()
        }
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn tool(&self) -> ToolKind {
        self.settings.tool()
    }

    /// Switch tools. Leaving the eraser drops its hover highlight.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if tool != ToolKind::Eraser {
            self.hovered = None;
        }
        self.settings.set_tool(tool);
    }

    pub fn color(&self) -> StrokeColor {
        self.settings.color()
    }

    pub fn set_color(&mut self, color: StrokeColor) {
        self.settings.set_color(color);
    }

    pub fn set_hsv_color(&mut self, h: f64, s: f64, v: f64) {
        self.settings.set_hsv_color(h, s, v);
    }

    pub fn stroke_width(&self) -> f64 {
        self.settings.stroke_width()
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.settings.set_stroke_width(width);
    }

    pub fn shake_offset(&self) -> f64 {
        self.settings.shake_offset()
    }

    pub fn set_shake_offset(&mut self, offset: f64) {
        self.settings.set_shake_offset(offset);
    }

    pub fn shake_speed(&self) -> f64 {
        self.settings.shake_speed()
    }

    pub fn set_shake_speed(&mut self, speed: f64) {
        self.settings.set_shake_speed(speed);
    }

    /// Global shake multiplier.
    pub fn intensity(&self) -> f64 {
        self.settings.intensity()
    }

    pub fn set_intensity(&mut self, intensity: f64) {
        self.settings.set_intensity(intensity);
    }

    pub fn background_color(&self) -> StrokeColor {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: StrokeColor) {
        self.background_color = color;
    }

    pub fn highlight_color(&self) -> StrokeColor {
        self.highlight_color
    }
}

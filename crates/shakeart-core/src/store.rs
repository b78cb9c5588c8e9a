//! Stroke store: the committed collection, the in-progress stroke and the
//! mutations that feed the undo history.

use crate::history::{History, Snapshot};
use crate::stroke::{DEPTH_BEHIND, Stroke, StrokeId, StrokeStyle};
use crate::tools::ToolKind;
use kurbo::Point;

/// The stroke being drawn by an active gesture.
#[derive(Debug, Clone)]
struct Gesture {
    tool: ToolKind,
    stroke: Stroke,
}

/// Owns every committed stroke plus the at-most-one in-progress stroke.
///
/// Every successful mutation records the pre-mutation collection in the
/// [`History`] before changing anything.
#[derive(Debug, Clone, Default)]
pub struct StrokeStore {
    /// Committed strokes, back to front among equal depth.
    strokes: Snapshot,
    gesture: Option<Gesture>,
    history: History,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store using the given history (e.g. a bounded one).
    pub fn with_history(history: History) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    /// Start a gesture with `tool` at `first`.
    ///
    /// Returns the id of the new in-progress stroke, or `None` for tools that
    /// do not draw. A gesture already in progress is discarded.
    pub fn begin_stroke(&mut self, tool: ToolKind, first: Point, style: StrokeStyle) -> Option<StrokeId> {
        if !tool.draws() {
            return None;
        }
        if let Some(previous) = self.gesture.take() {
            log::debug!("Discarding unfinished stroke {}", previous.stroke.id());
        }

        let mut stroke = if tool.shakes() {
            Stroke::new(first, style)
        } else {
            Stroke::new(
                first,
                StrokeStyle {
                    shake_offset: 0.0,
                    ..style
                },
            )
            .without_shake()
        };
        if tool.is_behind() {
            stroke = stroke.with_depth(DEPTH_BEHIND);
        }

        let id = stroke.id();
        log::debug!("Begin {:?} stroke {}", tool, id);
        self.gesture = Some(Gesture { tool, stroke });
        Some(id)
    }

    /// Feed the current pointer position to the active gesture.
    ///
    /// Freehand and line-behind append; straight-line tools keep
    /// `[first, point]`. Returns false when no gesture is active.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };
        if gesture.tool.is_straight() {
            gesture.stroke.set_end_point(point);
        } else {
            gesture.stroke.push_point(point);
        }
        true
    }

    /// Commit the in-progress stroke.
    ///
    /// Line-behind strokes are inserted at the front, all others appended.
    /// Gestures with too few points for their tool are dropped without a
    /// history entry.
    pub fn finalize_stroke(&mut self) -> Option<StrokeId> {
        let Gesture { tool, stroke } = self.gesture.take()?;
        if stroke.len() < tool.min_commit_points() {
            log::debug!(
                "Dropping {:?} stroke {} with {} point(s)",
                tool,
                stroke.id(),
                stroke.len()
            );
            return None;
        }

        let id = stroke.id();
        self.history.record_before_mutation(&self.strokes);
        if tool.is_behind() {
            self.strokes.insert(0, stroke);
        } else {
            self.strokes.push(stroke);
        }
        log::debug!("Committed {:?} stroke {}", tool, id);
        Some(id)
    }

    /// Discard the in-progress stroke. Returns true if there was one.
    pub fn cancel_stroke(&mut self) -> bool {
        match self.gesture.take() {
            Some(gesture) => {
                log::debug!("Cancelled stroke {}", gesture.stroke.id());
                true
            }
            None => false,
        }
    }

    /// Remove a stroke. Unknown ids are ignored and leave history untouched.
    pub fn delete_stroke(&mut self, id: StrokeId) -> bool {
        let Some(index) = self.strokes.iter().position(|s| s.id() == id) else {
            return false;
        };
        self.history.record_before_mutation(&self.strokes);
        self.strokes.remove(index);
        true
    }

    /// Remove all strokes. Clearing an empty drawing records nothing.
    pub fn clear(&mut self) -> bool {
        if self.strokes.is_empty() {
            return false;
        }
        self.history.record_before_mutation(&self.strokes);
        self.strokes.clear();
        true
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.strokes)
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.strokes)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_len(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    /// Committed strokes in storage order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Committed strokes in compositing order (back to front).
    ///
    /// Stable sort by depth, so equal-depth strokes keep storage order.
    pub fn strokes_in_render_order(&self) -> Vec<&Stroke> {
        let mut ordered: Vec<&Stroke> = self.strokes.iter().collect();
        ordered.sort_by_key(|s| s.sort_depth());
        ordered
    }

    pub fn stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    /// First committed stroke (storage order) hit by `point`.
    pub fn stroke_at(&self, point: Point, tolerance: f64) -> Option<StrokeId> {
        self.strokes
            .iter()
            .find(|s| s.hit_test(point, tolerance))
            .map(|s| s.id())
    }

    /// The in-progress stroke, if a gesture is active.
    pub fn current_stroke(&self) -> Option<&Stroke> {
        self.gesture.as_ref().map(|g| &g.stroke)
    }

    /// Tool of the active gesture.
    pub fn current_tool(&self) -> Option<ToolKind> {
        self.gesture.as_ref().map(|g| g.tool)
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

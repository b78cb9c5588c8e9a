//! Stroke definition: a polyline with fixed style, the atomic unit of a drawing.

use crate::color::StrokeColor;
use crate::geometry::is_near_polyline;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for strokes.
pub type StrokeId = Uuid;

/// Depth of strokes drawn with the line-behind tool.
pub const DEPTH_BEHIND: i32 = -1;

/// Style captured when a stroke begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: StrokeColor,
    /// Line width in canvas units.
    pub width: f64,
    /// Maximum per-axis jitter before the global intensity is applied.
    pub shake_offset: f64,
    /// Jitter recompute rate multiplier.
    pub shake_speed: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: StrokeColor::new(168, 168, 255),
            width: 3.0,
            shake_offset: 2.0,
            shake_speed: 1.0,
        }
    }
}

/// A committed or in-progress stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: StrokeId,
    pub(crate) points: Vec<Point>,
    pub(crate) style: StrokeStyle,
    pub(crate) is_shaking: bool,
    pub(crate) depth: Option<i32>,
}

impl Stroke {
    /// Create a stroke with a single starting point and a fresh id.
    pub fn new(first: Point, style: StrokeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![first],
            style,
            is_shaking: true,
            depth: None,
        }
    }

    /// Disable jitter for this stroke.
    pub fn without_shake(mut self) -> Self {
        self.is_shaking = false;
        self
    }

    /// Set an explicit compositing depth.
    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// Recorded points in draw order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn color(&self) -> StrokeColor {
        self.style.color
    }

    pub fn width(&self) -> f64 {
        self.style.width
    }

    pub fn shake_offset(&self) -> f64 {
        self.style.shake_offset
    }

    pub fn shake_speed(&self) -> f64 {
        self.style.shake_speed
    }

    pub fn is_shaking(&self) -> bool {
        self.is_shaking
    }

    pub fn depth(&self) -> Option<i32> {
        self.depth
    }

    /// Depth used as the compositing sort key (absent depth sorts as 0).
    pub fn sort_depth(&self) -> i32 {
        self.depth.unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A stroke needs at least one segment to leave a mark.
    pub fn is_visible(&self) -> bool {
        self.points.len() >= 2
    }

    pub(crate) fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Replace everything after the first point with `end`.
    pub(crate) fn set_end_point(&mut self, end: Point) {
        self.points.truncate(1);
        self.points.push(end);
    }

    /// Check if `point` is within `tolerance` plus the stroke width of any segment.
    ///
    /// Single-point strokes have no segments and never hit.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = self.style.width + tolerance;
        let b = self.bounds();
        if point.x < b.x0 - reach || point.x > b.x1 + reach || point.y < b.y0 - reach || point.y > b.y1 + reach {
            return false;
        }
        is_near_polyline(point, &self.points, reach)
    }

    /// Bounding box of the raw points.
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_creation() {
        let stroke = Stroke::new(Point::new(1.0, 2.0), StrokeStyle::default());
        assert_eq!(stroke.len(), 1);
        assert!(stroke.is_shaking());
        assert_eq!(stroke.depth(), None);
        assert_eq!(stroke.sort_depth(), 0);
        assert!(!stroke.is_visible());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Stroke::new(Point::ZERO, StrokeStyle::default());
        let b = Stroke::new(Point::ZERO, StrokeStyle::default());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_builders() {
        let stroke = Stroke::new(Point::ZERO, StrokeStyle::default())
            .without_shake()
            .with_depth(DEPTH_BEHIND);
        assert!(!stroke.is_shaking());
        assert_eq!(stroke.sort_depth(), -1);
    }

    #[test]
    fn test_set_end_point_keeps_start() {
        let mut stroke = Stroke::new(Point::new(0.0, 0.0), StrokeStyle::default());
        stroke.set_end_point(Point::new(5.0, 5.0));
        stroke.set_end_point(Point::new(9.0, 1.0));
        assert_eq!(stroke.points(), &[Point::new(0.0, 0.0), Point::new(9.0, 1.0)]);
    }

    #[test]
    fn test_hit_test_uses_width() {
        let mut stroke = Stroke::new(Point::new(0.0, 0.0), StrokeStyle::default());
        stroke.push_point(Point::new(100.0, 0.0));
        // width 3 + tolerance 5
        assert!(stroke.hit_test(Point::new(50.0, 8.0), 5.0));
        assert!(!stroke.hit_test(Point::new(50.0, 8.5), 5.0));
    }

    #[test]
    fn test_single_point_never_hits() {
        let stroke = Stroke::new(Point::new(10.0, 10.0), StrokeStyle::default());
        assert!(!stroke.hit_test(Point::new(10.0, 10.0), 5.0));
    }

    #[test]
    fn test_bounds() {
        let mut stroke = Stroke::new(Point::new(0.0, 0.0), StrokeStyle::default());
        stroke.push_point(Point::new(100.0, 50.0));
        stroke.push_point(Point::new(50.0, 100.0));
        assert_eq!(stroke.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_hit_test_outside_bounds() {
        let mut stroke = Stroke::new(Point::new(0.0, 0.0), StrokeStyle::default());
        stroke.push_point(Point::new(100.0, 0.0));
        // Exactly at the inflated edge still hits
        assert!(stroke.hit_test(Point::new(108.0, 0.0), 5.0));
        assert!(!stroke.hit_test(Point::new(108.5, 0.0), 5.0));
        assert!(!stroke.hit_test(Point::new(50.0, -200.0), 5.0));
    }
}

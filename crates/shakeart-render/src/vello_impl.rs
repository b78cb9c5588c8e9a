//! Vello scene backend.

use crate::renderer::{LineCap, LineJoin, RasterSurface, SegmentStyle};
use kurbo::{Affine, BezPath, Cap, Circle, Join, Line, Point, Rect, Size, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Records compositor output into a [`vello::Scene`] for GPU presentation.
pub struct VelloSurface {
    scene: Scene,
    size: Size,
}

impl VelloSurface {
    pub fn new(size: Size) -> Self {
        Self {
            scene: Scene::new(),
            size,
        }
    }

    /// Get the built scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take the built scene, leaving an empty one.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the area covered by `clear`.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}

fn kurbo_cap(cap: LineCap) -> Cap {
    match cap {
        LineCap::Butt => Cap::Butt,
        LineCap::Round => Cap::Round,
        LineCap::Square => Cap::Square,
    }
}

fn kurbo_join(join: LineJoin) -> Join {
    match join {
        LineJoin::Miter => Join::Miter,
        LineJoin::Round => Join::Round,
        LineJoin::Bevel => Join::Bevel,
    }
}

fn kurbo_stroke(style: &SegmentStyle) -> Stroke {
    Stroke::new(style.width)
        .with_caps(kurbo_cap(style.cap))
        .with_join(kurbo_join(style.join))
}

impl RasterSurface for VelloSurface {
    /// Starts a new frame: drops previous commands and paints the background.
    fn clear(&mut self, color: Color) {
        self.scene.reset();
        let rect = Rect::from_origin_size(Point::ZERO, self.size);
        self.scene.fill(Fill::NonZero, Affine::IDENTITY, color, None, &rect);
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &SegmentStyle) {
        self.scene
            .stroke(&kurbo_stroke(style), Affine::IDENTITY, style.color, None, &Line::new(from, to));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            color,
            None,
            &Circle::new(center, radius),
        );
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &SegmentStyle) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        self.scene
            .stroke(&kurbo_stroke(style), Affine::IDENTITY, style.color, None, &path);
    }
}

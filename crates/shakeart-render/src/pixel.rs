//! CPU raster surface for headless rendering and snapshots, backed by tiny-skia.

use crate::renderer::{LineCap, LineJoin, RasterSurface, RenderResult, RendererError, SegmentStyle};
use kurbo::Point;
use peniko::Color;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Raw pixels of a rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterFrame {
    /// RGBA pixel data (4 bytes per pixel, row-major).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Anti-aliased RGBA8 surface.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    pixmap: Pixmap,
}

impl PixelSurface {
    /// Create a transparent surface. Zero-sized surfaces are rejected.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| RendererError::InitFailed(format!("invalid surface size {width}x{height}")))?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA of one pixel, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Copy the current contents out as straight-alpha RGBA.
    pub fn snapshot(&self) -> RasterFrame {
        let rgba_data = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RasterFrame {
            rgba_data,
            width: self.pixmap.width(),
            height: self.pixmap.height(),
        }
    }

    fn stroke_points(&mut self, points: &[Point], style: &SegmentStyle) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        // Non-finite coordinates leave no path
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = tiny_skia::Stroke {
            width: style.width.max(0.0) as f32,
            line_cap: skia_cap(style.cap),
            line_join: skia_join(style.join),
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint(style.color), &stroke, Transform::identity(), None);
    }
}

fn paint(color: Color) -> Paint<'static> {
    let c = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(c.r, c.g, c.b, c.a);
    paint.anti_alias = true;
    paint
}

fn skia_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

fn skia_join(join: LineJoin) -> tiny_skia::LineJoin {
    match join {
        LineJoin::Miter => tiny_skia::LineJoin::Miter,
        LineJoin::Round => tiny_skia::LineJoin::Round,
        LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
    }
}

impl RasterSurface for PixelSurface {
    fn clear(&mut self, color: Color) {
        let c = color.to_rgba8();
        self.pixmap.fill(tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a));
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &SegmentStyle) {
        self.stroke_points(&[from, to], style);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius.max(0.0) as f32) else {
            return;
        };
        self.pixmap
            .fill_path(&path, &paint(color), FillRule::Winding, Transform::identity(), None);
    }

    /// One round-joined path, so every pixel is covered exactly once.
    fn stroke_polyline(&mut self, points: &[Point], style: &SegmentStyle) {
        if points.len() >= 2 {
            self.stroke_points(points, style);
        }
    }
}

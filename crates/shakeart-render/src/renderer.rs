//! Raster surface abstraction and per-frame render context.

use kurbo::Point;
use peniko::Color;
use shakeart_core::canvas::Canvas;
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Shape of segment ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Shape of joins between consecutive segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

/// Style of a single stroked segment.
#[derive(Debug, Clone, Copy)]
pub struct SegmentStyle {
    pub color: Color,
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl SegmentStyle {
    /// Round-capped, round-joined segment style.
    pub fn round(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }
}

/// Minimal 2D raster capability set the compositor draws with.
pub trait RasterSurface {
    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Stroke the segment `from → to`.
    fn stroke_segment(&mut self, from: Point, to: Point, style: &SegmentStyle);

    /// Fill a disc.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    /// Stroke a polyline: segments between consecutive points and a disc of
    /// radius `width / 2` at both ends of every segment.
    ///
    /// Surfaces that can stroke a whole path at once should override this so
    /// overlapping anti-aliased edges at joints are only painted once.
    fn stroke_polyline(&mut self, points: &[Point], style: &SegmentStyle) {
        let radius = style.width / 2.0;
        for w in points.windows(2) {
            self.stroke_segment(w[0], w[1], style);
            self.fill_circle(w[0], radius, style.color);
            self.fill_circle(w[1], radius, style.color);
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render, read fresh every frame.
    pub canvas: &'a Canvas,
    /// Frame timestamp driving the shake cache.
    pub now: Instant,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, now: Instant) -> Self {
        Self { canvas, now }
    }
}

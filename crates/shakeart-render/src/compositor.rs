//! Per-frame compositing of the canvas with cached shake geometry.

use crate::renderer::{RasterSurface, RenderContext, SegmentStyle};
use kurbo::Point;
use peniko::Color;
use shakeart_core::shake::{ShakeGenerator, amplitude, frame_interval};
use shakeart_core::stroke::{Stroke, StrokeId};
use std::collections::{HashMap, HashSet};

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Jittered points of one stroke and when they were sampled.
#[derive(Debug, Clone)]
struct CachedShake {
    points: Vec<Point>,
    sampled_at: Instant,
}

/// What a frame did, mostly for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Committed strokes visited (including invisible ones).
    pub strokes: usize,
    /// Segments handed to the surface.
    pub segments: usize,
    /// Strokes whose jitter was resampled this frame.
    pub resampled: usize,
}

/// Draws the canvas every frame.
///
/// Shaking strokes keep their jittered geometry until their own
/// [`frame_interval`] has passed, so the shake advances in discrete steps
/// independent of the frame rate. The compositor only reads the canvas.
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    generator: ShakeGenerator,
    cache: HashMap<StrokeId, CachedShake>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compositor with a fixed shake seed.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            generator: ShakeGenerator::with_seed(seed),
            cache: HashMap::new(),
        }
    }

    /// Composite one frame onto `surface`.
    pub fn render<S: RasterSurface + ?Sized>(&mut self, ctx: &RenderContext, surface: &mut S) -> FrameStats {
        let canvas = ctx.canvas;
        let intensity = canvas.intensity();
        let mut stats = FrameStats::default();

        // Refresh due jitter before drawing anything
        let live: HashSet<StrokeId> = canvas
            .strokes()
            .iter()
            .filter(|s| s.is_shaking())
            .map(|s| s.id())
            .collect();
        self.cache.retain(|id, _| live.contains(id));
        for stroke in canvas.strokes() {
            if !stroke.is_shaking() || amplitude(stroke.shake_offset(), intensity) == 0.0 {
                continue;
            }
            let due = match self.cache.get(&stroke.id()) {
                Some(entry) => {
                    ctx.now.saturating_duration_since(entry.sampled_at) > frame_interval(stroke.shake_speed())
                }
                None => true,
            };
            if due {
                let points = self.generator.shake(stroke.points(), stroke.shake_offset(), intensity);
                self.cache.insert(
                    stroke.id(),
                    CachedShake {
                        points,
                        sampled_at: ctx.now,
                    },
                );
                stats.resampled += 1;
            }
        }

        surface.clear(canvas.background_color().into());

        for stroke in canvas.store().strokes_in_render_order() {
            let points = self.cached_points(stroke, intensity);
            let color: Color = canvas.display_color(stroke).into();
            stats.segments += draw_polyline(surface, points, color, stroke.width());
            stats.strokes += 1;
        }

        // The stroke being drawn goes on top with live jitter
        if let Some(current) = canvas.current_stroke() {
            let color: Color = current.color().into();
            if current.is_shaking() {
                let points = self.generator.shake(current.points(), current.shake_offset(), intensity);
                stats.segments += draw_polyline(surface, &points, color, current.width());
            } else {
                stats.segments += draw_polyline(surface, current.points(), color, current.width());
            }
        }

        log::trace!(
            "Frame: {} strokes, {} segments, {} resampled",
            stats.strokes,
            stats.segments,
            stats.resampled
        );
        stats
    }

    /// Points a committed stroke is drawn with right now.
    fn cached_points<'s>(&'s self, stroke: &'s Stroke, intensity: f64) -> &'s [Point] {
        if !stroke.is_shaking() || amplitude(stroke.shake_offset(), intensity) == 0.0 {
            return stroke.points();
        }
        self.cache
            .get(&stroke.id())
            .map_or(stroke.points(), |entry| entry.points.as_slice())
    }

    /// Cached jitter for a stroke, if it has been sampled.
    pub fn shaken_points(&self, id: StrokeId) -> Option<&[Point]> {
        self.cache.get(&id).map(|entry| entry.points.as_slice())
    }

    /// Forget all cached jitter (next frame resamples every stroke).
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }
}

/// Stroke a polyline with round caps and joins.
/// Returns the number of segments drawn; fewer than two points draw nothing.
fn draw_polyline<S: RasterSurface + ?Sized>(surface: &mut S, points: &[Point], color: Color, width: f64) -> usize {
    if points.len() < 2 {
        return 0;
    }
    surface.stroke_polyline(points, &SegmentStyle::round(color, width));
    points.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakeart_core::input::{MouseButton, PointerEvent};
    use shakeart_core::{Canvas, StrokeColor, ToolKind};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear([u8; 4]),
        Segment(Point, Point, [u8; 4]),
        Circle(Point, [u8; 4]),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    fn rgba(color: Color) -> [u8; 4] {
        let c = color.to_rgba8();
        [c.r, c.g, c.b, c.a]
    }

    impl RasterSurface for Recorder {
        fn clear(&mut self, color: Color) {
            self.ops.push(Op::Clear(rgba(color)));
        }

        fn stroke_segment(&mut self, from: Point, to: Point, style: &SegmentStyle) {
            self.ops.push(Op::Segment(from, to, rgba(style.color)));
        }

        fn fill_circle(&mut self, center: Point, _radius: f64, color: Color) {
            self.ops.push(Op::Circle(center, rgba(color)));
        }
    }

    impl Recorder {
        fn segments(&self) -> Vec<(Point, Point, [u8; 4])> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Segment(a, b, c) => Some((*a, *b, *c)),
                    _ => None,
                })
                .collect()
        }
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn drag(canvas: &mut Canvas, points: &[(f64, f64)]) {
        let (first, rest) = points.split_first().unwrap();
        canvas.handle_pointer(PointerEvent::Down {
            position: Point::new(first.0, first.1),
            button: MouseButton::Left,
        });
        for &(x, y) in rest {
            canvas.handle_pointer(PointerEvent::Move {
                position: Point::new(x, y),
            });
        }
        canvas.handle_pointer(PointerEvent::Up {
            position: Point::ZERO,
            button: MouseButton::Left,
        });
    }

    fn frame(compositor: &mut Compositor, canvas: &Canvas, now: Instant) -> Recorder {
        let mut recorder = Recorder::default();
        compositor.render(&RenderContext::new(canvas, now), &mut recorder);
        recorder
    }

    #[test]
    fn test_clears_to_background_first() {
        let mut canvas = Canvas::new();
        canvas.set_background_color(StrokeColor::new(10, 20, 30));
        let recorder = frame(&mut Compositor::with_seed(1), &canvas, Instant::now());
        assert_eq!(recorder.ops, vec![Op::Clear([10, 20, 30, 255])]);
    }

    #[test]
    fn test_cache_reused_within_interval() {
        init_logger();
        let mut canvas = Canvas::new();
        drag(&mut canvas, &[(10.0, 10.0), (50.0, 50.0), (90.0, 10.0)]);
        let id = canvas.strokes()[0].id();
        let mut compositor = Compositor::with_seed(5);
        let t0 = Instant::now();

        let first = frame(&mut compositor, &canvas, t0);
        let cached = compositor.shaken_points(id).unwrap().to_vec();
        assert_ne!(cached, canvas.strokes()[0].points());

        let second = frame(&mut compositor, &canvas, t0 + Duration::from_millis(5));
        assert_eq!(first.ops, second.ops);
        assert_eq!(compositor.shaken_points(id).unwrap(), &cached[..]);

        let later = frame(&mut compositor, &canvas, t0 + Duration::from_millis(100));
        assert_ne!(first.segments(), later.segments());
    }

    #[test]
    fn test_faster_speed_resamples_sooner() {
        let mut canvas = Canvas::new();
        canvas.set_shake_speed(5.0);
        drag(&mut canvas, &[(10.0, 10.0), (50.0, 50.0)]);
        let mut compositor = Compositor::with_seed(9);
        let t0 = Instant::now();

        let stats = compositor.render(&RenderContext::new(&canvas, t0), &mut Recorder::default());
        assert_eq!(stats.resampled, 1);
        // 1/60 s / 5 is about 3.3 ms
        let stats = compositor.render(
            &RenderContext::new(&canvas, t0 + Duration::from_millis(5)),
            &mut Recorder::default(),
        );
        assert_eq!(stats.resampled, 1);
    }

    #[test]
    fn test_zero_intensity_draws_raw_points() {
        let mut canvas = Canvas::new();
        drag(&mut canvas, &[(10.0, 10.0), (50.0, 50.0), (90.0, 10.0)]);
        canvas.set_intensity(0.0);
        let recorder = frame(&mut Compositor::with_seed(2), &canvas, Instant::now());
        let raw = canvas.strokes()[0].points();
        let segments = recorder.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!((segments[0].0, segments[0].1), (raw[0], raw[1]));
        assert_eq!((segments[1].0, segments[1].1), (raw[1], raw[2]));
    }

    #[test]
    fn test_non_shaking_strokes_are_raw() {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::LineNoShake);
        drag(&mut canvas, &[(0.0, 0.0), (100.0, 100.0)]);
        let mut compositor = Compositor::with_seed(3);
        let recorder = frame(&mut compositor, &canvas, Instant::now());
        assert_eq!(
            recorder.segments()[0],
            (Point::new(0.0, 0.0), Point::new(100.0, 100.0), [168, 168, 255, 255])
        );
        assert!(compositor.shaken_points(canvas.strokes()[0].id()).is_none());
    }

    #[test]
    fn test_line_behind_drawn_first() {
        let mut canvas = Canvas::new();
        canvas.set_intensity(0.0);
        canvas.set_color(StrokeColor::new(255, 0, 0));
        drag(&mut canvas, &[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        canvas.set_tool(ToolKind::LineBehind);
        canvas.set_color(StrokeColor::new(0, 0, 255));
        drag(&mut canvas, &[(0.0, 5.0), (20.0, 5.0)]);
        canvas.set_tool(ToolKind::Freehand);
        canvas.set_color(StrokeColor::new(0, 255, 0));
        drag(&mut canvas, &[(0.0, 9.0), (20.0, 9.0)]);

        let recorder = frame(&mut Compositor::with_seed(4), &canvas, Instant::now());
        let colors: Vec<[u8; 4]> = recorder.segments().iter().map(|s| s.2).collect();
        assert_eq!(
            colors,
            vec![[0, 0, 255, 255], [255, 0, 0, 255], [255, 0, 0, 255], [0, 255, 0, 255]]
        );
    }

    #[test]
    fn test_single_point_stroke_invisible() {
        let mut canvas = Canvas::new();
        drag(&mut canvas, &[(30.0, 30.0)]);
        assert_eq!(canvas.strokes().len(), 1);
        let mut recorder = Recorder::default();
        let stats = Compositor::with_seed(6).render(&RenderContext::new(&canvas, Instant::now()), &mut recorder);
        assert_eq!(stats.strokes, 1);
        assert_eq!(stats.segments, 0);
        assert_eq!(recorder.ops.len(), 1);
    }

    #[test]
    fn test_in_progress_drawn_last() {
        let mut canvas = Canvas::new();
        canvas.set_intensity(0.0);
        canvas.set_tool(ToolKind::LineBehind);
        drag(&mut canvas, &[(0.0, 5.0), (20.0, 5.0)]);
        canvas.set_tool(ToolKind::Line);
        canvas.set_color(StrokeColor::new(1, 1, 1));
        canvas.handle_pointer(PointerEvent::Down {
            position: Point::new(0.0, 0.0),
            button: MouseButton::Left,
        });
        canvas.handle_pointer(PointerEvent::Move {
            position: Point::new(40.0, 40.0),
        });

        let recorder = frame(&mut Compositor::with_seed(7), &canvas, Instant::now());
        let segments = recorder.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], (Point::new(0.0, 0.0), Point::new(40.0, 40.0), [1, 1, 1, 255]));
    }

    #[test]
    fn test_eraser_highlight() {
        let mut canvas = Canvas::new();
        canvas.set_intensity(0.0);
        drag(&mut canvas, &[(0.0, 100.0), (200.0, 100.0)]);
        canvas.set_tool(ToolKind::Eraser);
        canvas.handle_pointer(PointerEvent::Move {
            position: Point::new(100.0, 100.0),
        });

        let recorder = frame(&mut Compositor::with_seed(8), &canvas, Instant::now());
        assert_eq!(recorder.segments()[0].2, [255, 0, 255, 255]);
        // Stored color is untouched
        assert_eq!(canvas.strokes()[0].color(), StrokeColor::new(168, 168, 255));
    }

    #[test]
    fn test_invalidate_forces_resample() {
        let mut canvas = Canvas::new();
        drag(&mut canvas, &[(10.0, 10.0), (50.0, 50.0)]);
        drag(&mut canvas, &[(60.0, 10.0), (90.0, 50.0)]);
        let id = canvas.strokes()[0].id();
        let mut compositor = Compositor::with_seed(11);
        let t0 = Instant::now();
        frame(&mut compositor, &canvas, t0);
        let before = compositor.shaken_points(id).unwrap().to_vec();

        compositor.invalidate();
        assert!(compositor.shaken_points(id).is_none());
        let stats = compositor.render(&RenderContext::new(&canvas, t0), &mut Recorder::default());
        assert_eq!(stats.resampled, 2);
        assert_ne!(compositor.shaken_points(id).unwrap(), &before[..]);
    }

    #[test]
    fn test_deleted_strokes_leave_cache() {
        let mut canvas = Canvas::new();
        drag(&mut canvas, &[(10.0, 10.0), (50.0, 50.0)]);
        let id = canvas.strokes()[0].id();
        let mut compositor = Compositor::with_seed(10);
        let t0 = Instant::now();
        frame(&mut compositor, &canvas, t0);
        assert!(compositor.shaken_points(id).is_some());

        canvas.delete_stroke(id);
        frame(&mut compositor, &canvas, t0);
        assert!(compositor.shaken_points(id).is_none());
    }
}

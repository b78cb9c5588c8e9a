//! Point and segment math shared by hit-testing and rasterization.

use kurbo::{Point, Vec2};

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Check whether `point` lies within `threshold` of any segment of `points`.
pub fn is_near_polyline(point: Point, points: &[Point], threshold: f64) -> bool {
    points
        .windows(2)
        .any(|w| point_to_segment_dist(point, w[0], w[1]) <= threshold)
}

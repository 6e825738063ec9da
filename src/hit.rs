#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::consts::LINE_HIT_TOLERANCE;
use crate::scene::Scene;
use crate::shape::{Geometry, ShapeId};

/// Whether `pt` hits a geometry positioned at `center`.
///
/// Circles and stars use the (outer) radius, rectangles an inclusive
/// axis-aligned bounds check, lines the perpendicular distance to the
/// infinite line through both endpoints.
#[must_use]
pub fn geometry_contains(center: Point, geometry: &Geometry, pt: Point) -> bool {
    match *geometry {
        Geometry::Circle { radius } => center.distance(pt) <= radius,
        Geometry::Star { outer_radius, .. } => center.distance(pt) <= outer_radius,
        Geometry::Rectangle { width, height } => {
            let hw = width / 2.0;
            let hh = height / 2.0;
            pt.x >= center.x - hw && pt.x <= center.x + hw && pt.y >= center.y - hh && pt.y <= center.y + hh
        }
        Geometry::Line { x1, y1, x2, y2 } => {
            line_distance(Point::new(x1, y1), Point::new(x2, y2), pt) < LINE_HIT_TOLERANCE
        }
    }
}

/// Perpendicular distance from `pt` to the line through `a` and `b`.
/// Falls back to the distance to `a` when both endpoints coincide.
#[must_use]
pub fn line_distance(a: Point, b: Point, pt: Point) -> f64 {
    let length = a.distance(b);
    if length == 0.0 {
        return a.distance(pt);
    }
    let cross = (b.y - a.y) * pt.x - (b.x - a.x) * pt.y + b.x * a.y - b.y * a.x;
    cross.abs() / length
}

/// The top-most visible shape under `world_pt`, if any.
///
/// Shapes added later are drawn on top, so the scene is searched back to front.
#[must_use]
pub fn hit_test(world_pt: Point, scene: &Scene) -> Option<ShapeId> {
    scene
        .shapes()
        .iter()
        .rev()
        .filter(|s| s.visible)
        .find(|s| s.contains(world_pt.x, world_pt.y))
        .map(|s| s.id)
}

use super::*;
use crate::shape::Shape;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Circle
// =============================================================

#[test]
fn circle_contains_boundary_point() {
    let c = Shape::circle(0.0, 0.0, 10.0);
    assert!(c.contains(0.0, 10.0));
}

#[test]
fn circle_contains_inner_diagonal() {
    // dist ≈ 9.9
    assert!(Shape::circle(0.0, 0.0, 10.0).contains(7.0, 7.0));
}

#[test]
fn circle_rejects_outer_diagonal() {
    // dist ≈ 11.3
    assert!(!Shape::circle(0.0, 0.0, 10.0).contains(8.0, 8.0));
}

// =============================================================
// Rectangle
// =============================================================

#[test]
fn rectangle_contains_inside_point() {
    assert!(Shape::rectangle(0.0, 0.0, 10.0, 4.0).contains(4.0, 1.0));
}

#[test]
fn rectangle_rejects_outside_point() {
    assert!(!Shape::rectangle(0.0, 0.0, 10.0, 4.0).contains(6.0, 0.0));
}

#[test]
fn rectangle_edges_are_inclusive() {
    let r = Shape::rectangle(0.0, 0.0, 10.0, 4.0);
    assert!(r.contains(5.0, 2.0));
    assert!(r.contains(-5.0, -2.0));
    assert!(!r.contains(0.0, 2.1));
}

// =============================================================
// Star
// =============================================================

#[test]
fn star_uses_outer_radius() {
    let s = Shape::star(0.0, 0.0, 10.0, Some(3.0), None);
    assert!(s.contains(0.0, 9.5));
    assert!(!s.contains(0.0, 10.5));
}

// =============================================================
// Line
// =============================================================

#[test]
fn line_within_tolerance() {
    let l = Shape::line(0.0, 0.0, 100.0, 0.0);
    assert!(l.contains(50.0, 4.9));
    assert!(!l.contains(50.0, 5.0));
}

#[test]
fn line_tolerance_applies_beyond_segment() {
    // Distance is measured to the infinite line through both endpoints.
    assert!(Shape::line(0.0, 0.0, 10.0, 0.0).contains(50.0, 1.0));
}

#[test]
fn diagonal_line_distance() {
    let d = line_distance(pt(0.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0));
    assert!((d - 50.0_f64.sqrt()).abs() < 1e-9);
}

#[test]
fn degenerate_line_uses_endpoint_distance() {
    assert!((line_distance(pt(1.0, 1.0), pt(1.0, 1.0), pt(4.0, 5.0)) - 5.0).abs() < 1e-9);
    assert!(Shape::line(0.0, 0.0, 0.0, 0.0).contains(3.0, 0.0));
}

// =============================================================
// Scene hit_test
// =============================================================

#[test]
fn hit_test_empty_scene() {
    assert_eq!(hit_test(pt(0.0, 0.0), &Scene::new()), None);
}

#[test]
fn hit_test_prefers_topmost() {
    let mut scene = Scene::new();
    let below = scene.add(Shape::circle(0.0, 0.0, 10.0));
    let above = scene.add(Shape::rectangle(0.0, 0.0, 4.0, 4.0));
    assert_eq!(hit_test(pt(1.0, 1.0), &scene), Some(above));
    assert_eq!(hit_test(pt(8.0, 0.0), &scene), Some(below));
}

#[test]
fn hit_test_skips_hidden_shapes() {
    let mut scene = Scene::new();
    let below = scene.add(Shape::circle(0.0, 0.0, 10.0));
    let hidden = scene.add(Shape::circle(0.0, 0.0, 10.0));
    if let Some(s) = scene.get_mut(hidden) {
        s.visible = false;
    }
    assert_eq!(hit_test(pt(0.0, 0.0), &scene), Some(below));
}

#[test]
fn hit_test_miss() {
    let mut scene = Scene::new();
    scene.add(Shape::circle(0.0, 0.0, 10.0));
    assert_eq!(hit_test(pt(50.0, 50.0), &scene), None);
}

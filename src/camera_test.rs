#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn cam(offset_x: f64, offset_y: f64, scale: f64) -> Camera {
    Camera { offset_x, offset_y, scale }
}

// --- Point ---

#[test]
fn point_distance() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
}

#[test]
fn point_serde_shape() {
    let json = serde_json::to_value(Point::new(1.5, -2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
}

// --- Defaults ---

#[test]
fn camera_default_is_identity() {
    let c = Camera::default();
    assert_eq!(c.offset_x, 0.0);
    assert_eq!(c.offset_y, 0.0);
    assert_eq!(c.scale, 1.0);
}

// --- Conversions ---

#[test]
fn screen_to_world_with_offset_and_scale() {
    let c = cam(50.0, 30.0, 2.0);
    let world = c.screen_to_world(Point::new(0.0, 0.0));
    assert!(point_approx_eq(world, Point::new(-25.0, -15.0)));
}

#[test]
fn world_to_screen_with_offset_and_scale() {
    let c = cam(20.0, 10.0, 3.0);
    let screen = c.world_to_screen(Point::new(5.0, 5.0));
    assert!(point_approx_eq(screen, Point::new(35.0, 25.0)));
}

#[test]
fn round_trip_fractional_scale() {
    let c = cam(13.7, -42.3, 0.75);
    let world = Point::new(333.3, -999.9);
    assert!(point_approx_eq(world, c.screen_to_world(c.world_to_screen(world))));
}

// --- Pan ---

#[test]
fn pan_accumulates() {
    let mut c = Camera::default();
    c.pan(10.0, -5.0);
    c.pan(2.5, 2.5);
    assert!(approx_eq(c.offset_x, 12.5));
    assert!(approx_eq(c.offset_y, -2.5));
    assert_eq!(c.scale, 1.0);
}

// --- Anchored zoom ---

#[test]
fn zoom_at_multiplies_scale() {
    let mut c = Camera::default();
    c.zoom_at(1.1, Point::new(0.0, 0.0));
    assert!(approx_eq(c.scale, 1.1));
    c.zoom_at(0.9, Point::new(0.0, 0.0));
    assert!(approx_eq(c.scale, 0.99));
}

#[test]
fn zoom_at_keeps_anchor_fixed() {
    let mut c = cam(40.0, -20.0, 1.5);
    let anchor = Point::new(200.0, 150.0);
    let world_before = c.screen_to_world(anchor);
    c.zoom_at(1.1, anchor);
    let world_after = c.screen_to_world(anchor);
    assert!(point_approx_eq(world_before, world_after));
}

#[test]
fn zoom_at_origin_anchor_scales_offset() {
    let mut c = cam(100.0, 50.0, 1.0);
    c.zoom_at(0.9, Point::new(0.0, 0.0));
    assert!(approx_eq(c.offset_x, 90.0));
    assert!(approx_eq(c.offset_y, 45.0));
}

#[test]
fn zoom_at_clamps_scale() {
    let mut c = Camera::default();
    for _ in 0..500 {
        c.zoom_at(0.9, Point::new(100.0, 100.0));
    }
    assert_eq!(c.scale, MIN_ZOOM);
    for _ in 0..500 {
        c.zoom_at(1.1, Point::new(100.0, 100.0));
    }
    assert_eq!(c.scale, MAX_ZOOM);
}

#[test]
fn zoom_at_limit_leaves_offset_alone() {
    let mut c = cam(30.0, 40.0, MIN_ZOOM);
    c.zoom_at(0.5, Point::new(200.0, 200.0));
    assert_eq!((c.offset_x, c.offset_y, c.scale), (30.0, 40.0, MIN_ZOOM));
}

// --- RA/Dec projection ---

#[test]
fn ra_dec_origin_is_center() {
    let p = ra_dec_to_xy(0.0, 0.0, 800.0, 600.0);
    assert!(point_approx_eq(p, Point::new(400.0, 300.0)));
}

#[test]
fn ra_dec_north_pole_is_top_center() {
    let p = ra_dec_to_xy(5.0, 90.0, 800.0, 600.0);
    assert!((p.x - 400.0).abs() < 1e-9);
    assert!(p.y.abs() < 1e-9);
}

#[test]
fn ra_dec_six_hours_is_right_edge() {
    let p = ra_dec_to_xy(6.0, 0.0, 800.0, 600.0);
    assert!((p.x - 800.0).abs() < 1e-9);
    assert!((p.y - 300.0).abs() < 1e-9);
}

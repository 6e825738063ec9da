use super::*;

#[test]
fn new_scene_is_empty() {
    let scene = Scene::new();
    assert!(scene.is_empty());
    assert_eq!(scene.len(), 0);
    assert_eq!(scene.selected(), None);
}

#[test]
fn ids_start_at_one_and_increase() {
    let mut scene = Scene::new();
    let a = scene.add(Shape::circle(0.0, 0.0, 1.0));
    let b = scene.add(Shape::circle(0.0, 0.0, 1.0));
    let c = scene.add(Shape::line(0.0, 0.0, 1.0, 1.0));
    assert_eq!(a, ShapeId(1));
    assert_eq!(b, ShapeId(2));
    assert_eq!(c, ShapeId(3));
}

#[test]
fn add_overwrites_existing_id() {
    let mut scene = Scene::new();
    let mut shape = Shape::circle(0.0, 0.0, 1.0);
    shape.id = ShapeId(99);
    let id = scene.add(shape);
    assert_eq!(id, ShapeId(1));
    assert!(scene.get(ShapeId(99)).is_none());
}

#[test]
fn scenes_have_independent_counters() {
    let mut a = Scene::new();
    let mut b = Scene::new();
    a.add(Shape::circle(0.0, 0.0, 1.0));
    a.add(Shape::circle(0.0, 0.0, 1.0));
    assert_eq!(b.add(Shape::circle(0.0, 0.0, 1.0)), ShapeId(1));
}

#[test]
fn shapes_keep_insertion_order() {
    let mut scene = Scene::new();
    scene.add(Shape::circle(0.0, 0.0, 1.0));
    scene.add(Shape::rectangle(0.0, 0.0, 1.0, 1.0));
    let kinds: Vec<_> = scene.shapes().iter().map(Shape::kind).collect();
    assert_eq!(kinds, vec![crate::shape::ShapeKind::Circle, crate::shape::ShapeKind::Rectangle]);
}

#[test]
fn get_mut_mutates_in_place() {
    let mut scene = Scene::new();
    let id = scene.add(Shape::circle(0.0, 0.0, 1.0));
    if let Some(s) = scene.get_mut(id) {
        s.move_by(3.0, 4.0);
    }
    let s = scene.get(id).unwrap();
    assert_eq!((s.x, s.y), (3.0, 4.0));
}

#[test]
fn select_is_exclusive() {
    let mut scene = Scene::new();
    let a = scene.add(Shape::circle(0.0, 0.0, 1.0));
    let b = scene.add(Shape::circle(0.0, 0.0, 1.0));
    assert!(scene.select(Some(a)));
    assert_eq!(scene.selected(), Some(a));
    assert!(scene.select(Some(b)));
    assert_eq!(scene.selected(), Some(b));
    assert!(!scene.get(a).unwrap().selected);
}

#[test]
fn select_same_reports_unchanged() {
    let mut scene = Scene::new();
    let a = scene.add(Shape::circle(0.0, 0.0, 1.0));
    assert!(scene.select(Some(a)));
    assert!(!scene.select(Some(a)));
}

#[test]
fn select_none_clears() {
    let mut scene = Scene::new();
    let a = scene.add(Shape::circle(0.0, 0.0, 1.0));
    scene.select(Some(a));
    assert!(scene.select(None));
    assert_eq!(scene.selected(), None);
}

// =============================================================
// Markers and constellations
// =============================================================

#[test]
fn marker_radius_shrinks_with_magnitude() {
    let marker = |magnitude| StarMarker { position: Point::new(0.0, 0.0), magnitude, color: None };
    assert!((marker(0.0).radius() - 4.0).abs() < f64::EPSILON);
    assert!((marker(2.5).radius() - 1.5).abs() < f64::EPSILON);
    assert!((marker(6.0).radius() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn markers_are_kept_in_order() {
    let mut scene = Scene::new();
    scene.add_marker(StarMarker { position: Point::new(1.0, 2.0), magnitude: 1.0, color: None });
    scene.add_marker(StarMarker { position: Point::new(3.0, 4.0), magnitude: 3.0, color: Some("red".into()) });
    assert_eq!(scene.markers().len(), 2);
    assert_eq!(scene.markers()[1].color.as_deref(), Some("red"));
    assert!(scene.is_empty());
}

#[test]
fn constellation_needs_two_points() {
    let mut scene = Scene::new();
    assert!(!scene.add_constellation(vec![Point::new(0.0, 0.0)], None));
    assert!(scene.constellations().is_empty());

    assert!(scene.add_constellation(vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)], None));
    assert_eq!(scene.constellations()[0].color, "#AAAAAA");
}

#[test]
fn constellation_keeps_custom_color() {
    let mut scene = Scene::new();
    scene.add_constellation(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 1.0)], Some("#ff0000".into()));
    assert_eq!(scene.constellations()[0].color, "#ff0000");
    assert_eq!(scene.constellations()[0].points.len(), 3);
}

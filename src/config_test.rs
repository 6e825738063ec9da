#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn sky_defaults() {
    let o = SkyOptions::default();
    assert_eq!(o.background_color, "#000000");
    assert_eq!(o.star_color, "#FFFFFF");
    assert_eq!(o.grid_color, "#333333");
    assert!(o.show_grid);
}

#[test]
fn sky_partial_json_keeps_defaults() {
    let o: SkyOptions = parse_options(Some(r##"{ "showGrid": false, "gridColor": "#111111" }"##)).unwrap();
    assert!(!o.show_grid);
    assert_eq!(o.grid_color, "#111111");
    assert_eq!(o.background_color, "#000000");
}

#[test]
fn missing_or_blank_json_is_default() {
    assert_eq!(parse_options::<SkyOptions>(None).unwrap(), SkyOptions::default());
    assert_eq!(parse_options::<ToolbarOptions>(Some("  ")).unwrap(), ToolbarOptions::default());
}

#[test]
fn malformed_json_is_error() {
    let err = parse_options::<SkyOptions>(Some("{ nope")).unwrap_err();
    assert!(err.to_string().starts_with("invalid options"));
}

#[test]
fn toolbar_defaults_and_classes() {
    let o = ToolbarOptions::default();
    assert_eq!(o.orientation, Orientation::Horizontal);
    assert_eq!(o.theme, Theme::Light);
    assert_eq!(o.button_size, ButtonSize::Medium);
    assert_eq!(o.root_class(), "pyastrator-toolbar pyastrator-toolbar-horizontal pyastrator-toolbar-light");
    assert_eq!(o.button_class(), "pyastrator-toolbar-button pyastrator-toolbar-button-medium");
}

#[test]
fn toolbar_enums_parse_lowercase() {
    let o: ToolbarOptions =
        parse_options(Some(r#"{ "orientation": "vertical", "theme": "dark", "buttonSize": "large" }"#)).unwrap();
    assert_eq!(o.root_class(), "pyastrator-toolbar pyastrator-toolbar-vertical pyastrator-toolbar-dark");
    assert_eq!(o.button_class(), "pyastrator-toolbar-button pyastrator-toolbar-button-large");
}

#[test]
fn toolbar_rejects_unknown_orientation() {
    assert!(parse_options::<ToolbarOptions>(Some(r#"{ "orientation": "diagonal" }"#)).is_err());
}

#[test]
fn effect_defaults() {
    assert_eq!(StarFieldOptions::default().star_count, 100);
    assert_eq!(RotationOptions::default().duration, 20_000.0);
    let orbit = OrbitOptions::default();
    assert_eq!((orbit.radius_x, orbit.radius_y), (100.0, 50.0));
    assert_eq!(orbit.center, Point::new(50.0, 50.0));
}

#[test]
fn orbit_center_parses_from_json() {
    let o: OrbitOptions = parse_options(Some(r#"{ "center": { "x": 10, "y": 20 }, "radiusX": 5 }"#)).unwrap();
    assert_eq!(o.center, Point::new(10.0, 20.0));
    assert_eq!(o.radius_x, 5.0);
    assert_eq!(o.radius_y, 50.0);
}

#[test]
fn transition_css() {
    assert_eq!(TransitionOptions::default().css("opacity"), "opacity 1000ms ease 0ms");
}

#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
    assert!(!InputState::Idle.is_dragging());
}

#[test]
fn panning_is_dragging() {
    let state = InputState::Panning { last_screen: Point::new(1.0, 2.0) };
    assert!(state.is_dragging());
}

#[test]
fn scroll_down_zooms_out() {
    assert_eq!(WheelDelta { dx: 0.0, dy: 120.0 }.zoom_factor(), 0.9);
}

#[test]
fn scroll_up_zooms_in() {
    assert_eq!(WheelDelta { dx: 0.0, dy: -120.0 }.zoom_factor(), 1.1);
}

#[test]
fn zero_scroll_zooms_in() {
    assert_eq!(WheelDelta { dx: 30.0, dy: 0.0 }.zoom_factor(), 1.1);
}

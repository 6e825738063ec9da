#![allow(clippy::float_cmp)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::testing::RecordingTarget;

// =============================================================
// Helpers
// =============================================================

type Target = Rc<RecordingTarget>;

fn target() -> Target {
    Rc::new(RecordingTarget::default())
}

fn opacity_tween() -> Vec<Tween> {
    vec![Tween::new("opacity", 0.0, 1.0)]
}

fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let c = Rc::new(Cell::new(0));
    (Rc::clone(&c), c)
}

fn last_f64(t: &RecordingTarget, property: &str) -> f64 {
    t.last(property).unwrap().trim_end_matches("px").parse().unwrap()
}

// =============================================================
// Easing
// =============================================================

#[test]
fn easing_curves_at_midpoints() {
    assert_eq!(Easing::Linear.apply(0.5), 0.5);
    assert_eq!(Easing::EaseIn.apply(0.5), 0.25);
    assert_eq!(Easing::EaseOut.apply(0.5), 0.75);
    assert_eq!(Easing::EaseInOut.apply(0.25), 0.125);
    assert_eq!(Easing::EaseInOut.apply(0.75), 0.875);
}

#[test]
fn easing_curves_fix_endpoints() {
    for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
        assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
        assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
    }
}

#[test]
fn easing_deserializes_camel_case() {
    let e: Easing = serde_json::from_str("\"easeInOut\"").unwrap();
    assert_eq!(e, Easing::EaseInOut);
}

// =============================================================
// Tween sampling
// =============================================================

#[test]
fn numeric_tween_hits_endpoints_exactly() {
    let tween = Tween::new("left", 0.1, 0.3);
    assert_eq!(tween.sample(0.0).as_deref(), Some("0.1"));
    assert_eq!(tween.sample(1.0).as_deref(), Some("0.3"));
}

#[test]
fn numeric_tween_appends_unit() {
    let tween = Tween::new("height", 0.0, 200.0).with_unit("px");
    assert_eq!(tween.sample(0.25).as_deref(), Some("50px"));
}

#[test]
fn color_tween_interpolates_rgb() {
    let tween = Tween::new("color", "#000000", "#ffffff");
    assert_eq!(tween.sample(0.5).as_deref(), Some("rgb(128, 128, 128)"));
    assert_eq!(tween.sample(1.0).as_deref(), Some("rgb(255, 255, 255)"));
}

#[test]
fn mismatched_or_unsupported_pairs_are_skipped() {
    assert_eq!(Tween::new("color", 0.0, "#ffffff").sample(0.5), None);
    assert_eq!(Tween::new("color", "#fff", "#000").sample(0.5), None);
    assert_eq!(Tween::new("color", "red", "blue").sample(0.5), None);
    assert_eq!(Tween::new("color", "#gggggg", "#000000").sample(0.5), None);
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn created_record_is_idle_and_untouched() {
    let t = target();
    let mut animator = Animator::new();
    animator.create("a", Rc::clone(&t), opacity_tween(), AnimationOptions::default());
    assert_eq!(animator.status("a"), Some(Status::Idle));
    assert!(!animator.needs_frame());
    assert!(!animator.tick(500.0));
    assert!(t.writes.borrow().is_empty());
}

#[test]
fn start_and_stop_unknown_id_are_errors() {
    let mut animator: Animator<Target> = Animator::new();
    assert_eq!(animator.start("missing", 0.0).err(), Some(AnimationError::NotFound("missing".to_owned())));
    assert!(animator.stop("missing").is_err());
    assert!(animator.is_empty());
    assert!(!animator.needs_frame());
}

#[test]
fn linear_run_samples_and_completes() {
    let t = target();
    let mut animator = Animator::new();
    animator.create("fade", Rc::clone(&t), opacity_tween(), AnimationOptions::default().duration(1000.0));
    animator.start("fade", 0.0).unwrap();
    assert!(animator.needs_frame());

    assert!(animator.tick(0.0));
    assert_eq!(t.last("opacity").as_deref(), Some("0"));
    assert!(animator.tick(500.0));
    assert_eq!(t.last("opacity").as_deref(), Some("0.5"));
    assert!(!animator.tick(1000.0));
    assert_eq!(t.last("opacity").as_deref(), Some("1"));
    assert_eq!(animator.status("fade"), Some(Status::Completed));
    assert!(!animator.needs_frame());
}

#[test]
fn progress_is_clamped_past_duration() {
    let t = target();
    let mut animator = Animator::new();
    animator.play("h", Rc::clone(&t), vec![Tween::new("height", 10.0, 20.0).with_unit("px")], AnimationOptions::default().duration(100.0), 0.0);
    assert!(!animator.tick(5000.0));
    assert_eq!(t.last("height").as_deref(), Some("20px"));
}

#[test]
fn sampled_values_follow_eased_formula() {
    let duration = 400.0;
    for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
        for step in 0..=8 {
            let elapsed = f64::from(step) * 50.0;
            let t = target();
            let mut animator = Animator::new();
            let options = AnimationOptions::default().duration(duration).easing(easing);
            animator.play("x", Rc::clone(&t), vec![Tween::new("left", 10.0, 90.0)], options, 1000.0);
            animator.tick(1000.0 + elapsed);
            let expected = 10.0 + 80.0 * easing.apply(elapsed / duration);
            assert!((last_f64(&t, "left") - expected).abs() < 1e-9, "{easing:?} at {elapsed}");
        }
    }
}

#[test]
fn camel_case_properties_are_written_kebab_case() {
    let t = target();
    let mut animator = Animator::new();
    animator.play("bg", Rc::clone(&t), vec![Tween::new("backgroundColor", "#000000", "#ff0000")], AnimationOptions::default(), 0.0);
    animator.tick(1000.0);
    assert_eq!(t.last("background-color").as_deref(), Some("rgb(255, 0, 0)"));
}

#[test]
fn delay_keeps_record_pending() {
    let t = target();
    let mut animator = Animator::new();
    animator.create("d", Rc::clone(&t), opacity_tween(), AnimationOptions::default().duration(100.0).delay(200.0));
    animator.start("d", 0.0).unwrap();
    assert!(animator.tick(150.0));
    assert!(t.writes.borrow().is_empty());
    assert_eq!(animator.status("d"), Some(Status::Running));
    assert!(animator.tick(250.0));
    assert_eq!(t.last("opacity").as_deref(), Some("0.5"));
}

#[test]
fn zero_duration_completes_on_first_tick() {
    let t = target();
    let mut animator = Animator::new();
    animator.play("z", Rc::clone(&t), opacity_tween(), AnimationOptions::default().duration(0.0), 0.0);
    assert!(!animator.tick(0.0));
    assert_eq!(t.last("opacity").as_deref(), Some("1"));
    assert_eq!(animator.status("z"), Some(Status::Completed));
}

#[test]
fn stop_halts_updates() {
    let t = target();
    let mut animator = Animator::new();
    animator.play("s", Rc::clone(&t), opacity_tween(), AnimationOptions::default(), 0.0);
    animator.tick(250.0);
    animator.stop("s").unwrap();
    assert_eq!(animator.status("s"), Some(Status::Stopped));
    assert!(!animator.tick(500.0));
    assert_eq!(t.history("opacity"), vec!["0.25".to_owned()]);
}

#[test]
fn create_replaces_existing_record() {
    let mut animator = Animator::new();
    animator.play("r", target(), opacity_tween(), AnimationOptions::default(), 0.0);
    assert_eq!(animator.status("r"), Some(Status::Running));
    animator.create("r", target(), opacity_tween(), AnimationOptions::default());
    assert_eq!(animator.status("r"), Some(Status::Idle));
    assert_eq!(animator.len(), 1);
}

#[test]
fn restart_after_completion_plays_again() {
    let t = target();
    let mut animator = Animator::new();
    animator.play("again", Rc::clone(&t), opacity_tween(), AnimationOptions::default().duration(100.0), 0.0);
    animator.tick(100.0);
    animator.start("again", 500.0).unwrap();
    assert!(animator.tick(550.0));
    assert_eq!(t.last("opacity").as_deref(), Some("0.5"));
}

#[test]
fn start_chains() {
    let mut animator = Animator::new();
    animator.create("a", target(), opacity_tween(), AnimationOptions::default());
    animator.create("b", target(), opacity_tween(), AnimationOptions::default());
    animator.start("a", 0.0).and_then(|a| a.start("b", 0.0)).unwrap();
    assert_eq!(animator.status("a"), Some(Status::Running));
    assert_eq!(animator.status("b"), Some(Status::Running));
}

#[test]
fn remove_drops_record() {
    let mut animator = Animator::new();
    animator.create("gone", target(), opacity_tween(), AnimationOptions::default());
    assert!(animator.remove("gone"));
    assert!(!animator.remove("gone"));
    assert_eq!(animator.status("gone"), None);
}

// =============================================================
// Iterations
// =============================================================

#[test]
fn finite_iterations_play_count_times() {
    let (completes, seen) = counter();
    let mut animator = Animator::new();
    let options = AnimationOptions::default()
        .duration(100.0)
        .iterations(Iterations::Count(3))
        .on_complete(move |_: &Target| completes.set(completes.get() + 1));
    animator.play("loop", target(), opacity_tween(), options, 0.0);

    assert!(animator.tick(100.0));
    assert_eq!(animator.status("loop"), Some(Status::Running));
    assert!(animator.tick(200.0));
    assert!(!animator.tick(300.0));
    assert_eq!(seen.get(), 3);
    assert_eq!(animator.status("loop"), Some(Status::Completed));
}

#[test]
fn single_iteration_never_retriggers() {
    for count in [0, 1] {
        let (completes, seen) = counter();
        let mut animator = Animator::new();
        let options = AnimationOptions::default()
            .duration(100.0)
            .iterations(Iterations::Count(count))
            .on_complete(move |_: &Target| completes.set(completes.get() + 1));
        animator.play("once", target(), opacity_tween(), options, 0.0);
        assert!(!animator.tick(100.0));
        assert!(!animator.tick(200.0));
        assert_eq!(seen.get(), 1);
    }
}

#[test]
fn infinite_iterations_keep_running() {
    let (completes, seen) = counter();
    let mut animator = Animator::new();
    let options = AnimationOptions::default()
        .duration(10.0)
        .iterations(Iterations::Infinite)
        .on_complete(move |_: &Target| completes.set(completes.get() + 1));
    animator.play("spin", target(), opacity_tween(), options, 0.0);
    for i in 1..=50 {
        assert!(animator.tick(f64::from(i) * 10.0));
    }
    assert_eq!(seen.get(), 50);
    assert!(animator.is_running());
}

#[test]
fn iteration_restart_resets_to_start_value() {
    let t = target();
    let mut animator = Animator::new();
    let options = AnimationOptions::default().duration(100.0).iterations(Iterations::Count(2));
    animator.play("twice", Rc::clone(&t), opacity_tween(), options, 0.0);
    animator.tick(100.0);
    animator.tick(150.0);
    assert_eq!(t.last("opacity").as_deref(), Some("0.5"));
}

// =============================================================
// Callbacks
// =============================================================

#[test]
fn on_start_runs_at_start() {
    let (starts, seen) = counter();
    let mut animator = Animator::new();
    let options = AnimationOptions::default().on_start(move |_: &Target| starts.set(starts.get() + 1));
    animator.create("cb", target(), opacity_tween(), options);
    assert_eq!(seen.get(), 0);
    animator.start("cb", 0.0).unwrap();
    assert_eq!(seen.get(), 1);
}

#[test]
fn on_update_receives_eased_progress() {
    let progress = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&progress);
    let mut animator = Animator::new();
    let options = AnimationOptions::default()
        .duration(100.0)
        .easing(Easing::EaseIn)
        .on_update(move |_: &Target, p| sink.borrow_mut().push(p));
    animator.play("u", target(), opacity_tween(), options, 0.0);
    animator.tick(50.0);
    animator.tick(100.0);
    assert_eq!(*progress.borrow(), vec![0.25, 1.0]);
}

#[test]
fn on_complete_sees_target() {
    let t = target();
    let mut animator = Animator::new();
    let options = AnimationOptions::default().on_complete(|el: &Target| {
        el.set_style("display", "none").unwrap();
    });
    animator.play("c", Rc::clone(&t), opacity_tween(), options, 0.0);
    animator.tick(1000.0);
    assert_eq!(t.last("display").as_deref(), Some("none"));
}

#[test]
fn style_failure_does_not_block_other_tweens() {
    let t = Rc::new(RecordingTarget { fail_on: Some("opacity".to_owned()), ..Default::default() });
    let mut animator = Animator::new();
    let tweens = vec![Tween::new("opacity", 0.0, 1.0), Tween::new("width", 0.0, 10.0).with_unit("px")];
    animator.play("f", Rc::clone(&t), tweens, AnimationOptions::default(), 0.0);
    animator.tick(500.0);
    assert_eq!(t.last("opacity"), None);
    assert_eq!(t.last("width").as_deref(), Some("5px"));
}

#[test]
fn independent_records_progress_separately() {
    let a = target();
    let b = target();
    let mut animator = Animator::new();
    animator.play("a", Rc::clone(&a), opacity_tween(), AnimationOptions::default().duration(100.0), 0.0);
    animator.play("b", Rc::clone(&b), opacity_tween(), AnimationOptions::default().duration(200.0), 0.0);
    assert!(animator.tick(100.0));
    assert_eq!(animator.status("a"), Some(Status::Completed));
    assert_eq!(b.last("opacity").as_deref(), Some("0.5"));
    assert!(!animator.tick(200.0));
}

#[test]
fn options_debug_omits_callbacks() {
    let options: AnimationOptions<Target> = AnimationOptions::default().on_start(|_| {});
    let s = format!("{options:?}");
    assert!(s.contains("duration"));
    assert!(!s.contains("on_start"));
}

//! Canned animations.
//!
//! Two families live here:
//!
//! - tween effects (`fade_in`, `fade_out`, `slide_down`, `slide_up`) that
//!   build a ready-to-tick [`Animator`] over any [`StyleTarget`];
//! - CSS effect plans (star field, rotation, orbit, transition fades) that
//!   compute the declarations and keyframes a browser should apply. The DOM
//!   side of those plans is in [`crate::dom`].

#[cfg(test)]
#[path = "effects_test.rs"]
mod effects_test;

use rand::Rng;
use uuid::Uuid;

use crate::animator::{AnimationOptions, Animator, Tween};
use crate::config::{OrbitOptions, RotationOptions, StarFieldOptions, TransitionOptions};
use crate::style::StyleTarget;

/// Callback run once a tween effect finishes.
pub type Done<T> = Box<dyn FnMut(&T)>;

fn effect_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

fn write<T: StyleTarget>(target: &T, property: &str, value: &str) {
    if let Err(e) = target.set_style(property, value) {
        log::warn!("{e}");
    }
}

// =============================================================
// Tween effects
// =============================================================

/// Fade opacity from 0 to 1 over `duration` ms, starting at `now`.
pub fn fade_in<T: StyleTarget + 'static>(target: T, duration: f64, on_complete: Option<Done<T>>, now: f64) -> Animator<T> {
    opacity_effect("fade-in", target, 0.0, 1.0, duration, on_complete, now)
}

/// Fade opacity from 1 to 0 over `duration` ms, starting at `now`.
pub fn fade_out<T: StyleTarget + 'static>(target: T, duration: f64, on_complete: Option<Done<T>>, now: f64) -> Animator<T> {
    opacity_effect("fade-out", target, 1.0, 0.0, duration, on_complete, now)
}

fn opacity_effect<T: StyleTarget + 'static>(
    prefix: &str,
    target: T,
    from: f64,
    to: f64,
    duration: f64,
    on_complete: Option<Done<T>>,
    now: f64,
) -> Animator<T> {
    let mut options = AnimationOptions::default().duration(duration);
    options.on_complete = on_complete;

    let mut animator = Animator::new();
    animator.play(effect_id(prefix), target, vec![Tween::new("opacity", from, to)], options, now);
    animator
}

/// Reveal an element by growing its height from 0 to its content height.
/// The height is released to `auto` when done.
pub fn slide_down<T: StyleTarget + 'static>(
    target: T,
    duration: f64,
    mut on_complete: Option<Done<T>>,
    now: f64,
) -> Animator<T> {
    write(&target, "overflow", "hidden");
    write(&target, "height", "0px");
    write(&target, "display", "block");
    let full_height = target.scroll_height();

    let options = AnimationOptions::default().duration(duration).on_complete(move |el: &T| {
        write(el, "height", "auto");
        if let Some(cb) = on_complete.as_mut() {
            cb(el);
        }
    });

    let mut animator = Animator::new();
    let tween = Tween::new("height", 0.0, full_height).with_unit("px");
    animator.play(effect_id("slide-down"), target, vec![tween], options, now);
    animator
}

/// Collapse an element's height to 0, then hide it.
pub fn slide_up<T: StyleTarget + 'static>(
    target: T,
    duration: f64,
    mut on_complete: Option<Done<T>>,
    now: f64,
) -> Animator<T> {
    write(&target, "overflow", "hidden");
    let start_height = target.offset_height();

    let options = AnimationOptions::default().duration(duration).on_complete(move |el: &T| {
        write(el, "display", "none");
        if let Some(cb) = on_complete.as_mut() {
            cb(el);
        }
    });

    let mut animator = Animator::new();
    let tween = Tween::new("height", start_height, 0.0).with_unit("px");
    animator.play(effect_id("slide-up"), target, vec![tween], options, now);
    animator
}

// =============================================================
// Star field
// =============================================================

/// Element id of the injected twinkle keyframes.
pub const TWINKLE_STYLE_ID: &str = "star-animation";

pub const TWINKLE_KEYFRAMES: &str = "@keyframes twinkle {\n    0% { opacity: 0.3; }\n    100% { opacity: 1; }\n}\n";

/// Styles applied to the star field container.
pub const STAR_FIELD_CONTAINER_STYLES: [(&str, &str); 2] = [("position", "relative"), ("overflow", "hidden")];

/// One star of a generated field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarSpec {
    /// Diameter in pixels.
    pub size: f64,
    /// Horizontal position in percent of the container.
    pub left: f64,
    /// Vertical position in percent of the container.
    pub top: f64,
    pub opacity: f64,
    /// Length of one twinkle half-cycle in seconds.
    pub twinkle_secs: f64,
}

impl StarSpec {
    /// Inline styles of the star `div`.
    #[must_use]
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        vec![
            ("position", "absolute".to_owned()),
            ("width", format!("{}px", self.size)),
            ("height", format!("{}px", self.size)),
            ("border-radius", "50%".to_owned()),
            ("background-color", "white".to_owned()),
            ("left", format!("{}%", self.left)),
            ("top", format!("{}%", self.top)),
            ("opacity", self.opacity.to_string()),
            ("animation", format!("twinkle {}s infinite alternate", self.twinkle_secs)),
        ]
    }
}

/// Generate `star_count` stars with random size, position, brightness and
/// twinkle period.
pub fn generate_stars<R: Rng + ?Sized>(options: &StarFieldOptions, rng: &mut R) -> Vec<StarSpec> {
    (0..options.star_count)
        .map(|_| StarSpec {
            size: rng.random::<f64>() * (options.max_size - options.min_size) + options.min_size,
            left: rng.random::<f64>() * 100.0,
            top: rng.random::<f64>() * 100.0,
            opacity: rng.random::<f64>() * 0.7 + 0.3,
            twinkle_secs: rng.random::<f64>() * 3.0 + 2.0,
        })
        .collect()
}

// =============================================================
// Rotation
// =============================================================

/// Element id of the injected rotation keyframes.
pub const ROTATION_STYLE_ID: &str = "rotation-animation";

pub const ROTATE_KEYFRAMES: &str =
    "@keyframes rotate {\n    from { transform: rotate(0deg); }\n    to { transform: rotate(360deg); }\n}\n";

/// The `animation` declaration spinning an element once per `duration`.
#[must_use]
pub fn rotation_animation(options: &RotationOptions) -> String {
    let direction = if options.clockwise { "normal" } else { "reverse" };
    format!("rotate {}ms linear infinite {direction}", options.duration)
}

// =============================================================
// Orbit
// =============================================================

/// Number of segments the orbit ellipse is sampled into.
const ORBIT_STEPS: u32 = 20;

/// A fresh, document-unique keyframes name for an orbit.
#[must_use]
pub fn orbit_name() -> String {
    effect_id("orbit")
}

/// Keyframes moving an element once around the ellipse described by `options`.
#[must_use]
pub fn orbit_keyframes(name: &str, options: &OrbitOptions) -> String {
    let mut css = format!("@keyframes {name} {{\n");
    for i in 0..=ORBIT_STEPS {
        let pct = f64::from(i) * 100.0 / f64::from(ORBIT_STEPS);
        let angle = pct / 100.0 * std::f64::consts::TAU;
        let dx = options.radius_x * angle.cos();
        let dy = options.radius_y * angle.sin();
        css.push_str(&format!(
            "    {pct}% {{ transform: translate(calc({cx}% - 50% + {dx:.3}px), calc({cy}% - 50% + {dy:.3}px)); }}\n",
            cx = options.center.x,
            cy = options.center.y,
        ));
    }
    css.push_str("}\n");
    css
}

/// The `animation` declaration running orbit `name` once per `duration`.
#[must_use]
pub fn orbit_animation(name: &str, options: &OrbitOptions) -> String {
    format!("{name} {}ms linear infinite", options.duration)
}

// =============================================================
// Transition fades
// =============================================================

/// Styles set immediately by a transition fade-in; opacity flips to 1 shortly after.
#[must_use]
pub fn transition_fade_in_styles(options: &TransitionOptions) -> Vec<(&'static str, String)> {
    vec![
        ("opacity", "0".to_owned()),
        ("display", "block".to_owned()),
        ("transition", options.css("opacity")),
    ]
}

/// Styles set immediately by a transition fade-out; the element is hidden
/// after [`transition_total_ms`].
#[must_use]
pub fn transition_fade_out_styles(options: &TransitionOptions) -> Vec<(&'static str, String)> {
    vec![
        ("opacity", "1".to_owned()),
        ("transition", options.css("opacity")),
        ("opacity", "0".to_owned()),
    ]
}

/// Duration plus delay, rounded up to whole milliseconds.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn transition_total_ms(options: &TransitionOptions) -> u32 {
    (options.duration + options.delay).max(0.0).ceil().min(f64::from(u32::MAX)) as u32
}

//! Tween scheduler for inline style properties.
//!
//! An [`Animator`] owns a set of animation records keyed by id. Records are
//! created idle, started with a timestamp, and advanced by [`Animator::tick`],
//! which the host calls once per frame (see [`crate::frame`]) and which
//! reports whether another frame is needed. Keeping the clock outside the
//! scheduler makes every state transition reproducible in tests.
//!
//! ```text
//! Idle ──start──▶ Running ──progress 1──▶ Completed
//!                   │  ▲                     │
//!                   │  └──iterations left────┘
//!                   └──stop──▶ Stopped
//! ```

#[cfg(test)]
#[path = "animator_test.rs"]
mod animator_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::DEFAULT_DURATION_MS;
use crate::style::{StyleTarget, css_property_name};

/// Key of an animation record.
pub type AnimationId = String;

/// Error returned for operations on an unknown record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    #[error("animation with id {0:?} not found")]
    NotFound(AnimationId),
}

// =============================================================
// Easing
// =============================================================

/// Remapping of linear progress onto perceived progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    /// `p²`
    EaseIn,
    /// `p(2 − p)`
    EaseOut,
    /// Quadratic in for the first half, quadratic out for the second.
    EaseInOut,
}

impl Easing {
    /// Map progress `p` in `[0, 1]`. Every curve fixes 0 and 1.
    #[must_use]
    pub fn apply(self, p: f64) -> f64 {
        match self {
            Self::Linear => p,
            Self::EaseIn => p * p,
            Self::EaseOut => p * (2.0 - p),
            Self::EaseInOut => {
                if p < 0.5 {
                    2.0 * p * p
                } else {
                    -1.0 + (4.0 - 2.0 * p) * p
                }
            }
        }
    }
}

// =============================================================
// Tweens
// =============================================================

/// An endpoint of a tween.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    /// Any string; only `#RRGGBB` pairs are interpolated.
    Text(String),
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// One animated style property.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub property: String,
    pub start: PropertyValue,
    pub end: PropertyValue,
    pub unit: Option<String>,
}

impl Tween {
    #[must_use]
    pub fn new(property: impl Into<String>, start: impl Into<PropertyValue>, end: impl Into<PropertyValue>) -> Self {
        Self { property: property.into(), start: start.into(), end: end.into(), unit: None }
    }

    /// Suffix written after numeric values, e.g. `px`.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// The style value at eased progress `t`, or `None` when the endpoints
    /// cannot be interpolated (mixed kinds, or strings that are not `#RRGGBB`).
    #[must_use]
    pub fn sample(&self, t: f64) -> Option<String> {
        match (&self.start, &self.end) {
            (PropertyValue::Number(a), PropertyValue::Number(b)) => {
                let value = lerp(*a, *b, t);
                Some(format!("{value}{}", self.unit.as_deref().unwrap_or("")))
            }
            (PropertyValue::Text(a), PropertyValue::Text(b)) => {
                let from = parse_rrggbb(a)?;
                let to = parse_rrggbb(b)?;
                Some(from.mix(&to, t).to_rgb())
            }
            _ => None,
        }
    }
}

/// Interpolate so that `t = 0` and `t = 1` land exactly on the endpoints.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t >= 1.0 { b } else { a + (b - a) * t }
}

fn parse_rrggbb(s: &str) -> Option<Color> {
    if s.len() != 7 || !s.starts_with('#') {
        return None;
    }
    let Ok(color) = Color::from_hex(s) else {
        return None;
    };
    Some(color)
}

// =============================================================
// Options
// =============================================================

/// How many times an animation plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Iterations {
    /// Play this many times in total; 0 and 1 both play once.
    Count(u32),
    Infinite,
}

impl Default for Iterations {
    fn default() -> Self {
        Self::Count(1)
    }
}

impl Iterations {
    /// Consume one repeat. Returns true if the animation should play again.
    fn consume(&mut self) -> bool {
        match self {
            Self::Infinite => true,
            Self::Count(n) if *n > 1 => {
                *n -= 1;
                true
            }
            Self::Count(_) => false,
        }
    }
}

type TargetCallback<T> = Box<dyn FnMut(&T)>;
type ProgressCallback<T> = Box<dyn FnMut(&T, f64)>;

/// Timing and lifecycle callbacks of an animation.
pub struct AnimationOptions<T> {
    /// Milliseconds per iteration.
    pub duration: f64,
    pub easing: Easing,
    /// Milliseconds between `start` and the first frame that moves.
    pub delay: f64,
    pub iterations: Iterations,
    pub on_start: Option<TargetCallback<T>>,
    /// Called every frame with the eased progress.
    pub on_update: Option<ProgressCallback<T>>,
    /// Called each time an iteration reaches the end.
    pub on_complete: Option<TargetCallback<T>>,
}

impl<T> Default for AnimationOptions<T> {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION_MS,
            easing: Easing::Linear,
            delay: 0.0,
            iterations: Iterations::default(),
            on_start: None,
            on_update: None,
            on_complete: None,
        }
    }
}

impl<T> AnimationOptions<T> {
    #[must_use]
    pub fn duration(mut self, ms: f64) -> Self {
        self.duration = ms;
        self
    }

    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn delay(mut self, ms: f64) -> Self {
        self.delay = ms;
        self
    }

    #[must_use]
    pub fn iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn on_start(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_update(mut self, f: impl FnMut(&T, f64) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_complete(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }
}

impl<T> fmt::Debug for AnimationOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationOptions")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("delay", &self.delay)
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

// =============================================================
// Records
// =============================================================

/// Lifecycle status of an animation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Completed,
    Stopped,
}

struct Animation<T> {
    target: T,
    tweens: Vec<Tween>,
    options: AnimationOptions<T>,
    status: Status,
    start_time: f64,
    remaining: Iterations,
}

impl<T: StyleTarget> Animation<T> {
    fn begin(&mut self, now: f64) {
        self.status = Status::Running;
        self.start_time = now + self.options.delay;
        self.remaining = self.options.iterations;
        if let Some(cb) = self.options.on_start.as_mut() {
            cb(&self.target);
        }
    }

    fn apply(&self, progress: f64) {
        for tween in &self.tweens {
            let Some(value) = tween.sample(progress) else {
                continue;
            };
            if let Err(e) = self.target.set_style(&css_property_name(&tween.property), &value) {
                log::warn!("{e}");
            }
        }
    }

    /// Advance one frame. Returns true while the record still needs frames.
    fn step(&mut self, now: f64) -> bool {
        if self.status != Status::Running {
            return false;
        }
        if now < self.start_time {
            return true;
        }

        let duration = self.options.duration;
        let linear = if duration > 0.0 {
            ((now - self.start_time) / duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let eased = self.options.easing.apply(linear);

        self.apply(eased);
        if let Some(cb) = self.options.on_update.as_mut() {
            cb(&self.target, eased);
        }

        if linear < 1.0 {
            return true;
        }

        self.status = Status::Completed;
        if let Some(cb) = self.options.on_complete.as_mut() {
            cb(&self.target);
        }
        if self.remaining.consume() {
            self.start_time = now;
            self.status = Status::Running;
            return true;
        }
        false
    }
}

// =============================================================
// Animator
// =============================================================

/// Scheduler owning every animation record for one host.
pub struct Animator<T> {
    animations: HashMap<AnimationId, Animation<T>>,
    needs_frame: bool,
}

impl<T> Default for Animator<T> {
    fn default() -> Self {
        Self { animations: HashMap::new(), needs_frame: false }
    }
}

impl<T: StyleTarget> Animator<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an idle record, replacing any record with the same id.
    pub fn create(
        &mut self,
        id: impl Into<AnimationId>,
        target: T,
        tweens: Vec<Tween>,
        options: AnimationOptions<T>,
    ) -> &mut Self {
        let remaining = options.iterations;
        self.animations.insert(
            id.into(),
            Animation { target, tweens, options, status: Status::Idle, start_time: 0.0, remaining },
        );
        self
    }

    /// Create a record and start it at `now` in one step.
    pub fn play(
        &mut self,
        id: impl Into<AnimationId>,
        target: T,
        tweens: Vec<Tween>,
        options: AnimationOptions<T>,
        now: f64,
    ) -> &mut Self {
        let id = id.into();
        self.create(id.clone(), target, tweens, options);
        if let Some(anim) = self.animations.get_mut(&id) {
            anim.begin(now);
            self.needs_frame = true;
        }
        self
    }

    /// Start (or restart) a record at `now`; the first frame that moves is
    /// `now + delay`.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::NotFound`] for an unknown id; nothing changes.
    pub fn start(&mut self, id: &str, now: f64) -> Result<&mut Self, AnimationError> {
        let Some(anim) = self.animations.get_mut(id) else {
            return Err(not_found(id));
        };
        anim.begin(now);
        self.needs_frame = true;
        Ok(self)
    }

    /// Stop a record. It keeps its last written values.
    ///
    /// # Errors
    ///
    /// Returns [`AnimationError::NotFound`] for an unknown id; nothing changes.
    pub fn stop(&mut self, id: &str) -> Result<&mut Self, AnimationError> {
        let Some(anim) = self.animations.get_mut(id) else {
            return Err(not_found(id));
        };
        anim.status = Status::Stopped;
        Ok(self)
    }

    /// Advance every running record to `now` (milliseconds, same clock as
    /// `start`). Returns true while any record is running, including ones
    /// still waiting out their delay.
    pub fn tick(&mut self, now: f64) -> bool {
        let mut active = false;
        for anim in self.animations.values_mut() {
            active |= anim.step(now);
        }
        self.needs_frame = active;
        active
    }

    /// Whether a frame should be scheduled: set by `start`, cleared once a
    /// tick finds nothing running.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.needs_frame
    }

    #[must_use]
    pub fn status(&self, id: &str) -> Option<Status> {
        self.animations.get(id).map(|a| a.status)
    }

    /// Whether any record is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.animations.values().any(|a| a.status == Status::Running)
    }

    /// Drop a record. Returns false if it did not exist.
    pub fn remove(&mut self, id: &str) -> bool {
        self.animations.remove(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

fn not_found(id: &str) -> AnimationError {
    let err = AnimationError::NotFound(id.to_owned());
    log::error!("{err}");
    err
}

//! The pan/zoom sky canvas.
//!
//! `SkyCore` holds everything that does not need the browser: scene, camera,
//! gesture state and options. Input handlers return an [`Action`] telling the
//! host whether to redraw. `SkyCanvas` owns the `<canvas>` element, attaches
//! the mouse listeners, and redraws after every mutation.

#[cfg(test)]
#[path = "sky_test.rs"]
mod sky_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, WheelEvent};

use crate::camera::{self, Camera, Point};
use crate::config::SkyOptions;
use crate::dom::{self, DomError};
use crate::hit;
use crate::input::{InputState, WheelDelta};
use crate::render;
use crate::scene::{Scene, StarMarker};
use crate::shape::{Shape, ShapeId};

/// Sky canvas construction and drawing errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SkyError {
    #[error("canvas element not found: {0}")]
    CanvasNotFound(String),

    #[error("element is not a canvas: {0}")]
    NotACanvas(String),

    #[error("canvas has no 2d context")]
    NoContext,

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("canvas operation failed: {0}")]
    Js(String),
}

impl SkyError {
    fn js(err: &JsValue) -> Self {
        Self::Js(format!("{err:?}"))
    }
}

/// What the host should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    RenderNeeded,
}

// =============================================================
// Core
// =============================================================

/// Canvas state independent of the browser.
#[derive(Debug, Clone)]
pub struct SkyCore {
    pub scene: Scene,
    pub camera: Camera,
    pub input: InputState,
    pub options: SkyOptions,
    pub width: f64,
    pub height: f64,
}

impl SkyCore {
    #[must_use]
    pub fn new(options: SkyOptions, width: f64, height: f64) -> Self {
        Self {
            scene: Scene::new(),
            camera: Camera::default(),
            input: InputState::default(),
            options,
            width,
            height,
        }
    }

    // --- Scene ---

    /// Add a shape on top of the others and return its id.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        self.scene.add(shape)
    }

    /// Translate a shape by a world-space delta.
    pub fn move_shape(&mut self, id: ShapeId, dx: f64, dy: f64) -> Action {
        let Some(shape) = self.scene.get_mut(id) else {
            return Action::None;
        };
        shape.move_by(dx, dy);
        Action::RenderNeeded
    }

    /// Add a catalogue star at a world position.
    pub fn add_star(&mut self, x: f64, y: f64, magnitude: f64, color: Option<String>) -> Action {
        self.scene.add_marker(StarMarker { position: Point::new(x, y), magnitude, color });
        Action::RenderNeeded
    }

    /// Add a constellation polyline. Fewer than two points is a no-op.
    pub fn add_constellation(&mut self, points: Vec<Point>, color: Option<String>) -> Action {
        if self.scene.add_constellation(points, color) { Action::RenderNeeded } else { Action::None }
    }

    /// Top-most visible shape under a screen point.
    #[must_use]
    pub fn shape_at(&self, screen_pt: Point) -> Option<ShapeId> {
        hit::hit_test(self.camera.screen_to_world(screen_pt), &self.scene)
    }

    /// Select the shape under a screen point, clearing any other selection.
    pub fn select_at(&mut self, screen_pt: Point) -> Action {
        let hit = self.shape_at(screen_pt);
        if self.scene.select(hit) { Action::RenderNeeded } else { Action::None }
    }

    // --- Camera ---

    /// Zoom by `factor` keeping the screen point `anchor` fixed.
    pub fn zoom(&mut self, factor: f64, anchor: Point) -> Action {
        if !factor.is_finite() || factor <= 0.0 {
            return Action::None;
        }
        self.camera.zoom_at(factor, anchor);
        Action::RenderNeeded
    }

    /// Shift the view by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) -> Action {
        self.camera.pan(dx, dy);
        Action::RenderNeeded
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Action {
        self.width = width;
        self.height = height;
        Action::RenderNeeded
    }

    /// Project RA (hours) / Dec (degrees) onto this canvas.
    #[must_use]
    pub fn ra_dec_to_xy(&self, ra_hours: f64, dec_deg: f64) -> Point {
        camera::ra_dec_to_xy(ra_hours, dec_deg, self.width, self.height)
    }

    // --- Input events ---

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Action {
        self.zoom(delta.zoom_factor(), screen_pt)
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Action {
        self.input = InputState::Panning { last_screen: screen_pt };
        Action::None
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Action {
        let InputState::Panning { last_screen } = self.input else {
            return Action::None;
        };
        self.input = InputState::Panning { last_screen: screen_pt };
        self.pan(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y)
    }

    pub fn on_pointer_up(&mut self) -> Action {
        self.input = InputState::Idle;
        Action::None
    }

    pub fn on_pointer_leave(&mut self) -> Action {
        self.on_pointer_up()
    }
}

// =============================================================
// Browser wrapper
// =============================================================

struct SkyInner {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    core: RefCell<SkyCore>,
}

impl SkyInner {
    fn redraw(&self) -> Result<(), SkyError> {
        let core = self.core.try_borrow().map_err(|e| SkyError::Js(e.to_string()))?;
        render::draw(&self.ctx, &core.scene, &core.camera, &core.options, core.width, core.height)
            .map_err(|e| SkyError::js(&e))
    }

    fn update(&self, f: impl FnOnce(&mut SkyCore) -> Action) -> Result<Action, SkyError> {
        let action = {
            let mut core = self.core.try_borrow_mut().map_err(|e| SkyError::Js(e.to_string()))?;
            f(&mut core)
        };
        if action == Action::RenderNeeded {
            self.redraw()?;
        }
        Ok(action)
    }
}

type Listener = Closure<dyn FnMut(Event)>;

/// A sky canvas bound to a `<canvas>` element. Dropping it detaches the
/// mouse listeners.
pub struct SkyCanvas {
    inner: Rc<SkyInner>,
    listeners: Vec<(&'static str, Listener)>,
}

impl SkyCanvas {
    /// Bind to the canvas with id `canvas_id`, attach listeners and draw the
    /// empty sky.
    ///
    /// # Errors
    ///
    /// Returns [`SkyError`] if the element is missing, is not a canvas, or has
    /// no 2D context.
    pub fn new(canvas_id: &str, options: SkyOptions) -> Result<Self, SkyError> {
        let canvas = dom::document()?
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SkyError::CanvasNotFound(canvas_id.to_owned()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SkyError::NotACanvas(canvas_id.to_owned()))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SkyError::js(&e))?
            .ok_or(SkyError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SkyError::NoContext)?;

        let core = SkyCore::new(options, f64::from(canvas.width()), f64::from(canvas.height()));
        let inner = Rc::new(SkyInner { canvas, ctx, core: RefCell::new(core) });

        let mut sky = Self { inner, listeners: Vec::new() };
        sky.attach_listeners()?;
        sky.inner.redraw()?;
        log::debug!("sky canvas {canvas_id} ready");
        Ok(sky)
    }

    fn attach_listeners(&mut self) -> Result<(), SkyError> {
        self.listen("wheel", |core, event| {
            let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                return Action::None;
            };
            event.prevent_default();
            let delta = WheelDelta { dx: wheel.delta_x(), dy: wheel.delta_y() };
            core.on_wheel(offset_point(wheel), delta)
        })?;
        self.listen("mousedown", |core, event| {
            event.dyn_ref::<MouseEvent>().map_or(Action::None, |m| core.on_pointer_down(offset_point(m)))
        })?;
        self.listen("mousemove", |core, event| {
            event.dyn_ref::<MouseEvent>().map_or(Action::None, |m| core.on_pointer_move(offset_point(m)))
        })?;
        self.listen("mouseup", |core, _| core.on_pointer_up())?;
        self.listen("mouseleave", |core, _| core.on_pointer_leave())?;
        Ok(())
    }

    fn listen(
        &mut self,
        event_name: &'static str,
        handler: impl Fn(&mut SkyCore, &Event) -> Action + 'static,
    ) -> Result<(), SkyError> {
        let weak: Weak<SkyInner> = Rc::downgrade(&self.inner);
        let cb = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if let Err(e) = inner.update(|core| handler(core, &event)) {
                log::error!("{event_name}: {e}");
            }
        });
        self.inner
            .canvas
            .add_event_listener_with_callback(event_name, cb.as_ref().unchecked_ref())
            .map_err(|e| SkyError::js(&e))?;
        self.listeners.push((event_name, cb));
        Ok(())
    }

    /// Redraw the whole canvas.
    ///
    /// # Errors
    ///
    /// Returns [`SkyError::Js`] if a drawing call fails.
    pub fn redraw(&self) -> Result<(), SkyError> {
        self.inner.redraw()
    }

    /// Add a shape and redraw. Returns the id assigned by the scene.
    ///
    /// # Errors
    ///
    /// Returns [`SkyError`] if the canvas is busy or drawing fails.
    pub fn add_shape(&self, shape: Shape) -> Result<ShapeId, SkyError> {
        let id = {
            let mut core = self.inner.core.try_borrow_mut().map_err(|e| SkyError::Js(e.to_string()))?;
            core.add_shape(shape)
        };
        self.inner.redraw()?;
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns [`SkyError`] if the canvas is busy or drawing fails.
    pub fn move_shape(&self, id: ShapeId, dx: f64, dy: f64) -> Result<bool, SkyError> {
        Ok(self.inner.update(|core| core.move_shape(id, dx, dy))? == Action::RenderNeeded)
    }

    /// # Errors
    ///
    /// Returns [`SkyError`] if the canvas is busy or drawing fails.
    pub fn zoom(&self, factor: f64, center_x: f64, center_y: f64) -> Result<(), SkyError> {
        self.inner.update(|core| core.zoom(factor, Point::new(center_x, center_y))).map(|_| ())
    }

    /// # Errors
    ///
    /// Returns [`SkyError`] if the canvas is busy or drawing fails.
    pub fn pan(&self, dx: f64, dy: f64) -> Result<(), SkyError> {
        self.inner.update(|core| core.pan(dx, dy)).map(|_| ())
    }

    /// Select the top-most shape under a canvas point.
    ///
    /// # Errors
    ///
    /// Returns [`SkyError`] if the canvas is busy or drawing fails.
    pub fn select_at(&self, x: f64, y: f64) -> Result<Option<ShapeId>, SkyError> {
        self.inner.update(|core| core.select_at(Point::new(x, y)))?;
        Ok(self.inner.core.try_borrow().map_err(|e| SkyError::Js(e.to_string()))?.scene.selected())
    }

    /// Draw a catalogue star with a glow when brighter than magnitude 2.
    ///
    /// # Errors
    ///
    /// Returns [`SkyError`] if the canvas is busy or drawing fails.
    pub fn draw_star(&self, x: f64, y: f64, magnitude: f64, color: Option<String>) -> Result<(), SkyError> {
        self.inner.update(|core| core.add_star(x, y, magnitude, color)).map(|_| ())
    }

    /// Stroke a polyline through `points`; ignored for fewer than two points.
    ///
    /// # Errors
    ///
    /// Returns [`SkyError`] if the canvas is busy or drawing fails.
    pub fn draw_constellation(&self, points: Vec<Point>, color: Option<String>) -> Result<(), SkyError> {
        self.inner.update(|core| core.add_constellation(points, color)).map(|_| ())
    }

    /// Resize the backing canvas and redraw.
    ///
    /// # Errors
    ///
    /// Returns [`SkyError`] if the canvas is busy or drawing fails.
    pub fn resize(&self, width: u32, height: u32) -> Result<(), SkyError> {
        self.inner.canvas.set_width(width);
        self.inner.canvas.set_height(height);
        self.inner.update(|core| core.resize(f64::from(width), f64::from(height))).map(|_| ())
    }

    /// # Errors
    ///
    /// Returns [`SkyError`] if the canvas is busy.
    pub fn ra_dec_to_xy(&self, ra_hours: f64, dec_deg: f64) -> Result<Point, SkyError> {
        let core = self.inner.core.try_borrow().map_err(|e| SkyError::Js(e.to_string()))?;
        Ok(core.ra_dec_to_xy(ra_hours, dec_deg))
    }

    /// A snapshot of the current camera.
    ///
    /// # Errors
    ///
    /// Returns [`SkyError`] if the canvas is busy.
    pub fn camera(&self) -> Result<Camera, SkyError> {
        Ok(self.inner.core.try_borrow().map_err(|e| SkyError::Js(e.to_string()))?.camera)
    }

    /// The canvas element, for export.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.inner.canvas
    }
}

impl Drop for SkyCanvas {
    fn drop(&mut self) {
        for (event_name, cb) in &self.listeners {
            if let Err(e) = self
                .inner
                .canvas
                .remove_event_listener_with_callback(event_name, cb.as_ref().unchecked_ref())
            {
                log::warn!("failed to detach {event_name}: {e:?}");
            }
        }
    }
}

fn offset_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.offset_x()), f64::from(event.offset_y()))
}

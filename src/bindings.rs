//! JavaScript surface.
//!
//! Thin `#[wasm_bindgen]` wrappers over the Rust API. Options are accepted as
//! JSON strings (see [`crate::config`]); errors surface as JS exceptions.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

use crate::animator::Animator;
use crate::camera::Point;
use crate::color::Color;
use crate::config::{
    OrbitOptions, RotationOptions, SkyOptions, StarFieldOptions, ToolbarOptions, TransitionOptions, parse_options,
};
use crate::dom;
use crate::effects::{self, Done};
use crate::export::{Exporter, ImageFormat};
use crate::frame::FrameLoop;
use crate::shape::{Shape, ShapeStyle};
use crate::sky::SkyCanvas;
use crate::toolbar::{self, DomToolbar, ToolDescriptor};

// =============================================================
// Color
// =============================================================

/// `rgba(r, g, b, a)` for a 3- or 6-digit hex color.
///
/// # Errors
///
/// Throws if `hex` is not a valid hex color.
#[wasm_bindgen(js_name = hexToRgba)]
pub fn hex_to_rgba(hex: &str) -> Result<String, JsError> {
    Ok(hex.parse::<Color>()?.to_rgba())
}

/// Lighten a hex color by `amount` percentage points of lightness.
///
/// # Errors
///
/// Throws if `hex` is not a valid hex color.
#[wasm_bindgen(js_name = lightenColor)]
pub fn lighten_color(hex: &str, amount: f64) -> Result<String, JsError> {
    Ok(hex.parse::<Color>()?.lighten(amount).to_hex())
}

/// Darken a hex color by `amount` percentage points of lightness.
///
/// # Errors
///
/// Throws if `hex` is not a valid hex color.
#[wasm_bindgen(js_name = darkenColor)]
pub fn darken_color(hex: &str, amount: f64) -> Result<String, JsError> {
    Ok(hex.parse::<Color>()?.darken(amount).to_hex())
}

// =============================================================
// Sky canvas
// =============================================================

#[wasm_bindgen(js_name = SkyCanvas)]
pub struct SkyCanvasHandle {
    sky: SkyCanvas,
}

#[wasm_bindgen(js_class = SkyCanvas)]
impl SkyCanvasHandle {
    /// # Errors
    ///
    /// Throws if the canvas is missing or the options are malformed.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, options: Option<String>) -> Result<SkyCanvasHandle, JsError> {
        let options: SkyOptions = parse_options(options.as_deref())?;
        Ok(Self { sky: SkyCanvas::new(canvas_id, options)? })
    }

    fn add(&self, shape: Shape, style: Option<String>) -> Result<u64, JsError> {
        let style: ShapeStyle = parse_options(style.as_deref())?;
        Ok(self.sky.add_shape(shape.with_style(style))?.0)
    }

    /// # Errors
    ///
    /// Throws if the style is malformed or drawing fails.
    #[wasm_bindgen(js_name = addCircle)]
    pub fn add_circle(&self, x: f64, y: f64, radius: f64, style: Option<String>) -> Result<u64, JsError> {
        self.add(Shape::circle(x, y, radius), style)
    }

    /// # Errors
    ///
    /// Throws if the style is malformed or drawing fails.
    #[wasm_bindgen(js_name = addRectangle)]
    pub fn add_rectangle(&self, x: f64, y: f64, width: f64, height: f64, style: Option<String>) -> Result<u64, JsError> {
        self.add(Shape::rectangle(x, y, width, height), style)
    }

    /// # Errors
    ///
    /// Throws if the style is malformed or drawing fails.
    #[wasm_bindgen(js_name = addStar)]
    pub fn add_star(
        &self,
        x: f64,
        y: f64,
        outer_radius: f64,
        inner_radius: Option<f64>,
        points: Option<u32>,
        style: Option<String>,
    ) -> Result<u64, JsError> {
        self.add(Shape::star(x, y, outer_radius, inner_radius, points), style)
    }

    /// # Errors
    ///
    /// Throws if the style is malformed or drawing fails.
    #[wasm_bindgen(js_name = addLine)]
    pub fn add_line(&self, x1: f64, y1: f64, x2: f64, y2: f64, style: Option<String>) -> Result<u64, JsError> {
        self.add(Shape::line(x1, y1, x2, y2), style)
    }

    /// # Errors
    ///
    /// Throws if drawing fails.
    pub fn zoom(&self, factor: f64, center_x: f64, center_y: f64) -> Result<(), JsError> {
        Ok(self.sky.zoom(factor, center_x, center_y)?)
    }

    /// # Errors
    ///
    /// Throws if drawing fails.
    pub fn pan(&self, dx: f64, dy: f64) -> Result<(), JsError> {
        Ok(self.sky.pan(dx, dy)?)
    }

    /// Select the shape under a canvas point; returns its id.
    ///
    /// # Errors
    ///
    /// Throws if drawing fails.
    #[wasm_bindgen(js_name = selectAt)]
    pub fn select_at(&self, x: f64, y: f64) -> Result<Option<u64>, JsError> {
        Ok(self.sky.select_at(x, y)?.map(|id| id.0))
    }

    /// # Errors
    ///
    /// Throws if drawing fails.
    #[wasm_bindgen(js_name = drawStar)]
    pub fn draw_star(&self, x: f64, y: f64, magnitude: Option<f64>, color: Option<String>) -> Result<(), JsError> {
        Ok(self.sky.draw_star(x, y, magnitude.unwrap_or(1.0), color)?)
    }

    /// `points` is a JSON array of `{x, y}` objects.
    ///
    /// # Errors
    ///
    /// Throws if `points` is malformed or drawing fails.
    #[wasm_bindgen(js_name = drawConstellation)]
    pub fn draw_constellation(&self, points: &str, color: Option<String>) -> Result<(), JsError> {
        let points: Vec<Point> = serde_json::from_str(points)?;
        Ok(self.sky.draw_constellation(points, color)?)
    }

    /// `[x, y]` canvas coordinates of RA (hours) / Dec (degrees).
    ///
    /// # Errors
    ///
    /// Throws if the canvas is busy.
    #[wasm_bindgen(js_name = raDecToXY)]
    pub fn ra_dec_to_xy(&self, ra_hours: f64, dec_deg: f64) -> Result<Vec<f64>, JsError> {
        let p = self.sky.ra_dec_to_xy(ra_hours, dec_deg)?;
        Ok(vec![p.x, p.y])
    }

    /// # Errors
    ///
    /// Throws if drawing fails.
    pub fn resize(&self, width: u32, height: u32) -> Result<(), JsError> {
        Ok(self.sky.resize(width, height)?)
    }

    /// # Errors
    ///
    /// Throws if drawing fails.
    pub fn redraw(&self) -> Result<(), JsError> {
        Ok(self.sky.redraw()?)
    }

    #[wasm_bindgen(getter)]
    pub fn canvas(&self) -> HtmlCanvasElement {
        self.sky.canvas().clone()
    }
}

// =============================================================
// Tween effects
// =============================================================

/// A running tween effect. Dropping (freeing) it cancels the animation.
#[wasm_bindgen]
pub struct AnimationHandle {
    frame: FrameLoop<HtmlElement>,
}

#[wasm_bindgen]
impl AnimationHandle {
    /// Stop requesting frames; the element keeps its current styles.
    pub fn cancel(&self) {
        self.frame.cancel();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.frame.animator().try_borrow().map_or(true, |a| a.is_running())
    }
}

type Effect = fn(HtmlElement, f64, Option<Done<HtmlElement>>, f64) -> Animator<HtmlElement>;

fn run_effect(effect: Effect, element_id: &str, duration: Option<f64>, on_complete: Option<js_sys::Function>) -> Result<AnimationHandle, JsError> {
    let el = dom::element_by_id(element_id)?;
    let now = dom::window()?.performance().map_or_else(js_sys::Date::now, |p| p.now());
    let done: Option<Done<HtmlElement>> = on_complete.map(|f| -> Done<HtmlElement> {
        Box::new(move |el: &HtmlElement| {
            if let Err(e) = f.call1(&JsValue::NULL, el) {
                log::error!("animation callback failed: {e:?}");
            }
        })
    });
    let animator = effect(el, duration.unwrap_or(crate::consts::DEFAULT_DURATION_MS), done, now);
    let frame = FrameLoop::run(Rc::new(RefCell::new(animator)))?;
    Ok(AnimationHandle { frame })
}

/// # Errors
///
/// Throws if the element is missing or no animation frame can be requested.
#[wasm_bindgen(js_name = fadeIn)]
pub fn fade_in(element_id: &str, duration: Option<f64>, on_complete: Option<js_sys::Function>) -> Result<AnimationHandle, JsError> {
    run_effect(effects::fade_in, element_id, duration, on_complete)
}

/// # Errors
///
/// Throws if the element is missing or no animation frame can be requested.
#[wasm_bindgen(js_name = fadeOut)]
pub fn fade_out(element_id: &str, duration: Option<f64>, on_complete: Option<js_sys::Function>) -> Result<AnimationHandle, JsError> {
    run_effect(effects::fade_out, element_id, duration, on_complete)
}

/// # Errors
///
/// Throws if the element is missing or no animation frame can be requested.
#[wasm_bindgen(js_name = slideDown)]
pub fn slide_down(element_id: &str, duration: Option<f64>, on_complete: Option<js_sys::Function>) -> Result<AnimationHandle, JsError> {
    run_effect(effects::slide_down, element_id, duration, on_complete)
}

/// # Errors
///
/// Throws if the element is missing or no animation frame can be requested.
#[wasm_bindgen(js_name = slideUp)]
pub fn slide_up(element_id: &str, duration: Option<f64>, on_complete: Option<js_sys::Function>) -> Result<AnimationHandle, JsError> {
    run_effect(effects::slide_up, element_id, duration, on_complete)
}

// =============================================================
// CSS effects
// =============================================================

/// # Errors
///
/// Throws if the container is missing or the options are malformed.
#[wasm_bindgen(js_name = createStarField)]
pub fn create_star_field(container_id: &str, options: Option<String>) -> Result<(), JsError> {
    let options: StarFieldOptions = parse_options(options.as_deref())?;
    Ok(dom::create_star_field(container_id, &options)?)
}

/// # Errors
///
/// Throws if the element is missing or the options are malformed.
#[wasm_bindgen(js_name = rotateCelestialObject)]
pub fn rotate_celestial_object(element_id: &str, options: Option<String>) -> Result<(), JsError> {
    let options: RotationOptions = parse_options(options.as_deref())?;
    Ok(dom::rotate_celestial_object(element_id, &options)?)
}

/// Returns the generated keyframes name.
///
/// # Errors
///
/// Throws if the element is missing or the options are malformed.
#[wasm_bindgen(js_name = createOrbit)]
pub fn create_orbit(element_id: &str, options: Option<String>) -> Result<String, JsError> {
    let options: OrbitOptions = parse_options(options.as_deref())?;
    Ok(dom::create_orbit(element_id, &options)?)
}

/// # Errors
///
/// Throws if the element is missing or the options are malformed.
#[wasm_bindgen(js_name = transitionFadeIn)]
pub fn transition_fade_in(element_id: &str, options: Option<String>) -> Result<(), JsError> {
    let options: TransitionOptions = parse_options(options.as_deref())?;
    Ok(dom::transition_fade_in(&dom::element_by_id(element_id)?, &options)?)
}

/// # Errors
///
/// Throws if the element is missing or the options are malformed.
#[wasm_bindgen(js_name = transitionFadeOut)]
pub fn transition_fade_out(element_id: &str, options: Option<String>) -> Result<(), JsError> {
    let options: TransitionOptions = parse_options(options.as_deref())?;
    Ok(dom::transition_fade_out(&dom::element_by_id(element_id)?, &options)?)
}

// =============================================================
// Export
// =============================================================

#[wasm_bindgen(js_name = ExportManager)]
#[derive(Default)]
pub struct ExportHandle {
    exporter: Exporter,
}

#[wasm_bindgen(js_class = ExportManager)]
impl ExportHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ExportHandle {
        Self::default()
    }

    /// Download `data` (any JSON-compatible value) as a pretty JSON file.
    #[wasm_bindgen(js_name = exportJSON)]
    pub fn export_json(&self, data: &str, filename: Option<String>) -> bool {
        match serde_json::from_str::<serde_json::Value>(data) {
            Ok(value) => self.exporter.export_json(&value, filename.as_deref()),
            Err(e) => {
                log::error!("JSON export failed: {e}");
                false
            }
        }
    }

    /// Download the canvas pixels as `png` (default) or `jpeg`.
    #[wasm_bindgen(js_name = exportImage)]
    pub fn export_image(&self, canvas: &HtmlCanvasElement, filename: Option<String>, format: Option<String>) -> bool {
        let format = format.as_deref().map(ImageFormat::from_name).unwrap_or_default();
        self.exporter.export_image(canvas, filename.as_deref(), format)
    }

    #[wasm_bindgen(js_name = isExportInProgress)]
    pub fn is_export_in_progress(&self) -> bool {
        self.exporter.is_export_in_progress()
    }
}

// =============================================================
// Toolbar
// =============================================================

#[wasm_bindgen(js_name = Toolbar)]
pub struct ToolbarHandle {
    toolbar: DomToolbar,
}

/// Read `{id, icon?, tooltip?, action?, toggle?}` from a JS object.
fn descriptor_from_js(value: &JsValue) -> Result<ToolDescriptor, JsError> {
    let get = |key: &str| js_sys::Reflect::get(value, &JsValue::from_str(key)).map_err(|e| JsError::new(&format!("{e:?}")));

    let mut tool = ToolDescriptor::new(get("id")?.as_string().unwrap_or_default());
    if let Some(icon) = get("icon")?.as_string() {
        tool = tool.icon(&icon);
    }
    if let Some(tooltip) = get("tooltip")?.as_string() {
        tool = tool.tooltip(tooltip);
    }
    tool = tool.toggle(get("toggle")?.is_truthy());
    if let Ok(action) = get("action")?.dyn_into::<js_sys::Function>() {
        let this = value.clone();
        tool = tool.action(move |_| {
            if let Err(e) = action.call1(&JsValue::NULL, &this) {
                log::error!("tool action failed: {e:?}");
            }
        });
    }
    Ok(tool)
}

#[wasm_bindgen(js_class = Toolbar)]
impl ToolbarHandle {
    /// # Errors
    ///
    /// Throws if the container is missing or the options are malformed.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, options: Option<String>) -> Result<ToolbarHandle, JsError> {
        let options: ToolbarOptions = parse_options(options.as_deref())?;
        Ok(Self { toolbar: toolbar::mount(container_id, options)? })
    }

    fn with<R>(&self, f: impl FnOnce(&mut toolbar::Toolbar<toolbar::DomToolbarView>) -> Result<R, JsError>) -> Result<R, JsError> {
        let mut toolbar = self.toolbar.try_borrow_mut().map_err(|e| JsError::new(&e.to_string()))?;
        f(&mut toolbar)
    }

    /// # Errors
    ///
    /// Throws on a missing or duplicate id.
    #[wasm_bindgen(js_name = addTool)]
    pub fn add_tool(&self, tool: JsValue) -> Result<(), JsError> {
        let tool = descriptor_from_js(&tool)?;
        self.with(|tb| tb.add_tool(tool).map(|_| ()).map_err(JsError::from))
    }

    /// # Errors
    ///
    /// Throws on the first tool that cannot be added.
    #[wasm_bindgen(js_name = addToolGroup)]
    pub fn add_tool_group(&self, label: Option<String>, tools: js_sys::Array) -> Result<(), JsError> {
        let tools = tools.iter().map(|t| descriptor_from_js(&t)).collect::<Result<Vec<_>, _>>()?;
        self.with(|tb| tb.add_tool_group(label.as_deref(), tools).map(|_| ()).map_err(JsError::from))
    }

    /// # Errors
    ///
    /// Throws if the separator cannot be created.
    #[wasm_bindgen(js_name = addSeparator)]
    pub fn add_separator(&self) -> Result<(), JsError> {
        self.with(|tb| tb.add_separator().map(|_| ()).map_err(JsError::from))
    }

    /// # Errors
    ///
    /// Throws for an unknown id.
    #[wasm_bindgen(js_name = activateTool)]
    pub fn activate_tool(&self, id: &str) -> Result<(), JsError> {
        let selected = self.with(|tb| tb.select(id).map_err(JsError::from))?;
        if let Some(tool) = selected {
            tool.run();
        }
        Ok(())
    }

    /// Id of the active tool, if any.
    ///
    /// # Errors
    ///
    /// Throws if the toolbar is busy.
    #[wasm_bindgen(js_name = getActiveTool)]
    pub fn active_tool(&self) -> Result<Option<String>, JsError> {
        self.with(|tb| Ok(tb.active_tool().map(|t| t.id.clone())))
    }

    /// # Errors
    ///
    /// Throws if the toolbar is busy.
    pub fn clear(&self) -> Result<(), JsError> {
        self.with(|tb| {
            tb.clear();
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Throws if the toolbar is busy.
    pub fn destroy(&self) -> Result<(), JsError> {
        self.with(|tb| {
            tb.destroy();
            Ok(())
        })
    }
}

//! Browser side of the CSS effect plans.
//!
//! Each function resolves its element, writes the declarations computed by
//! [`crate::effects`], and injects any `@keyframes` rule it needs into
//! `<head>` exactly once per document.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::config::{OrbitOptions, RotationOptions, StarFieldOptions, TransitionOptions};
use crate::consts::TRANSITION_KICK_MS;
use crate::effects::{self, ROTATE_KEYFRAMES, ROTATION_STYLE_ID, TWINKLE_KEYFRAMES, TWINKLE_STYLE_ID};
use crate::style::{StyleError, StyleTarget, apply_styles};

/// DOM lookup and mutation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("window is not available")]
    WindowNotAvailable,

    #[error("document is not available")]
    DocumentNotAvailable,

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("element is not an HTML element: {0}")]
    NotHtml(String),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("dom operation failed: {0}")]
    Js(String),
}

impl DomError {
    pub(crate) fn js(err: &wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{err:?}"))
    }
}

pub(crate) fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::WindowNotAvailable)
}

pub(crate) fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::DocumentNotAvailable)
}

/// The HTML element with `id`.
///
/// # Errors
///
/// Returns [`DomError::ElementNotFound`] or [`DomError::NotHtml`].
pub fn element_by_id(id: &str) -> Result<HtmlElement, DomError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| DomError::ElementNotFound(id.to_owned()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::NotHtml(id.to_owned()))
}

/// Append a `<style id=...>` holding `css` to `<head>` unless one with that
/// id already exists.
fn inject_keyframes(document: &Document, id: &str, css: &str) -> Result<(), DomError> {
    if document.get_element_by_id(id).is_some() {
        return Ok(());
    }
    let style = document.create_element("style").map_err(|e| DomError::js(&e))?;
    style.set_id(id);
    style.set_text_content(Some(css));
    let head = document.head().ok_or_else(|| DomError::ElementNotFound("head".to_owned()))?;
    head.append_child(&style).map_err(|e| DomError::js(&e))?;
    Ok(())
}

/// Fill the element `container_id` with twinkling stars.
///
/// # Errors
///
/// Returns [`DomError`] if the container is missing or a star cannot be created.
pub fn create_star_field(container_id: &str, options: &StarFieldOptions) -> Result<(), DomError> {
    let document = document()?;
    let container = element_by_id(container_id)?;

    for (property, value) in effects::STAR_FIELD_CONTAINER_STYLES {
        container.set_style(property, value)?;
    }
    inject_keyframes(&document, TWINKLE_STYLE_ID, TWINKLE_KEYFRAMES)?;

    let mut rng = SmallRng::seed_from_u64(js_sys::Date::now().to_bits());
    let stars = effects::generate_stars(options, &mut rng);
    for star in &stars {
        let el = document
            .create_element("div")
            .map_err(|e| DomError::js(&e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DomError::NotHtml("div".to_owned()))?;
        el.set_class_name("star");
        apply_styles(&el, &star.declarations())?;
        container.append_child(&el).map_err(|e| DomError::js(&e))?;
    }
    log::debug!("star field {container_id}: {} stars", stars.len());
    Ok(())
}

/// Spin the element `element_id` continuously.
///
/// # Errors
///
/// Returns [`DomError`] if the element is missing.
pub fn rotate_celestial_object(element_id: &str, options: &RotationOptions) -> Result<(), DomError> {
    let document = document()?;
    let el = element_by_id(element_id)?;
    inject_keyframes(&document, ROTATION_STYLE_ID, ROTATE_KEYFRAMES)?;
    el.set_style("animation", &effects::rotation_animation(options))?;
    Ok(())
}

/// Move the element `element_id` around an ellipse inside its parent.
/// Returns the generated keyframes name.
///
/// # Errors
///
/// Returns [`DomError`] if the element is missing.
pub fn create_orbit(element_id: &str, options: &OrbitOptions) -> Result<String, DomError> {
    let document = document()?;
    let el = element_by_id(element_id)?;
    let name = effects::orbit_name();
    inject_keyframes(&document, &name, &effects::orbit_keyframes(&name, options))?;
    el.set_style("position", "absolute")?;
    el.set_style("animation", &effects::orbit_animation(&name, options))?;
    Ok(name)
}

/// Fade `el` in with a CSS transition.
///
/// # Errors
///
/// Returns [`DomError::Style`] if the initial styles cannot be written.
pub fn transition_fade_in(el: &HtmlElement, options: &TransitionOptions) -> Result<(), DomError> {
    apply_styles(el, &effects::transition_fade_in_styles(options))?;
    let el = el.clone();
    // Give the browser a frame to commit opacity 0 before transitioning.
    gloo_timers::callback::Timeout::new(TRANSITION_KICK_MS, move || {
        if let Err(e) = el.set_style("opacity", "1") {
            log::warn!("{e}");
        }
    })
    .forget();
    Ok(())
}

/// Fade `el` out with a CSS transition, then hide it.
///
/// # Errors
///
/// Returns [`DomError::Style`] if the initial styles cannot be written.
pub fn transition_fade_out(el: &HtmlElement, options: &TransitionOptions) -> Result<(), DomError> {
    apply_styles(el, &effects::transition_fade_out_styles(options))?;
    let el = el.clone();
    gloo_timers::callback::Timeout::new(effects::transition_total_ms(options), move || {
        if let Err(e) = el.set_style("display", "none") {
            log::warn!("{e}");
        }
    })
    .forget();
    Ok(())
}

//! Page bootstrap.
//!
//! [`boot`] runs when the module is instantiated: it installs the panic hook
//! and console logger, then wires the page once the DOM is ready:
//!
//! - `.menu-toggle` clicks toggle `nav-open` on `<body>`;
//! - every `<form>` submits through `fetch` and reports the outcome as a
//!   [`Notification`];
//! - `/api/data` is loaded for the `.content-container`; a failed load shows
//!   an error notification.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use gloo_net::http::Request;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, FormData, HtmlFormElement};

use crate::dom::{self, DomError};
use crate::notify::Notification;

/// Endpoint read once at startup.
pub const INITIAL_DATA_URL: &str = "/api/data";

/// Bootstrap failures.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("request failed: {0}")]
    Http(#[from] gloo_net::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("page wiring failed: {0}")]
    Js(String),
}

impl PageError {
    fn js(err: &JsValue) -> Self {
        Self::Js(format!("{err:?}"))
    }
}

/// Module entry point.
#[wasm_bindgen(start)]
pub fn boot() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::debug!("logger already installed");
    }

    if let Err(e) = when_ready(init_app) {
        log::error!("page boot failed: {e}");
    }
}

/// Run `f` now if the DOM is parsed, otherwise on `DOMContentLoaded`.
fn when_ready(f: fn() -> Result<(), PageError>) -> Result<(), PageError> {
    let document = dom::document()?;
    if document.ready_state() != "loading" {
        return f();
    }
    let cb = Closure::once(move || {
        if let Err(e) = f() {
            log::error!("page init failed: {e}");
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref())
        .map_err(|e| PageError::js(&e))?;
    cb.forget();
    Ok(())
}

fn init_app() -> Result<(), PageError> {
    let document = dom::document()?;
    wire_menu_toggle(&document)?;
    wire_forms(&document)?;
    spawn_local(load_initial_data());
    log::debug!("page ready");
    Ok(())
}

// =============================================================
// Menu
// =============================================================

fn wire_menu_toggle(document: &Document) -> Result<(), PageError> {
    let Some(toggle) = document.query_selector(".menu-toggle").map_err(|e| PageError::js(&e))? else {
        return Ok(());
    };
    let cb = Closure::<dyn FnMut()>::new(move || {
        let Ok(document) = dom::document() else {
            return;
        };
        let Some(body) = document.body() else {
            return;
        };
        if let Err(e) = body.class_list().toggle("nav-open") {
            log::warn!("failed to toggle navigation: {e:?}");
        }
    });
    toggle
        .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
        .map_err(|e| PageError::js(&e))?;
    // Lives as long as the page.
    cb.forget();
    Ok(())
}

// =============================================================
// Forms
// =============================================================

fn wire_forms(document: &Document) -> Result<(), PageError> {
    let forms = document.query_selector_all("form").map_err(|e| PageError::js(&e))?;
    for i in 0..forms.length() {
        let Some(form) = forms.item(i) else {
            continue;
        };
        let cb = Closure::<dyn FnMut(Event)>::new(on_submit);
        form.add_event_listener_with_callback("submit", cb.as_ref().unchecked_ref())
            .map_err(|e| PageError::js(&e))?;
        cb.forget();
    }
    log::debug!("wired {} forms", forms.length());
    Ok(())
}

fn on_submit(event: Event) {
    event.prevent_default();
    let Some(target) = event.target() else {
        return;
    };
    let Ok(form) = target.dyn_into::<HtmlFormElement>() else {
        return;
    };
    spawn_local(async move {
        let outcome = submit_form(&form).await;
        if let Err(e) = &outcome {
            log::error!("Submission error: {e}");
        }
        if let Err(e) = submission_notification(&outcome).show() {
            log::error!("failed to show notification: {e}");
        }
    });
}

async fn submit_form(form: &HtmlFormElement) -> Result<Value, PageError> {
    let data = FormData::new_with_form(form).map_err(|e| PageError::js(&e))?;
    let resp = Request::post(&form.action()).body(data)?.send().await?;
    if !is_success_status(resp.status()) {
        return Err(PageError::Status(resp.status()));
    }
    Ok(resp.json::<Value>().await?)
}

/// The notification shown for a form submission outcome.
#[must_use]
pub fn submission_notification<T>(outcome: &Result<T, PageError>) -> Notification {
    match outcome {
        Ok(_) => Notification::success(),
        Err(_) => Notification::error(),
    }
}

/// Whether an HTTP status counts as success.
#[must_use]
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

// =============================================================
// Initial data
// =============================================================

async fn load_initial_data() {
    let outcome = fetch_initial_data().await;
    match &outcome {
        Ok(data) => {
            if let Err(e) = update_content(data) {
                log::error!("Error loading data: {e}");
            }
        }
        Err(e) => log::error!("Error loading data: {e}"),
    }
    if let Some(notification) = load_notification(&outcome) {
        if let Err(e) = notification.show() {
            log::error!("failed to show notification: {e}");
        }
    }
}

/// The notification shown for an initial data load; a successful load is silent.
#[must_use]
pub fn load_notification<T>(outcome: &Result<T, PageError>) -> Option<Notification> {
    outcome.as_ref().err().map(|_| Notification::load_error())
}

async fn fetch_initial_data() -> Result<Value, PageError> {
    let resp = Request::get(INITIAL_DATA_URL).send().await?;
    if !is_success_status(resp.status()) {
        return Err(PageError::Status(resp.status()));
    }
    Ok(resp.json::<Value>().await?)
}

/// Hand loaded data to `.content-container` as a `data-content` attribute.
fn update_content(data: &Value) -> Result<(), PageError> {
    let Some(content) = content_payload(data) else {
        return Ok(());
    };
    let document = dom::document()?;
    let Some(container) = document.query_selector(".content-container").map_err(|e| PageError::js(&e))? else {
        return Ok(());
    };
    container.set_attribute("data-content", &content).map_err(|e| PageError::js(&e))?;
    log::debug!("content container updated");
    Ok(())
}

/// Serialized payload for the content container; `None` for `null` data.
#[must_use]
pub fn content_payload(data: &Value) -> Option<String> {
    if data.is_null() {
        return None;
    }
    Some(data.to_string())
}

//! JSON and image export.
//!
//! [`Exporter`] serializes data or reads pixels and hands the result to a
//! [`DownloadSink`]. Only one export runs at a time per exporter; a second
//! request while one is in flight is rejected with `false`.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::cell::Cell;

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlCanvasElement, Url};

use crate::consts::DOWNLOAD_CLEANUP_MS;
use crate::dom;
use crate::style::StyleTarget;

/// Default file name of a JSON export.
pub const DEFAULT_JSON_FILENAME: &str = "pyastrator-data.json";

/// Default file name of an image export.
pub const DEFAULT_IMAGE_FILENAME: &str = "pyastrator-image.png";

/// Export failures. Public entry points log these and return `false`.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize export data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("browser rejected export: {0}")]
    Browser(String),
}

impl ExportError {
    fn js(err: &JsValue) -> Self {
        Self::Browser(format!("{err:?}"))
    }
}

impl From<dom::DomError> for ExportError {
    fn from(err: dom::DomError) -> Self {
        Self::Browser(err.to_string())
    }
}

/// Encoding of an exported image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    /// `jpeg` (or `jpg`) selects JPEG; anything else is PNG.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Self::Jpeg,
            _ => Self::Png,
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

// =============================================================
// Seams
// =============================================================

/// Where exported bytes go.
pub trait DownloadSink {
    /// Offer `content` as a file named `filename`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Browser`] if the download cannot be started.
    fn download_text(&self, content: &str, filename: &str, mime_type: &str) -> Result<(), ExportError>;

    /// Offer the resource at `url` (usually a data URL) as `filename`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Browser`] if the download cannot be started.
    fn download_url(&self, url: &str, filename: &str) -> Result<(), ExportError>;
}

/// A drawable surface that can be encoded as a data URL.
pub trait PixelSource {
    /// # Errors
    ///
    /// Returns [`ExportError::Browser`] if the surface cannot be read, e.g. a
    /// tainted canvas.
    fn to_data_url(&self, mime_type: &str) -> Result<String, ExportError>;
}

impl PixelSource for HtmlCanvasElement {
    fn to_data_url(&self, mime_type: &str) -> Result<String, ExportError> {
        self.to_data_url_with_type(mime_type).map_err(|e| ExportError::js(&e))
    }
}

// =============================================================
// Browser download
// =============================================================

/// Downloads through a transient hidden `<a download>` element.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDownloader;

impl BrowserDownloader {
    /// Click a hidden anchor pointing at `href`, then remove it (and revoke
    /// the object URL, if any) after a short delay.
    fn click_anchor(href: &str, filename: &str, object_url: bool) -> Result<(), ExportError> {
        let document = dom::document()?;
        let body = document.body().ok_or_else(|| ExportError::Browser("document has no body".to_owned()))?;
        let anchor = document
            .create_element("a")
            .map_err(|e| ExportError::js(&e))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| ExportError::Browser("anchor is not an HtmlAnchorElement".to_owned()))?;
        anchor.set_href(href);
        anchor.set_download(filename);
        anchor.set_style("display", "none").map_err(|e| ExportError::Browser(e.to_string()))?;

        body.append_child(&anchor).map_err(|e| ExportError::js(&e))?;
        anchor.click();

        let href = href.to_owned();
        gloo_timers::callback::Timeout::new(DOWNLOAD_CLEANUP_MS, move || {
            anchor.remove();
            if object_url {
                if let Err(e) = Url::revoke_object_url(&href) {
                    log::warn!("failed to revoke {href}: {e:?}");
                }
            }
        })
        .forget();
        Ok(())
    }
}

impl DownloadSink for BrowserDownloader {
    fn download_text(&self, content: &str, filename: &str, mime_type: &str) -> Result<(), ExportError> {
        let parts = js_sys::Array::of1(&JsValue::from_str(content));
        let props = BlobPropertyBag::new();
        props.set_type(mime_type);
        let blob = Blob::new_with_str_sequence_and_options(&parts, &props).map_err(|e| ExportError::js(&e))?;
        let url = Url::create_object_url_with_blob(&blob).map_err(|e| ExportError::js(&e))?;
        Self::click_anchor(&url, filename, true)
    }

    fn download_url(&self, url: &str, filename: &str) -> Result<(), ExportError> {
        Self::click_anchor(url, filename, false)
    }
}

// =============================================================
// Exporter
// =============================================================

/// Resets the in-progress flag when dropped.
#[must_use = "the export is only guarded while this value is alive"]
pub struct ExportGuard<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Single-flight exporter over a download sink.
#[derive(Debug, Default)]
pub struct Exporter<S = BrowserDownloader> {
    sink: S,
    in_progress: Cell<bool>,
}

impl<S: DownloadSink> Exporter<S> {
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self { sink, in_progress: Cell::new(false) }
    }

    #[must_use]
    pub fn is_export_in_progress(&self) -> bool {
        self.in_progress.get()
    }

    /// Claim the exporter. `None` while another export holds it.
    pub fn try_begin(&self) -> Option<ExportGuard<'_>> {
        if self.in_progress.replace(true) {
            return None;
        }
        Some(ExportGuard { flag: &self.in_progress })
    }

    /// Download `data` as pretty-printed JSON. Returns `false` if another
    /// export is running or the export fails.
    pub fn export_json<T: Serialize + ?Sized>(&self, data: &T, filename: Option<&str>) -> bool {
        let Some(_guard) = self.try_begin() else {
            log::warn!("export already in progress");
            return false;
        };
        let filename = filename.unwrap_or(DEFAULT_JSON_FILENAME);
        match self.write_json(data, filename) {
            Ok(()) => {
                log::debug!("exported {filename}");
                true
            }
            Err(e) => {
                log::error!("JSON export failed: {e}");
                false
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, data: &T, filename: &str) -> Result<(), ExportError> {
        let content = serde_json::to_string_pretty(data)?;
        self.sink.download_text(&content, filename, "application/json")
    }

    /// Download the pixels of `source` as an image. Returns `false` if
    /// another export is running or the export fails.
    pub fn export_image<P: PixelSource + ?Sized>(&self, source: &P, filename: Option<&str>, format: ImageFormat) -> bool {
        let Some(_guard) = self.try_begin() else {
            log::warn!("export already in progress");
            return false;
        };
        let filename = filename.unwrap_or(DEFAULT_IMAGE_FILENAME);
        let result = source
            .to_data_url(format.mime_type())
            .and_then(|url| self.sink.download_url(&url, filename));
        match result {
            Ok(()) => {
                log::debug!("exported {filename}");
                true
            }
            Err(e) => {
                log::error!("Image export failed: {e}");
                false
            }
        }
    }

    /// The sink downloads go to.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

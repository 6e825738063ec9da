//! The styling seam between animations and visual elements.
//!
//! Animations and effects write inline style properties through
//! [`StyleTarget`] rather than touching `web_sys` directly, so their logic runs
//! in native unit tests against a recording fake.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use std::rc::Rc;

use web_sys::HtmlElement;

/// Error raised when an inline style cannot be written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to set style {property}: {message}")]
pub struct StyleError {
    pub property: String,
    pub message: String,
}

/// Something with an inline style and a measurable height.
pub trait StyleTarget {
    /// Write one inline style property, e.g. `("opacity", "0.5")`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError`] if the environment rejects the write.
    fn set_style(&self, property: &str, value: &str) -> Result<(), StyleError>;

    /// Full content height in pixels, including overflow.
    fn scroll_height(&self) -> f64;

    /// Rendered height in pixels.
    fn offset_height(&self) -> f64;
}

impl StyleTarget for HtmlElement {
    fn set_style(&self, property: &str, value: &str) -> Result<(), StyleError> {
        self.style().set_property(property, value).map_err(|e| StyleError {
            property: property.to_owned(),
            message: format!("{e:?}"),
        })
    }

    fn scroll_height(&self) -> f64 {
        f64::from(web_sys::Element::scroll_height(self))
    }

    fn offset_height(&self) -> f64 {
        f64::from(HtmlElement::offset_height(self))
    }
}

impl<S: StyleTarget + ?Sized> StyleTarget for Rc<S> {
    fn set_style(&self, property: &str, value: &str) -> Result<(), StyleError> {
        (**self).set_style(property, value)
    }

    fn scroll_height(&self) -> f64 {
        (**self).scroll_height()
    }

    fn offset_height(&self) -> f64 {
        (**self).offset_height()
    }
}

/// Kebab-case CSS name for a property given either way (`backgroundColor` → `background-color`).
#[must_use]
pub fn css_property_name(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Write several properties in order, stopping at the first failure.
///
/// # Errors
///
/// Returns the first [`StyleError`] encountered.
pub fn apply_styles<T: StyleTarget + ?Sized>(target: &T, styles: &[(&str, String)]) -> Result<(), StyleError> {
    for (property, value) in styles {
        target.set_style(property, value)?;
    }
    Ok(())
}

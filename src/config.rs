//! Option structs for every configurable component.
//!
//! Each struct implements `Default` with the stock values and deserializes
//! from camelCase JSON with missing fields filled from the default, so JS
//! callers can pass partial option objects.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Error returned when an options JSON string cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid options: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

/// Parse options from an optional JSON string; `None` or blank input yields the defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] if the string is not valid JSON for `T`.
pub fn parse_options<T: DeserializeOwned + Default>(json: Option<&str>) -> Result<T, ConfigError> {
    match json.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(s) => Ok(serde_json::from_str(s)?),
    }
}

// =============================================================
// Sky canvas
// =============================================================

/// Colors and grid settings of a sky canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkyOptions {
    pub background_color: String,
    pub star_color: String,
    pub grid_color: String,
    pub show_grid: bool,
}

impl Default for SkyOptions {
    fn default() -> Self {
        Self {
            background_color: "#000000".to_owned(),
            star_color: "#FFFFFF".to_owned(),
            grid_color: "#333333".to_owned(),
            show_grid: true,
        }
    }
}

// =============================================================
// Toolbar
// =============================================================

/// Layout direction of the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Color theme of the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Size of toolbar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl Orientation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl ButtonSize {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolbarOptions {
    pub orientation: Orientation,
    pub theme: Theme,
    pub button_size: ButtonSize,
}

impl ToolbarOptions {
    /// CSS classes of the toolbar root element.
    #[must_use]
    pub fn root_class(&self) -> String {
        format!(
            "pyastrator-toolbar pyastrator-toolbar-{} pyastrator-toolbar-{}",
            self.orientation.as_str(),
            self.theme.as_str()
        )
    }

    /// CSS classes of a tool button.
    #[must_use]
    pub fn button_class(&self) -> String {
        format!("pyastrator-toolbar-button pyastrator-toolbar-button-{}", self.button_size.as_str())
    }
}

// =============================================================
// CSS effects
// =============================================================

/// Star field density and star sizes (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StarFieldOptions {
    pub star_count: u32,
    pub min_size: f64,
    pub max_size: f64,
    /// Reserved drift speed; stars currently only twinkle.
    pub speed: f64,
}

impl Default for StarFieldOptions {
    fn default() -> Self {
        Self { star_count: 100, min_size: 1.0, max_size: 3.0, speed: 50.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RotationOptions {
    /// One full turn, in milliseconds.
    pub duration: f64,
    pub clockwise: bool,
}

impl Default for RotationOptions {
    fn default() -> Self {
        Self { duration: 20_000.0, clockwise: true }
    }
}

/// Elliptical orbit: radii in pixels, center in percent of the parent box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrbitOptions {
    pub radius_x: f64,
    pub radius_y: f64,
    /// One full revolution, in milliseconds.
    pub duration: f64,
    pub center: Point,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self { radius_x: 100.0, radius_y: 50.0, duration: 10_000.0, center: Point::new(50.0, 50.0) }
    }
}

/// CSS transition timing for the transition-based fades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitionOptions {
    pub duration: f64,
    /// CSS timing function, e.g. `ease` or `linear`.
    pub easing: String,
    pub delay: f64,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self { duration: 1000.0, easing: "ease".to_owned(), delay: 0.0 }
    }
}

impl TransitionOptions {
    /// The `transition` declaration for `property`.
    #[must_use]
    pub fn css(&self, property: &str) -> String {
        format!("{property} {}ms {} {}ms", self.duration, self.easing, self.delay)
    }
}

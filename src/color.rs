//! Color values and conversions between hex, RGB(A) and HSL.
//!
//! `Color` is a plain value type: every transformation returns a new color.
//! Channels are kept as `f64` so intermediate results (interpolation, HSL
//! round-trips) are not truncated until they are formatted.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The string is not a 3- or 6-digit hex color.
    #[error("invalid hex format: {0:?}")]
    InvalidHex(String),
}

/// An RGBA color. `r`, `g`, `b` are in `0..=255`, `a` is in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// Hue in degrees (`0..360`), saturation and lightness in percent (`0..=100`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Color {
    #[must_use]
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from three channels.
    #[must_use]
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb` or `rrggbb`. Alpha is 1.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] for any other length or a non-hex digit.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_owned()));
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHex(hex.to_owned()));

        let (r, g, b) = match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..=i].repeat(2));
                (expand(0)?, expand(1)?, expand(2)?)
            }
            6 => (channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?),
            _ => return Err(ColorError::InvalidHex(hex.to_owned())),
        };
        Ok(Self::rgb(f64::from(r), f64::from(g), f64::from(b)))
    }

    /// Build a color from HSL components and an alpha. Channels are rounded.
    #[must_use]
    pub fn from_hsl(h: f64, s: f64, l: f64, a: f64) -> Self {
        let h = h / 360.0;
        let s = s / 100.0;
        let l = l / 100.0;

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Self::rgba((r * 255.0).round(), (g * 255.0).round(), (b * 255.0).round(), a)
    }

    /// Lowercase `#rrggbb`; channels are rounded and clamped.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }

    /// CSS `rgba(r, g, b, a)` with rounded channels.
    #[must_use]
    pub fn to_rgba(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r.round(), self.g.round(), self.b.round(), self.a)
    }

    /// CSS `rgb(r, g, b)` with rounded channels.
    #[must_use]
    pub fn to_rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.r.round(), self.g.round(), self.b.round())
    }

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn to_hsl(&self) -> Hsl {
        let r = self.r / 255.0;
        let g = self.g / 255.0;
        let b = self.b / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl { h: h / 6.0 * 360.0, s: s * 100.0, l: l * 100.0 }
    }

    /// Raise lightness by `amount` percentage points, kept within `[0, 100]`.
    #[must_use]
    pub fn lighten(&self, amount: f64) -> Self {
        self.with_lightness_shift(amount)
    }

    /// Lower lightness by `amount` percentage points, kept within `[0, 100]`.
    #[must_use]
    pub fn darken(&self, amount: f64) -> Self {
        self.with_lightness_shift(-amount)
    }

    fn with_lightness_shift(&self, delta: f64) -> Self {
        let hsl = self.to_hsl();
        Self::from_hsl(hsl.h, hsl.s, (hsl.l + delta).clamp(0.0, 100.0), self.a)
    }

    /// Per-channel linear interpolation toward `other`. Alpha is taken from `self`.
    #[must_use]
    pub fn mix(&self, other: &Self, t: f64) -> Self {
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Self::rgba(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b), self.a)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rgba())
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_byte(channel: f64) -> u8 {
    channel.round().clamp(0.0, 255.0) as u8
}

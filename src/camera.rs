#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Pan/zoom transform applied to the sky canvas.
///
/// `offset_x` / `offset_y` are in canvas pixels.
/// `scale` is a multiplicative factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { offset_x: 0.0, offset_y: 0.0, scale: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset_x) / self.scale,
            y: (screen.y - self.offset_y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.offset_x,
            y: world.y * self.scale + self.offset_y,
        }
    }

    /// Multiply the scale by `factor`, keeping the screen point `anchor` fixed.
    /// The scale stays within [`MIN_ZOOM`, `MAX_ZOOM`].
    pub fn zoom_at(&mut self, factor: f64, anchor: Point) {
        let old_scale = self.scale;
        self.scale = (self.scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = self.scale / old_scale;
        self.offset_x = anchor.x - (anchor.x - self.offset_x) * ratio;
        self.offset_y = anchor.y - (anchor.y - self.offset_y) * ratio;
    }

    /// Shift the offset by a screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }
}

/// Project equatorial coordinates onto a `width` × `height` canvas.
///
/// `ra_hours` is right ascension in hours, `dec_deg` declination in degrees.
/// The celestial sphere is flattened orthographically: RA 0h / Dec 0° lands
/// at the canvas center and the poles at the top and bottom edges.
#[must_use]
pub fn ra_dec_to_xy(ra_hours: f64, dec_deg: f64, width: f64, height: f64) -> Point {
    let ra = (ra_hours * 15.0).to_radians();
    let dec = dec_deg.to_radians();
    let x = dec.cos() * ra.sin();
    let y = dec.sin();
    Point {
        x: (x + 1.0) * width / 2.0,
        y: (1.0 - y) * height / 2.0,
    }
}

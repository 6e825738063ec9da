//! Shape records drawn on the sky canvas.
//!
//! A `Shape` carries the fields every primitive shares (position, style,
//! visibility, selection, id) and a closed [`Geometry`] union for the
//! type-specific part. Hit-testing lives in [`crate::hit`] and drawing in
//! [`crate::render`]; this module only owns the data and its mutations.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{STAR_DEFAULT_POINTS, STAR_INNER_RATIO, STAR_MAX_POINTS};
use crate::hit;

/// Identifier of a shape within its scene. Ids start at 1; 0 means unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub u64);

impl ShapeId {
    /// Placeholder carried by shapes that have not been added to a scene.
    pub const UNASSIGNED: Self = Self(0);
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discriminant of a [`Geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Star,
    Line,
}

/// Type-specific geometry. Circle, rectangle and star are centered on the
/// shape position; a line stores absolute endpoints and its position is the
/// midpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
    Star { outer_radius: f64, inner_radius: f64, points: u32 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Geometry {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Star { .. } => ShapeKind::Star,
            Self::Line { .. } => ShapeKind::Line,
        }
    }
}

/// Fill and stroke settings applied before drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeStyle {
    /// CSS fill color.
    pub fill_color: String,
    /// CSS stroke color.
    pub stroke_color: String,
    /// Stroke width in world units.
    pub line_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill_color: "rgba(255, 255, 255, 0.5)".to_owned(),
            stroke_color: "rgba(255, 255, 255, 1)".to_owned(),
            line_width: 1.0,
        }
    }
}

/// A drawable primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub x: f64,
    pub y: f64,
    pub geometry: Geometry,
    pub style: ShapeStyle,
    pub visible: bool,
    pub selected: bool,
}

impl Shape {
    fn with_geometry(x: f64, y: f64, geometry: Geometry) -> Self {
        Self {
            id: ShapeId::UNASSIGNED,
            x,
            y,
            geometry,
            style: ShapeStyle::default(),
            visible: true,
            selected: false,
        }
    }

    #[must_use]
    pub fn circle(x: f64, y: f64, radius: f64) -> Self {
        Self::with_geometry(x, y, Geometry::Circle { radius })
    }

    /// Rectangle centered on `(x, y)`.
    #[must_use]
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::with_geometry(x, y, Geometry::Rectangle { width, height })
    }

    /// Star centered on `(x, y)`. `inner_radius` defaults to half the outer
    /// radius and `points` to five; `points` is capped at [`STAR_MAX_POINTS`].
    #[must_use]
    pub fn star(x: f64, y: f64, outer_radius: f64, inner_radius: Option<f64>, points: Option<u32>) -> Self {
        let inner_radius = inner_radius
            .filter(|r| *r > 0.0)
            .unwrap_or(outer_radius * STAR_INNER_RATIO);
        let points = points.filter(|p| *p > 0).unwrap_or(STAR_DEFAULT_POINTS).min(STAR_MAX_POINTS);
        Self::with_geometry(x, y, Geometry::Star { outer_radius, inner_radius, points })
    }

    /// Line segment; the shape position is the segment midpoint.
    #[must_use]
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::with_geometry((x1 + x2) / 2.0, (y1 + y2) / 2.0, Geometry::Line { x1, y1, x2, y2 })
    }

    /// Replace the style, builder-style.
    #[must_use]
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether the world-space point `(x, y)` lies on or inside the shape.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        hit::geometry_contains(self.position(), &self.geometry, Point::new(x, y))
    }

    /// Translate the shape by `(dx, dy)`. Line endpoints move with it.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
        if let Geometry::Line { x1, y1, x2, y2 } = &mut self.geometry {
            *x1 += dx;
            *y1 += dy;
            *x2 += dx;
            *y2 += dy;
        }
    }

    /// Move the shape so its position is `(x, y)`.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.move_by(x - self.x, y - self.y);
    }

    /// Outline vertices of a star, starting at the top and alternating
    /// outer and inner radius. Empty for every other geometry.
    #[must_use]
    pub fn star_vertices(&self) -> Vec<Point> {
        let Geometry::Star { outer_radius, inner_radius, points } = self.geometry else {
            return Vec::new();
        };
        let step = PI / f64::from(points);
        (0..points * 2)
            .map(|i| {
                let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
                let angle = step.mul_add(f64::from(i), -FRAC_PI_2);
                Point::new(radius.mul_add(angle.cos(), self.x), radius.mul_add(angle.sin(), self.y))
            })
            .collect()
    }
}

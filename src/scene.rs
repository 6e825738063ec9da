//! The shape list owned by a sky canvas.
//!
//! Shapes are kept in insertion order, which is also draw order. The scene
//! hands out ids from its own counter so independent canvases never share
//! state. Star markers and constellation lines are kept alongside so they
//! survive redraws; they are drawn above the shapes and are not hit-tested.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::CONSTELLATION_COLOR;
use crate::shape::{Shape, ShapeId};

/// A catalogue star drawn as a dot sized by its magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarMarker {
    pub position: Point,
    /// Apparent magnitude; smaller is brighter.
    pub magnitude: f64,
    /// Overrides the canvas star color.
    pub color: Option<String>,
}

impl StarMarker {
    /// World-space radius: `max(1, 4 - magnitude)`.
    #[must_use]
    pub fn radius(&self) -> f64 {
        (4.0 - self.magnitude).max(1.0)
    }
}

/// A polyline joining the stars of a constellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constellation {
    pub points: Vec<Point>,
    pub color: String,
}

/// In-memory, ordered store of shapes.
#[derive(Debug, Clone)]
pub struct Scene {
    shapes: Vec<Shape>,
    markers: Vec<StarMarker>,
    constellations: Vec<Constellation>,
    next_id: u64,
}

impl Scene {
    /// Create an empty scene. The first added shape gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: Vec::new(), markers: Vec::new(), constellations: Vec::new(), next_id: 1 }
    }

    /// Append a shape, assigning it the next id. Any id already on the shape
    /// is overwritten.
    pub fn add(&mut self, mut shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        shape.id = id;
        self.shapes.push(shape);
        id
    }

    /// Return a reference to a shape by id.
    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Return a mutable reference to a shape by id.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// All shapes in draw order (bottom first).
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Mark exactly one shape as selected, or none when `id` is `None` or
    /// unknown. Returns true if the selection changed.
    pub fn select(&mut self, id: Option<ShapeId>) -> bool {
        let mut changed = false;
        for shape in &mut self.shapes {
            let selected = Some(shape.id) == id;
            if shape.selected != selected {
                shape.selected = selected;
                changed = true;
            }
        }
        changed
    }

    /// Id of the first selected shape, if any.
    #[must_use]
    pub fn selected(&self) -> Option<ShapeId> {
        self.shapes.iter().find(|s| s.selected).map(|s| s.id)
    }

    pub fn add_marker(&mut self, marker: StarMarker) {
        self.markers.push(marker);
    }

    #[must_use]
    pub fn markers(&self) -> &[StarMarker] {
        &self.markers
    }

    /// Add a constellation line. Fewer than two points draw nothing and are
    /// dropped; returns whether the line was kept.
    pub fn add_constellation(&mut self, points: Vec<Point>, color: Option<String>) -> bool {
        if points.len() < 2 {
            return false;
        }
        let color = color.unwrap_or_else(|| CONSTELLATION_COLOR.to_owned());
        self.constellations.push(Constellation { points, color });
        true
    }

    #[must_use]
    pub fn constellations(&self) -> &[Constellation] {
        &self.constellations
    }

    /// Number of shapes in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the scene holds no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

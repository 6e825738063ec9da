//! Rendering: draws the full sky canvas to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of the scene, camera and options and produces
//! pixels; it does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::sky::SkyCanvas::redraw`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::Camera;
use crate::config::SkyOptions;
use crate::consts::{
    GLOW_MAGNITUDE, GLOW_SCALE, GRID_LINE_WIDTH, GRID_SIZE, MIN_GRID_PITCH, SELECTION_COLOR, SELECTION_DASH_PX,
    SELECTION_LINE_WIDTH_PX, SELECTION_PADDING_PX,
};
use crate::scene::{Constellation, Scene, StarMarker};
use crate::shape::{Geometry, Shape};

/// Constellation line width in world units.
const CONSTELLATION_LINE_WIDTH: f64 = 0.5;

/// Draw the full canvas: background, grid, shapes, then sky markers.
///
/// `width` and `height` are the canvas size in pixels.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    camera: &Camera,
    options: &SkyOptions,
    width: f64,
    height: f64,
) -> Result<(), JsValue> {
    // Layer 1: background and grid in screen space.
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.set_fill_style_str(&options.background_color);
    ctx.fill_rect(0.0, 0.0, width, height);
    if options.show_grid {
        draw_grid(ctx, camera, &options.grid_color, width, height);
    }

    // Layer 2: shapes in insertion order under the camera transform.
    ctx.set_transform(camera.scale, 0.0, 0.0, camera.scale, camera.offset_x, camera.offset_y)?;
    for shape in scene.shapes().iter().filter(|s| s.visible) {
        draw_shape(ctx, shape)?;
        if shape.selected {
            draw_selection(ctx, shape, camera.scale)?;
        }
    }

    // Layer 3: sky overlays.
    for constellation in scene.constellations() {
        draw_constellation(ctx, constellation);
    }
    for marker in scene.markers() {
        draw_star_marker(ctx, marker, &options.star_color)?;
    }

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    Ok(())
}

// =============================================================
// Grid
// =============================================================

/// Screen positions of grid lines along one axis: every `spacing` pixels
/// from `offset mod spacing` up to `extent`. Empty when `spacing` is below
/// [`MIN_GRID_PITCH`] or not finite.
#[must_use]
pub fn grid_lines(offset: f64, spacing: f64, extent: f64) -> Vec<f64> {
    if !spacing.is_finite() || spacing < MIN_GRID_PITCH {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut pos = offset.rem_euclid(spacing);
    while pos < extent {
        lines.push(pos);
        pos += spacing;
    }
    lines
}

fn draw_grid(ctx: &CanvasRenderingContext2d, camera: &Camera, color: &str, width: f64, height: f64) {
    let spacing = GRID_SIZE * camera.scale;
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(GRID_LINE_WIDTH);

    for x in grid_lines(camera.offset_x, spacing, width) {
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, height);
        ctx.stroke();
    }
    for y in grid_lines(camera.offset_y, spacing, height) {
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(width, y);
        ctx.stroke();
    }
}

// =============================================================
// Shapes
// =============================================================

fn draw_shape(ctx: &CanvasRenderingContext2d, shape: &Shape) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str(&shape.style.fill_color);
    ctx.set_stroke_style_str(&shape.style.stroke_color);
    ctx.set_line_width(shape.style.line_width);

    match shape.geometry {
        Geometry::Circle { radius } => {
            ctx.begin_path();
            ctx.arc(shape.x, shape.y, radius, 0.0, TAU)?;
            ctx.fill();
            ctx.stroke();
        }
        Geometry::Rectangle { width, height } => {
            let x = shape.x - width / 2.0;
            let y = shape.y - height / 2.0;
            ctx.fill_rect(x, y, width, height);
            ctx.stroke_rect(x, y, width, height);
        }
        Geometry::Star { .. } => {
            trace_polygon(ctx, &shape.star_vertices());
            ctx.fill();
            ctx.stroke();
        }
        Geometry::Line { x1, y1, x2, y2 } => {
            ctx.begin_path();
            ctx.move_to(x1, y1);
            ctx.line_to(x2, y2);
            ctx.stroke();
        }
    }

    ctx.restore();
    Ok(())
}

fn trace_polygon(ctx: &CanvasRenderingContext2d, vertices: &[crate::camera::Point]) {
    ctx.begin_path();
    for (i, p) in vertices.iter().enumerate() {
        if i == 0 {
            ctx.move_to(p.x, p.y);
        } else {
            ctx.line_to(p.x, p.y);
        }
    }
    ctx.close_path();
}

/// Selection halo metrics in world units for a camera scale, so the halo
/// keeps a constant on-screen size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Halo {
    pub padding: f64,
    pub dash: f64,
    pub line_width: f64,
}

impl Halo {
    #[must_use]
    pub fn at_scale(scale: f64) -> Self {
        Self {
            padding: SELECTION_PADDING_PX / scale,
            dash: SELECTION_DASH_PX / scale,
            line_width: SELECTION_LINE_WIDTH_PX / scale,
        }
    }
}

/// Dashed cyan halo around a selected shape.
fn draw_selection(ctx: &CanvasRenderingContext2d, shape: &Shape, scale: f64) -> Result<(), JsValue> {
    let halo = Halo::at_scale(scale);
    let pad = halo.padding;

    ctx.save();
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(halo.line_width);
    let dash_array = js_sys::Array::new();
    dash_array.push(&halo.dash.into());
    dash_array.push(&halo.dash.into());
    ctx.set_line_dash(&dash_array)?;

    ctx.begin_path();
    match shape.geometry {
        Geometry::Circle { radius } => ctx.arc(shape.x, shape.y, radius + pad, 0.0, TAU)?,
        Geometry::Star { outer_radius, .. } => {
            ctx.arc(shape.x, shape.y, outer_radius + pad, 0.0, TAU)?;
        }
        Geometry::Rectangle { width, height } => ctx.rect(
            shape.x - width / 2.0 - pad,
            shape.y - height / 2.0 - pad,
            width + pad * 2.0,
            height + pad * 2.0,
        ),
        Geometry::Line { x1, y1, x2, y2 } => {
            ctx.move_to(x1, y1);
            ctx.line_to(x2, y2);
        }
    }
    ctx.stroke();

    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

// =============================================================
// Sky overlays
// =============================================================

fn draw_star_marker(ctx: &CanvasRenderingContext2d, marker: &StarMarker, default_color: &str) -> Result<(), JsValue> {
    let (x, y) = (marker.position.x, marker.position.y);
    let radius = marker.radius();

    ctx.save();
    ctx.set_fill_style_str(marker.color.as_deref().unwrap_or(default_color));
    ctx.begin_path();
    ctx.arc(x, y, radius, 0.0, TAU)?;
    ctx.fill();

    if marker.magnitude < GLOW_MAGNITUDE {
        let glow = ctx.create_radial_gradient(x, y, radius, x, y, radius * GLOW_SCALE)?;
        glow.add_color_stop(0.0, "rgba(255, 255, 255, 0.6)")?;
        glow.add_color_stop(1.0, "rgba(255, 255, 255, 0)")?;
        ctx.set_fill_style_canvas_gradient(&glow);
        ctx.begin_path();
        ctx.arc(x, y, radius * GLOW_SCALE, 0.0, TAU)?;
        ctx.fill();
    }

    ctx.restore();
    Ok(())
}

fn draw_constellation(ctx: &CanvasRenderingContext2d, constellation: &Constellation) {
    let Some((first, rest)) = constellation.points.split_first() else {
        return;
    };
    ctx.save();
    ctx.set_stroke_style_str(&constellation.color);
    ctx.set_line_width(CONSTELLATION_LINE_WIDTH);
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    ctx.stroke();
    ctx.restore();
}

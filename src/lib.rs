//! Browser utilities for an astronomy sketching page.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It provides
//! a pan/zoom sky canvas with drawable shapes and catalogue stars, a CSS
//! property tween scheduler with canned effects, color conversions, file and
//! image export, a toolbar widget, and the page bootstrap that wires forms and
//! notifications. Browser-facing types are thin wrappers; the logic behind
//! them lives in plain structs that run in native unit tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`sky`] | Sky canvas and its testable [`sky::SkyCore`] |
//! | [`scene`] | Ordered shape store, star markers and constellations |
//! | [`shape`] | Shape record and geometry variants |
//! | [`camera`] | Pan/zoom transform, coordinate conversions, RA/Dec projection |
//! | [`input`] | Wheel deltas and the drag gesture state |
//! | [`hit`] | Hit-testing against shapes |
//! | [`render`] | Canvas drawing |
//! | [`color`] | Hex / RGB / HSL conversions |
//! | [`style`] | Inline-style seam used by animations |
//! | [`animator`] | Tween scheduler driven by explicit ticks |
//! | [`frame`] | `requestAnimationFrame` loop for an animator |
//! | [`effects`] | Canned tween effects and CSS effect plans |
//! | [`dom`] | Applies CSS effect plans to the document |
//! | [`export`] | JSON and image download |
//! | [`toolbar`] | Toolbar registry and DOM view |
//! | [`notify`] | Transient notifications |
//! | [`page`] | Page bootstrap entry point |
//! | [`config`] | JSON-deserializable option structs |
//! | [`bindings`] | `#[wasm_bindgen]` surface for JavaScript |
//! | [`consts`] | Shared numeric constants |

pub mod animator;
pub mod bindings;
pub mod camera;
pub mod color;
pub mod config;
pub mod consts;
pub mod dom;
pub mod effects;
pub mod export;
pub mod frame;
pub mod hit;
pub mod input;
pub mod notify;
pub mod page;
pub mod render;
pub mod scene;
pub mod shape;
pub mod sky;
pub mod style;
pub mod toolbar;

#[cfg(test)]
mod testing;

//! Shared numeric constants for the sketching crate.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest camera scale; zooming out stops here.
pub const MIN_ZOOM: f64 = 0.01;

/// Largest camera scale; zooming in stops here.
pub const MAX_ZOOM: f64 = 100.0;

/// Zoom factor applied when the wheel scrolls down (zoom out).
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Zoom factor applied when the wheel scrolls up (zoom in).
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Grid spacing in world units; multiplied by the current scale when drawn.
pub const GRID_SIZE: f64 = 50.0;

/// Grid pitch in screen pixels below which the grid is not drawn.
pub const MIN_GRID_PITCH: f64 = 4.0;

/// Grid line width in screen pixels.
pub const GRID_LINE_WIDTH: f64 = 0.5;

// ── Hit-testing ─────────────────────────────────────────────────

/// Perpendicular distance below which a point counts as on a line.
pub const LINE_HIT_TOLERANCE: f64 = 5.0;

// ── Shapes ──────────────────────────────────────────────────────

/// Gap in screen pixels between a selected shape and its dashed halo.
pub const SELECTION_PADDING_PX: f64 = 5.0;

/// Dash and gap length of the selection halo in screen pixels.
pub const SELECTION_DASH_PX: f64 = 5.0;

/// Selection halo line width in screen pixels.
pub const SELECTION_LINE_WIDTH_PX: f64 = 1.0;

/// Selection halo color.
pub const SELECTION_COLOR: &str = "rgba(0, 255, 255, 1)";

/// Default number of points on a star shape.
pub const STAR_DEFAULT_POINTS: u32 = 5;

/// Upper bound on the number of points of a star shape.
pub const STAR_MAX_POINTS: u32 = 1000;

/// Inner-to-outer radius ratio used when a star has no inner radius.
pub const STAR_INNER_RATIO: f64 = 0.5;

// ── Sky markers ─────────────────────────────────────────────────

/// Magnitude below which a star marker gets a glow.
pub const GLOW_MAGNITUDE: f64 = 2.0;

/// Glow radius as a multiple of the marker radius.
pub const GLOW_SCALE: f64 = 3.0;

/// Default constellation line color.
pub const CONSTELLATION_COLOR: &str = "#AAAAAA";

// ── Timing (milliseconds) ───────────────────────────────────────

/// Default tween duration.
pub const DEFAULT_DURATION_MS: f64 = 1000.0;

/// Delay before a transition fade-in flips opacity, so the transition applies.
pub const TRANSITION_KICK_MS: u32 = 10;

/// Delay before a download's object URL is revoked.
pub const DOWNLOAD_CLEANUP_MS: u32 = 100;

/// How long a notification stays fully visible.
pub const NOTIFICATION_VISIBLE_MS: u32 = 5000;

/// How long a notification's fade-out lasts before removal.
pub const NOTIFICATION_FADE_MS: u32 = 500;

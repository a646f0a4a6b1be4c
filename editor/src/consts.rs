//! Shared constants for the editor crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Canvas width used when the host does not configure one.
pub const DEFAULT_CANVAS_WIDTH: f64 = 500.0;

/// Canvas height used when the host does not configure one.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 500.0;

// ── Rendering ───────────────────────────────────────────────────

/// Radius of a rendered control dot, in canvas units.
pub const DOT_RADIUS: f64 = 3.0;

/// Prefix prepended to every rendered element id.
pub const ELEMENT_ID_PREFIX: &str = "svgeditor--";

// ── Construction ────────────────────────────────────────────────

/// Dot count that completes a two-point shape (rectangle, circle).
pub const TWO_POINT_DOTS: usize = 2;

/// Fewest dots a polygon can be derived from.
pub const POLYGON_MIN_DOTS: usize = 2;

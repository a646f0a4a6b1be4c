//! Coordinates, derived shape geometry, and the dots-to-geometry derivation.
//!
//! [`derive`] is a pure function of a [`ShapeKind`] and an ordered slice of
//! dots. It never fails: a dot count the kind cannot use yields `None`, which
//! the engine treats as "shape not yet complete".

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::doc::ShapeKind;

/// A canvas-local position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Coordinate) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Concrete geometry of a shape. Each variant carries only its own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    /// Axis-aligned rectangle; `(x, y)` is the top-left corner.
    Rect { x: f64, y: f64, width: f64, height: f64 },
    /// Circle centered at `(x, y)`.
    Circle { x: f64, y: f64, r: f64 },
    /// Closed polygon through `points`, in order.
    #[serde(rename = "poly")]
    Polygon { points: Vec<Coordinate> },
}

impl Geometry {
    /// The shape kind this geometry belongs to.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rect { .. } => ShapeKind::Rect,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Polygon { .. } => ShapeKind::Polygon,
        }
    }
}

/// Derive geometry for `kind` from `dots`.
///
/// Returns `None` when the dot count does not satisfy the kind:
/// rectangles and circles need exactly two dots, polygons at least two.
#[must_use]
pub fn derive(kind: ShapeKind, dots: &[Coordinate]) -> Option<Geometry> {
    if !kind.accepts(dots.len()) {
        return None;
    }

    match (kind, dots) {
        (ShapeKind::Rect, [a, b]) => Some(Geometry::Rect {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }),
        (ShapeKind::Circle, [center, rim]) => Some(Geometry::Circle {
            x: center.x,
            y: center.y,
            r: center.distance_to(*rim),
        }),
        (ShapeKind::Polygon, points) => Some(Geometry::Polygon { points: points.to_vec() }),
        _ => None,
    }
}

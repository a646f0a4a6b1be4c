//! Document model: shape kinds, shapes, and the two in-memory stores.
//!
//! This module defines what is on the canvas (`ShapeKind`, `Shape`) and the
//! runtime stores that own it: `DotsStore` holds the control points of the
//! shape currently being drawn or edited, `ShapesStore` holds every committed
//! shape. Both wrap [`KeyedCollection`], so keys are stable and never reused.
//!
//! Every mutation that targets a key tolerates the key being gone. Events can
//! arrive after the entry they name was removed (a drag release after a
//! deselect, for example) and those must be silent no-ops, not failures.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{POLYGON_MIN_DOTS, TWO_POINT_DOTS};
use crate::geometry::{Coordinate, Geometry};
use crate::keyed::{Key, KeyedCollection};

/// The kind of shape being authored or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Axis-aligned rectangle spanned by two opposite corners.
    #[default]
    #[serde(rename = "rect")]
    Rect,
    /// Circle given by its center and one point on its rim.
    #[serde(rename = "circle")]
    Circle,
    /// Polygon through every dot, in placement order.
    #[serde(rename = "poly")]
    Polygon,
}

impl ShapeKind {
    /// Every kind, in toolbar order.
    pub const ALL: [ShapeKind; 3] = [Self::Rect, Self::Circle, Self::Polygon];

    /// Fewest dots this kind can be derived from.
    #[must_use]
    pub fn min_dots(self) -> usize {
        match self {
            Self::Rect | Self::Circle => TWO_POINT_DOTS,
            Self::Polygon => POLYGON_MIN_DOTS,
        }
    }

    /// Most dots this kind can use, or `None` when unbounded.
    #[must_use]
    pub fn max_dots(self) -> Option<usize> {
        match self {
            Self::Rect | Self::Circle => Some(TWO_POINT_DOTS),
            Self::Polygon => None,
        }
    }

    /// Whether `count` dots are enough (and not too many) to derive this kind.
    #[must_use]
    pub fn accepts(self, count: usize) -> bool {
        count >= self.min_dots() && self.max_dots().is_none_or(|max| count <= max)
    }

    /// Whether a shape of this kind with `count` dots can take another one.
    #[must_use]
    pub fn has_room_for_dot(self, count: usize) -> bool {
        self.max_dots().is_none_or(|max| count < max)
    }

    /// The vocabulary name used in element ids and the host UI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Polygon => "poly",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not in the shape-kind vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape kind: {0:?}")]
pub struct ParseKindError(pub String);

impl FromStr for ShapeKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKindError(s.to_owned()))
    }
}

/// A committed shape: its derived geometry plus the dots that produced it.
///
/// The dot snapshot re-populates the dot store when the shape is selected
/// for editing again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub geometry: Geometry,
    pub dots: Vec<Coordinate>,
}

impl Shape {
    #[must_use]
    pub fn new(geometry: Geometry, dots: Vec<Coordinate>) -> Self {
        Self { geometry, dots }
    }

    /// The kind of this shape, read off its geometry.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }
}

/// Control points of the shape currently being drawn or edited.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DotsStore {
    dots: KeyedCollection<Coordinate>,
}

impl DotsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new dot and return its key.
    pub fn add(&mut self, coord: Coordinate) -> Key {
        self.dots.insert_next(coord)
    }

    /// Move an existing dot. A missing key is a no-op and returns `false`,
    /// so a late drag event cannot resurrect a removed dot.
    pub fn move_dot(&mut self, key: Key, coord: Coordinate) -> bool {
        self.dots.set(key, coord)
    }

    /// Remove a dot. Returns `false` if it was already gone.
    pub fn remove(&mut self, key: Key) -> bool {
        self.dots.delete(key).is_some()
    }

    /// Drop every dot and restart keys at zero.
    pub fn reset(&mut self) {
        self.dots.replace_all(Vec::new());
    }

    /// Replace the dots with `coords`, keyed `0..` in order.
    pub fn load(&mut self, coords: &[Coordinate]) {
        self.dots.replace_all(coords.iter().copied());
    }

    /// Look up a dot by key.
    #[must_use]
    pub fn get(&self, key: Key) -> Option<Coordinate> {
        self.dots.get(key).copied()
    }

    /// Iterate `(key, coordinate)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, Coordinate)> + '_ {
        self.dots.iter().map(|(key, coord)| (key, *coord))
    }

    /// Ordered snapshot of the dot coordinates.
    #[must_use]
    pub fn coords(&self) -> Vec<Coordinate> {
        self.dots.to_vec()
    }

    /// Number of dots currently placed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dots.len()
    }

    /// Returns `true` if no dots are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }
}

/// Every committed shape, keyed by a stable integer.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ShapesStore {
    shapes: KeyedCollection<Shape>,
}

impl ShapesStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new shape and return its key.
    pub fn add(&mut self, shape: Shape) -> Key {
        self.shapes.insert_next(shape)
    }

    /// Replace the shape under `key`. Returns `false` if no such shape exists.
    pub fn change(&mut self, key: Key, shape: Shape) -> bool {
        self.shapes.set(key, shape)
    }

    /// Remove a shape, returning it if it was present.
    pub fn remove(&mut self, key: Key) -> Option<Shape> {
        self.shapes.delete(key)
    }

    /// Look up a shape by key.
    #[must_use]
    pub fn get(&self, key: Key) -> Option<&Shape> {
        self.shapes.get(key)
    }

    /// Iterate `(key, shape)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, &Shape)> + '_ {
        self.shapes.iter()
    }

    /// Number of shapes stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if no shapes are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

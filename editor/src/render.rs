//! Scene list: what the presentation layer draws, in draw order.
//!
//! Drawing itself belongs to the host. This module only flattens the editor
//! state into [`SceneItem`]s: committed shapes first, the active shape last
//! among them so it sits on top, then the control dots above everything.
//! It reads state and never mutates it.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::consts::DOT_RADIUS;
use crate::doc::Shape;
use crate::engine::EditorState;
use crate::geometry::Geometry;
use crate::ident::{ElementId, ElementKind};
use crate::keyed::Key;

/// What to draw for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Primitive {
    /// A committed shape's derived geometry.
    Shape(Geometry),
    /// A control dot.
    Dot { x: f64, y: f64, r: f64 },
}

/// One drawable element and the flags the host styles it by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneItem {
    /// Element id to attach, so pointer events can be routed back.
    pub id: ElementId,
    pub key: Key,
    pub kind: ElementKind,
    pub primitive: Primitive,
    /// The shape being edited. Always false for dots.
    pub active: bool,
    /// Whether clicking the element selects it. Shapes are only selectable
    /// while nothing else is selected; dots are always interactive.
    pub selectable: bool,
}

/// Build the draw-ordered scene for `state`.
#[must_use]
pub fn scene(state: &EditorState) -> Vec<SceneItem> {
    let active_key = state.active_shape().key();
    let selectable = active_key.is_none();

    let mut items: Vec<SceneItem> = state
        .shapes()
        .iter()
        .filter(|(key, _)| Some(*key) != active_key)
        .map(|(key, shape)| shape_item(key, shape, false, selectable))
        .collect();

    if let Some(key) = active_key {
        if let Some(shape) = state.shapes().get(key) {
            items.push(shape_item(key, shape, true, false));
        }
    }

    items.extend(state.dots().iter().map(|(key, coord)| SceneItem {
        id: ElementId::dot(key),
        key,
        kind: ElementKind::Dot,
        primitive: Primitive::Dot { x: coord.x, y: coord.y, r: DOT_RADIUS },
        active: false,
        selectable: true,
    }));

    items
}

fn shape_item(key: Key, shape: &Shape, active: bool, selectable: bool) -> SceneItem {
    let id = ElementId::shape(shape.kind(), key);
    SceneItem {
        id,
        key,
        kind: id.kind,
        primitive: Primitive::Shape(shape.geometry.clone()),
        active,
        selectable,
    }
}

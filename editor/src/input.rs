//! Input model: pointer payloads, host events, and the two selection machines.
//!
//! `PointerEvent` and `HostEvent` describe what the host surface delivers.
//! `ShapeSelection` tracks which shape kind is being authored and, when an
//! existing shape is being edited, its key. `DotGesture` tracks the dot being
//! dragged between pointer-down and pointer-up.
//!
//! Both machines are plain `Copy` values with a pure `transition` function.
//! They know nothing about the stores; [`crate::engine::EditorCore`] applies
//! the store side effects in the same handler that publishes the new state.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::ShapeKind;
use crate::geometry::Coordinate;
use crate::keyed::Key;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Right mouse button (or two-finger tap); opens the context menu.
    Secondary,
}

/// A pointer event in canvas-local coordinates.
///
/// Translation from screen space is the host's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub button: Button,
}

impl PointerEvent {
    #[must_use]
    pub fn new(x: f64, y: f64, button: Button) -> Self {
        Self { x, y, button }
    }

    /// The event position as a coordinate.
    #[must_use]
    pub fn coord(self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

/// Pointer gesture delivered on a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementGesture {
    PointerDown,
    PointerUp,
    Click,
    ContextMenu,
}

/// Every event the host can deliver, in one routable enum.
///
/// This is also the line format of scripted sessions, tagged by `"event"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// Click on the bare canvas.
    CanvasClick(PointerEvent),
    /// Pointer moved over the canvas.
    PointerMove { x: f64, y: f64 },
    /// Context menu requested on the bare canvas.
    ContextMenu,
    /// Pointer pressed on a dot.
    DotPointerDown { key: Key },
    /// Pointer released on a dot.
    DotPointerUp { key: Key },
    /// Context menu requested on a dot.
    DotContextMenu { key: Key },
    /// Click on a shape.
    ShapeClick { key: Key },
    /// A gesture addressed by rendered element id (`svgeditor--rect-3`).
    Element { id: String, gesture: ElementGesture },
    /// The kind selector changed.
    ChooseKind { kind: ShapeKind },
    /// The "remove selected" command.
    RemoveActiveShape,
}

// =============================================================
// Active shape
// =============================================================

/// Which shape is being authored or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ShapeSelection {
    /// Authoring a new shape of `kind`; nothing committed is selected.
    Unselected { kind: ShapeKind },
    /// Editing the committed shape `key`, which has kind `kind`.
    Selected { key: Key, kind: ShapeKind },
}

/// Inputs to [`ShapeSelection::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeSelectionEvent {
    /// The user picked a kind; any selection is dropped.
    ChooseKind(ShapeKind),
    /// The user picked an existing shape.
    Select { key: Key, kind: ShapeKind },
    /// The shape being authored was just stored under `key`.
    Committed(Key),
    /// The active shape was deselected or removed.
    Deselect,
}

impl Default for ShapeSelection {
    fn default() -> Self {
        Self::Unselected { kind: ShapeKind::default() }
    }
}

impl ShapeSelection {
    /// Apply one event and return the next state.
    ///
    /// `Select` and `Committed` only fire from `Unselected`; from `Selected`
    /// they leave the state unchanged.
    #[must_use]
    pub fn transition(self, event: ShapeSelectionEvent) -> Self {
        match (self, event) {
            (_, ShapeSelectionEvent::ChooseKind(kind)) => Self::Unselected { kind },
            (Self::Unselected { .. }, ShapeSelectionEvent::Select { key, kind }) => Self::Selected { key, kind },
            (Self::Unselected { kind }, ShapeSelectionEvent::Committed(key)) => Self::Selected { key, kind },
            (state, ShapeSelectionEvent::Deselect) => Self::Unselected { kind: state.kind() },
            (state @ Self::Selected { .. }, ShapeSelectionEvent::Select { .. } | ShapeSelectionEvent::Committed(_)) => {
                state
            }
        }
    }

    /// The kind being authored or edited.
    #[must_use]
    pub fn kind(self) -> ShapeKind {
        match self {
            Self::Unselected { kind } | Self::Selected { kind, .. } => kind,
        }
    }

    /// The key of the selected shape, if any.
    #[must_use]
    pub fn key(self) -> Option<Key> {
        match self {
            Self::Unselected { .. } => None,
            Self::Selected { key, .. } => Some(key),
        }
    }

    /// Returns `true` while an existing shape is selected.
    #[must_use]
    pub fn is_selected(self) -> bool {
        matches!(self, Self::Selected { .. })
    }
}

// =============================================================
// Active dot
// =============================================================

/// The drag gesture on a dot, tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DotGesture {
    /// No drag in progress.
    #[default]
    Idle,
    /// The dot `key` is held down. `moved` turns true on the first pointer move,
    /// which is what separates a drag from a click.
    Dragging { key: Key, moved: bool },
}

/// Inputs to [`DotGesture::transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotGestureEvent {
    /// Pointer pressed on dot `key`.
    Begin(Key),
    /// Pointer moved while a dot is held.
    Track,
    /// Pointer released on the held dot.
    End,
    /// The held dot went away; drop the gesture.
    Cancel,
}

impl DotGesture {
    /// Apply one event and return the next state.
    ///
    /// A second `Begin` while dragging is ignored, as is `Track` while idle.
    #[must_use]
    pub fn transition(self, event: DotGestureEvent) -> Self {
        match (self, event) {
            (Self::Idle, DotGestureEvent::Begin(key)) => Self::Dragging { key, moved: false },
            (Self::Dragging { key, .. }, DotGestureEvent::Track) => Self::Dragging { key, moved: true },
            (_, DotGestureEvent::End | DotGestureEvent::Cancel) => Self::Idle,
            (state, DotGestureEvent::Begin(_) | DotGestureEvent::Track) => state,
        }
    }

    /// The key of the dot being dragged, if any.
    #[must_use]
    pub fn dragged_key(self) -> Option<Key> {
        match self {
            Self::Idle => None,
            Self::Dragging { key, .. } => Some(key),
        }
    }

    /// Returns `true` while a dot is held.
    #[must_use]
    pub fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

//! Interaction engine: applies host events to the editor state.
//!
//! DESIGN
//! ======
//! `EditorCore` exclusively owns one [`EditorState`] aggregate: the dot store,
//! the shape store, and the two selection machines. Every host event maps to
//! one `&mut self` handler that runs to completion, so no event ever observes
//! a half-applied transition.
//!
//! Whenever a handler changes the dot store it finishes by calling
//! `sync_active_shape`, which re-derives the active shape's geometry from the
//! dots and writes, creates, or removes the matching shape entry.
//!
//! Handlers return the [`Action`]s the host must carry out: stopping event
//! propagation, suppressing the default context menu, and re-rendering.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::doc::{DotsStore, Shape, ShapeKind, ShapesStore};
use crate::geometry::{Coordinate, derive};
use crate::ident::{ElementId, ElementKind, IdentError};
use crate::input::{
    Button, DotGesture, DotGestureEvent, ElementGesture, HostEvent, PointerEvent, ShapeSelection, ShapeSelectionEvent,
};
use crate::keyed::Key;
use crate::render::{self, SceneItem};

/// Actions returned from event handlers for the host to carry out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Do not let the event reach the canvas underneath.
    StopPropagation,
    /// Suppress the host's default handling (the browser context menu).
    PreventDefault,
    /// A shape was committed for the first time.
    ShapeCreated { key: Key, shape: Shape },
    /// A committed shape's geometry or dots changed.
    ShapeUpdated { key: Key, shape: Shape },
    /// A committed shape was removed.
    ShapeDeleted { key: Key },
    /// Visible state changed; redraw.
    RenderNeeded,
}

/// Canvas dimensions, in canvas-local units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: DEFAULT_CANVAS_WIDTH, height: DEFAULT_CANVAS_HEIGHT }
    }
}

/// Everything the editor knows, in one place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditorState {
    dots: DotsStore,
    shapes: ShapesStore,
    active_shape: ShapeSelection,
    active_dot: DotGesture,
}

impl EditorState {
    /// Control points of the active shape.
    #[must_use]
    pub fn dots(&self) -> &DotsStore {
        &self.dots
    }

    /// Every committed shape.
    #[must_use]
    pub fn shapes(&self) -> &ShapesStore {
        &self.shapes
    }

    /// The shape being authored or edited.
    #[must_use]
    pub fn active_shape(&self) -> ShapeSelection {
        self.active_shape
    }

    /// The dot being dragged, if any.
    #[must_use]
    pub fn active_dot(&self) -> DotGesture {
        self.active_dot
    }
}

/// The editor's interaction controller.
#[derive(Debug, Clone, Default)]
pub struct EditorCore {
    state: EditorState,
    config: CanvasConfig,
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: CanvasConfig) -> Self {
        Self { state: EditorState::default(), config }
    }

    // --- Canvas events ---

    /// Click on the bare canvas. A primary click places a dot; a secondary
    /// click behaves like [`Self::on_context_menu`].
    pub fn on_canvas_click(&mut self, event: PointerEvent) -> Vec<Action> {
        if event.button == Button::Secondary {
            return self.on_context_menu();
        }

        if self.state.active_dot.is_dragging() {
            trace!("canvas click ignored during dot drag");
            return Vec::new();
        }

        let kind = self.state.active_shape.kind();
        if !kind.has_room_for_dot(self.state.dots.len()) {
            trace!(%kind, "canvas click ignored; dot cap reached");
            return Vec::new();
        }

        let key = self.state.dots.add(event.coord());
        debug!(key, x = event.x, y = event.y, "dot added");

        let mut actions = Vec::new();
        self.sync_active_shape(&mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Pointer moved over the canvas. Moves the dragged dot, if any.
    pub fn on_pointer_move(&mut self, pt: Coordinate) -> Vec<Action> {
        let Some(key) = self.state.active_dot.dragged_key() else {
            return Vec::new();
        };

        if !self.state.dots.move_dot(key, pt) {
            debug!(key, "dragged dot is gone; cancelling drag");
            self.state.active_dot = self.state.active_dot.transition(DotGestureEvent::Cancel);
            return Vec::new();
        }
        self.state.active_dot = self.state.active_dot.transition(DotGestureEvent::Track);

        let mut actions = Vec::new();
        self.sync_active_shape(&mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Context menu on the bare canvas: deselect the active shape.
    ///
    /// The default menu is always suppressed.
    pub fn on_context_menu(&mut self) -> Vec<Action> {
        let mut actions = vec![Action::PreventDefault];

        let ShapeSelection::Selected { key, .. } = self.state.active_shape else {
            return actions;
        };

        self.state.active_shape = self.state.active_shape.transition(ShapeSelectionEvent::Deselect);
        self.reset_dots();
        debug!(key, "shape deselected");

        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Dot events ---

    /// Pointer pressed on a dot: start dragging it.
    pub fn on_dot_pointer_down(&mut self, key: Key) -> Vec<Action> {
        let actions = vec![Action::StopPropagation];

        if self.state.dots.get(key).is_none() {
            trace!(key, "pointer-down on unknown dot");
            return actions;
        }

        let next = self.state.active_dot.transition(DotGestureEvent::Begin(key));
        if next != self.state.active_dot {
            debug!(key, "dot drag started");
            self.state.active_dot = next;
        }
        actions
    }

    /// Pointer released on a dot: finish the drag. A dot that never moved was
    /// clicked, and a click removes it.
    pub fn on_dot_pointer_up(&mut self, key: Key) -> Vec<Action> {
        let mut actions = vec![Action::StopPropagation];

        let DotGesture::Dragging { key: dragged, moved } = self.state.active_dot else {
            return actions;
        };
        if dragged != key {
            trace!(key, dragged, "pointer-up on a different dot");
            return actions;
        }

        self.state.active_dot = self.state.active_dot.transition(DotGestureEvent::End);
        if moved {
            debug!(key, "dot drag finished");
            return actions;
        }

        if self.state.dots.remove(key) {
            debug!(key, "dot removed by click");
            self.sync_active_shape(&mut actions);
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Context menu on a dot: remove it immediately.
    pub fn on_dot_context_menu(&mut self, key: Key) -> Vec<Action> {
        let mut actions = vec![Action::PreventDefault, Action::StopPropagation];

        if !self.state.dots.remove(key) {
            return actions;
        }
        debug!(key, "dot removed by context menu");

        if self.state.active_dot.dragged_key() == Some(key) {
            self.state.active_dot = self.state.active_dot.transition(DotGestureEvent::Cancel);
        }

        self.sync_active_shape(&mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Shape events ---

    /// Click on a committed shape: select it for editing.
    ///
    /// While another shape is selected the click is not consumed, so the host
    /// lets it fall through to the canvas and it places a dot there.
    pub fn on_shape_click(&mut self, key: Key) -> Vec<Action> {
        if self.state.active_shape.is_selected() {
            return Vec::new();
        }

        let mut actions = vec![Action::StopPropagation];
        if self.state.active_dot.is_dragging() {
            trace!(key, "shape click ignored during dot drag");
            return actions;
        }

        let Some(shape) = self.state.shapes.get(key) else {
            trace!(key, "click on unknown shape");
            return actions;
        };
        let kind = shape.kind();
        let dots = shape.dots.clone();

        self.state.active_shape = self.state.active_shape.transition(ShapeSelectionEvent::Select { key, kind });
        self.load_dots(&dots);
        debug!(key, %kind, "shape selected");

        self.sync_active_shape(&mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Commands ---

    /// Switch the kind being authored. Discards any selected shape and
    /// clears the dots.
    pub fn choose_kind(&mut self, kind: ShapeKind) -> Vec<Action> {
        let mut actions = Vec::new();

        if let Some(key) = self.state.active_shape.key() {
            if self.state.shapes.remove(key).is_some() {
                debug!(key, "selected shape discarded by kind change");
                actions.push(Action::ShapeDeleted { key });
            }
        }

        self.state.active_shape = self.state.active_shape.transition(ShapeSelectionEvent::ChooseKind(kind));
        self.reset_dots();
        debug!(%kind, "shape kind chosen");

        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove the selected shape and its dots.
    pub fn remove_active_shape(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if !self.state.active_shape.is_selected() {
            return actions;
        }

        self.remove_active(true, &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Routing ---

    /// Route any host event to its handler.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentError`] if an element-addressed event carries an id
    /// that does not parse.
    pub fn dispatch(&mut self, event: HostEvent) -> Result<Vec<Action>, IdentError> {
        let actions = match event {
            HostEvent::CanvasClick(pointer) => self.on_canvas_click(pointer),
            HostEvent::PointerMove { x, y } => self.on_pointer_move(Coordinate::new(x, y)),
            HostEvent::ContextMenu => self.on_context_menu(),
            HostEvent::DotPointerDown { key } => self.on_dot_pointer_down(key),
            HostEvent::DotPointerUp { key } => self.on_dot_pointer_up(key),
            HostEvent::DotContextMenu { key } => self.on_dot_context_menu(key),
            HostEvent::ShapeClick { key } => self.on_shape_click(key),
            HostEvent::Element { id, gesture } => self.on_element(id.parse()?, gesture),
            HostEvent::ChooseKind { kind } => self.choose_kind(kind),
            HostEvent::RemoveActiveShape => self.remove_active_shape(),
        };
        Ok(actions)
    }

    fn on_element(&mut self, id: ElementId, gesture: ElementGesture) -> Vec<Action> {
        match (id.kind, gesture) {
            (ElementKind::Dot, ElementGesture::PointerDown) => self.on_dot_pointer_down(id.key),
            (ElementKind::Dot, ElementGesture::PointerUp) => self.on_dot_pointer_up(id.key),
            (ElementKind::Dot, ElementGesture::ContextMenu) => self.on_dot_context_menu(id.key),
            (ElementKind::Dot, ElementGesture::Click) => vec![Action::StopPropagation],
            (ElementKind::Shape(_), ElementGesture::PointerDown | ElementGesture::Click) => self.on_shape_click(id.key),
            (ElementKind::Shape(_), ElementGesture::ContextMenu) => self.on_context_menu(),
            (ElementKind::Shape(_), ElementGesture::PointerUp) => Vec::new(),
        }
    }

    // --- Queries ---

    /// The full editor state.
    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Control points of the active shape.
    #[must_use]
    pub fn dots(&self) -> &DotsStore {
        &self.state.dots
    }

    /// Every committed shape.
    #[must_use]
    pub fn shapes(&self) -> &ShapesStore {
        &self.state.shapes
    }

    /// The shape being authored or edited.
    #[must_use]
    pub fn active_shape(&self) -> ShapeSelection {
        self.state.active_shape
    }

    /// The dot being dragged, if any.
    #[must_use]
    pub fn active_dot(&self) -> DotGesture {
        self.state.active_dot
    }

    /// Canvas dimensions.
    #[must_use]
    pub fn config(&self) -> CanvasConfig {
        self.config
    }

    /// The ordered list of elements the presentation layer should draw.
    #[must_use]
    pub fn scene(&self) -> Vec<SceneItem> {
        render::scene(&self.state)
    }

    // --- Internals ---

    /// Re-derive the active shape from the current dots and store the result.
    fn sync_active_shape(&mut self, actions: &mut Vec<Action>) {
        let kind = self.state.active_shape.kind();
        let coords = self.state.dots.coords();

        let Some(geometry) = derive(kind, &coords) else {
            self.remove_active(false, actions);
            return;
        };
        let shape = Shape::new(geometry, coords);

        match self.state.active_shape.key() {
            Some(key) => {
                if self.state.shapes.get(key) == Some(&shape) {
                    return;
                }
                if self.state.shapes.change(key, shape.clone()) {
                    debug!(key, %kind, "shape updated");
                    actions.push(Action::ShapeUpdated { key, shape });
                } else {
                    trace!(key, "selected shape missing from store");
                }
            }
            None => {
                let key = self.state.shapes.add(shape.clone());
                self.state.active_shape = self.state.active_shape.transition(ShapeSelectionEvent::Committed(key));
                debug!(key, %kind, "shape committed");
                actions.push(Action::ShapeCreated { key, shape });
            }
        }
    }

    /// Drop the selected shape from the store and return to authoring its kind.
    fn remove_active(&mut self, drop_dots: bool, actions: &mut Vec<Action>) {
        if let Some(key) = self.state.active_shape.key() {
            if self.state.shapes.remove(key).is_some() {
                debug!(key, "shape removed");
                actions.push(Action::ShapeDeleted { key });
            }
            self.state.active_shape = self.state.active_shape.transition(ShapeSelectionEvent::Deselect);
        }

        if drop_dots {
            self.reset_dots();
        }
    }

    /// Clear the dots. Keys restart at zero, so a held dot must be let go.
    fn reset_dots(&mut self) {
        self.state.dots.reset();
        self.state.active_dot = self.state.active_dot.transition(DotGestureEvent::Cancel);
    }

    /// Replace the dots with a shape's snapshot. Keys restart at zero, so a
    /// held dot must be let go.
    fn load_dots(&mut self, coords: &[Coordinate]) {
        self.state.dots.load(coords);
        self.state.active_dot = self.state.active_dot.transition(DotGestureEvent::Cancel);
    }
}

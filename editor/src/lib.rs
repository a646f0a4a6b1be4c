//! Interaction core for the dot-driven vector shape editor.
//!
//! The user places control points ("dots") on a canvas; this crate derives
//! rectangle, circle, or polygon geometry from them, keeps the resulting shapes
//! in an in-memory store, and lets the user re-select, re-edit, retype, or
//! delete any shape. The host surface is responsible only for translating DOM
//! (or other windowing) input into canvas-local [`input::PointerEvent`]s,
//! forwarding them to [`engine::EditorCore`], and drawing the
//! [`render::SceneItem`]s it gets back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EditorCore`]: event contract and the [`engine::EditorState`] aggregate |
//! | [`doc`] | Shape kinds, shapes, and the dot and shape stores |
//! | [`keyed`] | Ordered collection with monotonic integer keys |
//! | [`geometry`] | Coordinates, shape geometry, and derivation from dots |
//! | [`input`] | Pointer payloads, host events, and the two selection state machines |
//! | [`ident`] | Element id convention used to route events back to keys |
//! | [`render`] | Scene list handed to the presentation layer |
//! | [`consts`] | Shared constants (default canvas size, dot radius, id prefix) |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod ident;
pub mod input;
pub mod keyed;
pub mod render;

//! Interactive editing of capsule primitives.
//!
//! Every redraw tick the [`CapsuleEditor`] regenerates the capsule's vertices,
//! draws its wireframe, renders three handles (radius, top, bottom) through the
//! host, and, when a handle moved, records one undo-unit and writes the new
//! parameters back into the [`capsule_types::ShapeInstance`].
//!
//! The host supplies the drawing, handle and undo primitives through the
//! [`OutlineRenderer`], [`HandleHost`] and [`UndoRecorder`] traits.

pub mod arena;
pub mod color;
pub mod config;
pub mod controller;
pub mod facing;
pub mod handles;
pub mod outline;
pub mod registry;
pub mod undo;

pub use arena::{EditorArena, EditorKey};
pub use color::{color_for_state, Rgba};
pub use config::{EditorConfig, HandlePalette, OutlineThickness};
pub use controller::{
    apply_handle_edit, CapsuleEditor, CommitRecord, EditState, HandleSnapshot, SceneContext,
    TickOutcome,
};
pub use facing::{is_surface_back_faced, ViewState};
pub use handles::{HandleHost, HandleId, HandleRegistry, HandleRole};
pub use outline::{draw_outline, DepthMode, LineStyle, OutlineRenderer};
pub use registry::ShapeEditor;
pub use undo::{EditCommand, UndoRecorder, UndoStack};

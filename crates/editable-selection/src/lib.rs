//! Selection and operational consistency for editable documents.
//!
//! The crate keeps a list of selection ranges in step with a document tree:
//! - [`models`]: node keys, the [`DocumentModel`] trait, the op log and an
//!   in-memory document
//! - [`editing`]: ranges, the [`Selection`] controller, pointer and input
//!   handling, and the [`Editor`] that ties a document to its selection
//! - [`visual`]: projection of ranges onto rectangles, frame scheduling and
//!   floating surface placement
//! - [`events`]: the publish/subscribe plumbing shared by all of the above

pub mod editing;
pub mod events;
pub mod models;
pub mod visual;

#[cfg(test)]
pub mod tests;

pub use editing::{
    Edit, Editor, EditorError, FocusState, InputEvent, KeyInput, PointerInput, PointerPhase,
    Position, Range, Selection, SelectionError, SelectionEvent, SelectionEventKind,
};
pub use events::{Emitter, SubscriptionId, Tagged};
pub use models::{DocumentModel, MemoryDocument, ModelError, NodeKey, NodeRef, Op, Update};
pub use visual::{
    ClientRects, DrawPlan, DrawRect, GridLayout, InlineAnchor, Rect, RestoreRegistry,
    SelectionLayer, VisualProjector,
};

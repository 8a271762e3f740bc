//! Turning the range list into pixels-to-be: rect types, the per-frame
//! projector, and helpers for surfaces that follow the selection.

pub mod grid;
pub mod inline_anchor;
pub mod projector;
pub mod rect;
pub mod restore;
pub mod scheduler;

pub use grid::GridLayout;
pub use inline_anchor::{AnchorPoint, InlineAnchor, Side};
pub use projector::{DrawPlan, VisualProjector};
pub use rect::{ClientRects, DrawRect, Rect, SelectionLayer};
pub use restore::RestoreRegistry;
pub use scheduler::FrameScheduler;

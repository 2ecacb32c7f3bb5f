//! Drag-and-drop interpretation: from a completed gesture to a reorder plan.

pub mod drag;
pub mod interpret;
pub mod plan;

pub use drag::{DragKind, DragLocation, DragResult};
pub use interpret::{interpret, Interpretation};
pub use plan::ReorderPlan;

//! # Taskboard Core
//!
//! Drag-and-drop reordering engine for kanban boards.
//!
//! A completed drag is interpreted against the current board snapshot into a
//! [`ReorderPlan`], applied optimistically to the [`BoardStore`], and then
//! persisted through a [`Storage`] implementation by the [`Reconciler`].
//! [`BoardSession`] wires these steps together for one open board.

pub mod config;
pub mod dnd;
pub mod domain;
pub mod error;
pub mod reconcile;
pub mod session;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::EngineConfig;
pub use dnd::{interpret, DragKind, DragLocation, DragResult, Interpretation, ReorderPlan};
pub use domain::{
    Board, BoardId, List, ListId, OrderToken, OrderedCollection, Snapshot, Task, TaskId,
};
pub use error::{BoardError, PersistError, Result};
pub use reconcile::{Ack, Reconciler};
pub use session::{BoardSession, DragOutcome, StagedMove};
pub use storage::{FileStorage, Storage};
pub use store::BoardStore;

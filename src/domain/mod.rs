pub mod board;
pub(crate) mod id;
pub mod list;
pub mod order;
pub mod snapshot;
pub mod task;

pub use board::{Board, BoardId};
pub use list::{List, ListId};
pub use order::{OrderToken, OrderedCollection};
pub use snapshot::Snapshot;
pub use task::{Task, TaskId};

use crate::{
    domain::{BoardId, ListId, OrderToken, OrderedCollection, Snapshot},
    error::Result,
};
use async_trait::async_trait;

pub mod file_storage;

pub use file_storage::FileStorage;

/// Store of record for board snapshots and their orders
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Checks if the storage has been initialized
    async fn is_initialized(&self) -> bool;

    /// Fetches the authoritative snapshot of a board
    async fn load_snapshot(&self, board_id: &BoardId) -> Result<Snapshot>;

    /// Saves a whole snapshot (board, lists and tasks)
    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()>;

    /// Persists the horizontal order of a board's lists
    async fn persist_list_order(
        &self,
        board_id: &BoardId,
        order: &OrderedCollection<ListId>,
    ) -> Result<()>;

    /// Persists a list as a full resource: its task order and its name
    async fn persist_list_task_order(
        &self,
        list_id: &ListId,
        order: &OrderToken,
        name: &str,
    ) -> Result<()>;
}

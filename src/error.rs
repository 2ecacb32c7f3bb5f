use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("List not found: {0}")]
    ListNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Task {task} is not in list {list}")]
    TaskNotInList { task: String, list: String },

    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Board not loaded")]
    BoardNotLoaded,

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Invalid identifier: {0:?}")]
    InvalidId(String),

    #[error("Invalid order token: {0:?}")]
    InvalidOrderToken(String),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Failure classification for persisting a reorder plan
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    /// Nothing was committed; the call for `target` failed
    #[error("Failed to persist {target}: {reason}")]
    Transport { target: String, reason: String },

    /// A cross-list move where the source list was committed but the
    /// destination list was not
    #[error("Partial move: {committed} was persisted but {failed} was not: {reason}")]
    PartialMoveFailure {
        committed: String,
        failed: String,
        reason: String,
    },
}

impl PersistError {
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::PartialMoveFailure { .. })
    }
}

impl BoardError {
    /// Returns the persistence classification if this error came from a persist call
    pub fn as_persist(&self) -> Option<&PersistError> {
        match self {
            Self::Persist(err) => Some(err),
            _ => None,
        }
    }
}

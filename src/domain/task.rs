use crate::domain::id::define_id;
use crate::domain::list::ListId;
use serde::{Deserialize, Serialize};

define_id!(
    /// Unique identifier for a task (e.g., T1, T2, T100)
    TaskId,
    "T"
);

/// A work item belonging to exactly one list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub list_id: ListId,
}

impl Task {
    /// Creates a new task owned by `list_id`
    pub fn new(id: TaskId, name: impl Into<String>, list_id: ListId) -> Self {
        Self {
            id,
            name: name.into(),
            list_id,
        }
    }

    /// Returns a copy of this task owned by another list
    pub fn moved_to(&self, list_id: ListId) -> Self {
        Self {
            list_id,
            ..self.clone()
        }
    }
}

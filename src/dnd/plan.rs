use crate::domain::{BoardId, List, ListId, OrderedCollection, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A computed order change, ready to be applied to a snapshot and persisted.
///
/// List-scoped variants carry the whole list (name included) because the
/// backend updates lists as full resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum ReorderPlan {
    /// The board's list order changed
    Board {
        board_id: BoardId,
        list_order: OrderedCollection<ListId>,
    },
    /// Tasks were reordered within one list
    SingleList { list: List },
    /// A task moved from `source` to `destination`
    CrossList {
        source: List,
        destination: List,
        moved_task: TaskId,
    },
}

impl ReorderPlan {
    /// Lists whose task order this plan rewrites
    pub fn affected_lists(&self) -> Vec<&ListId> {
        match self {
            Self::Board { .. } => Vec::new(),
            Self::SingleList { list } => vec![&list.id],
            Self::CrossList {
                source,
                destination,
                ..
            } => vec![&source.id, &destination.id],
        }
    }

    pub fn is_board_scope(&self) -> bool {
        matches!(self, Self::Board { .. })
    }
}

impl fmt::Display for ReorderPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board { board_id, .. } => write!(f, "reorder lists on {}", board_id),
            Self::SingleList { list } => write!(f, "reorder tasks in {}", list.id),
            Self::CrossList {
                source,
                destination,
                moved_task,
            } => write!(f, "move {} from {} to {}", moved_task, source.id, destination.id),
        }
    }
}

use crate::domain::id::define_id;
use crate::domain::list::ListId;
use crate::domain::order::OrderedCollection;
use serde::{Deserialize, Serialize};

define_id!(
    /// Unique identifier for a board
    BoardId,
    "B"
);

/// Top-level container holding the horizontal order of lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub list_order: OrderedCollection<ListId>,
}

impl Board {
    pub fn new(id: BoardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            list_order: OrderedCollection::default(),
        }
    }

    pub fn with_lists(mut self, lists: impl IntoIterator<Item = ListId>) -> Self {
        self.list_order = lists.into_iter().collect();
        self
    }

    /// Returns a copy of this board with its list order swapped out
    pub fn with_order(&self, list_order: OrderedCollection<ListId>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            list_order,
        }
    }
}

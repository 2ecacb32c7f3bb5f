use crate::domain::id::define_id;
use crate::domain::order::{OrderToken, OrderedCollection};
use crate::domain::task::TaskId;
use serde::{Deserialize, Serialize};

define_id!(
    /// Unique identifier for a list (e.g., L1, L2)
    ListId,
    "L"
);

/// A named, ordered container of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub name: String,
    pub task_order: OrderedCollection<TaskId>,
}

impl List {
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            task_order: OrderedCollection::default(),
        }
    }

    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = TaskId>) -> Self {
        self.task_order = tasks.into_iter().collect();
        self
    }

    /// Returns a copy of this list with its task order swapped out
    pub fn with_order(&self, task_order: OrderedCollection<TaskId>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            task_order,
        }
    }

    /// Encodes the task order for a persistence call
    pub fn order_token(&self) -> OrderToken {
        OrderToken::encode(&self.task_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_creation() {
        let list = List::new(ListId::new(1), "Backlog");
        assert_eq!(list.id.as_str(), "L1");
        assert_eq!(list.name, "Backlog");
        assert!(list.task_order.is_empty());
    }

    #[test]
    fn test_with_order_keeps_identity() {
        let list =
            List::new(ListId::new(1), "Backlog").with_tasks([TaskId::new(1), TaskId::new(2)]);
        let reordered = list.with_order(vec![TaskId::new(2), TaskId::new(1)].into());

        assert_eq!(reordered.id, list.id);
        assert_eq!(reordered.name, list.name);
        assert_eq!(reordered.order_token().as_str(), "T2,T1");
        assert_eq!(list.order_token().as_str(), "T1,T2");
    }
}

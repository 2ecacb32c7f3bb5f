//! The full state of one board: list order, per-list task order and task membership.

use crate::dnd::ReorderPlan;
use crate::domain::{Board, BoardId, List, ListId, OrderedCollection, Task, TaskId};
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    board: Board,
    lists: HashMap<ListId, List>,
    tasks: HashMap<TaskId, Task>,
}

impl Snapshot {
    /// Builds a snapshot and checks its invariants
    pub fn new(
        board: Board,
        lists: impl IntoIterator<Item = List>,
        tasks: impl IntoIterator<Item = Task>,
    ) -> Result<Self> {
        let snapshot = Self {
            board,
            lists: lists.into_iter().map(|l| (l.id.clone(), l)).collect(),
            tasks: tasks.into_iter().map(|t| (t.id.clone(), t)).collect(),
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_id(&self) -> &BoardId {
        &self.board.id
    }

    pub fn list_order(&self) -> &OrderedCollection<ListId> {
        &self.board.list_order
    }

    pub fn list(&self, id: &ListId) -> Result<&List> {
        self.lists
            .get(id)
            .ok_or_else(|| BoardError::ListNotFound(id.to_string()))
    }

    pub fn task(&self, id: &TaskId) -> Result<&Task> {
        self.tasks
            .get(id)
            .ok_or_else(|| BoardError::TaskNotFound(id.to_string()))
    }

    /// Lists in board order
    pub fn lists(&self) -> impl Iterator<Item = &List> {
        self.board
            .list_order
            .iter()
            .filter_map(|id| self.lists.get(id))
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn contains_list(&self, id: &ListId) -> bool {
        self.lists.contains_key(id)
    }

    pub fn contains_task(&self, id: &TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Checks every ordering and membership invariant
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(BoardError::InvalidSnapshot(reason));

        let order = &self.board.list_order;
        if order.has_duplicates() {
            return invalid(format!("duplicate list in order of {}", self.board.id));
        }
        let all_present = order.iter().all(|id| self.lists.contains_key(id));
        if order.len() != self.lists.len() || !all_present {
            return invalid(format!(
                "list order of {} does not match its {} lists",
                self.board.id,
                self.lists.len()
            ));
        }

        if let Some((key, task)) = self.tasks.iter().find(|(key, task)| *key != &task.id) {
            return invalid(format!("task {} stored under {}", task.id, key));
        }

        let mut placed = 0;
        for (key, list) in &self.lists {
            if key != &list.id {
                return invalid(format!("list {} stored under {}", list.id, key));
            }
            if list.task_order.has_duplicates() {
                return invalid(format!("duplicate task in order of {}", list.id));
            }
            for task_id in &list.task_order {
                match self.tasks.get(task_id) {
                    Some(task) if task.list_id == list.id => placed += 1,
                    Some(task) => {
                        return invalid(format!(
                            "{} is ordered in {} but belongs to {}",
                            task_id, list.id, task.list_id
                        ))
                    }
                    None => return invalid(format!("{} in {} is unknown", task_id, list.id)),
                }
            }
        }

        // Each ordered task matched its owner, so a count mismatch means some
        // task is not ordered anywhere
        if placed != self.tasks.len() {
            return invalid(format!(
                "{} tasks are not ordered in any list",
                self.tasks.len() - placed
            ));
        }
        Ok(())
    }

    /// Returns the snapshot that results from `plan`, leaving `self` untouched
    pub fn apply(&self, plan: &ReorderPlan) -> Result<Self> {
        let mut next = self.clone();
        match plan {
            ReorderPlan::Board {
                board_id,
                list_order,
            } => {
                if board_id != &self.board.id {
                    return Err(BoardError::BoardNotFound(board_id.to_string()));
                }
                if !list_order.is_permutation_of(&self.board.list_order) {
                    return Err(BoardError::InvalidSnapshot(format!(
                        "new list order of {} is not a permutation of the current one",
                        board_id
                    )));
                }
                next.board = self.board.with_order(list_order.clone());
            }
            ReorderPlan::SingleList { list } => {
                let current = self.list(&list.id)?;
                if !list.task_order.is_permutation_of(&current.task_order) {
                    return Err(BoardError::InvalidSnapshot(format!(
                        "new task order of {} is not a permutation of the current one",
                        list.id
                    )));
                }
                next.lists.insert(list.id.clone(), list.clone());
            }
            ReorderPlan::CrossList {
                source,
                destination,
                moved_task,
            } => {
                self.list(&source.id)?;
                self.list(&destination.id)?;
                let task = self.task(moved_task)?;
                next.lists.insert(source.id.clone(), source.clone());
                next.lists.insert(destination.id.clone(), destination.clone());
                next.tasks
                    .insert(moved_task.clone(), task.moved_to(destination.id.clone()));
            }
        }
        next.validate()?;
        Ok(next)
    }

    /// Undoes `plan` by restoring the parts of `prior` it replaced.
    ///
    /// Only the board order or lists the plan touched are restored, so later
    /// changes elsewhere survive. Returns `None` when a touched part no longer
    /// holds the plan's result.
    pub fn revert(&self, plan: &ReorderPlan, prior: &Snapshot) -> Result<Option<Self>> {
        let unchanged = |list: &List| self.lists.get(&list.id) == Some(list);
        let inverse = match plan {
            ReorderPlan::Board {
                board_id,
                list_order,
            } => {
                if &self.board.list_order != list_order {
                    return Ok(None);
                }
                ReorderPlan::Board {
                    board_id: board_id.clone(),
                    list_order: prior.list_order().clone(),
                }
            }
            ReorderPlan::SingleList { list } => {
                if !unchanged(list) {
                    return Ok(None);
                }
                ReorderPlan::SingleList {
                    list: prior.list(&list.id)?.clone(),
                }
            }
            ReorderPlan::CrossList {
                source,
                destination,
                moved_task,
            } => {
                if !unchanged(source) || !unchanged(destination) {
                    return Ok(None);
                }
                ReorderPlan::CrossList {
                    source: prior.list(&destination.id)?.clone(),
                    destination: prior.list(&source.id)?.clone(),
                    moved_task: moved_task.clone(),
                }
            }
        };
        self.apply(&inverse).map(Some)
    }

    /// Returns the snapshot with a deleted task pruned from its list
    pub fn without_task(&self, id: &TaskId) -> Result<Self> {
        let task = self.task(id)?;
        let mut next = self.clone();
        let owner = self.list(&task.list_id)?;
        next.lists
            .insert(owner.id.clone(), owner.with_order(owner.task_order.without(id)));
        next.tasks.remove(id);
        Ok(next)
    }

    /// Returns the snapshot with a deleted list and all of its tasks pruned
    pub fn without_list(&self, id: &ListId) -> Result<Self> {
        let list = self.list(id)?;
        let mut next = self.clone();
        for task_id in &list.task_order {
            next.tasks.remove(task_id);
        }
        next.lists.remove(id);
        next.board = self.board.with_order(self.board.list_order.without(id));
        Ok(next)
    }
}

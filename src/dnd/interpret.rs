//! Classifies a completed drag and computes the resulting order(s).

use crate::dnd::{DragKind, DragResult, ReorderPlan};
use crate::domain::{ListId, Snapshot, TaskId};
use crate::error::{BoardError, Result};
use std::str::FromStr;
use tracing::{debug, warn};

/// What a drag amounts to once checked against the current snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// Nothing to apply or persist
    NoOp,
    Plan(ReorderPlan),
}

impl Interpretation {
    pub fn into_plan(self) -> Option<ReorderPlan> {
        match self {
            Self::NoOp => None,
            Self::Plan(plan) => Some(plan),
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// Interprets `drag` against `snapshot`.
///
/// Removal always happens before insertion and the destination index refers
/// to the sequence after removal, so the dragged id lands at exactly
/// `destination.index`. The snapshot is never modified.
pub fn interpret(snapshot: &Snapshot, drag: &DragResult) -> Result<Interpretation> {
    let Some(destination) = drag.destination.as_ref() else {
        debug!(dragged = %drag.dragged_id, "drag released outside any target");
        return Ok(Interpretation::NoOp);
    };

    if drag.is_in_place() {
        debug!(dragged = %drag.dragged_id, "drag dropped at its origin");
        return Ok(Interpretation::NoOp);
    }

    let plan = match drag.kind {
        DragKind::Collection => reorder_lists(snapshot, drag, destination.index)?,
        DragKind::Item if drag.source.collection_id == destination.collection_id => {
            reorder_within_list(snapshot, drag, destination.index)?
        }
        DragKind::Item => {
            let destination_id = ListId::from_str(&destination.collection_id)?;
            move_across_lists(snapshot, drag, &destination_id, destination.index)?
        }
    };

    match plan {
        Some(plan) => {
            debug!(%plan, "drag interpreted");
            Ok(Interpretation::Plan(plan))
        }
        None => Ok(Interpretation::NoOp),
    }
}

/// Resolves where the dragged id currently sits, trusting the snapshot over a
/// stale index from the presentation layer. A reported index past the end of
/// the collection is rejected outright.
fn current_index(found: usize, reported: usize, len: usize, dragged: &str) -> Result<usize> {
    if reported >= len {
        return Err(BoardError::IndexOutOfRange {
            index: reported,
            len,
        });
    }
    if found != reported {
        warn!(
            dragged,
            reported, found, "drag source index disagrees with snapshot; using snapshot"
        );
    }
    Ok(found)
}

fn reorder_lists(snapshot: &Snapshot, drag: &DragResult, to: usize) -> Result<Option<ReorderPlan>> {
    let list_id = ListId::from_str(&drag.dragged_id)?;
    let order = snapshot.list_order();
    let found = order
        .position(&list_id)
        .ok_or_else(|| BoardError::ListNotFound(list_id.to_string()))?;
    let from = current_index(found, drag.source.index, order.len(), &drag.dragged_id)?;

    let list_order = order.move_item(from, to)?;
    if &list_order == order {
        return Ok(None);
    }
    Ok(Some(ReorderPlan::Board {
        board_id: snapshot.board_id().clone(),
        list_order,
    }))
}

fn locate_task(snapshot: &Snapshot, drag: &DragResult) -> Result<(ListId, TaskId, usize)> {
    let list_id = ListId::from_str(&drag.source.collection_id)?;
    let task_id = TaskId::from_str(&drag.dragged_id)?;
    snapshot.task(&task_id)?;

    let task_order = &snapshot.list(&list_id)?.task_order;
    let found = task_order
        .position(&task_id)
        .ok_or_else(|| BoardError::TaskNotInList {
            task: task_id.to_string(),
            list: list_id.to_string(),
        })?;
    let from = current_index(found, drag.source.index, task_order.len(), &drag.dragged_id)?;
    Ok((list_id, task_id, from))
}

fn reorder_within_list(
    snapshot: &Snapshot,
    drag: &DragResult,
    to: usize,
) -> Result<Option<ReorderPlan>> {
    let (list_id, _, from) = locate_task(snapshot, drag)?;
    let list = snapshot.list(&list_id)?;

    let task_order = list.task_order.move_item(from, to)?;
    if task_order == list.task_order {
        return Ok(None);
    }
    Ok(Some(ReorderPlan::SingleList {
        list: list.with_order(task_order),
    }))
}

fn move_across_lists(
    snapshot: &Snapshot,
    drag: &DragResult,
    destination_id: &ListId,
    to: usize,
) -> Result<Option<ReorderPlan>> {
    let (source_id, task_id, from) = locate_task(snapshot, drag)?;
    let source = snapshot.list(&source_id)?;
    let destination = snapshot.list(destination_id)?;

    let (source_order, moved) = source.task_order.remove_at(from)?;
    let destination_order = destination.task_order.insert_at(to, moved)?;

    Ok(Some(ReorderPlan::CrossList {
        source: source.with_order(source_order),
        destination: destination.with_order(destination_order),
        moved_task: task_id,
    }))
}

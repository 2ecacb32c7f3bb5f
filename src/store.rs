//! In-memory holder of the current board snapshot.
//!
//! Every mutating method either installs a fully validated snapshot or leaves
//! the previous one in place, so a reader never observes a partial update.

use crate::dnd::ReorderPlan;
use crate::domain::{ListId, Snapshot, TaskId};
use crate::error::{BoardError, Result};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct BoardStore {
    current: Option<Snapshot>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn snapshot(&self) -> Result<&Snapshot> {
        self.current.as_ref().ok_or(BoardError::BoardNotLoaded)
    }

    /// Installs a freshly fetched snapshot, replacing any prior state
    pub fn load(&mut self, snapshot: Snapshot) -> Result<()> {
        snapshot.validate()?;
        info!(board = %snapshot.board_id(), "board loaded");
        self.current = Some(snapshot);
        Ok(())
    }

    /// Drops all state for the current board
    pub fn reset(&mut self) {
        if let Some(snapshot) = self.current.take() {
            info!(board = %snapshot.board_id(), "board reset");
        }
    }

    /// Applies `plan` ahead of persistence and returns the snapshot it replaced
    pub fn apply_optimistic(&mut self, plan: &ReorderPlan) -> Result<Snapshot> {
        let current = self.current_mut()?;
        let next = current.apply(plan)?;
        debug!(%plan, "applied optimistically");
        Ok(std::mem::replace(current, next))
    }

    /// Restores a snapshot retained from `apply_optimistic`
    pub fn rollback(&mut self, prior: Snapshot) {
        info!(board = %prior.board_id(), "rolled back to prior snapshot");
        self.current = Some(prior);
    }

    /// Undoes only what `plan` changed, using the snapshot it replaced.
    ///
    /// Returns `false` and leaves the store as it is when a later change has
    /// touched the same board order or lists.
    pub fn revert(&mut self, plan: &ReorderPlan, prior: &Snapshot) -> Result<bool> {
        let current = self.current_mut()?;
        match current.revert(plan, prior)? {
            Some(next) => {
                *current = next;
                info!(%plan, "reverted");
                Ok(true)
            }
            None => {
                debug!(%plan, "not reverted; changed since");
                Ok(false)
            }
        }
    }

    /// Prunes a task deleted elsewhere
    pub fn remove_task(&mut self, id: &TaskId) -> Result<()> {
        let current = self.current_mut()?;
        *current = current.without_task(id)?;
        debug!(task = %id, "pruned deleted task");
        Ok(())
    }

    /// Prunes a list deleted elsewhere, along with its tasks
    pub fn remove_list(&mut self, id: &ListId) -> Result<()> {
        let current = self.current_mut()?;
        *current = current.without_list(id)?;
        debug!(list = %id, "pruned deleted list");
        Ok(())
    }

    fn current_mut(&mut self) -> Result<&mut Snapshot> {
        self.current.as_mut().ok_or(BoardError::BoardNotLoaded)
    }
}

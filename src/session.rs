//! One open board: drag handling from gesture to persisted order.
//!
//! A drag is handled in two steps. [`BoardSession::stage`] interprets it and
//! updates the store immediately. [`BoardSession::commit`] persists the plan
//! later and reconciles the store with the outcome.

use crate::config::EngineConfig;
use crate::dnd::{interpret, DragResult, Interpretation, ReorderPlan};
use crate::domain::{BoardId, ListId, Snapshot};
use crate::error::Result;
use crate::reconcile::{Ack, Reconciler};
use crate::storage::Storage;
use crate::store::BoardStore;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A plan already applied to the store, waiting to be persisted
#[derive(Debug, Clone)]
pub struct StagedMove {
    /// Correlates the optimistic update with its later completion
    pub id: Uuid,
    pub plan: ReorderPlan,
    prior: Snapshot,
}

impl StagedMove {
    /// The snapshot this move replaced
    pub fn prior(&self) -> &Snapshot {
        &self.prior
    }
}

/// How a handled drag ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// The drag changed nothing
    Unchanged,
    /// Applied and persisted
    Committed(Ack),
    /// Applied locally; persistence of task orders is disabled
    LocalOnly,
}

pub struct BoardSession {
    store: BoardStore,
    reconciler: Reconciler,
    config: EngineConfig,
    /// Lists whose task order failed to persist after a partial move
    pending: Vec<ListId>,
    /// Set when a failed move could not be undone locally
    needs_refresh: bool,
}

impl BoardSession {
    pub fn new(storage: Arc<dyn Storage>, config: EngineConfig) -> Self {
        Self {
            store: BoardStore::new(),
            reconciler: Reconciler::new(storage),
            config,
            pending: Vec::new(),
            needs_refresh: false,
        }
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Mutable store access for external deletion notifications
    pub fn store_mut(&mut self) -> &mut BoardStore {
        &mut self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lists left unpersisted by partial moves, oldest first
    pub fn pending(&self) -> &[ListId] {
        &self.pending
    }

    /// True when the store may disagree with the backend until
    /// [`refresh`](Self::refresh) is called
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Fetches a board and makes it the current one
    pub async fn open(&mut self, board_id: &BoardId) -> Result<()> {
        let snapshot = self.reconciler.storage().load_snapshot(board_id).await?;
        self.store.load(snapshot)?;
        self.pending.clear();
        self.needs_refresh = false;
        Ok(())
    }

    /// Leaves the current board
    pub fn close(&mut self) {
        self.store.reset();
        self.pending.clear();
        self.needs_refresh = false;
    }

    /// Re-fetches the authoritative snapshot of the current board
    pub async fn refresh(&mut self) -> Result<()> {
        let board_id = self.store.snapshot()?.board_id().clone();
        info!(board = %board_id, "refreshing board");
        self.open(&board_id).await
    }

    /// Interprets `drag` and applies it to the store ahead of persistence.
    ///
    /// Returns `None` when the drag changes nothing; the store is then untouched.
    pub fn stage(&mut self, drag: &DragResult) -> Result<Option<StagedMove>> {
        let plan = match interpret(self.store.snapshot()?, drag)? {
            Interpretation::NoOp => return Ok(None),
            Interpretation::Plan(plan) => plan,
        };
        let prior = self.store.apply_optimistic(&plan)?;
        let id = Uuid::new_v4();
        debug!(move_id = %id, %plan, "staged");
        Ok(Some(StagedMove { id, plan, prior }))
    }

    /// Persists a staged move.
    ///
    /// A plain transport failure undoes the move's own changes when configured
    /// to. Moves staged after it are kept; if one of them touched the same
    /// lists the store is flagged with [`needs_refresh`](Self::needs_refresh).
    /// A partial move keeps the optimistic state and records the list that
    /// still needs persisting; see [`retry_pending`](Self::retry_pending).
    pub async fn commit(&mut self, staged: StagedMove) -> Result<DragOutcome> {
        if !staged.plan.is_board_scope() && !self.config.persist_task_orders {
            debug!(move_id = %staged.id, "task order persistence disabled");
            return Ok(DragOutcome::LocalOnly);
        }

        match self.reconciler.apply(&staged.plan).await {
            Ok(ack) => {
                info!(move_id = %staged.id, calls = ack.calls, "move persisted");
                self.pending.retain(|id| !ack.lists.contains(id));
                Ok(DragOutcome::Committed(ack))
            }
            Err(err) if err.is_partial() => {
                if let ReorderPlan::CrossList { destination, .. } = &staged.plan {
                    if !self.pending.contains(&destination.id) {
                        self.pending.push(destination.id.clone());
                    }
                }
                warn!(move_id = %staged.id, error = %err, "move partially persisted");
                Err(err.into())
            }
            Err(err) => {
                warn!(move_id = %staged.id, error = %err, "move not persisted");
                if self.store.is_loaded() && !self.undo(&staged)? {
                    warn!(move_id = %staged.id, "store out of sync with backend");
                    self.needs_refresh = true;
                }
                Err(err.into())
            }
        }
    }

    fn undo(&mut self, staged: &StagedMove) -> Result<bool> {
        if !self.config.rollback_on_failure {
            return Ok(false);
        }
        self.store.revert(&staged.plan, &staged.prior)
    }

    /// Stages and commits a drag in one step
    pub async fn handle_drag(&mut self, drag: &DragResult) -> Result<DragOutcome> {
        match self.stage(drag)? {
            Some(staged) => self.commit(staged).await,
            None => Ok(DragOutcome::Unchanged),
        }
    }

    /// Re-issues the persistence calls left behind by partial moves.
    ///
    /// Every pending list is tried; those that fail again stay pending and
    /// the first failure is returned. Returns `None` when nothing was pending.
    pub async fn retry_pending(&mut self) -> Result<Option<Ack>> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        let snapshot = self.store.snapshot()?;

        let mut persisted = Vec::new();
        let mut failed = Vec::new();
        let mut first_err = None;
        for list_id in std::mem::take(&mut self.pending) {
            let Ok(list) = snapshot.list(&list_id) else {
                debug!(list = %list_id, "pending list was deleted; nothing to retry");
                continue;
            };
            match self.reconciler.persist_list(list).await {
                Ok(()) => {
                    info!(list = %list_id, "pending task order persisted");
                    persisted.push(list_id);
                }
                Err(err) => {
                    failed.push(list_id);
                    if first_err.is_none() {
                        first_err = Some(err);
                    }
                }
            }
        }
        self.pending = failed;

        match first_err {
            Some(err) => Err(err.into()),
            None if persisted.is_empty() => Ok(None),
            None => Ok(Some(Ack::for_lists(persisted))),
        }
    }
}

//! Turns reorder plans into persistence calls and classifies their failures.
//!
//! The reconciler never retries. Retry policy belongs to the storage
//! implementation or to the caller.

use crate::dnd::ReorderPlan;
use crate::domain::{BoardId, List, ListId};
use crate::error::PersistError;
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

/// Confirmation that every call implied by a plan succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    /// Set when the board's list order was persisted
    pub board: Option<BoardId>,
    /// Lists whose task order was persisted, in call order
    pub lists: Vec<ListId>,
    pub calls: usize,
    pub persisted_at: DateTime<Utc>,
}

impl Ack {
    fn for_board(board_id: &BoardId) -> Self {
        Self {
            board: Some(board_id.clone()),
            lists: Vec::new(),
            calls: 1,
            persisted_at: Utc::now(),
        }
    }

    pub(crate) fn for_lists(lists: Vec<ListId>) -> Self {
        Self {
            board: None,
            calls: lists.len(),
            lists,
            persisted_at: Utc::now(),
        }
    }
}

/// Issues the persistence calls for reorder plans against an explicit storage value
#[derive(Clone)]
pub struct Reconciler {
    storage: Arc<dyn Storage>,
}

impl Reconciler {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Persists `plan`.
    ///
    /// A cross-list plan persists the source list first. If the destination
    /// call then fails, the source change is already committed and the error
    /// is `PartialMoveFailure`.
    pub async fn apply(&self, plan: &ReorderPlan) -> Result<Ack, PersistError> {
        match plan {
            ReorderPlan::Board {
                board_id,
                list_order,
            } => {
                debug!(board = %board_id, lists = list_order.len(), "persisting list order");
                self.storage
                    .persist_list_order(board_id, list_order)
                    .await
                    .map_err(|e| {
                        warn!(board = %board_id, error = %e, "list order not persisted");
                        PersistError::Transport {
                            target: board_id.to_string(),
                            reason: e.to_string(),
                        }
                    })?;
                Ok(Ack::for_board(board_id))
            }
            ReorderPlan::SingleList { list } => {
                self.persist_list(list).await?;
                Ok(Ack::for_lists(vec![list.id.clone()]))
            }
            ReorderPlan::CrossList {
                source,
                destination,
                moved_task,
            } => {
                debug!(
                    task = %moved_task,
                    from = %source.id,
                    to = %destination.id,
                    "persisting move"
                );
                self.persist_list(source).await?;
                self.persist_list(destination).await.map_err(|e| {
                    let reason = match e {
                        PersistError::Transport { reason, .. } => reason,
                        PersistError::PartialMoveFailure { reason, .. } => reason,
                    };
                    warn!(
                        task = %moved_task,
                        committed = %source.id,
                        failed = %destination.id,
                        "move only partially persisted"
                    );
                    PersistError::PartialMoveFailure {
                        committed: source.id.to_string(),
                        failed: destination.id.to_string(),
                        reason,
                    }
                })?;
                Ok(Ack::for_lists(vec![source.id.clone(), destination.id.clone()]))
            }
        }
    }

    /// Persists one list's task order together with its name
    pub async fn persist_list(&self, list: &List) -> Result<(), PersistError> {
        let token = list.order_token();
        debug!(list = %list.id, order = %token, "persisting task order");
        self.storage
            .persist_list_task_order(&list.id, &token, &list.name)
            .await
            .map_err(|e| {
                warn!(list = %list.id, error = %e, "task order not persisted");
                PersistError::Transport {
                    target: list.id.to_string(),
                    reason: e.to_string(),
                }
            })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::domain::{BoardId, ListId, OrderToken, OrderedCollection, Snapshot};
    use crate::error::{BoardError, Result};
    use crate::storage::Storage;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// A persistence call as seen by the storage
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Call {
        ListOrder(BoardId, Vec<ListId>),
        TaskOrder(ListId, String, String),
    }

    /// Storage double that records calls and fails for chosen targets
    #[derive(Default)]
    pub(crate) struct RecordingStorage {
        pub(crate) calls: Mutex<Vec<Call>>,
        pub(crate) failing: Mutex<HashSet<String>>,
        pub(crate) snapshot: Mutex<Option<Snapshot>>,
    }

    impl RecordingStorage {
        pub(crate) fn with_snapshot(snapshot: Snapshot) -> Self {
            let storage = Self::default();
            *storage.snapshot.lock().unwrap() = Some(snapshot);
            storage
        }

        pub(crate) fn fail_on(&self, target: &str) {
            self.failing.lock().unwrap().insert(target.to_string());
        }

        pub(crate) fn recover(&self, target: &str) {
            self.failing.lock().unwrap().remove(target);
        }

        pub(crate) fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn check(&self, target: &str) -> Result<()> {
            if self.failing.lock().unwrap().contains(target) {
                return Err(BoardError::StorageError(format!("{} unreachable", target)));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Storage for RecordingStorage {
        async fn initialize(&self) -> Result<()> {
            Ok(())
        }

        async fn is_initialized(&self) -> bool {
            true
        }

        async fn load_snapshot(&self, board_id: &BoardId) -> Result<Snapshot> {
            self.snapshot
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| BoardError::BoardNotFound(board_id.to_string()))
        }

        async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
            *self.snapshot.lock().unwrap() = Some(snapshot.clone());
            Ok(())
        }

        async fn persist_list_order(
            &self,
            board_id: &BoardId,
            order: &OrderedCollection<ListId>,
        ) -> Result<()> {
            self.check(board_id.as_str())?;
            self.calls.lock().unwrap().push(Call::ListOrder(
                board_id.clone(),
                order.as_slice().to_vec(),
            ));
            Ok(())
        }

        async fn persist_list_task_order(
            &self,
            list_id: &ListId,
            order: &OrderToken,
            name: &str,
        ) -> Result<()> {
            self.check(list_id.as_str())?;
            self.calls.lock().unwrap().push(Call::TaskOrder(
                list_id.clone(),
                order.to_string(),
                name.to_string(),
            ));
            Ok(())
        }
    }
}

//! End-to-end drag handling against file storage

use std::sync::Arc;
use taskboard_core::{
    Board, BoardId, BoardSession, DragKind, DragLocation, DragOutcome, DragResult, EngineConfig,
    FileStorage, List, ListId, Snapshot, Storage, Task, TaskId,
};
use tempfile::TempDir;

fn task_ids(ns: &[u32]) -> Vec<TaskId> {
    ns.iter().map(|n| TaskId::new(*n)).collect()
}

/// L1 [T1, T2, T3], L2 [T4, T5], L3 []
fn seed_snapshot() -> Snapshot {
    let board = Board::new(BoardId::new(1), "Release")
        .with_lists([ListId::new(1), ListId::new(2), ListId::new(3)]);
    let lists = vec![
        List::new(ListId::new(1), "Todo").with_tasks(task_ids(&[1, 2, 3])),
        List::new(ListId::new(2), "Doing").with_tasks(task_ids(&[4, 5])),
        List::new(ListId::new(3), "Done"),
    ];
    let tasks = [(1, 1), (2, 1), (3, 1), (4, 2), (5, 2)]
        .into_iter()
        .map(|(t, l)| Task::new(TaskId::new(t), format!("Task {}", t), ListId::new(l)));
    Snapshot::new(board, lists, tasks).unwrap()
}

async fn setup() -> (TempDir, Arc<FileStorage>, BoardSession) {
    let temp_dir = TempDir::new().unwrap();
    let config = EngineConfig::default();
    let storage = Arc::new(config.file_storage(temp_dir.path()));
    storage.save_snapshot(&seed_snapshot()).await.unwrap();

    let mut session = BoardSession::new(storage.clone(), config);
    session.open(&BoardId::new(1)).await.unwrap();
    (temp_dir, storage, session)
}

async fn persisted(storage: &FileStorage) -> Snapshot {
    storage.load_snapshot(&BoardId::new(1)).await.unwrap()
}

fn task_order(snapshot: &Snapshot, list: u32) -> Vec<TaskId> {
    snapshot
        .list(&ListId::new(list))
        .unwrap()
        .task_order
        .as_slice()
        .to_vec()
}

#[tokio::test]
async fn test_list_dragged_to_front() {
    let (_temp_dir, storage, mut session) = setup().await;

    let outcome = session
        .handle_drag(&DragResult::collection("L3", "board", 2, 0))
        .await
        .unwrap();
    assert!(matches!(outcome, DragOutcome::Committed(_)));

    let expected = [ListId::new(3), ListId::new(1), ListId::new(2)];
    let current = session.store().snapshot().unwrap();
    assert_eq!(current.list_order().as_slice(), &expected);
    assert_eq!(persisted(&storage).await.list_order().as_slice(), &expected);
}

#[tokio::test]
async fn test_task_reordered_within_list() {
    let (_temp_dir, storage, mut session) = setup().await;
    let drag = DragResult::item("T1", DragLocation::new("L1", 0), DragLocation::new("L1", 2));

    session.handle_drag(&drag).await.unwrap();

    let current = session.store().snapshot().unwrap();
    assert_eq!(task_order(current, 1), task_ids(&[2, 3, 1]));
    assert_eq!(task_order(&persisted(&storage).await, 1), task_ids(&[2, 3, 1]));
}

#[tokio::test]
async fn test_task_moved_across_lists() {
    let (_temp_dir, storage, mut session) = setup().await;
    let drag = DragResult::item("T2", DragLocation::new("L1", 1), DragLocation::new("L2", 1));

    session.handle_drag(&drag).await.unwrap();

    for snapshot in [session.store().snapshot().unwrap().clone(), persisted(&storage).await] {
        assert_eq!(task_order(&snapshot, 1), task_ids(&[1, 3]));
        assert_eq!(task_order(&snapshot, 2), task_ids(&[4, 2, 5]));
        assert_eq!(snapshot.task(&TaskId::new(2)).unwrap().list_id, ListId::new(2));
        let owners = snapshot
            .lists()
            .filter(|list| list.task_order.contains(&TaskId::new(2)))
            .count();
        assert_eq!(owners, 1);
    }
}

#[tokio::test]
async fn test_cancelled_drag_changes_nothing() {
    let (_temp_dir, storage, mut session) = setup().await;
    let before = session.store().snapshot().unwrap().clone();
    let drag = DragResult::cancelled("T1", DragLocation::new("L1", 0), DragKind::Item);

    let outcome = session.handle_drag(&drag).await.unwrap();

    assert_eq!(outcome, DragOutcome::Unchanged);
    assert_eq!(session.store().snapshot().unwrap(), &before);
    assert_eq!(persisted(&storage).await, before);
}

#[tokio::test]
async fn test_successive_drags_and_reopen() {
    let (_temp_dir, storage, mut session) = setup().await;
    let drags = [
        DragResult::item("T5", DragLocation::new("L2", 1), DragLocation::new("L3", 0)),
        DragResult::item("T1", DragLocation::new("L1", 0), DragLocation::new("L3", 1)),
        DragResult::collection("L1", "board", 0, 2),
    ];
    for drag in &drags {
        session.handle_drag(drag).await.unwrap();
    }
    let local = session.store().snapshot().unwrap().clone();

    session.close();
    assert!(!session.store().is_loaded());

    session.open(&BoardId::new(1)).await.unwrap();
    assert_eq!(session.store().snapshot().unwrap(), &local);
    assert_eq!(persisted(&storage).await, local);
    assert_eq!(task_order(&local, 3), task_ids(&[5, 1]));
}

#[tokio::test]
async fn test_out_of_range_drag_leaves_store_usable() {
    let (_temp_dir, _storage, mut session) = setup().await;
    let before = session.store().snapshot().unwrap().clone();
    let bad = DragResult::item("T1", DragLocation::new("L1", 0), DragLocation::new("L2", 9));

    assert!(session.handle_drag(&bad).await.is_err());
    assert_eq!(session.store().snapshot().unwrap(), &before);

    let good = DragResult::item("T1", DragLocation::new("L1", 0), DragLocation::new("L2", 0));
    assert!(session.handle_drag(&good).await.is_ok());
}

use crate::{
    domain::{Board, BoardId, List, ListId, OrderToken, OrderedCollection, Snapshot, Task, TaskId},
    error::{BoardError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
struct BoardRecord {
    id: BoardId,
    name: String,
    list_order: OrderedCollection<ListId>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ListRecord {
    id: ListId,
    name: String,
    board_id: BoardId,
    order: OrderToken,
    updated_at: DateTime<Utc>,
}

/// File-based storage implementation
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    pub const DEFAULT_DIR: &'static str = ".taskboard";
    const BOARDS_DIR: &'static str = "boards";
    const LISTS_DIR: &'static str = "lists";
    const TASKS_DIR: &'static str = "tasks";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self::with_dir(project_root, Self::DEFAULT_DIR)
    }

    /// Creates a FileStorage that keeps its files in `dir_name` under the project root
    pub fn with_dir(project_root: impl AsRef<Path>, dir_name: &str) -> Self {
        Self {
            root_path: project_root.as_ref().join(dir_name),
        }
    }

    fn boards_dir(&self) -> PathBuf {
        self.root_path.join(Self::BOARDS_DIR)
    }

    fn lists_dir(&self) -> PathBuf {
        self.root_path.join(Self::LISTS_DIR)
    }

    fn tasks_dir(&self) -> PathBuf {
        self.root_path.join(Self::TASKS_DIR)
    }

    fn board_file(&self, id: &BoardId) -> PathBuf {
        self.boards_dir().join(format!("{}.json", id.as_str()))
    }

    fn list_file(&self, id: &ListId) -> PathBuf {
        self.lists_dir().join(format!("{}.json", id.as_str()))
    }

    fn task_file(&self, id: &TaskId) -> PathBuf {
        self.tasks_dir().join(format!("{}.json", id.as_str()))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let contents = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json).await?;
        Ok(())
    }

    async fn read_board(&self, id: &BoardId) -> Result<BoardRecord> {
        let path = self.board_file(id);
        if !path.exists() {
            return Err(BoardError::BoardNotFound(id.to_string()));
        }
        Self::read_json(&path).await
    }

    async fn read_list(&self, id: &ListId) -> Result<ListRecord> {
        let path = self.list_file(id);
        if !path.exists() {
            return Err(BoardError::ListNotFound(id.to_string()));
        }
        Self::read_json(&path).await
    }

    async fn read_task(&self, id: &TaskId) -> Result<Task> {
        let path = self.task_file(id);
        if !path.exists() {
            return Err(BoardError::TaskNotFound(id.to_string()));
        }
        Self::read_json(&path).await
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;
        self.ensure_directory_exists(&self.boards_dir()).await?;
        self.ensure_directory_exists(&self.lists_dir()).await?;
        self.ensure_directory_exists(&self.tasks_dir()).await?;
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.boards_dir().exists() && self.lists_dir().exists() && self.tasks_dir().exists()
    }

    async fn load_snapshot(&self, board_id: &BoardId) -> Result<Snapshot> {
        let board_record = self.read_board(board_id).await?;

        let mut lists = Vec::with_capacity(board_record.list_order.len());
        let mut tasks = Vec::new();
        for list_id in &board_record.list_order {
            let record = self.read_list(list_id).await?;
            let task_order = record.order.decode()?;
            for task_id in &task_order {
                tasks.push(self.read_task(task_id).await?);
            }
            lists.push(List {
                id: record.id,
                name: record.name,
                task_order,
            });
        }

        let board = Board {
            id: board_record.id,
            name: board_record.name,
            list_order: board_record.list_order,
        };
        debug!(board = %board.id, lists = lists.len(), tasks = tasks.len(), "loaded snapshot");
        Snapshot::new(board, lists, tasks)
    }

    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        self.initialize().await?;
        let now = Utc::now();
        let board = snapshot.board();

        let board_record = BoardRecord {
            id: board.id.clone(),
            name: board.name.clone(),
            list_order: board.list_order.clone(),
            updated_at: now,
        };
        Self::write_json(&self.board_file(&board.id), &board_record).await?;

        for list in snapshot.lists() {
            let record = ListRecord {
                id: list.id.clone(),
                name: list.name.clone(),
                board_id: board.id.clone(),
                order: list.order_token(),
                updated_at: now,
            };
            Self::write_json(&self.list_file(&list.id), &record).await?;
        }

        for task in snapshot.tasks() {
            Self::write_json(&self.task_file(&task.id), task).await?;
        }
        Ok(())
    }

    async fn persist_list_order(
        &self,
        board_id: &BoardId,
        order: &OrderedCollection<ListId>,
    ) -> Result<()> {
        let mut record = self.read_board(board_id).await?;
        record.list_order = order.clone();
        record.updated_at = Utc::now();
        Self::write_json(&self.board_file(board_id), &record).await
    }

    async fn persist_list_task_order(
        &self,
        list_id: &ListId,
        order: &OrderToken,
        name: &str,
    ) -> Result<()> {
        let mut record = self.read_list(list_id).await?;

        // Every task must be readable before anything is written
        let mut arrivals = Vec::new();
        for task_id in &order.decode()? {
            let task = self.read_task(task_id).await?;
            if &task.list_id != list_id {
                arrivals.push(task.moved_to(list_id.clone()));
            }
        }

        record.name = name.to_string();
        record.order = order.clone();
        record.updated_at = Utc::now();
        Self::write_json(&self.list_file(list_id), &record).await?;

        for task in &arrivals {
            Self::write_json(&self.task_file(&task.id), task).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::fixtures::{order_of, sample, tasks};
    use std::str::FromStr;
    use tempfile::TempDir;

    async fn seeded() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.save_snapshot(&sample()).await.unwrap();
        (temp_dir, storage)
    }

    #[tokio::test]
    async fn test_storage_initialization() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(!storage.is_initialized().await);

        storage.initialize().await.unwrap();

        assert!(storage.is_initialized().await);
        assert!(storage.boards_dir().exists());
        assert!(storage.lists_dir().exists());
        assert!(storage.tasks_dir().exists());
    }

    #[tokio::test]
    async fn test_custom_directory_name() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::with_dir(temp_dir.path(), "boards-data");
        storage.initialize().await.unwrap();

        assert!(temp_dir.path().join("boards-data").join("lists").exists());
    }

    #[tokio::test]
    async fn test_snapshot_save_and_load() {
        let (_temp_dir, storage) = seeded().await;

        let loaded = storage.load_snapshot(&BoardId::new(1)).await.unwrap();
        assert_eq!(loaded, sample());
    }

    #[tokio::test]
    async fn test_load_missing_board() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        storage.initialize().await.unwrap();

        let result = storage.load_snapshot(&BoardId::new(7)).await;
        assert!(matches!(result, Err(BoardError::BoardNotFound(_))));
    }

    #[tokio::test]
    async fn test_persist_list_order() {
        let (_temp_dir, storage) = seeded().await;
        let order: OrderedCollection<ListId> =
            vec![ListId::new(3), ListId::new(1), ListId::new(2)].into();

        storage
            .persist_list_order(&BoardId::new(1), &order)
            .await
            .unwrap();

        let loaded = storage.load_snapshot(&BoardId::new(1)).await.unwrap();
        assert_eq!(loaded.list_order(), &order);
    }

    #[tokio::test]
    async fn test_persist_task_order_updates_name() {
        let (_temp_dir, storage) = seeded().await;
        let token = OrderToken::from_str("T2,T3,T1").unwrap();

        storage
            .persist_list_task_order(&ListId::new(1), &token, "Next up")
            .await
            .unwrap();

        let loaded = storage.load_snapshot(&BoardId::new(1)).await.unwrap();
        let list = loaded.list(&ListId::new(1)).unwrap();
        assert_eq!(list.name, "Next up");
        assert_eq!(order_of(&loaded, 1), tasks(&[2, 3, 1]));
    }

    #[tokio::test]
    async fn test_persist_cross_list_move_reassigns_task() {
        let (_temp_dir, storage) = seeded().await;

        storage
            .persist_list_task_order(
                &ListId::new(1),
                &OrderToken::from_str("T1,T3").unwrap(),
                "Todo",
            )
            .await
            .unwrap();
        storage
            .persist_list_task_order(
                &ListId::new(2),
                &OrderToken::from_str("T4,T2,T5").unwrap(),
                "Doing",
            )
            .await
            .unwrap();

        let loaded = storage.load_snapshot(&BoardId::new(1)).await.unwrap();
        assert_eq!(order_of(&loaded, 1), tasks(&[1, 3]));
        assert_eq!(order_of(&loaded, 2), tasks(&[4, 2, 5]));
        assert_eq!(loaded.task(&TaskId::new(2)).unwrap().list_id, ListId::new(2));
    }

    #[tokio::test]
    async fn test_unreadable_task_leaves_list_untouched() {
        let (_temp_dir, storage) = seeded().await;
        fs::remove_file(storage.task_file(&TaskId::new(2)))
            .await
            .unwrap();

        let result = storage
            .persist_list_task_order(
                &ListId::new(2),
                &OrderToken::from_str("T4,T2,T5").unwrap(),
                "Doing",
            )
            .await;

        assert!(matches!(result, Err(BoardError::TaskNotFound(_))));
        let record = storage.read_list(&ListId::new(2)).await.unwrap();
        assert_eq!(record.order.as_str(), "T4,T5");
    }

    #[tokio::test]
    async fn test_persist_unknown_list() {
        let (_temp_dir, storage) = seeded().await;

        let result = storage
            .persist_list_task_order(&ListId::new(9), &OrderToken::from_str("T1").unwrap(), "x")
            .await;
        assert!(matches!(result, Err(BoardError::ListNotFound(_))));
    }
}

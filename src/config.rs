use crate::error::{BoardError, Result};
use crate::storage::FileStorage;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Persist same-list and cross-list task reorders, not only list reorders
    pub persist_task_orders: bool,
    /// Restore the pre-drag snapshot when a persistence call fails outright
    pub rollback_on_failure: bool,
    /// Directory, relative to the project root, used by file storage
    pub storage_dir: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            persist_task_orders: true,
            rollback_on_failure: true,
            storage_dir: FileStorage::DEFAULT_DIR.to_string(),
        }
    }
}

impl EngineConfig {
    pub const CONFIG_FILE: &'static str = "taskboard.json";

    /// Loads configuration from a JSON file, falling back to defaults when
    /// the file does not exist
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).await?;
        Self::from_json(&contents)
            .map_err(|e| BoardError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// File storage rooted at `project_root` using the configured directory
    pub fn file_storage(&self, project_root: impl AsRef<Path>) -> FileStorage {
        FileStorage::with_dir(project_root, &self.storage_dir)
    }
}

//! Score store backed by the tasks JSON file given to `rank`.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use momentum_core::{ScoreStore, StoreError};
use serde_json::Value;

/// Writes recomputed scores back into the task objects of a JSON array file.
///
/// Fields other than `score` and `scoredAt` are preserved as read.
pub struct JsonFileStore {
    path: PathBuf,
    tasks: Vec<Value>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, tasks: Vec<Value>) -> Self {
        Self {
            path: path.into(),
            tasks,
        }
    }

    fn flush(&self, task_id: &str) -> Result<(), StoreError> {
        let write_failed = |message: String| StoreError::WriteFailed {
            task_id: task_id.to_string(),
            message,
        };
        let content = serde_json::to_string_pretty(&self.tasks).map_err(|e| write_failed(e.to_string()))?;
        std::fs::write(&self.path, content + "\n").map_err(|e| write_failed(e.to_string()))
    }
}

impl ScoreStore for JsonFileStore {
    fn save_score(&mut self, task_id: &str, score: i32, scored_at: DateTime<Utc>) -> Result<(), StoreError> {
        let entry = self
            .tasks
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .find(|obj| obj.get("id").and_then(Value::as_str) == Some(task_id))
            .ok_or_else(|| StoreError::TaskNotFound(task_id.to_string()))?;

        entry.insert("score".to_string(), Value::from(score));
        entry.insert("scoredAt".to_string(), Value::String(scored_at.to_rfc3339()));
        self.flush(task_id)
    }
}

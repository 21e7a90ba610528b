mod config;

pub use config::{Config, DefaultsConfig, EngineConfig, LightweightConfig};

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::{ConfigError, StoreError};

/// Returns `~/.config/momentum[-dev]/` based on MOMENTUM_ENV.
///
/// Set MOMENTUM_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MOMENTUM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("momentum-dev")
    } else {
        base_dir.join("momentum")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Collaborator that persists recomputed task scores.
///
/// The ordering engine performs no I/O itself; the secondary entry point
/// hands every recomputed score to a store and surfaces its failures.
pub trait ScoreStore {
    fn save_score(&mut self, task_id: &str, score: i32, scored_at: DateTime<Utc>) -> Result<(), StoreError>;
}

/// A score written to a [`MemoryScoreStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredScore {
    pub score: i32,
    pub scored_at: DateTime<Utc>,
}

/// In-process score store for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    scores: BTreeMap<String, StoredScore>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, task_id: &str) -> Option<i32> {
        self.scores.get(task_id).map(|s| s.score)
    }

    pub fn get(&self, task_id: &str) -> Option<&StoredScore> {
        self.scores.get(task_id)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save_score(&mut self, task_id: &str, score: i32, scored_at: DateTime<Utc>) -> Result<(), StoreError> {
        self.scores
            .insert(task_id.to_string(), StoredScore { score, scored_at });
        Ok(())
    }
}

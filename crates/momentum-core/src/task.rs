//! Task types consumed and produced by the ordering engine.
//!
//! A [`Task`] arrives from an external collaborator (text extraction, the
//! task list UI) with user-set tags and inferred attributes. The engine never
//! mutates it; it wraps it in a [`ScoredTask`] carrying the score, the rule
//! that placed it, and its final position.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scoring::ScoreBreakdown;

/// Three-step scale shared by complexity and importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

/// Inferred effort of a task.
pub type Complexity = Level;
/// Inferred importance of a task.
pub type Importance = Level;

impl Level {
    /// Additive score term: low −1, medium +1, high +2.
    pub fn score(self) -> i32 {
        match self {
            Level::Low => -1,
            Level::Medium => 1,
            Level::High => 2,
        }
    }

    /// Urgency weight used when sorting inside a category block: 0/1/2.
    pub fn weight(self) -> i32 {
        match self {
            Level::Low => 0,
            Level::Medium => 1,
            Level::High => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Medium
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User-set boolean tags.
///
/// `liked` and `disliked` are independent; both may be true at once.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Tags {
    pub liked: bool,
    pub urgent: bool,
    pub quick: bool,
    pub disliked: bool,
}

impl Tags {
    /// Short comma separated form shown in the `order` table.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.liked {
            parts.push("liked");
        }
        if self.urgent {
            parts.push("urgent");
        }
        if self.quick {
            parts.push("quick");
        }
        if self.disliked {
            parts.push("disliked");
        }
        if parts.is_empty() {
            "-".to_string()
        } else {
            parts.join(",")
        }
    }
}

/// A task as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique key; synthesized by the caller when missing
    pub id: String,
    /// Display text
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub complexity: Complexity,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default)]
    pub category: String,
}

impl Task {
    /// Create a plain medium/medium task with no tags.
    pub fn new(id: impl Into<String>, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            tags: Tags::default(),
            complexity: Level::Medium,
            importance: Level::Medium,
            category: category.into(),
        }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = importance;
        self
    }

    /// `quick ∨ liked`, the early-phase preference.
    pub fn is_easy_start(&self) -> bool {
        self.tags.quick || self.tags.liked
    }

    /// Local urgency weight used to order tasks inside a category block.
    pub fn urgency_weight(&self) -> i32 {
        let urgent = if self.tags.urgent { 3 } else { 0 };
        urgent + self.importance.weight() + self.complexity.weight()
    }
}

/// A task with its score and placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub total_score: i32,
    pub score_breakdown: ScoreBreakdown,
    /// Phase or rule that placed the task, e.g. `Booster`
    pub rule_placement: String,
    /// 1-based rank; zero until a sequencer has placed the task
    pub position: usize,
}

impl ScoredTask {
    pub fn new(task: Task, score_breakdown: ScoreBreakdown) -> Self {
        Self {
            task,
            total_score: score_breakdown.total(),
            score_breakdown,
            rule_placement: String::new(),
            position: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.task.id
    }

    pub fn tags(&self) -> &Tags {
        &self.task.tags
    }

    pub fn complexity(&self) -> Complexity {
        self.task.complexity
    }

    pub fn category(&self) -> &str {
        &self.task.category
    }
}

/// Rewrite `position` to match slice order (1-based).
pub fn renumber(tasks: &mut [ScoredTask]) {
    for (idx, task) in tasks.iter_mut().enumerate() {
        task.position = idx + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_scores_and_weights() {
        assert_eq!(Level::Low.score(), -1);
        assert_eq!(Level::Medium.score(), 1);
        assert_eq!(Level::High.score(), 2);
        assert_eq!(Level::Low.weight(), 0);
        assert_eq!(Level::High.weight(), 2);
    }

    #[test]
    fn test_urgency_weight() {
        let task = Task::new("a", "Report", "work")
            .with_tags(Tags { urgent: true, ..Tags::default() })
            .with_importance(Level::High)
            .with_complexity(Level::Low);
        assert_eq!(task.urgency_weight(), 5);
    }

    #[test]
    fn test_task_deserializes_with_defaults() {
        let task: Task = serde_json::from_str(r#"{"id":"t1","tags":{"liked":true,"disliked":true}}"#).unwrap();
        assert!(task.tags.liked);
        assert!(task.tags.disliked);
        assert_eq!(task.complexity, Level::Medium);
        assert_eq!(task.importance, Level::Medium);
        assert_eq!(task.category, "");
    }

    #[test]
    fn test_tags_summary() {
        assert_eq!(Tags::default().summary(), "-");
        let tags = Tags { liked: true, quick: true, ..Tags::default() };
        assert_eq!(tags.summary(), "liked,quick");
    }

    #[test]
    fn test_renumber_is_contiguous() {
        let mut tasks: Vec<ScoredTask> = ["a", "b", "c"]
            .iter()
            .map(|id| ScoredTask::new(Task::new(*id, "", "x"), ScoreBreakdown::default()))
            .collect();
        renumber(&mut tasks);
        let positions: Vec<usize> = tasks.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }
}

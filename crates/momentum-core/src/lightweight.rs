//! Lightweight rule-placement engine.
//!
//! Secondary entry point over tasks that already carry a persisted score.
//! Scores are recomputed with the reduced formula (category + tags), written
//! back through a [`ScoreStore`], and the active tasks are placed in a single
//! pass:
//!
//! | Position | Rule                                                     |
//! |----------|----------------------------------------------------------|
//! | 1        | best `quick ∨ duration ≤ 20`                             |
//! | 2        | best `liked`                                             |
//! | 3        | best `urgent`, else best of any kind                     |
//! | rest     | score order, one good-ending candidate moved to the end  |
//!
//! No end-rule pass runs here; the good-ending set-aside plays that role.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::profile::{CategoryRating, RatingTable};
use crate::scoring::reduced_score;
use crate::sequencer::best_by;
use crate::storage::ScoreStore;
use crate::task::Tags;

/// Default duration (minutes) at or under which a task counts as short.
pub const DEFAULT_GOOD_ENDING_MAX_MINUTES: u32 = 20;

/// A task as persisted by the task store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTask {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub category: String,
    /// Last persisted score
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    /// Completed tasks are not part of the active list
    #[serde(default)]
    pub completed: bool,
}

impl PersistedTask {
    pub fn new(id: impl Into<String>, category: impl Into<String>, tags: Tags) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            tags,
            category: category.into(),
            score: 0,
            estimated_minutes: None,
            completed: false,
        }
    }

    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }
}

/// Tunables of the single-pass placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOptions {
    pub good_ending_max_minutes: u32,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            good_ending_max_minutes: DEFAULT_GOOD_ENDING_MAX_MINUTES,
        }
    }
}

impl RuleOptions {
    fn is_short(&self, task: &PersistedTask) -> bool {
        task.estimated_minutes
            .is_some_and(|minutes| minutes <= self.good_ending_max_minutes)
    }

    fn is_quick_start(&self, task: &PersistedTask) -> bool {
        task.tags.quick || self.is_short(task)
    }

    fn is_good_ending(&self, task: &PersistedTask) -> bool {
        task.tags.quick || task.tags.liked || self.is_short(task)
    }
}

/// One placed task of the lightweight ordering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RankedTask {
    pub id: String,
    pub position: usize,
    pub score: i32,
    /// Rule that placed the task
    pub rule: String,
}

/// Result of the secondary entry point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RankOutcome {
    /// No active tasks
    NothingToOrder,
    Ordered { tasks: Vec<RankedTask> },
}

/// Recompute every task's score with the reduced formula.
pub fn rescore(tasks: &[PersistedTask], ratings: &RatingTable) -> Vec<PersistedTask> {
    tasks
        .iter()
        .map(|task| PersistedTask {
            score: reduced_score(&task.tags, &task.category, ratings),
            ..task.clone()
        })
        .collect()
}

/// Move the lowest-scoring good-ending candidate to the end.
///
/// `rest` must already be in score order; lists of one or none are returned
/// unchanged.
pub fn set_aside_good_ending(mut rest: Vec<PersistedTask>, options: &RuleOptions) -> (Vec<PersistedTask>, bool) {
    if rest.len() < 2 {
        return (rest, false);
    }
    match rest.iter().rposition(|t| options.is_good_ending(t)) {
        Some(idx) => {
            let candidate = rest.remove(idx);
            rest.push(candidate);
            (rest, true)
        }
        None => (rest, false),
    }
}

/// Single-pass placement over already scored tasks.
pub fn place_by_rules(mut pool: Vec<PersistedTask>, options: &RuleOptions) -> Vec<RankedTask> {
    let mut placed: Vec<(PersistedTask, &'static str)> = Vec::with_capacity(pool.len());

    if let Some(idx) = best_by(&pool, |t| options.is_quick_start(t).then_some(t.score)) {
        placed.push((pool.remove(idx), "QuickStart"));
    }
    if let Some(idx) = best_by(&pool, |t| t.tags.liked.then_some(t.score)) {
        placed.push((pool.remove(idx), "LikedBoost"));
    }
    if let Some(idx) = best_by(&pool, |t| t.tags.urgent.then_some(t.score)) {
        placed.push((pool.remove(idx), "UrgentFocus"));
    } else if let Some(idx) = best_by(&pool, |t| Some(t.score)) {
        placed.push((pool.remove(idx), "TopScore"));
    }

    pool.sort_by_key(|t| std::cmp::Reverse(t.score));
    let (rest, set_aside) = set_aside_good_ending(pool, options);
    let rest_len = rest.len();
    for (idx, task) in rest.into_iter().enumerate() {
        let rule = if set_aside && idx + 1 == rest_len {
            "GoodEnding"
        } else {
            "ScoreOrder"
        };
        placed.push((task, rule));
    }

    placed
        .into_iter()
        .enumerate()
        .map(|(idx, (task, rule))| RankedTask {
            id: task.id,
            position: idx + 1,
            score: task.score,
            rule: rule.to_string(),
        })
        .collect()
}

/// Secondary entry point: rescore, persist, and order the active tasks.
///
/// # Errors
///
/// Returns the first error raised by `store`; nothing is retried.
pub fn rank_persisted(
    tasks: &[PersistedTask],
    ratings: &BTreeMap<String, CategoryRating>,
    options: &RuleOptions,
    store: &mut dyn ScoreStore,
) -> Result<RankOutcome> {
    let active: Vec<PersistedTask> = tasks.iter().filter(|t| !t.completed).cloned().collect();
    if active.is_empty() {
        tracing::info!("no active tasks to order");
        return Ok(RankOutcome::NothingToOrder);
    }

    let table = RatingTable::from_ratings(ratings);
    let rescored = rescore(&active, &table);

    let scored_at = Utc::now();
    for task in &rescored {
        store.save_score(&task.id, task.score, scored_at)?;
    }
    tracing::debug!(tasks = rescored.len(), "persisted recomputed scores");

    Ok(RankOutcome::Ordered {
        tasks: place_by_rules(rescored, options),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, StoreError};
    use crate::profile::RatingLevel;
    use crate::storage::MemoryScoreStore;
    use chrono::{DateTime, Utc};

    fn tags(liked: bool, urgent: bool, quick: bool) -> Tags {
        Tags { liked, urgent, quick, disliked: false }
    }

    fn ids(ranked: &[RankedTask]) -> Vec<&str> {
        ranked.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_quick_liked_urgent_plain_scenario() {
        let tasks = vec![
            PersistedTask::new("D", "misc", tags(false, false, false)),
            PersistedTask::new("C", "misc", tags(false, true, false)),
            PersistedTask::new("B", "misc", tags(true, false, false)),
            PersistedTask::new("A", "misc", tags(false, false, true)),
        ];
        let mut store = MemoryScoreStore::new();
        let outcome = rank_persisted(&tasks, &BTreeMap::new(), &RuleOptions::default(), &mut store).unwrap();

        let RankOutcome::Ordered { tasks: ranked } = outcome else {
            panic!("expected an ordering");
        };
        assert_eq!(ids(&ranked), vec!["A", "B", "C", "D"]);
        let rules: Vec<&str> = ranked.iter().map(|r| r.rule.as_str()).collect();
        assert_eq!(rules, vec!["QuickStart", "LikedBoost", "UrgentFocus", "ScoreOrder"]);
        let scores: Vec<i32> = ranked.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![2, 3, 1, 0]);
        assert_eq!(store.score("A"), Some(2));
        assert_eq!(store.score("D"), Some(0));
    }

    #[test]
    fn test_empty_active_list_is_nothing_to_order() {
        let mut done = PersistedTask::new("x", "misc", Tags::default());
        done.completed = true;
        let mut store = MemoryScoreStore::new();
        let outcome = rank_persisted(&[done], &BTreeMap::new(), &RuleOptions::default(), &mut store).unwrap();
        assert_eq!(outcome, RankOutcome::NothingToOrder);
        assert!(store.is_empty());
    }

    #[test]
    fn test_short_duration_counts_as_quick_start() {
        let pool = vec![
            PersistedTask::new("long", "x", Tags::default()).with_minutes(90),
            PersistedTask::new("short", "x", Tags::default()).with_minutes(20),
        ];
        let ranked = place_by_rules(pool, &RuleOptions::default());
        assert_eq!(ranked[0].id, "short");
        assert_eq!(ranked[0].rule, "QuickStart");
        assert_eq!(ranked[1].rule, "TopScore");
    }

    #[test]
    fn test_good_ending_candidate_moves_last() {
        let mut pool = vec![
            PersistedTask::new("q", "x", tags(false, false, true)),
            PersistedTask::new("l", "x", tags(true, false, false)),
            PersistedTask::new("u", "x", tags(false, true, false)),
            PersistedTask::new("easy", "x", tags(false, false, true)),
            PersistedTask::new("big", "x", Tags::default()),
            PersistedTask::new("small", "x", Tags::default()),
        ];
        pool[0].score = 7;
        pool[3].score = 9;
        pool[4].score = 5;
        pool[5].score = 4;
        let ranked = place_by_rules(pool, &RuleOptions::default());
        assert_eq!(ids(&ranked), vec!["easy", "l", "u", "big", "small", "q"]);
        assert_eq!(ranked[5].rule, "GoodEnding");
        assert_eq!(ranked[5].position, 6);
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let pool = vec![
            PersistedTask::new("first", "x", tags(false, true, false)),
            PersistedTask::new("second", "x", tags(false, true, false)),
            PersistedTask::new("third", "x", Tags::default()),
        ];
        let ranked = place_by_rules(pool, &RuleOptions::default());
        assert_eq!(ids(&ranked), vec!["first", "second", "third"]);
        assert_eq!(ranked[0].rule, "UrgentFocus");
        assert_eq!(ranked[1].rule, "ScoreOrder");
    }

    #[test]
    fn test_set_aside_is_noop_for_single_task() {
        let rest = vec![PersistedTask::new("q", "x", tags(false, false, true))];
        let (rest, moved) = set_aside_good_ending(rest, &RuleOptions::default());
        assert!(!moved);
        assert_eq!(rest.len(), 1);
    }

    #[test]
    fn test_rescore_uses_category_rating() {
        let mut ratings = BTreeMap::new();
        ratings.insert("music".to_string(), CategoryRating::Level(RatingLevel::Loved));
        ratings.insert("chores".to_string(), CategoryRating::Value(0.1));
        let table = RatingTable::from_ratings(&ratings);
        let mut stale = PersistedTask::new("m", "music", tags(true, false, false));
        stale.score = -40;
        let rescored = rescore(&[stale, PersistedTask::new("c", "chores", Tags::default())], &table);
        assert_eq!(rescored[0].score, 6);
        assert_eq!(rescored[1].score, -2);
    }

    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn save_score(&mut self, task_id: &str, _score: i32, _scored_at: DateTime<Utc>) -> Result<(), StoreError> {
            Err(StoreError::WriteFailed {
                task_id: task_id.to_string(),
                message: "disk full".to_string(),
            })
        }
    }

    #[test]
    fn test_store_failure_is_surfaced() {
        let tasks = vec![PersistedTask::new("a", "x", Tags::default())];
        let err = rank_persisted(&tasks, &BTreeMap::new(), &RuleOptions::default(), &mut FailingStore).unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::WriteFailed { .. })));
    }
}

//! Ordering strategies.
//!
//! A [`Sequencer`] turns a pool of scored tasks into a placed sequence. Two
//! strategies exist and the profile's start preference selects one:
//!
//! - [`QuickWinSequencer`]: four phases (momentum buffer, booster, early
//!   phase, alternation) that front-load easy and pleasant work
//! - [`EatTheFrogSequencer`]: category blocks of 3-4 tasks, heaviest
//!   category first
//!
//! Either way the [`end_rule`] pass runs afterwards.

pub mod eat_the_frog;
pub mod end_rule;
pub mod quick_win;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::{RatingTable, StartPreference};
use crate::random::RandomSource;
use crate::task::ScoredTask;

pub use eat_the_frog::EatTheFrogSequencer;
pub use end_rule::enforce_end_rule;
pub use quick_win::QuickWinSequencer;

/// Strategy actually used for a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    QuickWin,
    EatTheFrog,
}

impl Strategy {
    /// Strategy selector: one strategy per start preference.
    pub fn select(preference: StartPreference) -> Self {
        match preference {
            StartPreference::QuickWin => Strategy::QuickWin,
            StartPreference::EatTheFrog => Strategy::EatTheFrog,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::QuickWin => "quickWin",
            Strategy::EatTheFrog => "eatTheFrog",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Places every task of a pool.
///
/// Implementations must return a permutation of `pool` with `position` set
/// to `1..=N` and `rule_placement` filled in.
pub trait Sequencer {
    fn sequence(
        &self,
        pool: Vec<ScoredTask>,
        ratings: &RatingTable,
        rng: &mut dyn RandomSource,
    ) -> Vec<ScoredTask>;
}

/// Index of the first entry with the greatest key; entries mapping to `None`
/// are skipped. Ties resolve to the earlier pool entry.
pub(crate) fn best_by<T, K, F>(pool: &[T], mut key: F) -> Option<usize>
where
    K: Ord,
    F: FnMut(&T) -> Option<K>,
{
    let mut best: Option<(usize, K)> = None;
    for (idx, task) in pool.iter().enumerate() {
        let Some(candidate) = key(task) else {
            continue;
        };
        match &best {
            Some((_, current)) if *current >= candidate => {}
            _ => best = Some((idx, candidate)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Highest-scoring task matching `pred`.
pub(crate) fn best_matching<F>(pool: &[ScoredTask], mut pred: F) -> Option<usize>
where
    F: FnMut(&ScoredTask) -> bool,
{
    best_by(pool, |task| pred(task).then_some(task.total_score))
}

/// Move `pool[idx]` to the end of `placed` under `label`.
pub(crate) fn place(pool: &mut Vec<ScoredTask>, idx: usize, label: String, placed: &mut Vec<ScoredTask>) {
    let mut task = pool.remove(idx);
    task.rule_placement = label;
    placed.push(task);
}

//! QuickWin sequencer.
//!
//! Phases run strictly in this order over the shrinking pool:
//!
//! | Phase            | Positions | Rule                                              |
//! |------------------|-----------|---------------------------------------------------|
//! | MomentumBuffer   | 1-2       | quick ∧ low, filled from liked ∧ ≤medium          |
//! | Booster          | 3         | best liked, else best quick-or-Neutral            |
//! | EarlyPhase       | 4-5       | (quick ∨ liked) first, then adjusted score        |
//! | AlternationPhase | 6+        | forced liked after two non-liked, else bundle/best |

use crate::profile::RatingTable;
use crate::random::RandomSource;
use crate::task::{renumber, Level, ScoredTask};

use super::{best_by, best_matching, place, Sequencer};

/// Default probability of bundling with the previous task's category.
pub const DEFAULT_BUNDLING_PROBABILITY: f64 = 0.3;

const BUFFER_SLOTS: usize = 2;
const EARLY_SLOTS: usize = 2;
const MAX_NON_LIKED_STREAK: usize = 2;

/// Momentum-oriented four-phase sequencer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickWinSequencer {
    pub bundling_probability: f64,
}

impl Default for QuickWinSequencer {
    fn default() -> Self {
        Self {
            bundling_probability: DEFAULT_BUNDLING_PROBABILITY,
        }
    }
}

impl QuickWinSequencer {
    pub fn new(bundling_probability: f64) -> Self {
        Self { bundling_probability }
    }
}

impl Sequencer for QuickWinSequencer {
    fn sequence(
        &self,
        mut pool: Vec<ScoredTask>,
        ratings: &RatingTable,
        rng: &mut dyn RandomSource,
    ) -> Vec<ScoredTask> {
        let mut placed = Vec::with_capacity(pool.len());

        momentum_buffer(&mut pool, &mut placed);
        booster(&mut pool, &mut placed, ratings);
        early_phase(&mut pool, &mut placed);
        alternation_phase(&mut pool, &mut placed, self.bundling_probability, rng);

        renumber(&mut placed);
        placed
    }
}

/// Positions 1-2: quick low-complexity tasks, topped up with liked easy ones.
fn momentum_buffer(pool: &mut Vec<ScoredTask>, placed: &mut Vec<ScoredTask>) {
    let mut slot = 1;
    while slot <= BUFFER_SLOTS {
        let Some(idx) = best_matching(pool, |t| t.tags().quick && t.complexity() == Level::Low) else {
            break;
        };
        place(pool, idx, format!("MomentumBuffer ({slot})"), placed);
        slot += 1;
    }

    while slot <= BUFFER_SLOTS {
        let Some(idx) = best_matching(pool, |t| t.tags().liked && t.complexity() <= Level::Medium) else {
            break;
        };
        place(pool, idx, format!("MomentumBuffer Fill ({slot})"), placed);
        slot += 1;
    }

    tracing::debug!(placed = slot - 1, "momentum buffer filled");
}

/// Position 3: a liked task, or failing that something quick or neutral.
fn booster(pool: &mut Vec<ScoredTask>, placed: &mut Vec<ScoredTask>, ratings: &RatingTable) {
    let idx = best_matching(pool, |t| t.tags().liked)
        .or_else(|| best_matching(pool, |t| t.tags().quick || ratings.is_neutral(t.category())));

    if let Some(idx) = idx {
        tracing::debug!(task = %pool[idx].id(), "booster selected");
        place(pool, idx, "Booster".to_string(), placed);
    }
}

/// Early-phase score: disliked hard tasks lose a point.
fn adjusted_score(task: &ScoredTask) -> i32 {
    if task.tags().disliked && task.complexity() == Level::High {
        task.total_score - 1
    } else {
        task.total_score
    }
}

/// Positions 4-5: easy starts first, then by adjusted score.
fn early_phase(pool: &mut Vec<ScoredTask>, placed: &mut Vec<ScoredTask>) {
    for slot in 1..=EARLY_SLOTS {
        let Some(idx) = best_by(pool, |t| Some((t.task.is_easy_start(), adjusted_score(t)))) else {
            break;
        };
        place(pool, idx, format!("EarlyPhase ({slot})"), placed);
    }
}

/// Positions 6+: alternate toward liked work, sometimes staying in category.
fn alternation_phase(
    pool: &mut Vec<ScoredTask>,
    placed: &mut Vec<ScoredTask>,
    bundling_probability: f64,
    rng: &mut dyn RandomSource,
) {
    let mut non_liked_streak = 0usize;
    let mut last_category: Option<String> = placed.last().map(|t| t.category().to_string());
    let mut pick = 1;

    while !pool.is_empty() {
        let forced = if non_liked_streak >= MAX_NON_LIKED_STREAK {
            best_matching(pool, |t| t.tags().liked)
        } else {
            None
        };

        let idx = match forced {
            Some(idx) => idx,
            None => {
                let bundled = if rng.chance(bundling_probability) {
                    last_category
                        .as_deref()
                        .and_then(|category| best_matching(pool, |t| t.category() == category))
                } else {
                    None
                };
                match bundled.or_else(|| best_matching(pool, |_| true)) {
                    Some(idx) => idx,
                    None => break,
                }
            }
        };

        let task = &pool[idx];
        if task.tags().liked {
            non_liked_streak = 0;
        } else {
            non_liked_streak += 1;
        }
        last_category = Some(task.category().to_string());

        place(pool, idx, format!("AlternationPhase ({pick})"), placed);
        pick += 1;
    }
}

//! EatTheFrog sequencer.
//!
//! Tasks are grouped by category. Each group is sorted by its local urgency
//! weight (`urgent ? 3 : 0` plus importance and complexity weights), and the
//! groups are visited round-robin, heaviest average score first, taking a
//! block of 3-4 tasks per visit.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::profile::RatingTable;
use crate::random::RandomSource;
use crate::task::{renumber, ScoredTask};

use super::Sequencer;

pub const DEFAULT_BLOCK_MIN: usize = 3;
pub const DEFAULT_BLOCK_MAX: usize = 4;

/// Category-bundling sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EatTheFrogSequencer {
    pub block_min: usize,
    pub block_max: usize,
}

impl Default for EatTheFrogSequencer {
    fn default() -> Self {
        Self {
            block_min: DEFAULT_BLOCK_MIN,
            block_max: DEFAULT_BLOCK_MAX,
        }
    }
}

impl EatTheFrogSequencer {
    pub fn new(block_min: usize, block_max: usize) -> Self {
        Self { block_min, block_max }
    }
}

struct CategoryBlock {
    name: String,
    tasks: VecDeque<ScoredTask>,
    score_sum: i64,
    taken: usize,
}

impl CategoryBlock {
    /// Compare average scores without floating point: a/n > b/m ⇔ a·m > b·n.
    fn cmp_average(&self, other: &CategoryBlock) -> Ordering {
        let lhs = self.score_sum * other.tasks.len() as i64;
        let rhs = other.score_sum * self.tasks.len() as i64;
        lhs.cmp(&rhs)
    }
}

/// Group by category in first-appearance order, each group urgency-sorted.
fn group_by_category(pool: Vec<ScoredTask>) -> Vec<CategoryBlock> {
    let mut blocks: Vec<CategoryBlock> = Vec::new();
    for task in pool {
        let score = i64::from(task.total_score);
        match blocks.iter().position(|b| b.name == task.category()) {
            Some(idx) => {
                blocks[idx].score_sum += score;
                blocks[idx].tasks.push_back(task);
            }
            None => blocks.push(CategoryBlock {
                name: task.category().to_string(),
                score_sum: score,
                tasks: VecDeque::from([task]),
                taken: 0,
            }),
        }
    }

    for block in &mut blocks {
        block
            .tasks
            .make_contiguous()
            .sort_by_key(|t| std::cmp::Reverse(t.task.urgency_weight()));
    }
    blocks.sort_by(|a, b| b.cmp_average(a));
    blocks
}

impl Sequencer for EatTheFrogSequencer {
    fn sequence(
        &self,
        pool: Vec<ScoredTask>,
        _ratings: &RatingTable,
        rng: &mut dyn RandomSource,
    ) -> Vec<ScoredTask> {
        let total = pool.len();
        let mut blocks = group_by_category(pool);
        let mut placed = Vec::with_capacity(total);
        let block_min = self.block_min.max(1);
        let block_max = self.block_max.max(block_min);

        tracing::debug!(
            categories = blocks.len(),
            order = ?blocks.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
            "category blocks ordered"
        );

        let mut current = 0;
        while placed.len() < total {
            let block = &mut blocks[current];
            if !block.tasks.is_empty() {
                let take = rng.block_len(block_min, block_max);
                for _ in 0..take {
                    let Some(mut task) = block.tasks.pop_front() else {
                        break;
                    };
                    block.taken += 1;
                    task.rule_placement = format!("EatTheFrog-{} ({})", block.name, block.taken);
                    placed.push(task);
                }
            }
            current = (current + 1) % blocks.len();
        }

        renumber(&mut placed);
        placed
    }
}

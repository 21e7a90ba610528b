//! Profile-driven ordering entry point.
//!
//! Pipeline: score every task → select a strategy → sequence → end rule.
//! The whole run is in memory; nothing is retained between calls. Category
//! ratings are resolved once per call into a [`RatingTable`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::profile::{RatingTable, UserProfile};
use crate::random::{RandomSource, RngSource};
use crate::scoring::score_task;
use crate::sequencer::eat_the_frog::{DEFAULT_BLOCK_MAX, DEFAULT_BLOCK_MIN};
use crate::sequencer::quick_win::DEFAULT_BUNDLING_PROBABILITY;
use crate::sequencer::{enforce_end_rule, EatTheFrogSequencer, QuickWinSequencer, Sequencer, Strategy};
use crate::task::{ScoredTask, Task};

/// Tunables of the two random decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Chance that the alternation phase stays in the previous category
    pub bundling_probability: f64,
    /// Smallest EatTheFrog block
    pub block_min: usize,
    /// Largest EatTheFrog block
    pub block_max: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            bundling_probability: DEFAULT_BUNDLING_PROBABILITY,
            block_min: DEFAULT_BLOCK_MIN,
            block_max: DEFAULT_BLOCK_MAX,
        }
    }
}

impl EngineOptions {
    fn sequencer(&self, strategy: Strategy) -> Box<dyn Sequencer> {
        match strategy {
            Strategy::QuickWin => Box::new(QuickWinSequencer::new(self.bundling_probability)),
            Strategy::EatTheFrog => Box::new(EatTheFrogSequencer::new(self.block_min, self.block_max)),
        }
    }
}

/// Primary request: tasks plus the acting user's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub profile: UserProfile,
}

impl OrderRequest {
    pub fn new(tasks: Vec<Task>, profile: UserProfile) -> Self {
        Self { tasks, profile }
    }

    /// Ids must be non-empty and unique; the engine treats them as opaque keys.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(self.tasks.len());
        for task in &self.tasks {
            if task.id.is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: "id".to_string(),
                    message: format!("task {:?} has an empty id", task.text),
                });
            }
            if !seen.insert(task.id.as_str()) {
                return Err(ValidationError::DuplicateId(task.id.clone()));
            }
        }
        Ok(())
    }
}

/// Primary response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub ordered_tasks: Vec<ScoredTask>,
    pub strategy_used: Strategy,
}

/// Score every task against the profile, in input order.
pub fn score_all(tasks: &[Task], profile: &UserProfile, ratings: &RatingTable) -> Vec<ScoredTask> {
    tasks
        .iter()
        .map(|task| ScoredTask::new(task.clone(), score_task(task, profile, ratings)))
        .collect()
}

/// Fully parameterized ordering.
pub fn order_tasks_with(
    request: &OrderRequest,
    options: &EngineOptions,
    rng: &mut dyn RandomSource,
) -> OrderResponse {
    let strategy = Strategy::select(request.profile.start_preference);
    let ratings = request.profile.rating_table();
    let scored = score_all(&request.tasks, &request.profile, &ratings);

    tracing::debug!(
        tasks = scored.len(),
        strategy = %strategy,
        energy = %request.profile.energy_state,
        "ordering tasks"
    );

    let mut ordered = options.sequencer(strategy).sequence(scored, &ratings, rng);
    enforce_end_rule(&mut ordered, &ratings);

    OrderResponse {
        ordered_tasks: ordered,
        strategy_used: strategy,
    }
}

/// Ordering with the default 30% bundling chance and 3-4 task blocks.
pub fn order_tasks(request: &OrderRequest, rng: &mut dyn RandomSource) -> OrderResponse {
    order_tasks_with(request, &EngineOptions::default(), rng)
}

/// Reproducible ordering from a seed.
pub fn order_tasks_seeded(request: &OrderRequest, seed: u64) -> OrderResponse {
    let mut rng = RngSource::seeded(seed);
    order_tasks(request, &mut rng)
}

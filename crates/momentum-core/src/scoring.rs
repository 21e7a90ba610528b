//! Integer task scoring model.
//!
//! The full profile-driven score is the sum of five additive terms:
//!
//! ```text
//! total = category + complexity + importance + tags + energy
//! ```
//!
//! | Term       | Rule                                                        |
//! |------------|-------------------------------------------------------------|
//! | category   | Loved +3, Neutral 0, Disliked −2                            |
//! | complexity | low −1, medium +1, high +2                                  |
//! | importance | low −1, medium +1, high +2                                  |
//! | tags       | per-strategy [`TagWeights`]                                 |
//! | energy     | low: quick +1, liked +1, high complexity −2 (QuickWin) / −1 |
//! |            | high: urgent +1, high complexity +1                         |
//!
//! The persisted-score path uses only the category and tag terms with
//! [`TagWeights::REDUCED`]. Both paths go through [`preference_score`].

use serde::{Deserialize, Serialize};

use crate::profile::{EnergyState, RatingTable, StartPreference, UserProfile};
use crate::task::{Level, Tags, Task};

/// Additive weight of each tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagWeights {
    pub liked: i32,
    pub quick: i32,
    pub urgent: i32,
    pub disliked: i32,
}

impl TagWeights {
    /// Momentum-oriented weights.
    pub const QUICK_WIN: TagWeights = TagWeights {
        liked: 3,
        quick: 2,
        urgent: 1,
        disliked: -3,
    };

    /// Urgency-oriented weights.
    pub const EAT_THE_FROG: TagWeights = TagWeights {
        liked: 2,
        quick: 1,
        urgent: 3,
        disliked: -2,
    };

    /// Weights of the persisted-score formula; `disliked` does not count.
    pub const REDUCED: TagWeights = TagWeights {
        liked: 3,
        quick: 2,
        urgent: 1,
        disliked: 0,
    };

    pub fn for_preference(preference: StartPreference) -> Self {
        match preference {
            StartPreference::QuickWin => Self::QUICK_WIN,
            StartPreference::EatTheFrog => Self::EAT_THE_FROG,
        }
    }

    /// Sum of the weights of every tag set on `tags`.
    pub fn apply(&self, tags: &Tags) -> i32 {
        let mut score = 0;
        if tags.liked {
            score += self.liked;
        }
        if tags.quick {
            score += self.quick;
        }
        if tags.urgent {
            score += self.urgent;
        }
        if tags.disliked {
            score += self.disliked;
        }
        score
    }
}

/// Explainable score split into its five additive terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub category_score: i32,
    pub complexity_score: i32,
    pub importance_score: i32,
    pub tag_score: i32,
    pub energy_adjust: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        self.category_score
            + self.complexity_score
            + self.importance_score
            + self.tag_score
            + self.energy_adjust
    }
}

/// Shared category + tag primitive: returns `(category_score, tag_score)`.
pub fn preference_score(
    tags: &Tags,
    category: &str,
    ratings: &RatingTable,
    weights: &TagWeights,
) -> (i32, i32) {
    (ratings.level_for(category).score(), weights.apply(tags))
}

/// Energy adjustment for a task under the given profile.
pub fn energy_adjust(task: &Task, profile: &UserProfile) -> i32 {
    let high_complexity = task.complexity == Level::High;
    match profile.energy_state {
        EnergyState::Low => {
            let mut adjust = 0;
            if task.tags.quick {
                adjust += 1;
            }
            if task.tags.liked {
                adjust += 1;
            }
            if high_complexity {
                adjust -= match profile.start_preference {
                    StartPreference::QuickWin => 2,
                    StartPreference::EatTheFrog => 1,
                };
            }
            adjust
        }
        EnergyState::High => {
            let mut adjust = 0;
            if task.tags.urgent {
                adjust += 1;
            }
            if high_complexity {
                adjust += 1;
            }
            adjust
        }
    }
}

/// Full profile-driven score of one task.
pub fn score_task(task: &Task, profile: &UserProfile, ratings: &RatingTable) -> ScoreBreakdown {
    let weights = TagWeights::for_preference(profile.start_preference);
    let (category_score, tag_score) = preference_score(&task.tags, &task.category, ratings, &weights);

    ScoreBreakdown {
        category_score,
        complexity_score: task.complexity.score(),
        importance_score: task.importance.score(),
        tag_score,
        energy_adjust: energy_adjust(task, profile),
    }
}

/// Reduced score used by the persisted-score path.
pub fn reduced_score(tags: &Tags, category: &str, ratings: &RatingTable) -> i32 {
    let (category_score, tag_score) = preference_score(tags, category, ratings, &TagWeights::REDUCED);
    category_score + tag_score
}

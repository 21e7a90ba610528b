//! User profile and category ratings.
//!
//! Ratings arrive either as a label (`Loved`, `Neutral`, `Disliked`) or as a
//! number in [0, 1]. Anything else is a malformed rating: it resolves to
//! Neutral and is reported once per invocation as a recoverable anomaly.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Rating value assumed for categories the profile does not mention.
pub const DEFAULT_RATING_VALUE: f64 = 0.7;

/// Which ordering strategy the user prefers to start the day with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum StartPreference {
    /// Build momentum with small, pleasant tasks first
    QuickWin,
    /// Tackle the heaviest category blocks first
    EatTheFrog,
}

impl StartPreference {
    pub fn name(self) -> &'static str {
        match self {
            StartPreference::QuickWin => "quickWin",
            StartPreference::EatTheFrog => "eatTheFrog",
        }
    }
}

impl Default for StartPreference {
    fn default() -> Self {
        StartPreference::QuickWin
    }
}

impl fmt::Display for StartPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Self-reported energy for the session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnergyState {
    Low,
    High,
}

impl Default for EnergyState {
    fn default() -> Self {
        EnergyState::High
    }
}

impl fmt::Display for EnergyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyState::Low => f.write_str("low"),
            EnergyState::High => f.write_str("high"),
        }
    }
}

/// Resolved three-way category preference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RatingLevel {
    #[serde(alias = "loved", alias = "LOVED")]
    Loved,
    #[serde(alias = "neutral", alias = "NEUTRAL")]
    Neutral,
    #[serde(alias = "disliked", alias = "DISLIKED")]
    Disliked,
}

impl RatingLevel {
    /// Bucket a numeric rating: ≥0.8 loved, ≥0.5 neutral, else disliked.
    pub fn from_value(value: f64) -> Self {
        if value >= 0.8 {
            RatingLevel::Loved
        } else if value >= 0.5 {
            RatingLevel::Neutral
        } else {
            RatingLevel::Disliked
        }
    }

    /// Additive category term: loved +3, neutral 0, disliked −2.
    pub fn score(self) -> i32 {
        match self {
            RatingLevel::Loved => 3,
            RatingLevel::Neutral => 0,
            RatingLevel::Disliked => -2,
        }
    }
}

impl Default for RatingLevel {
    fn default() -> Self {
        RatingLevel::from_value(DEFAULT_RATING_VALUE)
    }
}

/// A category rating as written by the user or an upstream service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CategoryRating {
    Level(RatingLevel),
    Value(f64),
    /// Anything unrecognized; kept so the anomaly can be reported
    Malformed(serde_json::Value),
}

impl CategoryRating {
    /// `None` when the rating is malformed.
    pub fn resolve(&self) -> Option<RatingLevel> {
        match self {
            CategoryRating::Level(level) => Some(*level),
            CategoryRating::Value(value) if (0.0..=1.0).contains(value) => {
                Some(RatingLevel::from_value(*value))
            }
            CategoryRating::Value(_) | CategoryRating::Malformed(_) => None,
        }
    }

    pub fn level(&self) -> RatingLevel {
        self.resolve().unwrap_or(RatingLevel::Neutral)
    }
}

impl From<RatingLevel> for CategoryRating {
    fn from(level: RatingLevel) -> Self {
        CategoryRating::Level(level)
    }
}

impl From<f64> for CategoryRating {
    fn from(value: f64) -> Self {
        CategoryRating::Value(value)
    }
}

/// Profile supplied with every ordering request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub start_preference: StartPreference,
    pub energy_state: EnergyState,
    pub category_ratings: BTreeMap<String, CategoryRating>,
}

impl UserProfile {
    pub fn new(start_preference: StartPreference, energy_state: EnergyState) -> Self {
        Self {
            start_preference,
            energy_state,
            category_ratings: BTreeMap::new(),
        }
    }

    pub fn with_rating(mut self, category: impl Into<String>, rating: impl Into<CategoryRating>) -> Self {
        self.category_ratings.insert(category.into(), rating.into());
        self
    }

    /// Resolve every rating once for this invocation.
    pub fn rating_table(&self) -> RatingTable {
        RatingTable::from_ratings(&self.category_ratings)
    }
}

/// Profile as it arrives on the wire, before defaults are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileInput {
    pub start_preference: Option<StartPreference>,
    pub energy_state: Option<EnergyState>,
    pub category_ratings: BTreeMap<String, CategoryRating>,
}

impl ProfileInput {
    /// Fill missing fields from the given fallbacks.
    pub fn into_profile(self, start_preference: StartPreference, energy_state: EnergyState) -> UserProfile {
        UserProfile {
            start_preference: self.start_preference.unwrap_or(start_preference),
            energy_state: self.energy_state.unwrap_or(energy_state),
            category_ratings: self.category_ratings,
        }
    }
}

/// Per-invocation memo of resolved category ratings.
///
/// Built fresh for every request; never shared between invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingTable {
    levels: BTreeMap<String, RatingLevel>,
}

impl RatingTable {
    pub fn from_ratings(ratings: &BTreeMap<String, CategoryRating>) -> Self {
        let levels = ratings
            .iter()
            .map(|(category, rating)| {
                let level = match rating.resolve() {
                    Some(level) => level,
                    None => {
                        tracing::warn!(
                            category = %category,
                            rating = ?rating,
                            "malformed category rating, treating as Neutral"
                        );
                        RatingLevel::Neutral
                    }
                };
                (category.clone(), level)
            })
            .collect();
        Self { levels }
    }

    /// Rating for a category; unknown categories fall back to the default value.
    pub fn level_for(&self, category: &str) -> RatingLevel {
        self.levels.get(category).copied().unwrap_or_default()
    }

    pub fn is_neutral(&self, category: &str) -> bool {
        self.level_for(category) == RatingLevel::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_thresholds() {
        assert_eq!(RatingLevel::from_value(0.8), RatingLevel::Loved);
        assert_eq!(RatingLevel::from_value(0.79), RatingLevel::Neutral);
        assert_eq!(RatingLevel::from_value(0.5), RatingLevel::Neutral);
        assert_eq!(RatingLevel::from_value(0.49), RatingLevel::Disliked);
        assert_eq!(RatingLevel::default(), RatingLevel::Neutral);
    }

    #[test]
    fn test_rating_deserializes_label_number_and_garbage() {
        let ratings: BTreeMap<String, CategoryRating> = serde_json::from_str(
            r#"{"work":"Loved","chores":0.2,"health":"meh","admin":1.7,"misc":"neutral"}"#,
        )
        .unwrap();
        let table = RatingTable::from_ratings(&ratings);
        assert_eq!(table.level_for("work"), RatingLevel::Loved);
        assert_eq!(table.level_for("chores"), RatingLevel::Disliked);
        assert_eq!(table.level_for("health"), RatingLevel::Neutral);
        assert_eq!(table.level_for("admin"), RatingLevel::Neutral);
        assert_eq!(table.level_for("misc"), RatingLevel::Neutral);
        assert_eq!(table.level_for("unknown"), RatingLevel::Neutral);
    }

    #[test]
    fn test_malformed_ratings_do_not_resolve() {
        assert_eq!(CategoryRating::Value(-0.1).resolve(), None);
        assert_eq!(CategoryRating::Malformed(serde_json::json!("meh")).resolve(), None);
        assert_eq!(CategoryRating::Value(f64::NAN).level(), RatingLevel::Neutral);
    }

    #[test]
    fn test_profile_defaults() {
        let profile: UserProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.start_preference, StartPreference::QuickWin);
        assert_eq!(profile.energy_state, EnergyState::High);
        assert!(profile.category_ratings.is_empty());
    }

    #[test]
    fn test_profile_input_applies_fallbacks_only_when_missing() {
        let input: ProfileInput = serde_json::from_str(r#"{"energyState":"low"}"#).unwrap();
        let profile = input.into_profile(StartPreference::EatTheFrog, EnergyState::High);
        assert_eq!(profile.start_preference, StartPreference::EatTheFrog);
        assert_eq!(profile.energy_state, EnergyState::Low);
    }

    #[test]
    fn test_start_preference_wire_names() {
        assert_eq!(serde_json::to_string(&StartPreference::EatTheFrog).unwrap(), "\"eatTheFrog\"");
        let pref: StartPreference = serde_json::from_str("\"quickWin\"").unwrap();
        assert_eq!(pref, StartPreference::QuickWin);
    }
}

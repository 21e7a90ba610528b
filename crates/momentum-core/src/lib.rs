//! # Momentum Core Library
//!
//! This library provides the task ordering engine behind Momentum. Given a set
//! of tagged tasks and a user profile it scores every task and emits a single
//! recommended working order. The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Scoring**: Integer score model with an explainable five-part breakdown
//! - **Sequencers**: QuickWin (phased momentum building) and EatTheFrog
//!   (category blocks), followed by the end-rule pass
//! - **Lightweight**: Single-pass placement over persisted scores
//! - **Storage**: TOML configuration and the score store collaborator
//!
//! ## Key Components
//!
//! - [`order_tasks`]: Profile-driven primary entry point
//! - [`rank_persisted`]: Persisted-score secondary entry point
//! - [`RandomSource`]: Injectable randomness for the two random decisions
//! - [`Config`]: Engine configuration management

pub mod engine;
pub mod error;
pub mod lightweight;
pub mod profile;
pub mod random;
pub mod scoring;
pub mod sequencer;
pub mod storage;
pub mod task;

pub use engine::{order_tasks, order_tasks_seeded, order_tasks_with, EngineOptions, OrderRequest, OrderResponse};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use lightweight::{rank_persisted, PersistedTask, RankOutcome, RankedTask, RuleOptions};
pub use profile::{CategoryRating, EnergyState, RatingLevel, RatingTable, StartPreference, UserProfile};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use scoring::{score_task, ScoreBreakdown, TagWeights};
pub use sequencer::Strategy;
pub use storage::{Config, MemoryScoreStore, ScoreStore};
pub use task::{Complexity, Importance, ScoredTask, Tags, Task};

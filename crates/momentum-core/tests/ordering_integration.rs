//! Integration tests for the profile-driven ordering pipeline.

use std::collections::BTreeSet;

use momentum_core::engine::score_all;
use momentum_core::sequencer::{EatTheFrogSequencer, QuickWinSequencer, Sequencer};
use momentum_core::task::Level;
use momentum_core::{
    order_tasks, order_tasks_seeded, order_tasks_with, EngineOptions, EnergyState, OrderRequest, RatingLevel,
    ScriptedSource, StartPreference, Strategy as OrderStrategy, Tags, Task, UserProfile,
};
use proptest::prelude::*;

const CATEGORIES: [&str; 4] = ["work", "home", "music", "admin"];

fn level_strategy() -> impl Strategy<Value = Level> {
    prop_oneof![Just(Level::Low), Just(Level::Medium), Just(Level::High)]
}

fn tags_strategy() -> impl Strategy<Value = Tags> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(liked, urgent, quick, disliked)| Tags {
        liked,
        urgent,
        quick,
        disliked,
    })
}

fn tasks_strategy() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(
        (level_strategy(), level_strategy(), tags_strategy(), 0..CATEGORIES.len()),
        0..14,
    )
    .prop_map(|rows| {
        rows
            .into_iter()
            .enumerate()
            .map(|(i, (complexity, importance, tags, cat))| {
                Task::new(format!("t{i}"), format!("task {i}"), CATEGORIES[cat])
                    .with_complexity(complexity)
                    .with_importance(importance)
                    .with_tags(tags)
            })
            .collect()
    })
}

fn profile_strategy() -> impl Strategy<Value = UserProfile> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(frog, low_energy, rate_music)| {
        let preference = if frog { StartPreference::EatTheFrog } else { StartPreference::QuickWin };
        let energy = if low_energy { EnergyState::Low } else { EnergyState::High };
        let profile = UserProfile::new(preference, energy);
        if rate_music {
            profile
                .with_rating("music", RatingLevel::Loved)
                .with_rating("admin", 0.1)
        } else {
            profile
        }
    })
}

proptest! {
    #[test]
    fn ordering_is_a_permutation_with_dense_positions(
        tasks in tasks_strategy(),
        profile in profile_strategy(),
        seed in any::<u64>(),
    ) {
        let request = OrderRequest::new(tasks.clone(), profile);
        let response = order_tasks_seeded(&request, seed);

        let input: BTreeSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        let output: BTreeSet<&str> = response.ordered_tasks.iter().map(|t| t.id()).collect();
        prop_assert_eq!(response.ordered_tasks.len(), tasks.len());
        prop_assert_eq!(input, output);
        for (idx, task) in response.ordered_tasks.iter().enumerate() {
            prop_assert_eq!(task.position, idx + 1);
            prop_assert_eq!(task.total_score, task.score_breakdown.total());
            prop_assert!(!task.rule_placement.is_empty());
        }
    }

    #[test]
    fn same_seed_gives_same_ordering(
        tasks in tasks_strategy(),
        profile in profile_strategy(),
        seed in any::<u64>(),
    ) {
        let request = OrderRequest::new(tasks, profile);
        prop_assert_eq!(order_tasks_seeded(&request, seed), order_tasks_seeded(&request, seed));
    }

    #[test]
    fn session_never_ends_on_hard_task_when_easy_finish_exists(
        tasks in tasks_strategy(),
        profile in profile_strategy(),
        seed in any::<u64>(),
    ) {
        let ratings = profile.rating_table();
        let request = OrderRequest::new(tasks, profile);
        let response = order_tasks_seeded(&request, seed);

        if let Some(last) = response.ordered_tasks.last() {
            if last.complexity() == Level::High {
                let easy_finish_exists = response.ordered_tasks.iter().any(|t| match t.complexity() {
                    Level::Low => true,
                    Level::Medium => ratings.is_neutral(t.category()),
                    Level::High => false,
                });
                prop_assert!(!easy_finish_exists);
            }
        }
    }

    #[test]
    fn quick_win_opens_with_quick_low_tasks(
        tasks in tasks_strategy(),
        seed in any::<u64>(),
    ) {
        let profile = UserProfile::new(StartPreference::QuickWin, EnergyState::High);
        let ratings = profile.rating_table();
        let momentum = tasks
            .iter()
            .filter(|t| t.tags.quick && t.complexity == Level::Low)
            .count();
        let scored = score_all(&tasks, &profile, &ratings);
        let mut rng = momentum_core::RngSource::seeded(seed);
        let placed = QuickWinSequencer::default().sequence(scored, &ratings, &mut rng);

        for task in placed.iter().take(momentum.min(2)) {
            prop_assert!(task.tags().quick && task.complexity() == Level::Low);
            prop_assert!(task.rule_placement.starts_with("MomentumBuffer ("));
        }
    }

    #[test]
    fn eat_the_frog_keeps_urgency_order_within_category(
        tasks in tasks_strategy(),
        seed in any::<u64>(),
    ) {
        let profile = UserProfile::new(StartPreference::EatTheFrog, EnergyState::High);
        let ratings = profile.rating_table();
        let scored = score_all(&tasks, &profile, &ratings);
        let mut rng = momentum_core::RngSource::seeded(seed);
        let placed = EatTheFrogSequencer::default().sequence(scored, &ratings, &mut rng);

        for category in CATEGORIES {
            let weights: Vec<i32> = placed
                .iter()
                .filter(|t| t.category() == category)
                .map(|t| t.task.urgency_weight())
                .collect();
            prop_assert!(weights.windows(2).all(|w| w[0] >= w[1]));
        }
    }
}

#[test]
fn test_six_task_quick_win_session() {
    let plain = Tags::default();
    let tasks = vec![
        Task::new("plain-1", "Laundry", "home"),
        Task::new("hard", "Quarterly report", "work")
            .with_complexity(Level::High)
            .with_tags(Tags { urgent: true, ..plain }),
        Task::new("plain-2", "Dishes", "home"),
        Task::new("liked", "Practice piano", "music").with_tags(Tags { liked: true, ..plain }),
        Task::new("plain-3", "Vacuum", "home"),
        Task::new("quick", "Reply to email", "admin")
            .with_complexity(Level::Low)
            .with_tags(Tags { quick: true, ..plain }),
    ];
    let request = OrderRequest::new(tasks, UserProfile::default());
    let response = order_tasks(&request, &mut ScriptedSource::never());

    let ids: Vec<&str> = response.ordered_tasks.iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec!["quick", "liked", "hard", "plain-1", "plain-2", "plain-3"]);
    assert_eq!(response.strategy_used, OrderStrategy::QuickWin);
    let rules: Vec<&str> = response
        .ordered_tasks
        .iter()
        .map(|t| t.rule_placement.as_str())
        .collect();
    assert_eq!(
        rules,
        vec![
            "MomentumBuffer (1)",
            "MomentumBuffer Fill (2)",
            "Booster",
            "EarlyPhase (1)",
            "EarlyPhase (2)",
            "AlternationPhase (1)",
        ]
    );
}

#[test]
fn test_eat_the_frog_groups_categories_in_blocks() {
    let mut tasks: Vec<Task> = (0..4)
        .map(|i| Task::new(format!("light-{i}"), "Tidy", "light").with_complexity(Level::Low))
        .collect();
    tasks.extend((0..4).map(|i| {
        Task::new(format!("heavy-{i}"), "Design", "heavy")
            .with_complexity(Level::High)
            .with_tags(Tags { urgent: true, ..Tags::default() })
    }));
    let request = OrderRequest::new(tasks, UserProfile::new(StartPreference::EatTheFrog, EnergyState::High));
    let options = EngineOptions {
        block_min: 4,
        block_max: 4,
        ..EngineOptions::default()
    };
    let response = order_tasks_with(&request, &options, &mut ScriptedSource::never());

    let categories: Vec<&str> = response.ordered_tasks.iter().map(|t| t.category()).collect();
    assert_eq!(
        categories,
        vec!["heavy", "heavy", "heavy", "heavy", "light", "light", "light", "light"]
    );
    assert_eq!(response.strategy_used, OrderStrategy::EatTheFrog);
    assert_eq!(response.ordered_tasks[4].rule_placement, "EatTheFrog-light (1)");
}

#[test]
fn test_request_json_roundtrip_through_engine() {
    let json = r#"{
        "tasks": [
            {"id": "a", "text": "Stretch", "complexity": "low", "tags": {"quick": true}},
            {"id": "b", "text": "Tax forms", "category": "admin"}
        ],
        "profile": {"energyState": "low", "categoryRatings": {"admin": "DISLIKED"}}
    }"#;
    let request: OrderRequest = serde_json::from_str(json).unwrap();
    request.validate().unwrap();
    let response = order_tasks_seeded(&request, 7);

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["strategyUsed"], "quickWin");
    assert_eq!(value["orderedTasks"][0]["id"], "a");
    assert_eq!(value["orderedTasks"][0]["rulePlacement"], "MomentumBuffer (1)");
    assert_eq!(value["orderedTasks"][1]["id"], "b");
    assert_eq!(value["orderedTasks"][1]["position"], 2);
    assert_eq!(value["orderedTasks"][1]["scoreBreakdown"]["categoryScore"], -2);
}

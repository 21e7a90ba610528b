use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use momentum_core::{rank_persisted, CategoryRating, Config, MemoryScoreStore, PersistedTask, RankOutcome, ScoreStore};
use serde_json::Value;

use super::store::JsonFileStore;

#[derive(Args)]
pub struct RankArgs {
    /// JSON array of persisted tasks
    #[arg(short, long)]
    input: PathBuf,
    /// JSON object mapping category to rating
    #[arg(long)]
    ratings: Option<PathBuf>,
    /// Persist recomputed scores into the input file
    #[arg(long)]
    write_back: bool,
    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: RankArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let raw: Vec<Value> = serde_json::from_str(&std::fs::read_to_string(&args.input)?)?;
    let tasks: Vec<PersistedTask> = serde_json::from_value(Value::Array(raw.clone()))?;
    let ratings: BTreeMap<String, CategoryRating> = match &args.ratings {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => BTreeMap::new(),
    };

    let mut file_store;
    let mut memory_store;
    let store: &mut dyn ScoreStore = if args.write_back {
        file_store = JsonFileStore::new(&args.input, raw);
        &mut file_store
    } else {
        memory_store = MemoryScoreStore::new();
        &mut memory_store
    };

    let outcome = rank_persisted(&tasks, &ratings, &config.rule_options(), store)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        RankOutcome::NothingToOrder => println!("Nothing to order."),
        RankOutcome::Ordered { tasks: ranked } => {
            for task in &ranked {
                println!("{:>3}. {:<24} {:>4}  {}", task.position, task.id, task.score, task.rule);
            }
            if args.write_back {
                println!("Scores written to {}", args.input.display());
            }
        }
    }
    Ok(())
}

use clap::Args;
use momentum_core::{order_tasks_with, Config, OrderResponse, RngSource};

use super::{parse_order_request, read_input};

#[derive(Args)]
pub struct OrderArgs {
    /// Request file with `tasks` and `profile`, or `-` for stdin
    #[arg(short, long)]
    input: String,
    /// Seed for reproducible orderings (overrides `engine.seed`)
    #[arg(long)]
    seed: Option<u64>,
    /// Print the full response as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: OrderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let request = parse_order_request(&read_input(&args.input)?, &config)?;

    let seed = args.seed.or(config.engine.seed);
    let mut rng = RngSource::from_seed_option(seed);
    let response = order_tasks_with(&request, &config.engine_options(), &mut rng);
    tracing::info!(
        tasks = response.ordered_tasks.len(),
        strategy = %response.strategy_used,
        seeded = seed.is_some(),
        "ordered tasks"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_table(&response);
    }
    Ok(())
}

fn print_table(response: &OrderResponse) {
    println!("Strategy: {}", response.strategy_used);
    if response.ordered_tasks.is_empty() {
        println!("No tasks to order.");
        return;
    }
    for task in &response.ordered_tasks {
        let label = if task.task.text.is_empty() {
            task.id()
        } else {
            task.task.text.as_str()
        };
        println!(
            "{:>3}. {:<32} {:>4}  {:<22} {}",
            task.position,
            label,
            task.total_score,
            task.tags().summary(),
            task.rule_placement
        );
    }
}

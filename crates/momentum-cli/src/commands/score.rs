use clap::Args;
use momentum_core::engine::score_all;
use momentum_core::Config;

use super::{parse_order_request, read_input};

#[derive(Args)]
pub struct ScoreArgs {
    /// Request file with `tasks` and `profile`, or `-` for stdin
    #[arg(short, long)]
    input: String,
    /// Print breakdowns as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let request = parse_order_request(&read_input(&args.input)?, &config)?;
    let ratings = request.profile.rating_table();
    let scored = score_all(&request.tasks, &request.profile, &ratings);

    if args.json {
        let rows: Vec<serde_json::Value> = scored
            .iter()
            .map(|t| {
                serde_json::json!({
                    "id": t.id(),
                    "totalScore": t.total_score,
                    "scoreBreakdown": t.score_breakdown,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<16} {:>5} {:>8} {:>10} {:>10} {:>4} {:>6}",
        "ID", "TOTAL", "CATEGORY", "COMPLEXITY", "IMPORTANCE", "TAGS", "ENERGY"
    );
    for task in &scored {
        let b = &task.score_breakdown;
        println!(
            "{:<16} {:>5} {:>8} {:>10} {:>10} {:>4} {:>6}",
            task.id(),
            task.total_score,
            b.category_score,
            b.complexity_score,
            b.importance_score,
            b.tag_score,
            b.energy_adjust
        );
    }
    Ok(())
}

use std::path::PathBuf;

use clap::Parser;

use defuse_bench::config::{BenchmarkConfig, ResolvedOutputs};
use defuse_bench::logging::init_logging;
use defuse_bench::runner::GameRunner;
use defuse_bot::BotParams;

/// Self-play benchmarking harness for the wire-cutting bot.
#[derive(Debug, Parser)]
#[command(
    name = "defuse-bench",
    author,
    version,
    about = "Deterministic self-play harness for the defuse bot"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for game generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.games.count;
    let players = config.table.players;

    println!(
        "Loaded configuration '{run_id}' with {players} seats ({games} game{})",
        if games == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = GameRunner::new(config, outputs, BotParams::from_env())?;

    if cli.validate_only {
        println!("Validation-only mode: self-play skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Self-play complete for '{run_id}': {} games → {} rows at {}",
        summary.games_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!(
        "  Defused {} / exploded {} / stalled {}",
        summary.analytics.defused, summary.analytics.exploded, summary.analytics.stalled
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}

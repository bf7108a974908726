use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fleet_control::{strategic_tips, AutopilotController, OrderSource};
use fleet_core::{
    compute_metrics, create_initial_state, evaluate_game_status, step_turn, write_metrics_csv,
    EventKind, GameState, MetricsSnapshot, Outcome, OutcomeStats,
};
use fleet_world::load_content_or_standard;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "fleet_cli", about = "Satellite fleet operations CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game with the autopilot until it is decided or --turns run out.
    Run {
        #[arg(long, default_value_t = 20)]
        turns: u64,
        /// Start a new game seeded with this value. Mutually exclusive with --state.
        #[arg(long, conflicts_with = "state_file")]
        seed: Option<u64>,
        /// Resume a saved GameState JSON file. Mutually exclusive with --seed.
        #[arg(long = "state", conflicts_with = "seed")]
        state_file: Option<PathBuf>,
        #[arg(long, default_value = "./content")]
        content_dir: PathBuf,
        #[arg(long, default_value_t = 65_000)]
        budget: i64,
        #[arg(long, default_value_t = 4)]
        satellites: i64,
        #[arg(long, default_value_t = 1)]
        print_every: u64,
        /// Write one metrics row per turn to this CSV file.
        #[arg(long)]
        metrics: Option<PathBuf>,
        /// Write the final GameState to this JSON file.
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

struct RunArgs {
    turns: u64,
    seed: Option<u64>,
    state_file: Option<PathBuf>,
    content_dir: PathBuf,
    budget: i64,
    satellites: i64,
    print_every: u64,
    metrics: Option<PathBuf>,
    save: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

fn load_state(path: &Path) -> Result<(GameState, ChaCha8Rng)> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading state file: {}", path.display()))?;
    let state: GameState = serde_json::from_str(&json)
        .with_context(|| format!("parsing state file: {}", path.display()))?;
    // Resumed games draw from a stream keyed by game id and turn.
    #[allow(clippy::cast_possible_truncation)]
    let rng_seed = (state.meta.id.0.as_u128() as u64) ^ state.meta.turn;
    Ok((state, ChaCha8Rng::seed_from_u64(rng_seed)))
}

fn run(args: RunArgs) -> Result<()> {
    if !args.content_dir.is_dir() {
        tracing::warn!(
            content_dir = %args.content_dir.display(),
            "content directory not found, using built-in content"
        );
    }
    let content = load_content_or_standard(&args.content_dir)?;

    let (mut state, mut rng) = if let Some(path) = &args.state_file {
        let (state, rng) = load_state(path)?;
        tracing::info!(
            game_id = %state.meta.id,
            turn = state.meta.turn,
            path = %path.display(),
            "resumed game"
        );
        (state, rng)
    } else {
        let seed = args.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = create_initial_state(args.budget, args.satellites, &content, &mut rng)
            .context("creating game")?;
        tracing::info!(game_id = %state.meta.id, seed, "created game");
        println!("Seed: {seed}");
        (state, rng)
    };

    let mut autopilot = AutopilotController::default();
    let mut snapshots: Vec<MetricsSnapshot> = vec![compute_metrics(&state)];
    let print_every = args.print_every.max(1);

    println!(
        "Starting game {}: turn={} budget={} satellites={} content_version={}",
        state.meta.id,
        state.meta.turn,
        state.budget,
        state.satellites.len(),
        content.content_version,
    );
    println!("{}", "-".repeat(80));

    for _ in 0..args.turns {
        if evaluate_game_status(&state).is_over() {
            break;
        }
        let orders = autopilot.generate_orders(&state, &content);
        let seen = state.history.len();
        state = step_turn(&state, &orders, &content, &mut rng);

        // Print hazards regardless of print_every.
        for envelope in &state.history[seen..] {
            if matches!(
                envelope.event.kind(),
                EventKind::Collision | EventKind::Emergency
            ) {
                println!("*** turn {:02}: {} ***", envelope.turn, envelope.event);
            }
        }

        if state.meta.turn % print_every == 0 {
            print_status(&state);
        }
        snapshots.push(compute_metrics(&state));
    }

    println!("{}", "-".repeat(80));
    println!("Done. Final state at turn {}:", state.meta.turn);
    print_status(&state);
    print_outcome(&state);

    if let Some(path) = &args.metrics {
        write_metrics_csv(path, &snapshots)
            .with_context(|| format!("writing metrics CSV: {}", path.display()))?;
        println!("Metrics written to {}", path.display());
    }
    if let Some(path) = &args.save {
        let json = serde_json::to_string_pretty(&state).context("serializing final state")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("State saved to {}", path.display());
    }

    Ok(())
}

fn print_status(state: &GameState) {
    let metrics = compute_metrics(state);
    println!(
        "[turn={turn:02}]  budget={budget:>7}  active={active}/{total}  \
         risk={risk:.3}  eff={eff:.3}  low_fuel={low_fuel}  \
         tasks={tasks:2}  done={done}",
        turn = metrics.turn,
        budget = metrics.budget,
        active = metrics.fleet_active,
        total = metrics.fleet_total,
        risk = metrics.mean_risk,
        eff = metrics.mean_efficiency,
        low_fuel = metrics.low_fuel_count,
        tasks = metrics.pending_tasks,
        done = metrics.tasks_completed,
    );
}

fn print_stats(stats: &OutcomeStats) {
    println!(
        "  budget={} profit={} survival={}% completion={}% collisions={} tasks={}",
        stats.final_budget,
        stats.profit,
        stats.survival_rate_pct,
        stats.completion_rate_pct,
        stats.collisions,
        stats.tasks_completed,
    );
}

fn print_outcome(state: &GameState) {
    match evaluate_game_status(state) {
        Outcome::Ongoing => println!("Outcome: game still in progress"),
        Outcome::Victory { rank, stats } => {
            println!("Outcome: VICTORY ({rank:?})");
            print_stats(&stats);
        }
        Outcome::Defeat { message, stats, .. } => {
            println!("Outcome: DEFEAT. {message}");
            print_stats(&stats);
        }
    }

    let tips = strategic_tips(state);
    if !tips.is_empty() {
        println!("Tips:");
        for tip in tips {
            println!("  - [{}] {}", tip.id, tip.message);
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            turns,
            seed,
            state_file,
            content_dir,
            budget,
            satellites,
            print_every,
            metrics,
            save,
        } => run(RunArgs {
            turns,
            seed,
            state_file,
            content_dir,
            budget,
            satellites,
            print_every,
            metrics,
            save,
        }),
    }
}

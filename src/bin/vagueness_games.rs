//! Vagueness-games runner.
//!
//! Loads a TOML run config, evolves the language until it stabilizes, reports
//! whether it is a proper vague language and writes the final strategies.

use std::process::ExitCode;

use clap::Parser;
use signaling_games::analysis;
use signaling_games::export::{export_strategies, timestamp_prefix};
use signaling_games::{RunConfig, RunState, Simulation};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "vagueness-games")]
#[command(about = "Evolve sender/receiver conventions in a signaling game", long_about = None)]
struct Args {
    /// Run configuration (TOML)
    config: String,

    /// Prefix for <prefix>-sender.csv / <prefix>-receiver.csv (default: local timestamp)
    #[arg(long)]
    output_prefix: Option<String>,

    /// Override [simulation].max_steps
    #[arg(long)]
    max_steps: Option<i64>,

    /// Override [simulation].seed
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose output (per-step deltas)
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> signaling_games::Result<()> {
    let mut cfg = RunConfig::load(&args.config)?;
    if let Some(n) = args.max_steps {
        cfg.simulation.max_steps = n;
    }
    if let Some(seed) = args.seed {
        cfg.simulation.seed = seed;
    }

    let game = cfg.build_game()?;
    let dynamics = cfg.build_dynamics()?;
    let options = cfg.simulation_options(&game)?;
    let similarity = cfg.analysis_similarity(&game)?;

    info!(
        states = game.states().size(),
        messages = game.messages().size(),
        dynamics = ?dynamics,
        limited_perception = cfg.perception.limited,
        order = ?cfg.simulation.order,
        "starting run"
    );

    let mut sim = Simulation::new(game, dynamics, options)?;
    let state = sim.run_until_converged(cfg.simulation.max_steps)?;

    for series in sim.metric_series() {
        info!(metric = series.name(), values = ?series.values(), "measurements");
    }

    let report = analysis::assess(
        &similarity,
        sim.current_sender_strategy(),
        sim.current_receiver_strategy(),
    )?;
    match state {
        RunState::Converged => info!(steps = sim.current_step(), "language converged"),
        _ => info!(steps = sim.current_step(), "language did not converge within the step budget"),
    }
    if report.is_proper() {
        info!(prototypes = ?report.prototypes, "language is a proper vague language");
    } else {
        info!(?report, "language is NOT properly vague");
    }

    let prefix = args
        .output_prefix
        .clone()
        .unwrap_or_else(|| timestamp_prefix(&chrono::Local::now().naive_local()));
    let (sender_path, receiver_path) = export_strategies(
        &prefix,
        sim.current_sender_strategy(),
        sim.current_receiver_strategy(),
    )?;
    info!(
        sender = %sender_path.display(),
        receiver = %receiver_path.display(),
        "strategies written"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to set tracing subscriber");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

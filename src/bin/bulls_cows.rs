//! Bulls and cows solver driver.
//!
//! Usage:
//!   cargo run --release --bin bulls_cows -- play [OPTIONS]
//!   cargo run --release --bin bulls_cows -- simulate [OPTIONS]
//!
//! `play` lets the solving agent play one traced round; `simulate` plays
//! many seeded rounds in parallel and prints aggregate statistics.
//! Set `RUST_LOG` for finer log control (defaults to `info`, `-v` for `debug`).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use bulls_cows_solver::game::parse_guess;
use bulls_cows_solver::session::{run_simulation_with_callback, SimulationReport};
use bulls_cows_solver::{
    play_round, CandidateCache, GameHost, GameSettings, RoundOutcome, SimulationConfig,
    SolvingAgent,
};

#[derive(Debug, Parser)]
#[command(name = "bulls_cows", about = "Bulls and cows engine with a candidate-elimination solver")]
struct Cli {
    /// Log at debug level (every guess and pruning step).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Let the agent solve one secret and print every turn.
    Play(PlayArgs),
    /// Play many rounds in parallel and report statistics.
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
struct SettingsArgs {
    /// Inclusive lower bound of the domain.
    #[arg(long)]
    min: Option<i32>,

    /// Exclusive upper bound of the domain.
    #[arg(long)]
    max: Option<i32>,

    /// Secret length.
    #[arg(long)]
    length: Option<usize>,
}

impl SettingsArgs {
    fn apply(&self, base: GameSettings) -> Result<GameSettings> {
        let settings = GameSettings::new(
            self.min.unwrap_or(base.min()),
            self.max.unwrap_or(base.max()),
            self.length.unwrap_or(base.length()),
        )?;
        Ok(settings)
    }
}

#[derive(Debug, Args)]
struct PlayArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Settings JSON file ({"min": 0, "max": 10, "length": 4}).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Secret to play against, e.g. "0123" or "3,10,7" (random if omitted).
    #[arg(long)]
    secret: Option<String>,

    /// Seed for the secret (ignored with --secret).
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum guesses before giving up.
    #[arg(long, default_value_t = 16)]
    max_turns: usize,

    /// Print the secret before the agent starts.
    #[arg(long)]
    reveal: bool,
}

#[derive(Debug, Args)]
struct SimulateArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Simulation JSON file (settings, rounds, max_turns, seed, num_threads).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rounds.
    #[arg(short, long)]
    rounds: Option<u64>,

    /// Maximum guesses per round.
    #[arg(long)]
    max_turns: Option<usize>,

    /// Master seed.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Worker threads (default: all cores).
    #[arg(short, long)]
    threads: Option<usize>,

    /// Write a JSON report to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable the progress bar.
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Play(args) => run_play(args),
        Command::Simulate(args) => run_simulate(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run_play(args: PlayArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => GameSettings::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => GameSettings::default(),
    };
    let settings = args.settings.apply(base)?;
    if args.max_turns == 0 {
        bail!("--max-turns must be at least 1");
    }

    let host = match (&args.secret, args.seed) {
        (Some(secret), _) => {
            let secret = parse_guess(&settings, secret).context("invalid --secret")?;
            GameHost::with_secret(settings, secret)?
        }
        (None, Some(seed)) => GameHost::with_seed(settings, seed),
        (None, None) => GameHost::new(settings),
    };

    println!("=================================================");
    println!("  Bulls and Cows");
    println!("=================================================");
    println!(
        "Domain: [{}, {})  Length: {}  Candidates: {}",
        settings.min(),
        settings.max(),
        settings.length(),
        settings.permutation_count()
    );
    if args.reveal {
        println!("Secret: {:?}", host.secret());
    }
    println!();

    let start = Instant::now();
    let mut agent = SolvingAgent::new(settings);
    let record = play_round(&host, &mut agent, args.max_turns);

    for (i, turn) in record.turns.iter().enumerate() {
        println!("  {:>3}. {:?} -> {}", i + 1, turn.guess, turn.result);
    }
    println!();

    match &record.outcome {
        RoundOutcome::Solved { turns } => {
            println!(
                "Solved in {} guesses ({:.2}ms)",
                turns,
                start.elapsed().as_secs_f64() * 1000.0
            );
        }
        RoundOutcome::PlayerFailed { reason } => println!("Agent failed: {}", reason),
        RoundOutcome::TurnLimit { turns } => {
            println!("Gave up after {} guesses; the answer was {:?}", turns, host.secret());
        }
        RoundOutcome::Rejected { guess, error } => {
            bail!("guess {:?} was rejected: {}", guess, error);
        }
    }

    Ok(())
}

fn run_simulate(args: SimulateArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("loading simulation config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    config.settings = args.settings.apply(config.settings)?;
    if let Some(rounds) = args.rounds {
        config = config.with_rounds(rounds);
    }
    if let Some(max_turns) = args.max_turns {
        config = config.with_max_turns(max_turns);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    config.validate()?;

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(config.rounds);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rounds ({per_sec})",
            )?
            .progress_chars("=>-"),
        );
        bar
    };

    let cache = CandidateCache::new();
    let stats = run_simulation_with_callback(&config, &cache, |_| progress.inc(1))?;
    progress.finish_and_clear();

    println!("=================================================");
    println!("  Simulation Summary");
    println!("=================================================");
    println!(
        "Domain: [{}, {})  Length: {}  Candidates: {}",
        config.settings.min(),
        config.settings.max(),
        config.settings.length(),
        stats.candidates
    );
    println!("Seed: {}", stats.seed);
    println!(
        "Rounds: {}  Solved: {} ({:.1}%)  Failed: {}  Turn limit: {}",
        stats.rounds,
        stats.solved,
        stats.solve_rate() * 100.0,
        stats.failed,
        stats.turn_limited
    );
    if let (Some(mean), Some(min), Some(max)) =
        (stats.mean_turns(), stats.min_turns, stats.max_turns)
    {
        println!("Guesses: mean {:.3}  min {}  max {}", mean, min, max);
    }
    println!("Distribution:");
    for (turns, count) in &stats.turn_histogram {
        println!("  {:>3}: {}", turns, count);
    }
    println!(
        "Time: {:.2}s ({:.0} rounds/s)",
        stats.elapsed_seconds, stats.rounds_per_second
    );

    if let Some(path) = &args.output {
        SimulationReport::new(config.clone(), stats)
            .save_json(path)
            .with_context(|| format!("writing report to {}", path.display()))?;
        println!("Saved report: {}", path.display());
    }

    Ok(())
}

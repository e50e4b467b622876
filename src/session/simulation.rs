//! Batch simulation: many independent rounds, played in parallel.
//!
//! Each round gets its own host seeded from the master seed and the round
//! index, so a seeded simulation is reproducible regardless of thread count.
//! Agents are created per worker and share one read-only candidate space.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::game::{ConfigError, GameHost, GameSettings};
use crate::session::round::{play_round, RoundOutcome, RoundRecord};
use crate::solver::{CandidateCache, SolvingAgent};

/// Configuration for a batch of rounds.
///
/// # Example
/// ```
/// use bulls_cows_solver::SimulationConfig;
///
/// let config = SimulationConfig::default().with_rounds(10).with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_turns, 16);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Settings every round is played under.
    pub settings: GameSettings,

    /// Number of rounds to play.
    pub rounds: u64,

    /// Guesses allowed per round before giving up.
    pub max_turns: usize,

    /// Master seed for secret generation.
    ///
    /// If `None`, a random master seed is drawn and reported in the stats.
    pub seed: Option<u64>,

    /// Worker threads. `None` uses every available core.
    pub num_threads: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            settings: GameSettings::default(),
            rounds: 100,
            max_turns: 16,
            seed: None,
            num_threads: None,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration for `settings` with default limits.
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Builder method: set the number of rounds.
    pub fn with_rounds(mut self, rounds: u64) -> Self {
        self.rounds = rounds;
        self
    }

    /// Builder method: set the per-round turn cap.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Builder method: set the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::Invalid {
                field: "rounds",
                message: "must be at least 1".to_string(),
            });
        }
        if self.max_turns == 0 {
            return Err(ConfigError::Invalid {
                field: "max_turns",
                message: "must be at least 1".to_string(),
            });
        }
        if self.num_threads == Some(0) {
            return Err(ConfigError::Invalid {
                field: "num_threads",
                message: "must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse a configuration from a JSON string. Missing fields take their
    /// default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Aggregate results of a simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Rounds played.
    pub rounds: u64,
    /// Rounds ending in a correct guess.
    pub solved: u64,
    /// Rounds where the player ran out of candidates.
    pub failed: u64,
    /// Rounds stopped by the turn cap.
    pub turn_limited: u64,
    /// Rounds stopped by a rejected guess.
    pub rejected: u64,
    /// Sum of guesses over solved rounds.
    pub total_turns: u64,
    /// Fewest guesses in a solved round.
    pub min_turns: Option<usize>,
    /// Most guesses in a solved round.
    pub max_turns: Option<usize>,
    /// Solved rounds keyed by number of guesses.
    pub turn_histogram: BTreeMap<usize, u64>,
    /// Master seed the rounds were derived from.
    pub seed: u64,
    /// Size of the candidate space.
    pub candidates: usize,
    /// Wall-clock time in seconds.
    pub elapsed_seconds: f64,
    /// Rounds per second.
    pub rounds_per_second: f64,
}

impl SimulationStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one finished round into the totals.
    pub fn record(&mut self, record: &RoundRecord) {
        self.rounds += 1;
        match &record.outcome {
            RoundOutcome::Solved { turns } => {
                let turns = *turns;
                self.solved += 1;
                self.total_turns += turns as u64;
                self.min_turns = Some(self.min_turns.map_or(turns, |m| m.min(turns)));
                self.max_turns = Some(self.max_turns.map_or(turns, |m| m.max(turns)));
                *self.turn_histogram.entry(turns).or_insert(0) += 1;
            }
            RoundOutcome::PlayerFailed { .. } => self.failed += 1,
            RoundOutcome::TurnLimit { .. } => self.turn_limited += 1,
            RoundOutcome::Rejected { .. } => self.rejected += 1,
        }
    }

    /// Combine totals from two disjoint sets of rounds.
    pub fn merge(mut self, other: Self) -> Self {
        self.rounds += other.rounds;
        self.solved += other.solved;
        self.failed += other.failed;
        self.turn_limited += other.turn_limited;
        self.rejected += other.rejected;
        self.total_turns += other.total_turns;
        self.min_turns = match (self.min_turns, other.min_turns) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max_turns = match (self.max_turns, other.max_turns) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        for (turns, count) in other.turn_histogram {
            *self.turn_histogram.entry(turns).or_insert(0) += count;
        }
        self
    }

    /// Mean guesses per solved round.
    pub fn mean_turns(&self) -> Option<f64> {
        if self.solved == 0 {
            None
        } else {
            Some(self.total_turns as f64 / self.solved as f64)
        }
    }

    /// Fraction of rounds solved.
    pub fn solve_rate(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.solved as f64 / self.rounds as f64
        }
    }

    /// Update rounds per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.rounds_per_second = self.rounds as f64 / self.elapsed_seconds;
        }
    }
}

/// Errors that abort a simulation before any round is played.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The worker pool could not be started.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Run a simulation.
pub fn run_simulation(
    config: &SimulationConfig,
    cache: &CandidateCache,
) -> Result<SimulationStats, SimulationError> {
    run_simulation_with_callback(config, cache, |_: &RoundRecord| {})
}

/// Run a simulation, calling `on_round` after every finished round.
///
/// The callback runs on worker threads in no particular order.
pub fn run_simulation_with_callback<F>(
    config: &SimulationConfig,
    cache: &CandidateCache,
    on_round: F,
) -> Result<SimulationStats, SimulationError>
where
    F: Fn(&RoundRecord) + Sync,
{
    config.validate()?;

    let start_time = Instant::now();
    let settings = config.settings;
    let seed = config.seed.unwrap_or_else(rand::random);
    let space = cache.get_or_generate(&settings);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_threads.unwrap_or(0))
        .build()?;

    info!(
        rounds = config.rounds,
        candidates = space.len(),
        threads = pool.current_num_threads(),
        seed,
        "starting simulation"
    );

    let mut stats = pool.install(|| {
        (0..config.rounds)
            .into_par_iter()
            .map_init(
                || SolvingAgent::from_space(Arc::clone(&space)),
                |agent, round| {
                    let host = GameHost::with_seed(settings, round_seed(seed, round));
                    let record = play_round(&host, agent, config.max_turns);
                    on_round(&record);
                    record
                },
            )
            .fold(SimulationStats::new, |mut stats, record| {
                stats.record(&record);
                stats
            })
            .reduce(SimulationStats::new, SimulationStats::merge)
    });

    stats.seed = seed;
    stats.candidates = space.len();
    stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
    stats.update_rate();

    info!(
        solved = stats.solved,
        failed = stats.failed,
        turn_limited = stats.turn_limited,
        mean_turns = stats.mean_turns().unwrap_or(0.0),
        max_turns = stats.max_turns.unwrap_or(0),
        elapsed = stats.elapsed_seconds,
        "simulation finished"
    );

    Ok(stats)
}

/// Seed for an individual round.
pub fn round_seed(master: u64, round: u64) -> u64 {
    master.wrapping_add(round.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Serializable summary of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Configuration the run used.
    pub config: SimulationConfig,
    /// Aggregate results.
    pub stats: SimulationStats,
}

impl SimulationReport {
    /// Pair a configuration with its results.
    pub fn new(config: SimulationConfig, stats: SimulationStats) -> Self {
        Self { config, stats }
    }

    /// Save as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::game::GuessResult;
    use crate::session::round::Turn;

    fn small_config() -> SimulationConfig {
        SimulationConfig::new(GameSettings::new(0, 4, 2).unwrap())
            .with_rounds(50)
            .with_max_turns(12)
            .with_seed(11)
    }

    fn solved(turns: usize) -> RoundRecord {
        RoundRecord {
            turns: (0..turns)
                .map(|_| Turn {
                    guess: vec![0, 1],
                    result: GuessResult::new(0, 0, 2),
                })
                .collect(),
            outcome: RoundOutcome::Solved { turns },
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(SimulationConfig::default().validate().is_ok());
        assert!(SimulationConfig::default().with_rounds(0).validate().is_err());
        assert!(SimulationConfig::default().with_max_turns(0).validate().is_err());
        assert!(SimulationConfig::default().with_threads(0).validate().is_err());
    }

    #[test]
    fn test_config_from_json_uses_defaults() {
        let config = SimulationConfig::from_json_str(
            r#"{"settings": {"min": 0, "max": 6, "length": 3}, "rounds": 5}"#,
        )
        .unwrap();
        assert_eq!(config.settings, GameSettings::new(0, 6, 3).unwrap());
        assert_eq!(config.rounds, 5);
        assert_eq!(config.max_turns, 16);
        assert_eq!(config.seed, None);

        assert!(SimulationConfig::from_json_str(r#"{"rounds": 0}"#).is_err());
        assert!(SimulationConfig::from_json_str(
            r#"{"settings": {"min": 0, "max": 2, "length": 3}}"#
        )
        .is_err());
    }

    #[test]
    fn test_stats_record_and_merge() {
        let mut a = SimulationStats::new();
        a.record(&solved(3));
        a.record(&solved(5));

        let mut b = SimulationStats::new();
        b.record(&solved(1));
        b.record(&RoundRecord {
            turns: Vec::new(),
            outcome: RoundOutcome::PlayerFailed {
                reason: "no answer found".into(),
            },
        });

        let merged = a.merge(b);
        assert_eq!(merged.rounds, 4);
        assert_eq!(merged.solved, 3);
        assert_eq!(merged.failed, 1);
        assert_eq!(merged.min_turns, Some(1));
        assert_eq!(merged.max_turns, Some(5));
        assert_eq!(merged.mean_turns(), Some(3.0));
        assert_eq!(merged.turn_histogram.get(&3), Some(&1));
        assert!((merged.solve_rate() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_small_simulation_always_solves() {
        let cache = CandidateCache::new();
        let stats = run_simulation(&small_config(), &cache).unwrap();

        assert_eq!(stats.rounds, 50);
        assert_eq!(stats.solved, 50);
        assert_eq!(stats.failed + stats.turn_limited + stats.rejected, 0);
        assert!(stats.max_turns.unwrap() <= 12);
        assert_eq!(stats.candidates, 12);
        assert_eq!(stats.seed, 11);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_seeded_simulation_is_reproducible_across_threads() {
        let cache = CandidateCache::new();
        let single = run_simulation(&small_config().with_threads(1), &cache).unwrap();
        let multi = run_simulation(&small_config().with_threads(4), &cache).unwrap();

        assert_eq!(single.turn_histogram, multi.turn_histogram);
        assert_eq!(single.total_turns, multi.total_turns);
    }

    #[test]
    fn test_callback_sees_every_round() {
        let cache = CandidateCache::new();
        let seen = AtomicU64::new(0);
        let stats = run_simulation_with_callback(&small_config(), &cache, |record| {
            assert!(record.is_solved());
            seen.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
        assert_eq!(seen.load(Ordering::Relaxed), stats.rounds);
    }

    #[test]
    fn test_turn_cap_is_reported() {
        let cache = CandidateCache::new();
        let config = SimulationConfig::default().with_rounds(20).with_max_turns(1).with_seed(5);
        let stats = run_simulation(&config, &cache).unwrap();
        assert_eq!(stats.solved + stats.turn_limited, 20);
        assert!(stats.turn_limited > 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let cache = CandidateCache::new();
        let err = run_simulation(&small_config().with_rounds(0), &cache).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Config(ConfigError::Invalid {
                field: "rounds",
                ..
            })
        ));
    }

    #[test]
    fn test_report_saves_json() {
        let dir = std::env::temp_dir().join(format!("bulls_cows_report_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.json");

        let cache = CandidateCache::new();
        let config = small_config().with_rounds(5);
        let stats = run_simulation(&config, &cache).unwrap();
        SimulationReport::new(config, stats.clone()).save_json(&path).unwrap();

        let loaded: SimulationReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.stats.solved, stats.solved);
        assert_eq!(loaded.config.rounds, 5);

        fs::remove_dir_all(&dir).unwrap();
    }
}

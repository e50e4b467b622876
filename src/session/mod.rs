//! Running rounds and batches of rounds.
//!
//! - [`round`]: one round between a [`Scorer`](crate::solver::Scorer) and a
//!   [`Player`](crate::solver::Player), recorded as a [`RoundRecord`]
//! - [`simulation`]: many seeded rounds in parallel, aggregated into
//!   [`SimulationStats`]

pub mod round;
pub mod simulation;

pub use round::{play_round, RoundOutcome, RoundRecord, Turn};
pub use simulation::{
    round_seed, run_simulation, run_simulation_with_callback, SimulationConfig, SimulationError,
    SimulationReport, SimulationStats,
};

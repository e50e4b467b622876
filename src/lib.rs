//! # Bulls and Cows Solver
//!
//! A bulls-and-cows (Mastermind-style) game engine and an automated player
//! that deduces the secret by exhaustive candidate elimination.
//!
//! ## Features
//!
//! - **Game Engine**: Secret generation with an injectable RNG, guess
//!   validation and scoring
//! - **Candidate Space**: Every possible secret enumerated once per settings
//!   value and shared between rounds
//! - **Solving Agent**: Guesses the first consistent candidate and prunes on
//!   every score; always converges when the secret fits the settings
//! - **Simulation**: Many seeded rounds played in parallel with aggregate
//!   statistics
//!
//! ## Quick Start
//!
//! ```
//! use bulls_cows_solver::{play_round, GameHost, GameSettings, SolvingAgent};
//!
//! let settings = GameSettings::default();
//! let host = GameHost::with_seed(settings, 42);
//! let mut agent = SolvingAgent::new(settings);
//!
//! let record = play_round(&host, &mut agent, 16);
//! assert!(record.is_solved());
//! assert_eq!(record.answer(), Some(host.secret()));
//! ```
//!
//! ## Modules
//!
//! - [`game`]: Settings, scoring, validation and the game host
//! - [`solver`]: Candidate space and the elimination agent
//! - [`session`]: Round driver and batch simulation
//!
//! ## Architecture
//!
//! ```text
//!   GameSettings ──────────────┬──────────────────────┐
//!        │                     │                      │
//!        ▼                     ▼                      ▼
//! ┌─────────────┐      ┌───────────────┐      ┌───────────────┐
//! │  GameHost   │      │CandidateSpace │─────▶│ SolvingAgent  │
//! │ secret, rng │      │ (cached, Arc) │ copy │ live list     │
//! └─────────────┘      └───────────────┘      └───────────────┘
//!        ▲                                            │
//!        │            guess (play)                    │
//!        └────────────────────────────────────────────┘
//!                     score (get_result → feedback)
//! ```

#![warn(missing_docs)]

/// Game engine: settings, validation, scoring and the host.
pub mod game;

/// Candidate enumeration and the elimination agent.
pub mod solver;

/// Round driver and parallel simulation.
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use game::{GameHost, GameSettings, GuessResult, InvalidGuess, SettingsError};
pub use session::{
    play_round, run_simulation, RoundOutcome, RoundRecord, SimulationConfig, SimulationStats,
};
pub use solver::{CandidateCache, CandidateSpace, Player, PlayerResult, Scorer, SolvingAgent};

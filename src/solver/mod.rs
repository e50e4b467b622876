//! Automated solving by candidate elimination.
//!
//! # Overview
//!
//! 1. [`CandidateSpace`] enumerates every sequence the secret could be.
//! 2. [`SolvingAgent`] copies the space into a working list per round.
//! 3. After each scored guess, candidates that would have produced a
//!    different score against that guess are discarded.
//!
//! The secret can never be discarded, so the agent always converges when
//! the secret fits the settings.
//!
//! # Traits
//!
//! - [`Scorer`]: scores guesses against a hidden secret ([`GameHost`](crate::game::GameHost))
//! - [`Player`]: proposes guesses and learns from scores ([`SolvingAgent`])

pub mod agent;
pub mod candidates;
pub mod player;

pub use agent::{AgentState, SolvingAgent, NOT_READY, NO_ANSWER_FOUND};
pub use candidates::{CandidateCache, CandidateSpace};
pub use player::{Player, PlayerResult, Scorer};

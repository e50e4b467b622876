//! Candidate-elimination solving agent.
//!
//! The agent keeps a working list of every secret still consistent with the
//! scores seen this round. Each guess is the first live candidate in
//! canonical order; each score removes every candidate that would have
//! scored differently against that guess.
//!
//! Elimination is sound: the true secret always scores exactly the observed
//! result against the played guess, so it is never removed. Since every
//! guess is itself a candidate and is removed unless it completes the round,
//! the list strictly shrinks and the agent reaches the secret in at most
//! `P(max - min, length)` guesses.
//!
//! The guess choice is deliberately plain. It always converges but is not
//! sample-efficient; no minimax or information-gain selection is made.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::game::{score, GameSettings, GuessResult};
use crate::solver::candidates::{CandidateCache, CandidateSpace};
use crate::solver::player::{Player, PlayerResult};

/// Failure reason when every candidate has been eliminated.
pub const NO_ANSWER_FOUND: &str = "no answer found";

/// Failure reason when `play` is called before `before_game`.
pub const NOT_READY: &str = "agent not ready";

/// Lifecycle of one solving round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentState {
    /// No round has been prepared.
    NotReady,
    /// Working list reset to the full candidate space.
    Ready,
    /// At least one guess has been proposed.
    Playing,
    /// The last guess scored all bulls.
    Completed,
    /// Every candidate was eliminated; the settings do not match the secret.
    Exhausted,
}

/// Plays bulls and cows by exhaustive candidate elimination.
///
/// # Example
/// ```
/// use bulls_cows_solver::{GameHost, GameSettings, PlayerResult, SolvingAgent};
///
/// let settings = GameSettings::new(0, 4, 2)?;
/// let host = GameHost::with_secret(settings, vec![2, 3])?;
/// let mut agent = SolvingAgent::new(settings);
///
/// agent.before_game();
/// loop {
///     let guess = match agent.play() {
///         PlayerResult::Success { answer } => answer,
///         PlayerResult::Failure { reason } => panic!("{}", reason),
///     };
///     let result = host.get_result(&guess)?;
///     if result.completed {
///         assert_eq!(guess, vec![2, 3]);
///         break;
///     }
///     agent.feedback(&result);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SolvingAgent {
    name: String,
    space: Arc<CandidateSpace>,
    candidates: Vec<Vec<i32>>,
    outstanding: Option<Vec<i32>>,
    state: AgentState,
    guesses: usize,
}

impl SolvingAgent {
    /// Create an agent, enumerating the candidate space for `settings`.
    pub fn new(settings: GameSettings) -> Self {
        Self::from_space(Arc::new(CandidateSpace::generate(settings)))
    }

    /// Create an agent over an already generated candidate space.
    pub fn from_space(space: Arc<CandidateSpace>) -> Self {
        Self {
            name: "permutation".to_string(),
            space,
            candidates: Vec::new(),
            outstanding: None,
            state: AgentState::NotReady,
            guesses: 0,
        }
    }

    /// Create an agent whose candidate space comes from `cache`.
    pub fn with_cache(settings: &GameSettings, cache: &CandidateCache) -> Self {
        Self::from_space(cache.get_or_generate(settings))
    }

    /// Builder method: set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Reset the working list to a fresh copy of the candidate space.
    pub fn before_game(&mut self) {
        self.candidates = self.space.working_set();
        self.outstanding = None;
        self.guesses = 0;
        self.state = AgentState::Ready;
    }

    /// Propose the first live candidate.
    ///
    /// Fails with [`NO_ANSWER_FOUND`] once every candidate is eliminated, and
    /// with [`NOT_READY`] before the first call to `before_game`.
    pub fn play(&mut self) -> PlayerResult {
        match self.state {
            AgentState::NotReady => return PlayerResult::failure(NOT_READY),
            AgentState::Completed => {
                // the winning guess was never pruned and is still first
                if let Some(answer) = self.candidates.first() {
                    return PlayerResult::Success {
                        answer: answer.clone(),
                    };
                }
            }
            _ => {}
        }

        let Some(first) = self.candidates.first() else {
            if self.state != AgentState::Exhausted {
                warn!(guesses = self.guesses, "all candidates eliminated");
            }
            self.state = AgentState::Exhausted;
            return PlayerResult::failure(NO_ANSWER_FOUND);
        };

        let answer = first.clone();
        self.outstanding = Some(answer.clone());
        self.guesses += 1;
        self.state = AgentState::Playing;

        debug!(guess = ?answer, remaining = self.candidates.len(), "agent guess");
        PlayerResult::Success { answer }
    }

    /// Prune every candidate inconsistent with `result` for the outstanding
    /// guess.
    ///
    /// A completed result ends the round without touching the list.
    /// Feedback is only accepted while a guess is outstanding; anything else
    /// is logged and ignored.
    pub fn feedback(&mut self, result: &GuessResult) {
        if self.state != AgentState::Playing {
            warn!(%result, state = ?self.state, "feedback received outside a round");
            return;
        }
        let Some(guess) = self.outstanding.take() else {
            warn!(%result, "feedback received without an outstanding guess");
            return;
        };

        if result.completed {
            self.state = AgentState::Completed;
            return;
        }

        let before = self.candidates.len();
        self.candidates
            .retain(|candidate| score(candidate, &guess) == *result);

        debug!(
            guess = ?guess,
            %result,
            before,
            after = self.candidates.len(),
            "pruned candidates"
        );
    }

    /// Current round state.
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Settings the candidate space was built for.
    pub fn settings(&self) -> &GameSettings {
        self.space.settings()
    }

    /// The full candidate space shared by every round.
    pub fn space(&self) -> &Arc<CandidateSpace> {
        &self.space
    }

    /// Candidates still consistent with every score this round.
    pub fn candidates(&self) -> &[Vec<i32>] {
        &self.candidates
    }

    /// Number of live candidates.
    pub fn remaining(&self) -> usize {
        self.candidates.len()
    }

    /// The most recent guess awaiting feedback.
    pub fn outstanding_guess(&self) -> Option<&[i32]> {
        self.outstanding.as_deref()
    }

    /// Guesses proposed since `before_game`.
    pub fn guesses_made(&self) -> usize {
        self.guesses
    }
}

impl Player for SolvingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn before_game(&mut self) {
        SolvingAgent::before_game(self);
    }

    fn play(&mut self) -> PlayerResult {
        SolvingAgent::play(self)
    }

    fn feedback(&mut self, result: &GuessResult) {
        SolvingAgent::feedback(self, result);
    }
}

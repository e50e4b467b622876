//! Traits connecting players to whatever scores their guesses.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::{GameHost, GameSettings, GuessResult, InvalidGuess};

/// Anything that can score a guess against a hidden secret.
///
/// [`GameHost`] is the canonical implementation. Players never see the
/// secret, only the scores returned here.
pub trait Scorer {
    /// Settings the secret was drawn under.
    fn settings(&self) -> &GameSettings;

    /// Validate and score a guess.
    fn score_guess(&self, guess: &[i32]) -> Result<GuessResult, InvalidGuess>;
}

impl<R: Rng> Scorer for GameHost<R> {
    fn settings(&self) -> &GameSettings {
        GameHost::settings(self)
    }

    fn score_guess(&self, guess: &[i32]) -> Result<GuessResult, InvalidGuess> {
        self.get_result(guess)
    }
}

/// What a player produced when asked for a guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlayerResult {
    /// The player proposes `answer`.
    Success {
        /// The guess to submit.
        answer: Vec<i32>,
    },
    /// The player has nothing left to propose.
    Failure {
        /// Why no guess could be made.
        reason: String,
    },
}

impl PlayerResult {
    /// Build a failure with the given reason.
    pub fn failure(reason: impl Into<String>) -> Self {
        PlayerResult::Failure {
            reason: reason.into(),
        }
    }

    /// Whether the player gave up.
    pub fn is_failure(&self) -> bool {
        matches!(self, PlayerResult::Failure { .. })
    }

    /// The proposed guess, if any.
    pub fn answer(&self) -> Option<&[i32]> {
        match self {
            PlayerResult::Success { answer } => Some(answer.as_slice()),
            PlayerResult::Failure { .. } => None,
        }
    }

    /// The failure reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            PlayerResult::Success { .. } => None,
            PlayerResult::Failure { reason } => Some(reason.as_str()),
        }
    }
}

/// A guessing player driven round by round.
///
/// A round is `before_game`, then alternating `play` and `feedback` until a
/// guess completes or `play` fails.
pub trait Player {
    /// Display name.
    fn name(&self) -> &str;

    /// Reset per-round state before a new secret is played.
    fn before_game(&mut self);

    /// Propose the next guess.
    fn play(&mut self) -> PlayerResult;

    /// Receive the score for the most recent guess.
    fn feedback(&mut self, result: &GuessResult);
}

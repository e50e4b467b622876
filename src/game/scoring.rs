//! Bulls-and-cows scoring.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Score of one guess against a secret.
///
/// Equality compares `bulls` and `cows` only; `completed` is derived from
/// them and the secret length.
#[derive(Debug, Clone, Copy, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    /// Elements matching the secret at the same position.
    pub bulls: usize,
    /// Elements present in the secret at a different position.
    pub cows: usize,
    /// Whether every position matched.
    pub completed: bool,
}

impl GuessResult {
    /// Build a result for a secret of `length` elements.
    pub fn new(bulls: usize, cows: usize, length: usize) -> Self {
        Self {
            bulls,
            cows,
            completed: bulls == length,
        }
    }
}

impl PartialEq for GuessResult {
    fn eq(&self, other: &Self) -> bool {
        self.bulls == other.bulls && self.cows == other.cows
    }
}

impl fmt::Display for GuessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}B{}C", self.bulls, self.cows)
    }
}

/// Score `guess` against `secret`.
///
/// Each position where the values match is a bull; each position where they
/// differ but the guessed value occurs elsewhere in the secret is a cow.
///
/// Both slices must have the same length and each must hold distinct values.
/// Guesses that went through validation satisfy this; a repeated guess value
/// would otherwise be counted as a cow once per occurrence.
pub fn score(secret: &[i32], guess: &[i32]) -> GuessResult {
    debug_assert_eq!(secret.len(), guess.len(), "secret and guess lengths differ");

    let mut bulls = 0;
    let mut cows = 0;
    for (&s, &g) in secret.iter().zip(guess) {
        if s == g {
            bulls += 1;
        } else if secret.contains(&g) {
            cows += 1;
        }
    }

    GuessResult::new(bulls, cows, secret.len())
}

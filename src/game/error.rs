//! Error types for game configuration and guess validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a set of game settings cannot host a game.
///
/// These are configuration errors: they are raised when settings are built
/// or loaded, never in the middle of a round.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The secret length must be at least one.
    #[error("secret length must be positive")]
    EmptyLength,

    /// The numeric domain `[min, max)` is empty.
    #[error("empty domain: max ({max}) must be greater than min ({min})")]
    EmptyDomain {
        /// Inclusive lower bound.
        min: i32,
        /// Exclusive upper bound.
        max: i32,
    },

    /// The domain holds fewer distinct values than the secret needs.
    #[error(
        "domain [{min}, {max}) has {available} values, cannot fill a secret of length {length}"
    )]
    InsufficientDomain {
        /// Inclusive lower bound.
        min: i32,
        /// Exclusive upper bound.
        max: i32,
        /// Number of values in the domain.
        available: usize,
        /// Requested secret length.
        length: usize,
    },

    /// An injected secret does not satisfy the settings.
    #[error("secret does not fit the settings: {0}")]
    InvalidSecret(#[from] InvalidGuess),
}

/// Why a guess was rejected before scoring.
///
/// Variants are listed in the order the checks run; the first failing check
/// is the one reported.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum InvalidGuess {
    /// The guess does not have exactly `length` elements.
    #[error("wrong length: expected {expected} elements, found {found}")]
    WrongLength {
        /// Length required by the settings.
        expected: usize,
        /// Length of the submitted guess.
        found: usize,
    },

    /// An element is not a number.
    #[error("element {position} ({token:?}) is not a number")]
    NonNumeric {
        /// Zero-based position of the offending element.
        position: usize,
        /// The raw token as submitted.
        token: String,
    },

    /// An element lies outside `[min, max)`.
    #[error("element {position} ({value}) is out of bounds [{min}, {max})")]
    OutOfBounds {
        /// Zero-based position of the offending element.
        position: usize,
        /// The offending value.
        value: i32,
        /// Inclusive lower bound.
        min: i32,
        /// Exclusive upper bound.
        max: i32,
    },

    /// A value appears more than once.
    #[error("element {position} ({value}) duplicates an earlier element")]
    DuplicateElement {
        /// Zero-based position of the repeated occurrence.
        position: usize,
        /// The repeated value.
        value: i32,
    },
}

impl InvalidGuess {
    /// Short machine-friendly name of the rejection reason.
    pub fn reason(&self) -> &'static str {
        match self {
            InvalidGuess::WrongLength { .. } => "wrong_length",
            InvalidGuess::NonNumeric { .. } => "non_numeric",
            InvalidGuess::OutOfBounds { .. } => "out_of_bounds",
            InvalidGuess::DuplicateElement { .. } => "duplicate_element",
        }
    }
}

/// Errors that can occur when loading settings or configurations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration text is not valid JSON for the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but describes an impossible game.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A simulation parameter is out of range.
    #[error("invalid {field}: {message}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

//! Guess validation against game settings.
//!
//! Checks run in a fixed order and the first failure is reported:
//!
//! 1. exactly `length` elements ([`InvalidGuess::WrongLength`])
//! 2. every element is a number ([`InvalidGuess::NonNumeric`])
//! 3. every element lies in `[min, max)` ([`InvalidGuess::OutOfBounds`])
//! 4. no element repeats ([`InvalidGuess::DuplicateElement`])
//!
//! Numeric guesses (`&[i32]`) cannot fail step 2; raw text goes through
//! [`validate_tokens`] or [`parse_guess`], which cover all four.

use crate::game::error::InvalidGuess;
use crate::game::settings::GameSettings;

/// Outcome of validating a guess: `Ok(())` or the first failed check.
pub type ValidateResult = Result<(), InvalidGuess>;

/// Validate a numeric guess.
pub fn validate(settings: &GameSettings, guess: &[i32]) -> ValidateResult {
    check_length(settings, guess.len())?;
    check_values(settings, guess)
}

/// Validate a guess given as text tokens, one token per element.
///
/// Tokens are trimmed before parsing. On success the parsed guess is
/// returned.
pub fn validate_tokens<S: AsRef<str>>(
    settings: &GameSettings,
    tokens: &[S],
) -> Result<Vec<i32>, InvalidGuess> {
    check_length(settings, tokens.len())?;

    let guess = tokens
        .iter()
        .enumerate()
        .map(|(position, token)| {
            let token = token.as_ref().trim();
            token.parse::<i32>().map_err(|_| InvalidGuess::NonNumeric {
                position,
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    check_values(settings, &guess)?;
    Ok(guess)
}

/// Parse and validate a guess typed by a person.
///
/// Input containing commas or whitespace between elements is split on them
/// (`"3, 10, 7"`); otherwise every character is one element (`"0123"`), which
/// only works for single-digit domains.
pub fn parse_guess(settings: &GameSettings, input: &str) -> Result<Vec<i32>, InvalidGuess> {
    let input = input.trim();

    let tokens: Vec<String> = if input.contains(|c: char| c == ',' || c.is_whitespace()) {
        input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        input.chars().map(String::from).collect()
    };

    validate_tokens(settings, &tokens)
}

fn check_length(settings: &GameSettings, found: usize) -> ValidateResult {
    if found != settings.length() {
        return Err(InvalidGuess::WrongLength {
            expected: settings.length(),
            found,
        });
    }
    Ok(())
}

fn check_values(settings: &GameSettings, guess: &[i32]) -> ValidateResult {
    if let Some((position, &value)) = guess
        .iter()
        .enumerate()
        .find(|&(_, &v)| !settings.contains(v))
    {
        return Err(InvalidGuess::OutOfBounds {
            position,
            value,
            min: settings.min(),
            max: settings.max(),
        });
    }

    for (position, &value) in guess.iter().enumerate() {
        if guess[..position].contains(&value) {
            return Err(InvalidGuess::DuplicateElement { position, value });
        }
    }

    Ok(())
}

//! The game host: holds the secret and scores guesses.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::game::error::{InvalidGuess, SettingsError};
use crate::game::scoring::{score, GuessResult};
use crate::game::settings::GameSettings;
use crate::game::validate::{validate, ValidateResult};

/// Hosts one game: owns the settings, the current secret and the random
/// source used to draw new secrets.
///
/// The random source is a type parameter so tests and simulations can plug
/// in a seeded generator. The default is [`StdRng`].
///
/// # Example
/// ```
/// use bulls_cows_solver::{GameHost, GameSettings};
///
/// let settings = GameSettings::new(0, 4, 2)?;
/// let host = GameHost::with_secret(settings, vec![2, 3])?;
///
/// let result = host.get_result(&[3, 2])?;
/// assert_eq!((result.bulls, result.cows), (0, 2));
/// assert!(host.get_result(&[2, 2]).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameHost<R: Rng = StdRng> {
    settings: GameSettings,
    secret: Vec<i32>,
    rng: R,
}

impl GameHost<StdRng> {
    /// Create a host with an entropy-seeded generator and a fresh secret.
    pub fn new(settings: GameSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Create a host whose secrets are reproducible from `seed`.
    pub fn with_seed(settings: GameSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    /// Create a host holding a known secret.
    ///
    /// The secret must satisfy the same rules as a guess; later calls to
    /// [`generate_secret`](Self::generate_secret) draw from entropy.
    pub fn with_secret(settings: GameSettings, secret: Vec<i32>) -> Result<Self, SettingsError> {
        Self::with_secret_and_rng(settings, secret, StdRng::from_entropy())
    }
}

impl Default for GameHost<StdRng> {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}

impl<R: Rng> GameHost<R> {
    /// Create a host holding a known secret, drawing later secrets from `rng`.
    pub fn with_secret_and_rng(
        settings: GameSettings,
        secret: Vec<i32>,
        rng: R,
    ) -> Result<Self, SettingsError> {
        validate(&settings, &secret)?;
        Ok(Self {
            settings,
            secret,
            rng,
        })
    }

    /// Create a host drawing secrets from `rng`.
    pub fn with_rng(settings: GameSettings, mut rng: R) -> Self {
        let secret = draw_secret(&settings, &mut rng);
        Self {
            settings,
            secret,
            rng,
        }
    }

    /// Replace the secret with `length` distinct values drawn uniformly from
    /// `[min, max)`.
    ///
    /// Settings always hold enough distinct values, so this cannot fail.
    pub fn generate_secret(&mut self) -> &[i32] {
        self.secret = draw_secret(&self.settings, &mut self.rng);
        debug!(length = self.secret.len(), "generated new secret");
        &self.secret
    }

    /// Replace the secret with a known value.
    pub fn set_secret(&mut self, secret: Vec<i32>) -> Result<(), InvalidGuess> {
        validate(&self.settings, &secret)?;
        self.secret = secret;
        Ok(())
    }

    /// Check a guess against the settings without scoring it.
    pub fn validate(&self, guess: &[i32]) -> ValidateResult {
        validate(&self.settings, guess)
    }

    /// Validate and score a guess against the current secret.
    ///
    /// Invalid guesses are returned as `Err` and are never scored; callers
    /// must handle the rejection before treating the value as a score.
    pub fn get_result(&self, guess: &[i32]) -> Result<GuessResult, InvalidGuess> {
        self.validate(guess)?;
        Ok(score(&self.secret, guess))
    }

    /// The game settings.
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Reveal the current secret.
    ///
    /// Meant for "show answer" flows and tests; players learn about the
    /// secret only through scores.
    pub fn secret(&self) -> &[i32] {
        &self.secret
    }
}

fn draw_secret<R: Rng + ?Sized>(settings: &GameSettings, rng: &mut R) -> Vec<i32> {
    let mut values: Vec<i32> = settings.values().collect();
    let (chosen, _) = values.partial_shuffle(rng, settings.length());
    chosen.to_vec()
}

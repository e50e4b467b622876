//! Game settings: the numeric domain and the secret length.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::error::{ConfigError, SettingsError};

/// Settings shared by the host, the candidate space and the solving agent.
///
/// A secret is `length` distinct integers drawn from `[min, max)`. Settings
/// can only be built through [`GameSettings::new`] (or deserialized, which
/// runs the same checks), so every value of this type satisfies:
///
/// - `max > min`
/// - `length > 0`
/// - `max - min >= length`
///
/// # Example
/// ```
/// use bulls_cows_solver::GameSettings;
///
/// let settings = GameSettings::default();
/// assert_eq!((settings.min(), settings.max(), settings.length()), (0, 10, 4));
/// assert_eq!(settings.permutation_count(), 5040);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSettings")]
pub struct GameSettings {
    min: i32,
    max: i32,
    length: usize,
}

/// Unchecked mirror of [`GameSettings`] used during deserialization.
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawSettings {
    min: i32,
    max: i32,
    #[serde(alias = "len")]
    length: usize,
}

impl TryFrom<RawSettings> for GameSettings {
    type Error = SettingsError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        GameSettings::new(raw.min, raw.max, raw.length)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            min: 0,
            max: 10,
            length: 4,
        }
    }
}

impl GameSettings {
    /// Build settings, rejecting combinations that cannot produce a secret.
    pub fn new(min: i32, max: i32, length: usize) -> Result<Self, SettingsError> {
        if length == 0 {
            return Err(SettingsError::EmptyLength);
        }
        if max <= min {
            return Err(SettingsError::EmptyDomain { min, max });
        }

        let available = domain_size(min, max);
        if available < length {
            return Err(SettingsError::InsufficientDomain {
                min,
                max,
                available,
                length,
            });
        }

        Ok(Self { min, max, length })
    }

    /// Builder method: replace the inclusive lower bound.
    pub fn with_min(self, min: i32) -> Result<Self, SettingsError> {
        Self::new(min, self.max, self.length)
    }

    /// Builder method: replace the exclusive upper bound.
    pub fn with_max(self, max: i32) -> Result<Self, SettingsError> {
        Self::new(self.min, max, self.length)
    }

    /// Builder method: replace the secret length.
    pub fn with_length(self, length: usize) -> Result<Self, SettingsError> {
        Self::new(self.min, self.max, length)
    }

    /// Inclusive lower bound of the domain.
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Exclusive upper bound of the domain.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Number of elements in a secret or guess.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of distinct values in `[min, max)`.
    pub fn domain_size(&self) -> usize {
        domain_size(self.min, self.max)
    }

    /// Whether `value` lies in `[min, max)`.
    pub fn contains(&self, value: i32) -> bool {
        value >= self.min && value < self.max
    }

    /// Iterate the domain in ascending order.
    pub fn values(&self) -> impl Iterator<Item = i32> {
        self.min..self.max
    }

    /// Number of possible secrets, `P(max - min, length)`.
    ///
    /// Saturates at `u128::MAX` for domains far too large to enumerate.
    pub fn permutation_count(&self) -> u128 {
        let n = self.domain_size() as u128;
        (0..self.length as u128).fold(1u128, |acc, i| acc.saturating_mul(n - i))
    }

    /// Load settings from a JSON file.
    ///
    /// Accepts `{"min": 0, "max": 10, "length": 4}`; `len` is accepted as an
    /// alias for `length`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawSettings = serde_json::from_str(json)?;
        Ok(Self::try_from(raw)?)
    }

    /// Serialize settings to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn domain_size(min: i32, max: i32) -> usize {
    (i64::from(max) - i64::from(min)).max(0) as usize
}

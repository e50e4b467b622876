//! Bulls-and-cows game engine.
//!
//! A host holds a hidden sequence of distinct numbers; players submit
//! guesses and receive a score per guess:
//!
//! - **bulls**: elements matching the secret at the same position
//! - **cows**: elements present in the secret at a different position
//!
//! The round ends when a guess scores `length` bulls.
//!
//! # Components
//!
//! - [`settings`]: the numeric domain `[min, max)` and secret length
//! - [`scoring`]: the pure scoring function
//! - [`validate`]: shape checks a guess must pass before scoring
//! - [`host`]: secret generation plus validate-then-score
//! - [`error`]: configuration and validation errors
//!
//! # Example
//!
//! ```
//! use bulls_cows_solver::game::{GameHost, GameSettings, InvalidGuess};
//!
//! let settings = GameSettings::new(0, 10, 4)?;
//! let host = GameHost::with_secret(settings, vec![1, 2, 3, 4])?;
//!
//! let result = host.get_result(&[1, 3, 5, 7])?;
//! assert_eq!((result.bulls, result.cows), (1, 1));
//!
//! match host.get_result(&[1, 1, 2, 3]) {
//!     Err(InvalidGuess::DuplicateElement { value, .. }) => assert_eq!(value, 1),
//!     other => panic!("unexpected {:?}", other),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod host;
pub mod scoring;
pub mod settings;
pub mod validate;

pub use error::{ConfigError, InvalidGuess, SettingsError};
pub use host::GameHost;
pub use scoring::{score, GuessResult};
pub use settings::GameSettings;
pub use validate::{parse_guess, validate, validate_tokens, ValidateResult};

//! Driving a single round between a scorer and a player.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::game::{GuessResult, InvalidGuess};
use crate::solver::{Player, PlayerResult, Scorer};

/// One scored guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// The guess the player submitted.
    pub guess: Vec<i32>,
    /// The score it received.
    pub result: GuessResult,
}

/// How a round ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RoundOutcome {
    /// A guess scored all bulls after `turns` guesses.
    Solved {
        /// Number of guesses, including the winning one.
        turns: usize,
    },
    /// The player could not propose a guess.
    PlayerFailed {
        /// The player's failure reason.
        reason: String,
    },
    /// The turn cap was reached without solving.
    TurnLimit {
        /// The cap that was hit.
        turns: usize,
    },
    /// The scorer rejected a guess.
    Rejected {
        /// The rejected guess.
        guess: Vec<i32>,
        /// Why it was rejected.
        error: InvalidGuess,
    },
}

/// Transcript of one round. Holds guesses and scores, never the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Scored guesses in order.
    pub turns: Vec<Turn>,
    /// How the round ended.
    pub outcome: RoundOutcome,
}

impl RoundRecord {
    /// Whether the round ended with a correct guess.
    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, RoundOutcome::Solved { .. })
    }

    /// Number of scored guesses.
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// The winning guess, if the round was solved.
    pub fn answer(&self) -> Option<&[i32]> {
        if self.is_solved() {
            self.turns.last().map(|turn| turn.guess.as_slice())
        } else {
            None
        }
    }
}

/// Play one round against the scorer's current secret.
///
/// Resets the player, then alternates `play`, scoring and `feedback` until a
/// guess completes, the player fails, a guess is rejected, or `max_turns`
/// guesses have been scored.
pub fn play_round<S, P>(scorer: &S, player: &mut P, max_turns: usize) -> RoundRecord
where
    S: Scorer + ?Sized,
    P: Player + ?Sized,
{
    player.before_game();
    let mut turns = Vec::new();

    while turns.len() < max_turns {
        let guess = match player.play() {
            PlayerResult::Success { answer } => answer,
            PlayerResult::Failure { reason } => {
                warn!(player = player.name(), %reason, turns = turns.len(), "player failed");
                return RoundRecord {
                    turns,
                    outcome: RoundOutcome::PlayerFailed { reason },
                };
            }
        };

        let result = match scorer.score_guess(&guess) {
            Ok(result) => result,
            Err(error) => {
                warn!(player = player.name(), ?guess, %error, "guess rejected");
                return RoundRecord {
                    turns,
                    outcome: RoundOutcome::Rejected { guess, error },
                };
            }
        };

        debug!(turn = turns.len() + 1, ?guess, %result, "scored guess");
        turns.push(Turn { guess, result });

        if result.completed {
            info!(player = player.name(), turns = turns.len(), "round solved");
            let count = turns.len();
            return RoundRecord {
                turns,
                outcome: RoundOutcome::Solved { turns: count },
            };
        }

        player.feedback(&result);
    }

    info!(player = player.name(), max_turns, "turn limit reached");
    RoundRecord {
        turns,
        outcome: RoundOutcome::TurnLimit { turns: max_turns },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameHost, GameSettings};
    use crate::solver::SolvingAgent;

    fn small() -> GameSettings {
        GameSettings::new(0, 4, 2).unwrap()
    }

    /// Always proposes the same guess.
    struct Stubborn(Vec<i32>);

    impl Player for Stubborn {
        fn name(&self) -> &str {
            "stubborn"
        }
        fn before_game(&mut self) {}
        fn play(&mut self) -> PlayerResult {
            PlayerResult::Success {
                answer: self.0.clone(),
            }
        }
        fn feedback(&mut self, _result: &GuessResult) {}
    }

    #[test]
    fn test_agent_solves_round() {
        let host = GameHost::with_secret(small(), vec![2, 3]).unwrap();
        let mut agent = SolvingAgent::new(small());

        let record = play_round(&host, &mut agent, 12);
        assert!(record.is_solved());
        assert_eq!(record.answer(), Some(&[2, 3][..]));
        assert_eq!(record.turns[0].guess, vec![0, 1]);
        assert_eq!(record.turns[0].result, GuessResult::new(0, 0, 2));
        assert_eq!(record.outcome, RoundOutcome::Solved { turns: 2 });
    }

    #[test]
    fn test_turn_limit() {
        let host = GameHost::with_secret(small(), vec![2, 3]).unwrap();
        let mut player = Stubborn(vec![0, 1]);

        let record = play_round(&host, &mut player, 3);
        assert_eq!(record.outcome, RoundOutcome::TurnLimit { turns: 3 });
        assert_eq!(record.turn_count(), 3);
        assert_eq!(record.answer(), None);
    }

    #[test]
    fn test_rejected_guess() {
        let host = GameHost::with_secret(small(), vec![2, 3]).unwrap();
        let mut player = Stubborn(vec![1, 1]);

        let record = play_round(&host, &mut player, 5);
        assert!(record.turns.is_empty());
        assert!(matches!(
            record.outcome,
            RoundOutcome::Rejected { error: InvalidGuess::DuplicateElement { .. }, .. }
        ));
    }

    #[test]
    fn test_player_failure_is_reported() {
        // Agent enumerates a narrower domain than the host draws from.
        let host = GameHost::with_secret(GameSettings::new(0, 6, 2).unwrap(), vec![4, 5]).unwrap();
        let mut agent = SolvingAgent::new(small());

        let record = play_round(&host, &mut agent, 20);
        assert_eq!(
            record.outcome,
            RoundOutcome::PlayerFailed { reason: crate::solver::NO_ANSWER_FOUND.to_string() }
        );
        assert_eq!(record.turn_count(), 2);
    }

    #[test]
    fn test_record_serializes_without_secret() {
        let host = GameHost::with_secret(small(), vec![2, 3]).unwrap();
        let mut agent = SolvingAgent::new(small());
        let record = play_round(&host, &mut agent, 12);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["outcome"]["outcome"], "solved");
        assert_eq!(json["outcome"]["turns"], 2);
        assert!(json.get("secret").is_none());
    }
}

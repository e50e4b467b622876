//! Property tests for the game engine and the elimination agent.

use proptest::prelude::*;

use bulls_cows_solver::game::{score, validate};
use bulls_cows_solver::{CandidateSpace, GameHost, GameSettings, PlayerResult, SolvingAgent};

/// Small settings: domain of 1..=6 values starting anywhere in [-5, 5).
fn small_settings() -> impl Strategy<Value = GameSettings> {
    (-5i32..5, 1usize..=6)
        .prop_flat_map(|(min, span)| (Just(min), Just(span), 1usize..=span))
        .prop_map(|(min, span, length)| {
            GameSettings::new(min, min + span as i32, length)
                .expect("strategy builds valid settings")
        })
}

fn is_distinct(values: &[i32]) -> bool {
    values
        .iter()
        .enumerate()
        .all(|(i, v)| !values[..i].contains(v))
}

proptest! {
    #[test]
    fn generated_secrets_fit_settings(settings in small_settings(), seed in any::<u64>()) {
        let mut host = GameHost::with_seed(settings, seed);
        for _ in 0..5 {
            let secret = host.generate_secret().to_vec();
            prop_assert_eq!(secret.len(), settings.length());
            prop_assert!(secret.iter().all(|&v| v >= settings.min() && v < settings.max()));
            prop_assert!(is_distinct(&secret));
        }
    }

    #[test]
    fn validate_accepts_exactly_well_formed_guesses(
        settings in small_settings(),
        guess in prop::collection::vec(-8i32..12, 0..8),
    ) {
        let expected = guess.len() == settings.length()
            && guess.iter().all(|&v| settings.contains(v))
            && is_distinct(&guess);
        prop_assert_eq!(validate(&settings, &guess).is_ok(), expected);
    }

    #[test]
    fn scores_are_bounded_and_consistent(
        settings in small_settings(),
        secret_seed in any::<u64>(),
        guess_seed in any::<u64>(),
    ) {
        let secret = GameHost::with_seed(settings, secret_seed).secret().to_vec();
        let guess = GameHost::with_seed(settings, guess_seed).secret().to_vec();

        let result = score(&secret, &guess);
        prop_assert!(result.bulls + result.cows <= settings.length());
        prop_assert_eq!(result.completed, result.bulls == settings.length());
        prop_assert_eq!(result.completed, secret == guess);

        let reversed = score(&guess, &secret);
        prop_assert_eq!((reversed.bulls, reversed.cows), (result.bulls, result.cows));

        let identity = score(&secret, &secret);
        prop_assert_eq!((identity.bulls, identity.cows), (settings.length(), 0));
        prop_assert!(identity.completed);
    }

    #[test]
    fn candidate_space_matches_permutation_count(settings in small_settings()) {
        let space = CandidateSpace::generate(settings);
        prop_assert_eq!(space.len() as u128, settings.permutation_count());
        prop_assert!(space.as_slice().windows(2).all(|w| w[0] < w[1]));
        for candidate in space.iter() {
            prop_assert_eq!(validate(&settings, candidate), Ok(()));
        }
    }

    #[test]
    fn elimination_keeps_secret_and_converges(settings in small_settings(), seed in any::<u64>()) {
        let host = GameHost::with_seed(settings, seed);
        let secret = host.secret().to_vec();
        let mut agent = SolvingAgent::new(settings);
        let limit = agent.space().len();

        agent.before_game();
        let mut solved = false;
        for _ in 0..limit {
            prop_assert!(agent.candidates().iter().any(|c| *c == secret));

            let guess = match agent.play() {
                PlayerResult::Success { answer } => answer,
                PlayerResult::Failure { reason } => {
                    return Err(TestCaseError::fail(format!("agent failed: {}", reason)));
                }
            };
            let result = host.get_result(&guess).expect("agent guesses are valid");
            if result.completed {
                prop_assert_eq!(&guess, &secret);
                solved = true;
                break;
            }
            agent.feedback(&result);
        }
        prop_assert!(solved);
    }
}

#[test]
fn every_secret_in_small_domain_is_solved_within_twelve_guesses() {
    let settings = GameSettings::new(0, 4, 2).unwrap();
    let space = CandidateSpace::generate(settings);
    let mut agent = SolvingAgent::new(settings);

    for secret in space.iter() {
        let host = GameHost::with_secret(settings, secret.to_vec()).unwrap();
        let record = bulls_cows_solver::play_round(&host, &mut agent, 12);
        assert!(record.is_solved(), "{:?}: {:?}", secret, record.outcome);
        assert!(record.turn_count() <= 12);
    }
}

// Integration tests for the wordle-game crate
// These tests verify that filtering, evaluation and the round driver work together

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Cursor;
use std::time::Duration;
use wordle_game::cli::CliInterface;
use wordle_game::game_state::play_and_record;
use wordle_game::hints::{EMBEDDED_HINTS, parse_hints};
use wordle_game::input::LineReader;
use wordle_game::*;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn cli_interface(input: &str) -> CliInterface<Vec<u8>> {
    CliInterface::new(LineReader::spawn(Cursor::new(input.to_string())), Vec::new())
}

fn output(interface: CliInterface<Vec<u8>>) -> String {
    String::from_utf8(interface.into_output()).unwrap()
}

#[test]
fn test_end_to_end_win_on_third_attempt() {
    // Target fixed to "light"; wrong guesses first, then the answer
    let config = Preset::Classic.config();
    let mut round = Round::with_target(config, "light", 0);

    let inputs = ["apple", "right", "light"];
    let mut results = Vec::new();
    for guess in inputs {
        results.push(round.submit(GuessInput::Entered(guess.to_string())));
    }

    match &results[1] {
        Attempt::Scored { feedback, .. } => assert_eq!(
            feedback,
            &vec![
                Feedback::Absent,
                Feedback::Correct,
                Feedback::Correct,
                Feedback::Correct,
                Feedback::Correct
            ]
        ),
        other => panic!("Expected scored attempt, got {other:?}"),
    }
    assert_eq!(round.state(), RoundState::Won);
    assert_eq!(
        round.outcome(),
        Some(RoundOutcome {
            won: true,
            attempts_used: 3
        })
    );
}

#[test]
fn test_exhausting_attempts_loses() {
    let config = GameConfig::new(4, 7, false, None).unwrap();
    let mut round = Round::with_target(config, "jinx", 0);
    for _ in 0..7 {
        round.submit(GuessInput::Entered("bolt".to_string()));
    }
    assert_eq!(
        round.outcome(),
        Some(RoundOutcome {
            won: false,
            attempts_used: 7
        })
    );
}

#[test]
fn test_embedded_wordbank_per_preset() {
    let raw = load_wordbank_from_str(EMBEDDED_WORDBANK);

    let classic = filter_words(&raw, &Preset::Classic.config());
    assert_eq!(classic.len(), 22);
    assert!(classic.iter().all(|w| w.len() == 5));

    let hard = filter_words(&raw, &Preset::Hard.config());
    // "fizz" repeats a letter
    assert_eq!(hard, words(&["jinx", "four", "word", "bolt", "maze", "clip", "haze"]));

    let challenge = filter_words(&raw, &Preset::Challenge.config());
    assert_eq!(challenge, words(&["abduct", "bright", "planet"]));
}

#[test]
fn test_cli_round_through_stdin_lines() {
    let setup = GameSetup {
        words: words(&["LIGHT", "four", "l1ght"]),
        ..GameSetup::default()
    };
    let mut interface = cli_interface("apple\nright\nlight\n");
    let mut rng = StdRng::seed_from_u64(5);

    let outcome = play_round(&setup, &Preset::Classic.config(), &mut interface, &mut rng).unwrap();

    assert_eq!(
        outcome,
        RoundOutcome {
            won: true,
            attempts_used: 3
        }
    );
    let out = output(interface);
    assert!(out.contains("Attempt 3/6"));
    assert!(out.contains(" R  I  G  H  T   XGGGG"));
    assert!(out.contains("Correct! The Word Was: light"));
}

#[test]
fn test_cli_invalid_input_burns_attempts() {
    let setup = GameSetup {
        words: words(&["stone"]),
        ..GameSetup::default()
    };
    let mut interface = cli_interface("st0ne\nton\n\nstone\n");
    let mut rng = StdRng::seed_from_u64(5);

    let outcome = play_round(&setup, &Preset::Classic.config(), &mut interface, &mut rng).unwrap();

    assert!(outcome.won);
    assert_eq!(outcome.attempts_used, 4);
    let out = output(interface);
    assert_eq!(out.matches("Invalid input").count(), 3);
}

#[test]
fn test_cli_session_menu_and_scoring() {
    let setup = GameSetup {
        words: words(&["stone"]),
        ..GameSetup::default()
    };
    // Pick classic, win on the second attempt, try a mode with no words, quit
    let mut interface = cli_interface("1\nwater\nstone\n3\n4\n");
    let mut rng = StdRng::seed_from_u64(5);

    let session = run_session(&setup, &mut interface, &mut rng);

    assert_eq!(
        session,
        Session {
            wins: 1,
            losses: 0,
            streak: 1,
            points: 50
        }
    );
    let out = output(interface);
    assert!(out.contains("You earned 50 points!"));
    assert!(out.contains("Cannot start round: no 6-letter words available"));
    assert!(out.contains("Exiting."));
}

#[test]
fn test_cli_single_round_without_words_reports_once() {
    let setup = GameSetup {
        words: words(&["stone"]),
        ..GameSetup::default()
    };
    let mut interface = cli_interface("");
    let mut rng = StdRng::seed_from_u64(5);

    let (session, outcome) =
        play_single_round(&setup, &Preset::Challenge.config(), &mut interface, &mut rng);

    assert!(matches!(outcome, Err(GameError::EmptyDictionary { .. })));
    assert_eq!(session, Session::default());
    let out = output(interface);
    assert_eq!(out.matches("no 6-letter words available").count(), 1);
    assert!(out.contains("Exiting."));
}

#[test]
fn test_cli_session_ends_on_closed_input() {
    let setup = GameSetup {
        words: words(&["stone"]),
        ..GameSetup::default()
    };
    let mut interface = cli_interface("1\nwater\n");
    let mut rng = StdRng::seed_from_u64(5);

    let session = run_session(&setup, &mut interface, &mut rng);

    assert_eq!(session.losses, 1);
    assert_eq!(session.wins, 0);
}

#[test]
fn test_hard_mode_with_hints() {
    let setup = GameSetup {
        words: load_wordbank_from_str(EMBEDDED_WORDBANK),
        hints: Some(parse_hints(EMBEDDED_HINTS)),
        time_limit: None,
    };
    // Four guesses that never match, then input ends and the rest are used up
    let mut interface = cli_interface("zzzz\nqqqq\nvvvv\nkkkk\n");
    let mut rng = StdRng::seed_from_u64(11);

    let (session, outcome) = play_and_record(
        Session::default(),
        &setup,
        &Preset::Hard.config(),
        &mut interface,
        &mut rng,
    );

    let outcome = outcome.unwrap();
    assert!(!outcome.won);
    assert_eq!(outcome.attempts_used, 7);
    assert_eq!(session.losses, 1);

    let out = output(interface);
    assert!(out.contains("Hint (Category): "));
    assert!(out.contains("Hint (Definition): "));
    assert!(out.contains("Hint (Letter at position "));
}

#[test]
fn test_timed_round_times_out_every_attempt() {
    let setup = GameSetup {
        words: words(&["light"]),
        ..GameSetup::default()
    };
    let (_tx, rx) = std::sync::mpsc::channel();
    let mut interface = CliInterface::new(LineReader::from_channel(rx), Vec::new());
    let config = GameConfig::new(5, 2, true, Some(Duration::from_millis(30))).unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    let outcome = play_round(&setup, &config, &mut interface, &mut rng).unwrap();

    assert_eq!(
        outcome,
        RoundOutcome {
            won: false,
            attempts_used: 2
        }
    );
    let out = output(interface);
    assert_eq!(out.matches("Time is up!").count(), 2);
    assert!(out.contains("Out of attempts! The Word Was: light"));
}

#[test]
fn test_wordbank_file_round_trip() {
    let path = std::env::temp_dir().join("wordle_game_integration_words.txt");
    std::fs::write(&path, "Crane\nslate\n\nfour\n").unwrap();

    let raw = load_wordbank_from_file(&path).unwrap();
    let filtered = filter_words(&raw, &Preset::Classic.config());
    assert_eq!(filtered, words(&["crane", "slate"]));

    let _ = std::fs::remove_file(&path);
}

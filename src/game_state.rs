use crate::config::{GameConfig, Preset};
use crate::error::{GameError, Result};
use crate::filter::filter_words;
use crate::hints::{Hint, HintEntry, HintTable, hint_for_attempt};
use crate::round::{Attempt, GuessInput, Round, RoundOutcome};
use crate::{debug_log, info_log};
use rand::Rng;
use std::collections::HashMap;
use std::time::Duration;

/// Score carried from one round to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub wins: usize,
    pub losses: usize,
    pub streak: usize,
    pub points: usize,
}

impl Session {
    /// Returns the updated session and the points earned by this round.
    #[must_use]
    pub fn record(self, outcome: &RoundOutcome, max_attempts: usize) -> (Self, usize) {
        if outcome.won {
            let earned = points_for(outcome, max_attempts);
            let session = Self {
                wins: self.wins + 1,
                streak: self.streak + 1,
                points: self.points + earned,
                ..self
            };
            (session, earned)
        } else {
            let session = Self {
                losses: self.losses + 1,
                streak: 0,
                ..self
            };
            (session, 0)
        }
    }
}

/// Ten points per attempt left over, counting the winning one.
#[must_use]
pub fn points_for(outcome: &RoundOutcome, max_attempts: usize) -> usize {
    if outcome.won {
        (max_attempts.saturating_sub(outcome.attempts_used) + 1) * 10
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play(Preset),
    Quit,
}

/// Everything a front end must do to host a game.
pub trait GameInterface {
    /// Shows the menu until the player picks something valid.
    fn read_menu_choice(&mut self, session: &Session) -> MenuChoice;
    fn display_round_start(&mut self, config: &GameConfig);
    /// Collects one guess, honouring `config.guess_time_limit`.
    fn read_guess(&mut self, attempt: usize, config: &GameConfig) -> GuessInput;
    fn display_attempt(&mut self, attempt: &Attempt);
    fn display_hint(&mut self, hint: &Hint);
    fn display_round_end(&mut self, outcome: &RoundOutcome, target: &str);
    fn display_points_earned(&mut self, points: usize, session: &Session);
    fn display_error(&mut self, error: &GameError);
    fn display_exit_message(&mut self, session: &Session);
}

/// Word list, hints and timer settings shared by every round in a session.
#[derive(Debug, Clone, Default)]
pub struct GameSetup {
    pub words: Vec<String>,
    /// `None` turns hints off.
    pub hints: Option<HashMap<String, HintEntry>>,
    pub time_limit: Option<Duration>,
}

/// Filters the word list for `config`, picks a target and plays it out.
///
/// Fails before any guess is read if no word fits `config`.
pub fn play_round<I, R>(
    setup: &GameSetup,
    config: &GameConfig,
    interface: &mut I,
    rng: &mut R,
) -> Result<RoundOutcome>
where
    I: GameInterface + ?Sized,
    R: Rng,
{
    let dictionary = filter_words(&setup.words, config);
    info_log!(
        "play_round() - {} of {} words fit {:?}",
        dictionary.len(),
        setup.words.len(),
        config
    );
    let round = Round::start(&dictionary, config, rng)?;
    debug_log!("play_round() - target '{}'", round.target());
    let hints = setup
        .hints
        .as_ref()
        .map(|h| HintTable::for_dictionary(&dictionary, h));

    Ok(play_round_with(round, hints.as_ref(), interface, rng))
}

/// Drives an already started round to its end.
pub fn play_round_with<I, R>(
    mut round: Round,
    hints: Option<&HintTable>,
    interface: &mut I,
    rng: &mut R,
) -> RoundOutcome
where
    I: GameInterface + ?Sized,
    R: Rng,
{
    interface.display_round_start(round.config());

    let outcome = loop {
        if let Some(outcome) = round.outcome() {
            break outcome;
        }
        let attempt_no = round.attempts_used() + 1;
        let input = interface.read_guess(attempt_no, round.config());
        let result = round.submit(input);
        interface.display_attempt(&result);

        if let (Attempt::Scored { attempt, .. }, Some(table)) = (&result, hints)
            && !round.is_over()
            && let Some(hint) =
                hint_for_attempt(table, round.target_index(), round.target(), *attempt, rng)
        {
            interface.display_hint(&hint);
        }
    };

    interface.display_round_end(&outcome, round.target());
    info_log!(
        "play_round_with() - {} after {} attempt(s)",
        if outcome.won { "won" } else { "lost" },
        outcome.attempts_used
    );
    outcome
}

/// Plays one round and folds the result into `session`.
///
/// A round that cannot start is reported and leaves the session unchanged.
pub fn play_and_record<I, R>(
    session: Session,
    setup: &GameSetup,
    config: &GameConfig,
    interface: &mut I,
    rng: &mut R,
) -> (Session, Result<RoundOutcome>)
where
    I: GameInterface + ?Sized,
    R: Rng,
{
    match play_round(setup, config, interface, rng) {
        Ok(outcome) => {
            let (session, earned) = session.record(&outcome, config.max_attempts);
            if outcome.won {
                interface.display_points_earned(earned, &session);
            }
            info_log!("play_and_record() - session now {:?}", session);
            (session, Ok(outcome))
        }
        Err(e) => {
            log::warn!("Round could not start: {e}");
            interface.display_error(&e);
            (session, Err(e))
        }
    }
}

/// Plays one round without the menu, then shows the exit message.
///
/// A round that cannot start has already been reported through
/// `display_error`; the returned error is only for the caller's exit status.
pub fn play_single_round<I, R>(
    setup: &GameSetup,
    config: &GameConfig,
    interface: &mut I,
    rng: &mut R,
) -> (Session, Result<RoundOutcome>)
where
    I: GameInterface + ?Sized,
    R: Rng,
{
    let (session, outcome) = play_and_record(Session::default(), setup, config, interface, rng);
    interface.display_exit_message(&session);
    (session, outcome)
}

/// Menu loop: keeps offering presets until the player quits.
pub fn run_session<I, R>(setup: &GameSetup, interface: &mut I, rng: &mut R) -> Session
where
    I: GameInterface + ?Sized,
    R: Rng,
{
    let mut session = Session::default();
    loop {
        match interface.read_menu_choice(&session) {
            MenuChoice::Quit => break,
            MenuChoice::Play(preset) => {
                info_log!("run_session() - starting {:?}", preset);
                let config = preset.config().with_time_limit(setup.time_limit);
                let (updated, _) = play_and_record(session, setup, &config, interface, rng);
                session = updated;
            }
        }
    }
    interface.display_exit_message(&session);
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Feedback;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    /// Scripted front end that records what the game showed.
    #[derive(Default)]
    struct ScriptedInterface {
        menu: VecDeque<MenuChoice>,
        guesses: VecDeque<GuessInput>,
        scored: Vec<(String, Vec<Feedback>)>,
        silent_attempts: usize,
        hints: Vec<Hint>,
        ends: Vec<(RoundOutcome, String)>,
        points: Vec<usize>,
        errors: usize,
        exited: bool,
    }

    impl ScriptedInterface {
        fn with_guesses(guesses: &[&str]) -> Self {
            Self {
                guesses: guesses
                    .iter()
                    .map(|g| GuessInput::Entered(g.to_string()))
                    .collect(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn read_menu_choice(&mut self, _session: &Session) -> MenuChoice {
            self.menu.pop_front().unwrap_or(MenuChoice::Quit)
        }

        fn display_round_start(&mut self, _config: &GameConfig) {}

        fn read_guess(&mut self, _attempt: usize, _config: &GameConfig) -> GuessInput {
            self.guesses.pop_front().unwrap_or(GuessInput::Closed)
        }

        fn display_attempt(&mut self, attempt: &Attempt) {
            match attempt {
                Attempt::Scored {
                    guess, feedback, ..
                } => self.scored.push((guess.clone(), feedback.clone())),
                _ => self.silent_attempts += 1,
            }
        }

        fn display_hint(&mut self, hint: &Hint) {
            self.hints.push(hint.clone());
        }

        fn display_round_end(&mut self, outcome: &RoundOutcome, target: &str) {
            self.ends.push((*outcome, target.to_string()));
        }

        fn display_points_earned(&mut self, points: usize, _session: &Session) {
            self.points.push(points);
        }

        fn display_error(&mut self, _error: &GameError) {
            self.errors += 1;
        }

        fn display_exit_message(&mut self, _session: &Session) {
            self.exited = true;
        }
    }

    fn setup(words: &[&str]) -> GameSetup {
        GameSetup {
            words: words.iter().map(ToString::to_string).collect(),
            ..GameSetup::default()
        }
    }

    #[test]
    fn test_session_record_win_and_loss() {
        let won = RoundOutcome {
            won: true,
            attempts_used: 3,
        };
        let lost = RoundOutcome {
            won: false,
            attempts_used: 6,
        };

        let (s, earned) = Session::default().record(&won, 6);
        assert_eq!(earned, 40);
        assert_eq!((s.wins, s.streak, s.points), (1, 1, 40));

        let (s, _) = s.record(&won, 7);
        assert_eq!((s.wins, s.streak, s.points), (2, 2, 90));

        let (s, earned) = s.record(&lost, 6);
        assert_eq!(earned, 0);
        assert_eq!((s.wins, s.losses, s.streak, s.points), (2, 1, 0, 90));
    }

    #[test]
    fn test_points_for_first_guess_win() {
        let outcome = RoundOutcome {
            won: true,
            attempts_used: 1,
        };
        assert_eq!(points_for(&outcome, 6), 60);
    }

    #[test]
    fn test_play_round_win() {
        // Only one five-letter word survives, so the target is known
        let setup = setup(&["light", "four", "planet"]);
        let mut ui = ScriptedInterface::with_guesses(&["apple", "right", "light"]);
        let mut rng = StdRng::seed_from_u64(9);

        let outcome = play_round(&setup, &Preset::Classic.config(), &mut ui, &mut rng).unwrap();

        assert_eq!(
            outcome,
            RoundOutcome {
                won: true,
                attempts_used: 3
            }
        );
        assert_eq!(ui.scored.len(), 3);
        assert_eq!(ui.scored[1].0, "right");
        assert_eq!(ui.ends, vec![(outcome, "light".to_string())]);
    }

    #[test]
    fn test_play_round_invalid_guesses_burn_attempts() {
        let setup = setup(&["light"]);
        let mut ui = ScriptedInterface::with_guesses(&["ab", "l1ght", "light"]);
        let mut rng = StdRng::seed_from_u64(9);

        let outcome = play_round(&setup, &Preset::Classic.config(), &mut ui, &mut rng).unwrap();

        assert!(outcome.won);
        assert_eq!(outcome.attempts_used, 3);
        assert_eq!(ui.silent_attempts, 2);
        assert_eq!(ui.scored.len(), 1);
    }

    #[test]
    fn test_play_round_closed_input_loses() {
        let setup = setup(&["light"]);
        let mut ui = ScriptedInterface::default();
        let mut rng = StdRng::seed_from_u64(9);

        let outcome = play_round(&setup, &Preset::Classic.config(), &mut ui, &mut rng).unwrap();

        assert_eq!(
            outcome,
            RoundOutcome {
                won: false,
                attempts_used: 6
            }
        );
        assert_eq!(ui.silent_attempts, 6);
    }

    #[test]
    fn test_play_round_empty_dictionary() {
        let setup = setup(&["sassy"]);
        let mut ui = ScriptedInterface::with_guesses(&["sassy"]);
        let mut rng = StdRng::seed_from_u64(9);
        let config = GameConfig {
            allow_duplicates: false,
            ..Preset::Classic.config()
        };

        let result = play_round(&setup, &config, &mut ui, &mut rng);

        assert!(matches!(result, Err(GameError::EmptyDictionary { .. })));
        assert!(ui.scored.is_empty());
        assert_eq!(ui.guesses.len(), 1);
    }

    #[test]
    fn test_single_round_reports_empty_dictionary_once() {
        let setup = setup(&["light"]);
        let mut ui = ScriptedInterface::default();
        let mut rng = StdRng::seed_from_u64(9);

        let (session, result) =
            play_single_round(&setup, &Preset::Challenge.config(), &mut ui, &mut rng);

        assert!(matches!(result, Err(GameError::EmptyDictionary { .. })));
        assert_eq!(session, Session::default());
        assert_eq!(ui.errors, 1);
        assert!(ui.ends.is_empty());
        assert!(ui.exited);
    }

    #[test]
    fn test_single_round_win_exits_after_result() {
        let setup = setup(&["light"]);
        let mut ui = ScriptedInterface::with_guesses(&["light"]);
        let mut rng = StdRng::seed_from_u64(9);

        let (session, result) =
            play_single_round(&setup, &Preset::Classic.config(), &mut ui, &mut rng);

        assert!(result.unwrap().won);
        assert_eq!(session.points, 60);
        assert_eq!(ui.points, vec![60]);
        assert!(ui.exited);
    }

    #[test]
    fn test_hints_follow_schedule() {
        let mut setup = setup(&["light"]);
        setup.hints = Some(crate::hints::parse_hints("light|science|Radiation.\n"));
        let mut ui =
            ScriptedInterface::with_guesses(&["apple", "stone", "water", "plane", "light"]);
        let mut rng = StdRng::seed_from_u64(9);

        play_round(&setup, &Preset::Classic.config(), &mut ui, &mut rng).unwrap();

        assert_eq!(ui.hints.len(), 3);
        assert_eq!(ui.hints[0], Hint::Category("science".to_string()));
        assert_eq!(ui.hints[1], Hint::Definition("Radiation.".to_string()));
        assert!(matches!(ui.hints[2], Hint::Letter { .. }));
    }

    #[test]
    fn test_run_session_tracks_score() {
        let setup = setup(&["light", "jinx"]);
        let mut ui = ScriptedInterface::with_guesses(&["light", "stone"]);
        ui.menu = VecDeque::from([
            MenuChoice::Play(Preset::Classic),
            MenuChoice::Play(Preset::Challenge),
            MenuChoice::Play(Preset::Classic),
            MenuChoice::Quit,
        ]);
        let mut rng = StdRng::seed_from_u64(9);

        let session = run_session(&setup, &mut ui, &mut rng);

        // Challenge has no six-letter words; the second classic round runs
        // out of scripted input and is lost.
        assert_eq!(ui.errors, 1);
        assert_eq!(ui.points, vec![60]);
        assert_eq!(
            session,
            Session {
                wins: 1,
                losses: 1,
                streak: 0,
                points: 60
            }
        );
        assert!(ui.exited);
    }
}

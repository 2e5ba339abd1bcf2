use anyhow::{Context, Result};
use std::process::ExitCode;
use wordle_game::cli::{Cli, CliInterface, parse_cli};
use wordle_game::game_state::{GameInterface, GameSetup, play_single_round, run_session};
use wordle_game::hints::{EMBEDDED_HINTS, load_hints_from_file, parse_hints};
use wordle_game::logging;
use wordle_game::tui::TuiInterface;
use wordle_game::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};

fn load_setup(cli: &Cli) -> Result<GameSetup> {
    let words = match &cli.wordbank_path {
        Some(path) => load_wordbank_from_file(path)
            .with_context(|| format!("Failed to load word bank from '{path}'"))?,
        None => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };

    let hints = if cli.hints_enabled() {
        Some(match &cli.hints_path {
            Some(path) => load_hints_from_file(path)
                .with_context(|| format!("Failed to load hints from '{path}'"))?,
            None => parse_hints(EMBEDDED_HINTS),
        })
    } else {
        None
    };

    Ok(GameSetup {
        words,
        hints,
        time_limit: cli.time_limit(),
    })
}

fn run<I: GameInterface>(cli: &Cli, setup: &GameSetup, interface: &mut I) -> Result<ExitCode> {
    let mut rng = rand::rng();
    match cli.round_config()? {
        Some(config) => {
            let (_, outcome) = play_single_round(setup, &config, interface, &mut rng);
            if let Err(e) = outcome {
                // The interface has already shown this
                log::error!("Single round could not start: {e}");
                return Ok(ExitCode::FAILURE);
            }
        }
        None => {
            let session = run_session(setup, interface, &mut rng);
            log::info!("Session finished: {session:?}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    logging::init();
    let cli = parse_cli();
    let setup = load_setup(&cli)?;
    log::info!(
        "Loaded {} words (hints {})",
        setup.words.len(),
        if setup.hints.is_some() { "on" } else { "off" }
    );

    if cli.tui {
        let mut interface = TuiInterface::new().context("Failed to start the terminal UI")?;
        let result = run(&cli, &setup, &mut interface);
        interface.cleanup()?;
        result
    } else {
        let mut interface = CliInterface::stdio();
        run(&cli, &setup, &mut interface)
    }
}

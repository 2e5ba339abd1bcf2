// Library interface for wordle-game
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod game_state;
pub mod hints;
pub mod input;
pub mod logging;
pub mod round;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use config::{GameConfig, Preset};
pub use error::GameError;
pub use evaluator::{Feedback, evaluate};
pub use filter::{InvalidGuess, filter_words};
pub use game_state::{GameInterface, GameSetup, Session, play_round, play_single_round, run_session};
pub use round::{Attempt, GuessInput, Round, RoundOutcome, RoundState};
pub use wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};

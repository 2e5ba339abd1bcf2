use crate::config::{DEFAULT_TIME_LIMIT_SECS, GameConfig, Preset, time_limit_from_secs};
use crate::error::{GameError, Result};
use crate::evaluator::{Feedback, feedback_string};
use crate::game_state::{GameInterface, MenuChoice, Session};
use crate::hints::Hint;
use crate::input::{LineReader, ReadResult, seconds_left};
use crate::round::{Attempt, GuessInput, RoundOutcome};
use crate::{debug_log, info_log};
use clap::Parser;
use crossterm::cursor::{MoveTo, MoveToColumn, MoveUp, RestorePosition, SavePosition};
use crossterm::style::{Color, Print, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use std::fmt::Display;
use std::io::{self, BufReader, IsTerminal, Write};
use std::time::Duration;

const RULE: &str = "-----------------------------------------------------------------";
const QUIT_CHOICE: usize = 4;

/// Terminal word-guessing game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited wordbank file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Path to a `word|category|definition` hint file (turns hints on)
    #[arg(long = "hints-file")]
    pub hints_path: Option<String>,

    /// Show category, definition and letter hints during a round
    #[arg(long)]
    pub hints: bool,

    /// Play a single round of this mode instead of showing the menu
    #[arg(short, long, value_enum, conflicts_with_all = ["length", "attempts", "no_duplicates"])]
    pub mode: Option<Preset>,

    /// Word length for a single custom round
    #[arg(long)]
    pub length: Option<usize>,

    /// Maximum attempts for a single custom round
    #[arg(long)]
    pub attempts: Option<usize>,

    /// Only pick target words without repeated letters (custom round)
    #[arg(long)]
    pub no_duplicates: bool,

    /// Seconds allowed per guess, 0 for no limit
    #[arg(short = 't', long = "time-limit", default_value_t = DEFAULT_TIME_LIMIT_SECS)]
    pub time_limit: u64,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,
}

impl Cli {
    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        time_limit_from_secs(self.time_limit)
    }

    #[must_use]
    pub fn hints_enabled(&self) -> bool {
        self.hints || self.hints_path.is_some()
    }

    /// Settings for a single round, or `None` when the menu should be shown.
    ///
    /// Custom fields left unset fall back to the classic preset.
    pub fn round_config(&self) -> Result<Option<GameConfig>> {
        let base = if let Some(preset) = self.mode {
            preset.config()
        } else if self.length.is_some() || self.attempts.is_some() || self.no_duplicates {
            let classic = Preset::Classic.config();
            GameConfig {
                word_length: self.length.unwrap_or(classic.word_length),
                max_attempts: self.attempts.unwrap_or(classic.max_attempts),
                allow_duplicates: !self.no_duplicates,
                guess_time_limit: None,
            }
        } else {
            return Ok(None);
        };
        let config = base.with_time_limit(self.time_limit());
        config.validate()?;
        Ok(Some(config))
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// First whitespace-delimited token of a line, or `""` for a blank line.
fn first_token(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or("")
}

fn parse_menu_choice(line: &str) -> Option<MenuChoice> {
    let n: usize = first_token(line).parse().ok()?;
    if n == QUIT_CHOICE {
        Some(MenuChoice::Quit)
    } else {
        Preset::from_menu_number(n).map(MenuChoice::Play)
    }
}

fn feedback_colors(feedback: Feedback) -> Color {
    match feedback {
        Feedback::Correct => Color::DarkGreen,
        Feedback::Present => Color::DarkYellow,
        Feedback::Absent => Color::DarkGrey,
    }
}

/// One segment per letter; without colour the tags are appended as `G`/`Y`/`X`.
fn render_feedback_row(guess: &str, feedback: &[Feedback], color: bool) -> String {
    let mut row = String::new();
    for (letter, &fb) in guess.chars().zip(feedback) {
        let segment = format!(" {} ", letter.to_ascii_uppercase());
        if color {
            row.push_str(&segment.with(Color::White).on(feedback_colors(fb)).to_string());
        } else {
            row.push_str(&segment);
        }
    }
    if !color {
        row.push_str("  ");
        row.push_str(&feedback_string(feedback));
    }
    row
}

/// Rewrites the countdown on the line above the cursor and puts the cursor
/// back where the player is typing.
fn redraw_countdown<W: Write>(out: &mut W, secs: u64) -> io::Result<()> {
    queue!(
        out,
        SavePosition,
        MoveUp(1),
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(format!("Time Left: {secs}s")),
        RestorePosition
    )?;
    out.flush()
}

/// Line-oriented front end for a plain terminal.
pub struct CliInterface<W: Write> {
    reader: LineReader,
    out: W,
    /// Output is a terminal: colours, screen clears and a live countdown.
    color: bool,
    timed_out_last: bool,
    closed: bool,
}

impl CliInterface<io::Stdout> {
    /// Reads standard input, writes standard output, and colours output only
    /// when it is a terminal.
    pub fn stdio() -> Self {
        let out = io::stdout();
        let color = out.is_terminal();
        Self::new(LineReader::spawn(BufReader::new(io::stdin())), out).with_color(color)
    }
}

impl<W: Write> CliInterface<W> {
    pub fn new(reader: LineReader, out: W) -> Self {
        Self {
            reader,
            out,
            color: false,
            timed_out_last: false,
            closed: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn say<T: Display>(&mut self, text: T) {
        if let Err(e) = writeln!(self.out, "{text}") {
            debug_log!("CliInterface - write failed: {}", e);
        }
    }

    fn say_colored(&mut self, text: &str, color: Color) {
        if self.color {
            let styled = text.with(color);
            self.say(styled);
        } else {
            self.say(text);
        }
    }

    fn prompt(&mut self, text: &str) {
        let _ = write!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn clear_screen(&mut self) {
        if self.color
            && let Err(e) = execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))
        {
            debug_log!("CliInterface - clear failed: {}", e);
        }
    }

    fn display_banner(&mut self) {
        self.say_colored(RULE, Color::Green);
        self.say_colored("                     W  O  R  D  L  E", Color::Green);
        self.say_colored(RULE, Color::Green);
    }

    fn read_line_for_guess(&mut self, limit: Option<Duration>) -> ReadResult {
        match limit {
            None => self.reader.read_line(),
            Some(limit) => {
                let live = self.color;
                let out = &mut self.out;
                self.reader.read_line_timeout(limit, |secs| {
                    if live && let Err(e) = redraw_countdown(out, secs) {
                        debug_log!("CliInterface - countdown failed: {}", e);
                    }
                })
            }
        }
    }

    /// Throws away lines typed after the last deadline passed.
    fn drop_late_lines(&mut self) {
        if self.timed_out_last {
            let dropped = self.reader.discard_pending();
            if dropped > 0 {
                debug_log!("CliInterface - dropped {} late line(s)", dropped);
            }
            self.timed_out_last = false;
        }
    }
}

impl<W: Write> GameInterface for CliInterface<W> {
    fn read_menu_choice(&mut self, session: &Session) -> MenuChoice {
        self.drop_late_lines();
        loop {
            if self.closed {
                return MenuChoice::Quit;
            }
            self.display_banner();
            let score = format!(
                "Score: Wins = {} | Losses = {} | Streak = {} | Points = {}",
                session.wins, session.losses, session.streak, session.points
            );
            self.say_colored(&score, Color::Yellow);
            self.say(RULE);
            for preset in Preset::ALL {
                self.say(format!("{}. {preset}", preset.menu_number()));
            }
            self.say(format!("{QUIT_CHOICE}. Quit The Game"));
            self.say(RULE);
            self.prompt("Enter Choice: ");

            match self.reader.read_line() {
                ReadResult::Line(line) => {
                    if let Some(choice) = parse_menu_choice(&line) {
                        info_log!("CliInterface - menu choice {:?}", choice);
                        return choice;
                    }
                    self.clear_screen();
                    self.say(format!("Invalid choice '{}'.", line.trim()));
                }
                ReadResult::Closed | ReadResult::TimedOut => {
                    self.closed = true;
                    return MenuChoice::Quit;
                }
            }
        }
    }

    fn display_round_start(&mut self, config: &GameConfig) {
        self.clear_screen();
        self.display_banner();
        let header = format!(
            "| Word Length: {} | Max Attempts: {}",
            config.word_length, config.max_attempts
        );
        self.say_colored(&header, Color::Yellow);
        let intro = format!(
            "| You have {} attempts to guess the word.",
            config.max_attempts
        );
        self.say_colored(&intro, Color::Yellow);
    }

    fn read_guess(&mut self, attempt: usize, config: &GameConfig) -> GuessInput {
        if self.closed {
            return GuessInput::Closed;
        }
        self.drop_late_lines();

        let mut header = format!("\nAttempt {attempt}/{}", config.max_attempts);
        if let Some(limit) = config.guess_time_limit {
            header.push_str(&format!(" ({}s Timer)", seconds_left(limit)));
        }
        self.say(header);
        // The countdown owns the line above the prompt
        if let Some(limit) = config.guess_time_limit {
            self.say(format!("Time Left: {}s", seconds_left(limit)));
        }
        self.prompt("> ");

        match self.read_line_for_guess(config.guess_time_limit) {
            ReadResult::Line(line) => GuessInput::Entered(first_token(&line).to_string()),
            ReadResult::TimedOut => {
                self.timed_out_last = true;
                self.say("\nTime is up!");
                GuessInput::TimedOut
            }
            ReadResult::Closed => {
                self.closed = true;
                GuessInput::Closed
            }
        }
    }

    fn display_attempt(&mut self, attempt: &Attempt) {
        match attempt {
            Attempt::Scored {
                guess, feedback, ..
            } => {
                let row = render_feedback_row(guess, feedback, self.color);
                self.say(row);
            }
            Attempt::Rejected { reason, .. } => {
                self.say(format!("Invalid input ({reason})."));
            }
            Attempt::TimedOut { attempt } => {
                self.say(format!("No guess for attempt {attempt}."));
            }
            Attempt::InputClosed { .. } | Attempt::Finished(_) => {}
        }
    }

    fn display_hint(&mut self, hint: &Hint) {
        match hint {
            Hint::Category(category) => {
                self.say_colored(&format!("Hint (Category): {category}"), Color::Magenta);
            }
            Hint::Definition(definition) => {
                self.say_colored(&format!("Hint (Definition): {definition}"), Color::Cyan);
            }
            Hint::Letter { position, letter } => {
                self.say_colored(
                    &format!("Hint (Letter at position {position}): {letter}"),
                    Color::Yellow,
                );
            }
        }
    }

    fn display_round_end(&mut self, outcome: &RoundOutcome, target: &str) {
        if outcome.won {
            self.say_colored(&format!("\nCorrect! The Word Was: {target}"), Color::Green);
        } else {
            self.say_colored(
                &format!("\nOut of attempts! The Word Was: {target}"),
                Color::Red,
            );
        }
    }

    fn display_points_earned(&mut self, points: usize, _session: &Session) {
        self.say(format!("You earned {points} points!"));
    }

    fn display_error(&mut self, error: &GameError) {
        self.say_colored(&format!("Cannot start round: {error}"), Color::Red);
    }

    fn display_exit_message(&mut self, session: &Session) {
        self.say(format!(
            "Final score: Wins = {} | Losses = {} | Points = {}",
            session.wins, session.losses, session.points
        ));
        self.say("Exiting.");
    }
}

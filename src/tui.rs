//! TUI (Terminal User Interface) front end
//!
//! This module provides a full-screen interface using Ratatui.
//!
//! # State Machine
//! - `Menu` → `EnteringGuess` (once per attempt) → `RoundOver` → back to `Menu`
//! - `Exiting` is terminal: every later read returns immediately
//!
//! The per-guess timer is the `event::poll` timeout itself, so a key press and
//! an expired deadline are never both accepted for the same attempt.

use crate::config::{GameConfig, Preset};
use crate::error::GameError;
use crate::evaluator::Feedback;
use crate::game_state::{GameInterface, MenuChoice, Session};
use crate::hints::Hint;
use crate::input::seconds_left;
use crate::round::{Attempt, GuessInput, RoundOutcome};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::{Duration, Instant};

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const HINT_STYLE: Style = Style::new().fg(Color::Magenta);

#[derive(Clone, Copy, PartialEq, Debug)]
enum LetterState {
    Entered,
    Correct, // Green
    Present, // Yellow
    Absent,  // Gray
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Entered => (Color::DarkGray, Color::White),
            Self::Correct => (Color::Green, Color::Black),
            Self::Present => (Color::Yellow, Color::Black),
            Self::Absent => (Color::Gray, Color::White),
        }
    }

    fn from_feedback(feedback: Feedback) -> Self {
        match feedback {
            Feedback::Correct => Self::Correct,
            Feedback::Present => Self::Present,
            Feedback::Absent => Self::Absent,
        }
    }
}

/// A finished attempt on the board.
#[derive(Debug)]
enum BoardRow {
    Scored {
        letters: Vec<char>,
        states: Vec<LetterState>,
    },
    /// Refused or timed-out attempt; nothing to colour.
    Skipped(String),
}

impl BoardRow {
    fn scored(guess: &str, feedback: &[Feedback]) -> Self {
        Self::Scored {
            letters: guess.chars().map(|c| c.to_ascii_uppercase()).collect(),
            states: feedback.iter().copied().map(LetterState::from_feedback).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    Menu,
    EnteringGuess { attempt: usize },
    RoundOver,
    Exiting,
}

/// Whether the screen holds a result or error the player has not yet
/// dismissed with a key press.
fn awaits_acknowledgement(state: TuiState, error_message: &str) -> bool {
    match state {
        TuiState::RoundOver => true,
        TuiState::Exiting => false,
        TuiState::Menu | TuiState::EnteringGuess { .. } => !error_message.is_empty(),
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    rows: &'a [BoardRow],
    current_input: &'a str,
    state: TuiState,
    config: Option<&'a GameConfig>,
    session: &'a Session,
    hint_lines: &'a [String],
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
    time_left: Option<u64>,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and round display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    rows: Vec<BoardRow>,
    current_input: String,
    state: TuiState,
    config: Option<GameConfig>,
    session: Session,
    hint_lines: Vec<String>,
    message: String,
    error_message: String,
    status: String,
    time_left: Option<u64>,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            rows: Vec::new(),
            current_input: String::new(),
            state: TuiState::Menu,
            config: None,
            session: Session::default(),
            hint_lines: Vec::new(),
            message: String::new(),
            error_message: String::new(),
            status: "Ready".to_string(),
            time_left: None,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            rows: &self.rows,
            current_input: &self.current_input,
            state: self.state,
            config: self.config.as_ref(),
            session: &self.session,
            hint_lines: &self.hint_lines,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
            time_left: self.time_left,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(16), // Game board or menu
                Constraint::Min(6),     // Info panel (takes remaining space)
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.config);
        if ctx.state == TuiState::Menu {
            Self::render_menu(f, chunks[1], ctx.session);
        } else {
            Self::render_board(f, chunks[1], ctx);
        }
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status, ctx.time_left);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect, config: Option<&GameConfig>) {
        let text = match config {
            Some(c) => format!(
                "WORDLE | Word Length: {} | Max Attempts: {}",
                c.word_length, c.max_attempts
            ),
            None => "WORDLE".to_string(),
        };
        let title = Paragraph::new(text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_menu(f: &mut Frame, area: Rect, session: &Session) {
        let mut lines = vec![
            Line::from(Span::styled(
                format!(
                    "Score: Wins = {} | Losses = {} | Streak = {} | Points = {}",
                    session.wins, session.losses, session.streak, session.points
                ),
                INFO_STYLE,
            )),
            Line::from(""),
        ];
        for preset in Preset::ALL {
            lines.push(Line::from(format!("  {}. {preset}", preset.menu_number())));
        }
        lines.push(Line::from("  4. Quit The Game"));

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Menu").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default()
            .title("Guesses")
            .borders(Borders::ALL)
            .style(Style::default());

        let inner = block.inner(area);
        f.render_widget(block, area);

        let word_length = ctx.config.map_or(0, |c| c.word_length);
        let available_rows = (inner.height / ROW_SPACING) as usize;
        let showing_current_input = matches!(ctx.state, TuiState::EnteringGuess { .. });
        let rows_needed = ctx.rows.len() + usize::from(showing_current_input);

        // Prioritize the most recent attempts when space runs out
        let skip_count = rows_needed.saturating_sub(available_rows);

        for (display_index, row) in ctx.rows.iter().skip(skip_count).enumerate() {
            let spans = match row {
                BoardRow::Scored { letters, states } => {
                    Self::letter_spans(letters.iter().copied().zip(states.iter().copied()))
                }
                BoardRow::Skipped(note) => {
                    vec![Span::raw("  "), Span::styled(note.clone(), ERROR_STYLE)]
                }
            };
            Self::render_line(f, inner, display_index, spans);
        }

        if showing_current_input {
            let display_row = ctx.rows.len().saturating_sub(skip_count);
            let letters = (0..word_length)
                .map(|i| ctx.current_input.chars().nth(i).unwrap_or(' '))
                .map(|c| (c, LetterState::Entered));
            Self::render_line(f, inner, display_row, Self::letter_spans(letters));
        }
    }

    fn letter_spans<'a>(letters: impl Iterator<Item = (char, LetterState)>) -> Vec<Span<'a>> {
        let mut spans = vec![Span::raw("  ")];
        for (letter, state) in letters {
            let (bg_color, fg_color) = state.colors();
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }
        spans
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_line(f: &mut Frame, area: Rect, row_index: usize, spans: Vec<Span>) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }
        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        for hint in ctx.hint_lines {
            lines.push(Line::from(Span::styled(hint.as_str(), HINT_STYLE)));
        }
        if !ctx.hint_lines.is_empty() {
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            let style = if ctx.state == TuiState::RoundOver {
                SUCCESS_STYLE
            } else {
                MESSAGE_STYLE
            };
            lines.push(Line::from(Span::styled(ctx.message, style)));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Menu => "1-3: Choose a mode | 4 / ESC: Quit".to_string(),
            TuiState::EnteringGuess { attempt } => {
                format!("Attempt {attempt}: type your guess | ENTER: Submit | ESC: Quit")
            }
            TuiState::RoundOver => "Press any key to return to the menu".to_string(),
            TuiState::Exiting => "Exiting...".to_string(),
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str, time_left: Option<u64>) {
        let status_text = match time_left {
            Some(secs) => format!("{status} | Time Left: {secs}s"),
            None if status.is_empty() => "Ready".to_string(),
            None => status.to_string(),
        };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Waits up to `timeout` for a key press, filtering out noise.
    fn next_key(timeout: Duration) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let event = event::read()?;
        let Event::Key(key) = event else {
            debug_log!("next_key() - Ignoring non-key event: {:?}", event);
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }

        // Garbage from escape sequences when alt-tabbing
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("next_key() - Ignoring invalid character: {:?}", c);
            return Ok(None);
        }

        if key.modifiers.contains(KeyModifiers::ALT)
            || key.modifiers.contains(KeyModifiers::CONTROL)
        {
            debug_log!("next_key() - Ignoring key with modifier: {:?}", key.modifiers);
            return Ok(None);
        }

        Ok(Some(key))
    }

    fn enter_exiting(&mut self) {
        self.state = TuiState::Exiting;
        self.time_left = None;
    }

    /// Blocks until any key is pressed, unless the player is leaving.
    fn wait_for_any_key(&mut self) {
        while self.state != TuiState::Exiting {
            self.draw_or_log();
            match Self::next_key(Duration::from_millis(EVENT_POLL_TIMEOUT_MS)) {
                Ok(Some(_)) => return,
                Ok(None) => {}
                Err(e) => {
                    debug_log!("wait_for_any_key() - Input error: {}", e);
                    self.enter_exiting();
                }
            }
        }
    }

    /// Applies one key while a guess is being typed.
    ///
    /// Returns the finished input on Enter.
    fn handle_guess_key(&mut self, key: KeyEvent, word_length: usize) -> Option<String> {
        self.error_message.clear();
        match key.code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if self.current_input.chars().count() < word_length {
                    self.current_input.push(c.to_ascii_uppercase());
                }
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_key() - submitting '{}'", guess);
                return Some(guess);
            }
            KeyCode::Esc => {
                info_log!("handle_guess_key() - ESC pressed, leaving");
                self.enter_exiting();
            }
            _ => {
                debug_log!("handle_guess_key() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }
}

impl GameInterface for TuiInterface {
    fn read_menu_choice(&mut self, session: &Session) -> MenuChoice {
        if self.state == TuiState::RoundOver {
            self.wait_for_any_key();
        }
        self.session = *session;
        if self.state == TuiState::Exiting {
            return MenuChoice::Quit;
        }

        self.state = TuiState::Menu;
        self.config = None;
        self.status = "Choose a mode".to_string();
        loop {
            self.draw_or_log();
            let key = match Self::next_key(Duration::from_millis(EVENT_POLL_TIMEOUT_MS)) {
                Ok(Some(key)) => key,
                Ok(None) => continue,
                Err(e) => {
                    debug_log!("read_menu_choice() - Input error: {}", e);
                    self.enter_exiting();
                    return MenuChoice::Quit;
                }
            };
            match key.code {
                KeyCode::Esc | KeyCode::Char('4' | 'q' | 'Q') => {
                    self.enter_exiting();
                    return MenuChoice::Quit;
                }
                KeyCode::Char(c) => {
                    let preset = c
                        .to_digit(10)
                        .and_then(|d| Preset::from_menu_number(d as usize));
                    if let Some(preset) = preset {
                        self.error_message.clear();
                        return MenuChoice::Play(preset);
                    }
                    self.error_message = format!("'{c}' is not a menu option");
                }
                _ => {}
            }
        }
    }

    fn display_round_start(&mut self, config: &GameConfig) {
        self.rows.clear();
        self.hint_lines.clear();
        self.current_input.clear();
        self.message = format!("You have {} attempts to guess the word.", config.max_attempts);
        self.config = Some(config.clone());
        self.draw_or_log();
    }

    fn read_guess(&mut self, attempt: usize, config: &GameConfig) -> GuessInput {
        if self.state == TuiState::Exiting {
            return GuessInput::Closed;
        }
        self.state = TuiState::EnteringGuess { attempt };
        self.current_input.clear();
        self.status = format!("Attempt {attempt}/{}", config.max_attempts);

        let deadline = config.guess_time_limit.map(|limit| Instant::now() + limit);
        loop {
            let mut poll = Duration::from_millis(EVENT_POLL_TIMEOUT_MS);
            if let Some(deadline) = deadline {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    info_log!("read_guess() - attempt {} timed out", attempt);
                    self.time_left = None;
                    self.current_input.clear();
                    return GuessInput::TimedOut;
                }
                self.time_left = Some(seconds_left(remaining));
                poll = poll.min(remaining);
            }
            self.draw_or_log();

            match Self::next_key(poll) {
                Ok(Some(key)) => {
                    if let Some(guess) = self.handle_guess_key(key, config.word_length) {
                        self.time_left = None;
                        return GuessInput::Entered(guess);
                    }
                    if self.state == TuiState::Exiting {
                        return GuessInput::Closed;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    debug_log!("read_guess() - Input error: {}", e);
                    self.enter_exiting();
                    return GuessInput::Closed;
                }
            }
        }
    }

    fn display_attempt(&mut self, attempt: &Attempt) {
        let row = match attempt {
            Attempt::Scored {
                guess, feedback, ..
            } => BoardRow::scored(guess, feedback),
            Attempt::Rejected { reason, .. } => BoardRow::Skipped(format!("Invalid input ({reason})")),
            Attempt::TimedOut { .. } => BoardRow::Skipped("Time is up!".to_string()),
            Attempt::InputClosed { .. } => BoardRow::Skipped("No input".to_string()),
            Attempt::Finished(_) => return,
        };
        self.rows.push(row);
        self.draw_or_log();
    }

    fn display_hint(&mut self, hint: &Hint) {
        let line = match hint {
            Hint::Category(category) => format!("Hint (Category): {category}"),
            Hint::Definition(definition) => format!("Hint (Definition): {definition}"),
            Hint::Letter { position, letter } => {
                format!("Hint (Letter at position {position}): {letter}")
            }
        };
        self.hint_lines.push(line);
        self.draw_or_log();
    }

    fn display_round_end(&mut self, outcome: &RoundOutcome, target: &str) {
        if self.state != TuiState::Exiting {
            self.state = TuiState::RoundOver;
        }
        self.message = if outcome.won {
            format!("Correct! The Word Was: {}", target.to_uppercase())
        } else {
            format!("Out of attempts! The Word Was: {}", target.to_uppercase())
        };
        self.status = format!("Round over after {} attempt(s)", outcome.attempts_used);
        self.draw_or_log();
    }

    fn display_points_earned(&mut self, points: usize, session: &Session) {
        self.session = *session;
        self.message = format!("{} You earned {points} points!", self.message);
        self.draw_or_log();
    }

    fn display_error(&mut self, error: &GameError) {
        self.error_message = format!("Cannot start round: {error}");
        self.draw_or_log();
    }

    fn display_exit_message(&mut self, session: &Session) {
        self.session = *session;
        // A single round goes straight here, so keep its result on screen
        if awaits_acknowledgement(self.state, &self.error_message) {
            self.wait_for_any_key();
        }
        self.enter_exiting();
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

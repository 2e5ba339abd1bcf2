//! One round: a hidden target, a bounded number of attempts, and the state
//! machine that moves between them.
//!
//! # State Machine
//! - `AwaitingGuess(n)` → `Won` when the guess matches the target
//! - `AwaitingGuess(n)` → `Lost` when `n` was the last attempt
//! - `AwaitingGuess(n)` → `AwaitingGuess(n + 1)` otherwise
//!
//! Every submission uses up an attempt, including refused and timed-out ones.

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::evaluator::{Feedback, evaluate, is_solved};
use crate::filter::{InvalidGuess, validate_guess};
use crate::{debug_log, info_log};
use rand::Rng;

/// What the player produced for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessInput {
    Entered(String),
    TimedOut,
    /// Input stream ended before a guess arrived.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting for the given 1-based attempt.
    AwaitingGuess(usize),
    Won,
    Lost,
}

impl RoundState {
    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Result of submitting one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Scored {
        attempt: usize,
        guess: String,
        feedback: Vec<Feedback>,
    },
    Rejected {
        attempt: usize,
        reason: InvalidGuess,
    },
    TimedOut {
        attempt: usize,
    },
    InputClosed {
        attempt: usize,
    },
    /// The round had already ended; nothing changed.
    Finished(RoundState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    pub won: bool,
    pub attempts_used: usize,
}

/// Picks an index uniformly over every entry, repeated words included.
pub fn choose_target<R: Rng>(dictionary: &[String], rng: &mut R) -> Option<usize> {
    if dictionary.is_empty() {
        None
    } else {
        Some(rng.random_range(0..dictionary.len()))
    }
}

#[derive(Debug, Clone)]
pub struct Round {
    config: GameConfig,
    target: String,
    target_index: usize,
    attempts_used: usize,
    state: RoundState,
}

impl Round {
    /// Starts a round with a random target from an already filtered dictionary.
    ///
    /// Fails without touching the RNG when the dictionary is empty.
    pub fn start<R: Rng>(dictionary: &[String], config: &GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let index = choose_target(dictionary, rng).ok_or(GameError::EmptyDictionary {
            word_length: config.word_length,
            allow_duplicates: config.allow_duplicates,
        })?;
        debug_log!(
            "Round::start() - target index {} of {} candidates",
            index,
            dictionary.len()
        );
        Ok(Self::with_target(config.clone(), &dictionary[index], index))
    }

    /// Starts a round with a known target, which should be
    /// `config.word_length` letters long.
    pub fn with_target(config: GameConfig, target: &str, target_index: usize) -> Self {
        Self {
            config,
            target: target.to_ascii_lowercase(),
            target_index,
            attempts_used: 0,
            state: RoundState::AwaitingGuess(1),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn attempts_used(&self) -> usize {
        self.attempts_used
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// `None` once the round has ended.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.state {
            RoundState::AwaitingGuess(_) => None,
            RoundState::Won | RoundState::Lost => Some(RoundOutcome {
                won: self.state == RoundState::Won,
                attempts_used: self.attempts_used,
            }),
        }
    }

    pub fn submit(&mut self, input: GuessInput) -> Attempt {
        let RoundState::AwaitingGuess(attempt) = self.state else {
            return Attempt::Finished(self.state);
        };
        self.attempts_used += 1;

        let result = match input {
            GuessInput::Entered(raw) => match validate_guess(&raw, self.config.word_length) {
                Ok(guess) => {
                    let feedback = evaluate(&self.target, &guess);
                    Attempt::Scored {
                        attempt,
                        guess,
                        feedback,
                    }
                }
                Err(reason) => Attempt::Rejected { attempt, reason },
            },
            GuessInput::TimedOut => Attempt::TimedOut { attempt },
            GuessInput::Closed => Attempt::InputClosed { attempt },
        };

        self.state = match &result {
            Attempt::Scored { feedback, .. } if is_solved(feedback) => RoundState::Won,
            _ if attempt >= self.config.max_attempts => RoundState::Lost,
            _ => RoundState::AwaitingGuess(attempt + 1),
        };

        info_log!(
            "Round::submit() - attempt {}/{}: {:?} -> {:?}",
            attempt,
            self.config.max_attempts,
            result,
            self.state
        );
        result
    }
}

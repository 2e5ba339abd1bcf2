//! Round configuration and the built-in presets offered by the menu.

use crate::error::{GameError, Result};
use clap::ValueEnum;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_TIME_LIMIT_SECS: u64 = 30;

/// Settings for a single round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub word_length: usize,
    pub max_attempts: usize,
    pub allow_duplicates: bool,
    /// `None` means guesses are never forced to time out.
    pub guess_time_limit: Option<Duration>,
}

impl GameConfig {
    /// Builds a config, rejecting zero lengths and zero attempts.
    pub fn new(
        word_length: usize,
        max_attempts: usize,
        allow_duplicates: bool,
        guess_time_limit: Option<Duration>,
    ) -> Result<Self> {
        let config = Self {
            word_length,
            max_attempts,
            allow_duplicates,
            guess_time_limit,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.word_length == 0 {
            return Err(GameError::InvalidConfig(
                "word length must be at least 1".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(GameError::InvalidConfig(
                "max attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.guess_time_limit = limit;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Preset::Classic.config()
    }
}

/// The three modes offered on the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 5 letters, 6 attempts
    Classic,
    /// 4 letters, 7 attempts, no repeated letters
    Hard,
    /// 6 letters, 6 attempts
    Challenge,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Classic, Preset::Hard, Preset::Challenge];

    /// Preset settings with no time limit; callers layer the limit on top.
    #[must_use]
    pub fn config(self) -> GameConfig {
        let (word_length, max_attempts, allow_duplicates) = match self {
            Self::Classic => (5, 6, true),
            Self::Hard => (4, 7, false),
            Self::Challenge => (6, 6, true),
        };
        GameConfig {
            word_length,
            max_attempts,
            allow_duplicates,
            guess_time_limit: None,
        }
    }

    /// Menu number, starting from 1.
    #[must_use]
    pub fn menu_number(self) -> usize {
        match self {
            Self::Classic => 1,
            Self::Hard => 2,
            Self::Challenge => 3,
        }
    }

    #[must_use]
    pub fn from_menu_number(n: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.menu_number() == n)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => write!(f, "Play Classic Wordle"),
            Self::Hard => write!(f, "Play 4-Letter Hard Mode"),
            Self::Challenge => write!(f, "Play 6-Letter Challenge"),
        }
    }
}

/// Converts the `--time-limit` seconds value, where 0 disables the timer.
#[must_use]
pub fn time_limit_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

use crate::config::GameConfig;

fn has_duplicate_letters(word: &str) -> bool {
    let mut seen = Vec::with_capacity(word.len());
    for c in word.chars().map(|c| c.to_ascii_lowercase()) {
        if seen.contains(&c) {
            return true;
        }
        seen.push(c);
    }
    false
}

fn is_alpha_word(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_alphabetic())
}

/// Narrows a raw word list to the words playable under `config`.
///
/// Words are checked for length, then repeated letters (only when duplicates
/// are disallowed), then lower-cased and checked for non-letters. Input order
/// and repeated entries are kept.
pub fn filter_words<S: AsRef<str>>(words: &[S], config: &GameConfig) -> Vec<String> {
    words
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|w| w.chars().count() == config.word_length)
        .filter(|w| config.allow_duplicates || !has_duplicate_letters(w))
        .map(str::to_lowercase)
        .filter(|w| is_alpha_word(w))
        .collect()
}

/// Checks a player's guess, returning it lower-cased when playable.
pub fn validate_guess(input: &str, word_length: usize) -> Result<String, InvalidGuess> {
    let guess = input.trim();
    if guess.is_empty() {
        return Err(InvalidGuess::Empty);
    }
    let actual = guess.chars().count();
    if actual != word_length {
        return Err(InvalidGuess::WrongLength {
            expected: word_length,
            actual,
        });
    }
    if !is_alpha_word(guess) {
        return Err(InvalidGuess::NotAlphabetic);
    }
    Ok(guess.to_ascii_lowercase())
}

/// Why a guess was refused. The attempt is still used up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidGuess {
    Empty,
    WrongLength { expected: usize, actual: usize },
    NotAlphabetic,
}

impl std::fmt::Display for InvalidGuess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "no guess entered"),
            Self::WrongLength { expected, actual } => {
                write!(f, "expected {expected} letters, got {actual}")
            }
            Self::NotAlphabetic => write!(f, "only letters are allowed"),
        }
    }
}

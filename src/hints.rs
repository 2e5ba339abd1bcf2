//! Optional clues shown partway through a round.
//!
//! Hint files hold one `word|category|definition` entry per line. Lookups go
//! through [`HintProvider`] by the target's index in the filtered dictionary,
//! so [`HintTable::for_dictionary`] re-aligns the raw entries to that list.

use crate::error::{GameError, Result};
use rand::Rng;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const EMBEDDED_HINTS: &str = include_str!("resources/hints.txt");

/// Attempt after which the category is shown.
pub const CATEGORY_ATTEMPT: usize = 2;
/// Attempt after which the definition is shown.
pub const DEFINITION_ATTEMPT: usize = 3;
/// Attempt after which one letter of the target is revealed.
pub const LETTER_ATTEMPT: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintEntry {
    pub category: Option<String>,
    pub definition: Option<String>,
}

/// What the player is told after a given attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    Category(String),
    Definition(String),
    /// 1-based position and the letter found there.
    Letter { position: usize, letter: char },
}

pub trait HintProvider {
    fn category(&self, target_index: usize) -> Option<&str>;
    fn definition(&self, target_index: usize) -> Option<&str>;
}

/// Hint entries laid out in the same order as a filtered dictionary.
#[derive(Debug, Clone, Default)]
pub struct HintTable {
    entries: Vec<Option<HintEntry>>,
}

impl HintTable {
    /// Builds a table where `entries[i]` describes `dictionary[i]`.
    pub fn for_dictionary(dictionary: &[String], hints: &HashMap<String, HintEntry>) -> Self {
        let entries = dictionary.iter().map(|w| hints.get(w).cloned()).collect();
        Self { entries }
    }

    fn entry(&self, index: usize) -> Option<&HintEntry> {
        self.entries.get(index).and_then(Option::as_ref)
    }
}

impl HintProvider for HintTable {
    fn category(&self, target_index: usize) -> Option<&str> {
        self.entry(target_index)?.category.as_deref()
    }

    fn definition(&self, target_index: usize) -> Option<&str> {
        self.entry(target_index)?.definition.as_deref()
    }
}

/// Parses `word|category|definition` lines, keyed by lower-cased word.
///
/// Missing or empty fields become `None`. Blank lines and `#` comments are
/// skipped. A later entry for the same word replaces an earlier one.
pub fn parse_hints(data: &str) -> HashMap<String, HintEntry> {
    let non_empty = |s: Option<&str>| {
        s.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    };

    let mut hints = HashMap::new();
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.splitn(3, '|');
        let Some(word) = fields.next().map(str::trim).filter(|w| !w.is_empty()) else {
            continue;
        };
        let entry = HintEntry {
            category: non_empty(fields.next()),
            definition: non_empty(fields.next()),
        };
        hints.insert(word.to_lowercase(), entry);
    }
    hints
}

pub fn load_hints_from_file<P: AsRef<Path>>(path: P) -> Result<HashMap<String, HintEntry>> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| GameError::WordBank {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_hints(&data))
}

/// Picks the hint for `attempt`, if that attempt has one.
pub fn hint_for_attempt<H, R>(
    provider: &H,
    target_index: usize,
    target: &str,
    attempt: usize,
    rng: &mut R,
) -> Option<Hint>
where
    H: HintProvider + ?Sized,
    R: Rng,
{
    match attempt {
        CATEGORY_ATTEMPT => provider
            .category(target_index)
            .map(|c| Hint::Category(c.to_string())),
        DEFINITION_ATTEMPT => provider
            .definition(target_index)
            .map(|d| Hint::Definition(d.to_string())),
        LETTER_ATTEMPT => {
            let letters: Vec<char> = target.chars().collect();
            if letters.is_empty() {
                return None;
            }
            let i = rng.random_range(0..letters.len());
            Some(Hint::Letter {
                position: i + 1,
                letter: letters[i],
            })
        }
        _ => None,
    }
}

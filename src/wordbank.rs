use crate::error::{GameError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Splits a newline-delimited list into raw words.
///
/// Blank lines and `#` comments are skipped. No other checks are made here;
/// length, letters and case are the filter's job.
pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(parse_line).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let wordbank_err = |source| GameError::WordBank {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(wordbank_err)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = parse_line(&line.map_err(wordbank_err)?) {
            words.push(word);
        }
    }
    Ok(words)
}

fn parse_line(line: &str) -> Option<String> {
    let word = line.trim();
    if word.is_empty() || word.starts_with('#') {
        None
    } else {
        Some(word.to_string())
    }
}

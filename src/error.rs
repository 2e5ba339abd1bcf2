use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// No word in the list survives filtering, so no target can be chosen.
    #[error(
        "no {word_length}-letter words available{}",
        if *allow_duplicates { "" } else { " without repeated letters" }
    )]
    EmptyDictionary {
        word_length: usize,
        allow_duplicates: bool,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read '{}': {source}", path.display())]
    WordBank {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;

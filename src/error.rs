//! Error types for anaphor.

use thiserror::Error;

/// Result type for anaphor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for anaphor operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided (contract violation on a core entry point).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Lexicon loading/parsing error.
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a lexicon error.
    pub fn lexicon(msg: impl Into<String>) -> Self {
        Error::Lexicon(msg.into())
    }
}

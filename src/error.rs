//! Error types shared across the engine

use thiserror::Error;

use crate::schedule::Mode;

/// Reasons a classic guess is refused before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    /// The guess does not have the mode's word length.
    #[error("guess must be {expected} letters long")]
    IncompleteWord {
        /// Word length the mode expects.
        expected: usize,
    },
    /// The guess is not a dictionary word of that length.
    #[error("{0} is not in the word list")]
    InvalidWord(String),
    /// The clock has moved past the round this session was opened for.
    #[error("this round has ended; reload to play the new round")]
    RoundExpired,
}

/// Failures from the dictionary, blacklist and round collaborators.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Nothing is published for the requested mode and date.
    #[error("no {0} round is published for that date")]
    RoundNotFound(Mode),
    /// The round exists but is not available to this caller.
    #[error("this round is private")]
    PrivateRound,
    /// Generic transport-style failure with an HTTP-like status.
    #[error("request failed ({status}): {message}")]
    Api {
        /// HTTP-like status code.
        status: u16,
        /// Human readable message, shown verbatim.
        message: String,
        /// Optional structured detail.
        payload: Option<serde_json::Value>,
    },
}

impl FetchError {
    /// Map an I/O failure on a data file to an HTTP-like status.
    #[must_use]
    pub fn from_io(what: &str, err: &std::io::Error) -> Self {
        let status = match err.kind() {
            std::io::ErrorKind::NotFound => 404,
            std::io::ErrorKind::PermissionDenied => 403,
            _ => 500,
        };
        Self::Api {
            status,
            message: format!("could not read {what}: {err}"),
            payload: None,
        }
    }

    /// A data file was read but its contents are malformed.
    #[must_use]
    pub fn from_json(what: &str, err: &serde_json::Error) -> Self {
        Self::Api {
            status: 422,
            message: format!("could not parse {what}: {err}"),
            payload: Some(serde_json::json!({ "line": err.line(), "column": err.column() })),
        }
    }
}

/// Failures of the durable key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// Save data could not be encoded.
    #[error("could not encode save data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by a game session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A classic guess was refused.
    #[error(transparent)]
    Guess(#[from] GuessError),
    /// Round data could not be loaded; the session cannot accept input.
    #[error("could not load round data: {0}")]
    Fetch(#[from] FetchError),
    /// Progress could not be persisted.
    #[error("could not save progress: {0}")]
    Store(#[from] StoreError),
    /// The mode was not enabled when the session was opened.
    #[error("{0} is not enabled in this session")]
    ModeDisabled(Mode),
}

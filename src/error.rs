//! Error types for the I/O layers (config, referee protocol, session)
//!
//! Move validation has its own taxonomy in [`crate::rules::EdgeError`];
//! those are game events, not failures of the program.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error while trying to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("malformed move line {line:?}: {reason}")]
    MoveFormat { line: String, reason: String },
}

impl Error {
    pub(crate) fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }

    pub(crate) fn move_format(line: &str, reason: impl Into<String>) -> Self {
        Error::MoveFormat {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

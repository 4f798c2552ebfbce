//! This module defines all error types used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    /// The flexfringe executable could not be located at construction time
    #[error(
        "Configuration error: could not find flexfringe executable. Put it in your PATH or pass an explicit path"
    )]
    ExecutableNotFound,

    /// Configuration file errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation that needs a fitted model was called before `fit`
    #[error("State error: {0}")]
    State(String),

    /// flexfringe did not produce an expected output file
    #[error("Execution error: could not find valid flexfringe output file at: {}", .0.display())]
    MissingOutput(PathBuf),

    /// The child process could not be started at all
    #[error("Failed to launch {}: {source}", .program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Delimited table reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Result table decoding errors
    #[error("Parser error: {0}")]
    Parser(String),

    /// Graph rendering or display errors
    #[error("Render error: {0}")]
    Render(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a custom error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create a parser error
    pub fn parser(msg: impl Into<String>) -> Self {
        Self::Parser(msg.into())
    }

    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// The error raised when an output is requested before any fit
    pub fn no_tracefile() -> Self {
        Self::State("No tracefile specified. Please first run \"fit\"".to_string())
    }

    pub fn is_state_error(&self) -> bool {
        matches!(self, Error::State(_))
    }

    /// Check if error is a missing flexfringe output
    pub fn is_missing_output(&self) -> bool {
        matches!(self, Error::MissingOutput(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Custom(format!("JSON error: {}", err))
    }
}

//! Error types for termlink.

use thiserror::Error;

/// Result type for termlink operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for termlink operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An identifier that is absent from the terminology's id index.
    ///
    /// Only raised by lookups that treat an unknown id as a contract
    /// violation (see [`Terminology::canonical_ids`]); set-valued
    /// queries degrade to empty results instead.
    ///
    /// [`Terminology::canonical_ids`]: crate::Terminology::canonical_ids
    #[error("Unknown terminology id: {0}")]
    UnknownId(String),

    /// Corpus or terminology file could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration is missing or inconsistent.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unknown-id error.
    pub fn unknown_id(id: impl Into<String>) -> Self {
        Error::UnknownId(id.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Verbatim's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Verbatim's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    /// The resolved input has an extension outside the supported set.
    #[error("unsupported input file type: '{}'", .0.display())]
    UnsupportedExtension(PathBuf),

    /// A literal path or glob match that does not exist on disk.
    #[error("input file not found: '{}'", .0.display())]
    InputNotFound(PathBuf),

    /// Input resolution produced no files at all.
    #[error("no matching input files found")]
    NoInputs,

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Self::Other(Box::new(err))
    }
}

use std::error::Error as StdError;

use thiserror::Error;

/// Subsift's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Subsift's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
///
/// A malformed subtitle block is *not* an error: the parser counts it and moves on.
/// `Decode` is the one per-file hard failure — input bytes that cannot be interpreted as
/// text — and callers must be able to tell it apart from a file that simply parsed to
/// zero segments.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    /// Input bytes could not be decoded into text.
    #[error("failed to decode '{file}' as text: {reason}")]
    Decode { file: String, reason: String },

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub(crate) fn decode(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is an input-decoding failure.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
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

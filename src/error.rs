use std::error::Error as StdError;
use std::str::Utf8Error;

/// Errors raised while building, signing or sending API requests.
///
/// HTTP responses are never turned into errors, whatever their status code.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Signer input was not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    Decoding(#[from] Utf8Error),

    #[error("signature key is not valid hex: {0}")]
    InvalidKey(#[from] hex::FromHexError),

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("payload serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The transport failed before a response was received. The underlying
    /// error is kept as the source.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Error::Transport(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error types for codec negotiation and dispatch
//!
//! None of these abort a negotiation pass. They are produced where a single
//! codec entry has to be skipped and are turned into a log line by the
//! caller; see [`crate::codec::negotiation`].

use rtprelay_codec_core::CodecError;
use thiserror::Error;

/// Result type alias for media-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Media-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// No codec definition or no canonical payload type for this name
    #[error("Codec '{0}' is not supported")]
    UnsupportedCodec(String),

    /// Every number in the dynamic range 96-127 is taken
    #[error("Ran out of RTP payload type numbers while adding codec '{0}'")]
    PayloadTypesExhausted(String),

    /// The codec engine failed to open or run a codec instance
    #[error("Codec engine error: {0}")]
    Codec(#[from] CodecError),

    /// A codec policy could not be parsed
    #[error("Invalid codec policy: {0}")]
    Config(String),
}

impl Error {
    /// Create an unsupported codec error
    pub fn unsupported_codec(name: impl Into<String>) -> Self {
        Self::UnsupportedCodec(name.into())
    }

    /// Create a payload type exhaustion error
    pub fn payload_types_exhausted(name: impl Into<String>) -> Self {
        Self::PayloadTypesExhausted(name.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::config(err.to_string())
    }
}

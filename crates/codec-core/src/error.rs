//! Error handling for the codec library
//!
//! Errors raised while looking up codec definitions, opening codec instances
//! and encoding/decoding payloads.

#![allow(missing_docs)]

use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Error type for codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// No codec definition exists for this name
    #[error("Codec not found: {name}")]
    CodecNotFound { name: String },

    /// The codec is known but has no implementation in this build
    #[error("Unsupported codec type: {codec_type}")]
    UnsupportedCodec { codec_type: String },

    /// Feature not enabled
    #[error("Feature not enabled: {feature} (enable with --features {feature})")]
    FeatureNotEnabled { feature: String },

    /// Invalid sample rate
    #[error("Invalid sample rate: {rate}Hz (supported: {supported:?})")]
    InvalidSampleRate { rate: u32, supported: Vec<u32> },

    /// Encoding operation failed
    #[error("Encoding failed: {reason}")]
    EncodingFailed { reason: String },

    /// Decoding operation failed
    #[error("Decoding failed: {reason}")]
    DecodingFailed { reason: String },

    /// Codec initialization failed
    #[error("Codec initialization failed: {reason}")]
    InitializationFailed { reason: String },
}

impl CodecError {
    /// Create a new codec-not-found error
    pub fn codec_not_found(name: impl Into<String>) -> Self {
        Self::CodecNotFound { name: name.into() }
    }

    /// Create a new unsupported codec error
    pub fn unsupported_codec(codec_type: impl Into<String>) -> Self {
        Self::UnsupportedCodec {
            codec_type: codec_type.into(),
        }
    }

    /// Create a new feature not enabled error
    pub fn feature_not_enabled(feature: impl Into<String>) -> Self {
        Self::FeatureNotEnabled {
            feature: feature.into(),
        }
    }

    /// Create a new encoding failed error
    pub fn encoding_failed(reason: impl Into<String>) -> Self {
        Self::EncodingFailed {
            reason: reason.into(),
        }
    }

    /// Create a new decoding failed error
    pub fn decoding_failed(reason: impl Into<String>) -> Self {
        Self::DecodingFailed {
            reason: reason.into(),
        }
    }

    /// Create a new initialization failed error
    pub fn initialization_failed(reason: impl Into<String>) -> Self {
        Self::InitializationFailed {
            reason: reason.into(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// Per-packet failures are recoverable: the next packet may decode fine.
    /// Everything that happens while opening a codec is not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::EncodingFailed { .. } | Self::DecodingFailed { .. } => true,

            Self::CodecNotFound { .. }
            | Self::UnsupportedCodec { .. }
            | Self::FeatureNotEnabled { .. }
            | Self::InvalidSampleRate { .. }
            | Self::InitializationFailed { .. } => false,
        }
    }
}

//! # Codec-Core: codec engine for the RTP relay
//!
//! This crate is the codec engine the negotiation and dispatch layer talks
//! to. It answers three questions:
//!
//! - **Is a codec known?** [`codec_find`] looks up an immutable, process-wide
//!   [`CodecDef`] by SDP encoding name.
//! - **What are its canonical parameters?** [`rtp_get_rfc_codec`] returns the
//!   RFC 3551 default payload type (or the canonical `rtpmap` parameters of a
//!   dynamic-only codec).
//! - **Can it be opened?** [`CodecFactory::create`] opens an [`AudioCodec`]
//!   instance for decoding or encoding. Dropping the instance closes it.
//!
//! ## Usage
//!
//! ```rust
//! use rtprelay_codec_core::{codec_find, CodecFactory};
//!
//! let pcma = codec_find("PCMA").expect("PCMA is a known codec");
//! let mut decoder = CodecFactory::create(pcma, 8000)?;
//! let samples = decoder.decode(&[0xD5; 160])?;
//! assert_eq!(samples.len(), 160);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `g711`: G.711 μ-law/A-law codecs (enabled by default)

#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod codecs;
pub mod error;
pub mod rfc;
pub mod types;
pub mod utils;

pub use codecs::{codec_defs, codec_find, CodecFactory};
pub use error::{CodecError, Result};
pub use rfc::{rtp_get_rfc_codec, rtp_get_rfc_payload_type, RfcPayloadType};
pub use types::{AudioCodec, CodecDef, CodecInfo, CodecType, MediaKind};

/// Version information for the codec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the codec library
///
/// Installs a `tracing` subscriber honouring `RUST_LOG` if none is set yet.
/// Safe to call multiple times.
///
/// # Errors
///
/// Currently infallible; kept fallible so engines with global setup can
/// report failures.
pub fn init() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    tracing::info!("Codec-Core v{} initialized", VERSION);
    tracing::info!("Supported codecs: {:?}", CodecFactory::supported_codecs());

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        known_codecs: codec_defs().iter().map(|def| def.name).collect(),
        supported_codecs: CodecFactory::supported_codecs(),
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// Every codec name with a definition
    pub known_codecs: Vec<&'static str>,
    /// Codec names that can be opened in this build
    pub supported_codecs: Vec<&'static str>,
}

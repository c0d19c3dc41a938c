//! Codec engine seam
//!
//! Everything this crate needs from the codec library goes through
//! [`CodecEngine`], so negotiation and handler rebuilds can run against a
//! different engine (or an instrumented one in tests).

use rtprelay_codec_core::{self as codec_core, AudioCodec, CodecDef, CodecFactory};

use super::payload_type::RtpPayloadType;

/// Interface to the codec library
///
/// Closing a decoder or encoder is dropping the returned box; the handler
/// that owns it is the only owner.
pub trait CodecEngine: Send + Sync {
    /// Look up a codec definition by encoding name. `None` means unsupported.
    fn codec_find(&self, name: &str) -> Option<&'static CodecDef>;

    /// Canonical payload type for an encoding name, with the RFC-assigned
    /// number or [`super::payload_type::PAYLOAD_TYPE_UNASSIGNED`].
    fn rfc_payload_type(&self, name: &str) -> Option<RtpPayloadType>;

    /// Open a decoder for `def` at `clock_rate`
    fn open_decoder(
        &self,
        def: &'static CodecDef,
        clock_rate: u32,
    ) -> codec_core::Result<Box<dyn AudioCodec>>;

    /// Open an encoder for `def` at `clock_rate`
    fn open_encoder(
        &self,
        def: &'static CodecDef,
        clock_rate: u32,
    ) -> codec_core::Result<Box<dyn AudioCodec>>;
}

/// Default engine backed by `rtprelay-codec-core`
#[derive(Debug, Default, Clone, Copy)]
pub struct CodecCoreEngine;

impl CodecCoreEngine {
    /// Create the default engine
    pub fn new() -> Self {
        Self
    }
}

impl CodecEngine for CodecCoreEngine {
    fn codec_find(&self, name: &str) -> Option<&'static CodecDef> {
        codec_core::codec_find(name)
    }

    fn rfc_payload_type(&self, name: &str) -> Option<RtpPayloadType> {
        codec_core::rtp_get_rfc_codec(name).map(RtpPayloadType::from_rfc)
    }

    fn open_decoder(
        &self,
        def: &'static CodecDef,
        clock_rate: u32,
    ) -> codec_core::Result<Box<dyn AudioCodec>> {
        CodecFactory::create(def, clock_rate)
    }

    fn open_encoder(
        &self,
        def: &'static CodecDef,
        clock_rate: u32,
    ) -> codec_core::Result<Box<dyn AudioCodec>> {
        CodecFactory::create(def, clock_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_lookups() {
        let engine = CodecCoreEngine::new();
        assert_eq!(engine.codec_find("PCMU").unwrap().name, "PCMU");
        assert!(engine.codec_find("X-UNKNOWN").is_none());

        let g729 = engine.rfc_payload_type("G729").unwrap();
        assert_eq!(g729.payload_type, 18);
        assert!(engine.rfc_payload_type("X-UNKNOWN").is_none());
    }

    #[test]
    fn test_default_engine_opens_g711_only() {
        let engine = CodecCoreEngine::new();
        let pcmu = engine.codec_find("PCMU").unwrap();
        assert!(engine.open_decoder(pcmu, 8000).is_ok());

        let g729 = engine.codec_find("G729").unwrap();
        assert!(engine.open_decoder(g729, 8000).is_err());
        assert!(engine.open_encoder(g729, 8000).is_err());
    }
}

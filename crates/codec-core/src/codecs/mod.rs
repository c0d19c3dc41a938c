//! Codec definitions and factory

use crate::error::{CodecError, Result};
use crate::types::{AudioCodec, CodecDef, CodecType, MediaKind};
use tracing::debug;

#[cfg(feature = "g711")]
pub mod g711;

macro_rules! codec_def {
    ($name:expr, $kind:ident, $rate:expr, $channels:expr, $ptime:expr, $ty:expr) => {
        CodecDef {
            name: $name,
            kind: MediaKind::$kind,
            clock_rate: $rate,
            channels: $channels,
            ptime_ms: $ptime,
            codec_type: $ty,
        }
    };
}

/// Every codec family the relay knows about, implemented or not.
///
/// Knowing a codec is enough to negotiate it and to pick it as a transcoding
/// destination; opening an instance additionally requires an implementation.
static CODEC_DEFS: &[CodecDef] = &[
    codec_def!("PCMU", Audio, 8000, 1, 20, Some(CodecType::G711Pcmu)),
    codec_def!("PCMA", Audio, 8000, 1, 20, Some(CodecType::G711Pcma)),
    codec_def!("G722", Audio, 8000, 1, 20, None),
    codec_def!("G723", Audio, 8000, 1, 30, None),
    codec_def!("G728", Audio, 8000, 1, 20, None),
    codec_def!("G729", Audio, 8000, 1, 20, None),
    codec_def!("GSM", Audio, 8000, 1, 20, None),
    codec_def!("L16", Audio, 44100, 1, 20, None),
    codec_def!("iLBC", Audio, 8000, 1, 30, None),
    codec_def!("speex", Audio, 16000, 1, 20, None),
    codec_def!("opus", Audio, 48000, 2, 20, None),
    codec_def!("AMR", Audio, 8000, 1, 20, None),
    codec_def!("AMR-WB", Audio, 16000, 1, 20, None),
    codec_def!("telephone-event", Event, 8000, 1, 20, None),
    codec_def!("CN", Event, 8000, 1, 20, None),
];

/// Look up a codec definition by encoding name
///
/// Matching is exact and case-sensitive, as for SDP encoding names handled by
/// the relay. `None` means the codec is unsupported, which callers treat as a
/// normal outcome rather than an error.
pub fn codec_find(name: &str) -> Option<&'static CodecDef> {
    CODEC_DEFS.iter().find(|def| def.name == name)
}

/// All known codec definitions
pub fn codec_defs() -> &'static [CodecDef] {
    CODEC_DEFS
}

/// Codec factory for creating codec instances
pub struct CodecFactory;

impl CodecFactory {
    /// Open a codec instance for `def` running at `clock_rate`
    ///
    /// # Errors
    ///
    /// Fails if the codec has no implementation in this build or if the
    /// implementation does not support the requested clock rate.
    pub fn create(def: &'static CodecDef, clock_rate: u32) -> Result<Box<dyn AudioCodec>> {
        let codec_type = def
            .codec_type
            .ok_or_else(|| CodecError::unsupported_codec(def.name))?;

        if !codec_type.supported_sample_rates().contains(&clock_rate) {
            return Err(CodecError::InvalidSampleRate {
                rate: clock_rate,
                supported: codec_type.supported_sample_rates().to_vec(),
            });
        }

        debug!("Opening {} codec instance at {}Hz", codec_type, clock_rate);

        match codec_type {
            #[cfg(feature = "g711")]
            CodecType::G711Pcmu => Ok(Box::new(g711::G711Codec::new_pcmu())),

            #[cfg(feature = "g711")]
            CodecType::G711Pcma => Ok(Box::new(g711::G711Codec::new_pcma())),

            #[allow(unreachable_patterns)]
            codec_type => Err(CodecError::feature_not_enabled(format!(
                "Codec {} not enabled in build features",
                codec_type.name()
            ))),
        }
    }

    /// Open a codec instance by encoding name at its default clock rate
    ///
    /// # Errors
    ///
    /// Fails if the name is unknown or the codec cannot be opened.
    pub fn create_by_name(name: &str) -> Result<Box<dyn AudioCodec>> {
        let def = codec_find(name).ok_or_else(|| CodecError::codec_not_found(name))?;
        Self::create(def, def.clock_rate)
    }

    /// Get all codec names that can be opened in this build
    pub fn supported_codecs() -> Vec<&'static str> {
        CODEC_DEFS
            .iter()
            .filter(|def| def.is_implemented())
            .map(|def| def.name)
            .collect()
    }

    /// Check if a codec can be opened in this build
    pub fn is_supported(name: &str) -> bool {
        codec_find(name).map_or(false, CodecDef::is_implemented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_find_is_case_sensitive() {
        assert!(codec_find("PCMU").is_some());
        assert!(codec_find("opus").is_some());
        assert!(codec_find("pcmu").is_none());
        assert!(codec_find("OPUS").is_none());
        assert!(codec_find("X-UNKNOWN").is_none());
    }

    #[test]
    fn test_codec_names_are_unique() {
        for (i, a) in CODEC_DEFS.iter().enumerate() {
            for b in &CODEC_DEFS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_unimplemented_codec_cannot_be_opened() {
        let g729 = codec_find("G729").unwrap();
        assert!(!g729.is_implemented());
        let err = CodecFactory::create(g729, 8000).err().unwrap();
        assert!(matches!(err, CodecError::UnsupportedCodec { .. }));
    }

    #[test]
    fn test_unknown_name_is_not_found() {
        let err = CodecFactory::create_by_name("X-UNKNOWN").err().unwrap();
        assert!(matches!(err, CodecError::CodecNotFound { .. }));
        assert!(!CodecFactory::is_supported("X-UNKNOWN"));
    }

    #[test]
    #[cfg(feature = "g711")]
    fn test_codec_creation() {
        let codec = CodecFactory::create_by_name("PCMA").unwrap();
        let info = codec.info();
        assert_eq!(info.name, "PCMA");
        assert_eq!(info.sample_rate, 8000);
        assert_eq!(info.payload_type, Some(8));

        assert!(CodecFactory::supported_codecs().contains(&"PCMU"));
        assert!(CodecFactory::is_supported("PCMU"));
    }

    #[test]
    #[cfg(feature = "g711")]
    fn test_wrong_clock_rate_is_rejected() {
        let pcmu = codec_find("PCMU").unwrap();
        let err = CodecFactory::create(pcmu, 16000).err().unwrap();
        assert!(matches!(err, CodecError::InvalidSampleRate { rate: 16000, .. }));
    }
}

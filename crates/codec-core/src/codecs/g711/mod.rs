//! G.711 codec implementation
//!
//! G.711 has two variants:
//! - μ-law (PCMU, used in North America and Japan)
//! - A-law (PCMA, used in Europe and the rest of the world)
//!
//! Both map one 16-bit sample to one 8-bit code word at 8kHz, so a transcode
//! between the two keeps packet sizes and timestamps unchanged.

pub mod reference;

use crate::error::Result;
use crate::types::{AudioCodec, CodecInfo};
use reference::{alaw_to_linear, linear_to_alaw, linear_to_ulaw, ulaw_to_linear};

/// G.711 codec variant (μ-law or A-law)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum G711Variant {
    /// μ-law (PCMU, payload type 0)
    MuLaw,
    /// A-law (PCMA, payload type 8)
    ALaw,
}

/// G.711 codec implementation
#[derive(Debug, Clone)]
pub struct G711Codec {
    variant: G711Variant,
}

impl G711Codec {
    /// Create a μ-law codec
    pub fn new_pcmu() -> Self {
        Self {
            variant: G711Variant::MuLaw,
        }
    }

    /// Create an A-law codec
    pub fn new_pcma() -> Self {
        Self {
            variant: G711Variant::ALaw,
        }
    }

    /// Get the G.711 variant
    pub fn variant(&self) -> G711Variant {
        self.variant
    }
}

impl AudioCodec for G711Codec {
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>> {
        let compress = match self.variant {
            G711Variant::MuLaw => linear_to_ulaw,
            G711Variant::ALaw => linear_to_alaw,
        };
        Ok(samples.iter().map(|&s| compress(s)).collect())
    }

    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>> {
        let expand = match self.variant {
            G711Variant::MuLaw => ulaw_to_linear,
            G711Variant::ALaw => alaw_to_linear,
        };
        Ok(data.iter().map(|&b| expand(b)).collect())
    }

    fn info(&self) -> CodecInfo {
        let (name, payload_type) = match self.variant {
            G711Variant::MuLaw => ("PCMU", 0),
            G711Variant::ALaw => ("PCMA", 8),
        };
        CodecInfo {
            name,
            sample_rate: 8000,
            channels: 1,
            bitrate: 64000,
            frame_size: 160,
            payload_type: Some(payload_type),
        }
    }

    fn reset(&mut self) -> Result<()> {
        // stateless
        Ok(())
    }

    fn frame_size(&self) -> usize {
        160
    }
}

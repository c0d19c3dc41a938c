//! Core types and traits for the codec library
//!
//! This module defines the codec definition descriptor consulted during
//! negotiation and the `AudioCodec` trait implemented by every codec
//! instance the relay can open.

use crate::error::Result;
use std::fmt;

/// Primary trait for audio codecs
///
/// A codec instance is opened for one direction of one stream and owns any
/// state the bitstream needs between frames. Closing the instance is
/// dropping it.
pub trait AudioCodec: Send + Sync {
    /// Encode audio samples to compressed data
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or input is invalid
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>>;

    /// Decode compressed data to audio samples
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or data is invalid
    fn decode(&mut self, data: &[u8]) -> Result<Vec<i16>>;

    /// Get codec information
    fn info(&self) -> CodecInfo;

    /// Reset codec state
    fn reset(&mut self) -> Result<()>;

    /// Get the expected frame size in samples
    fn frame_size(&self) -> usize;
}

/// Audio codec information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Codec name (e.g., "PCMU", "PCMA")
    pub name: &'static str,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u8,
    /// Bitrate in bits per second
    pub bitrate: u32,
    /// Frame size in samples
    pub frame_size: usize,
    /// RTP payload type (if standard)
    pub payload_type: Option<u8>,
}

/// Media kind a codec belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Audio codecs
    Audio,
    /// Video codecs
    Video,
    /// In-band events and comfort noise
    Event,
}

/// Codec families with an implementation in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecType {
    /// G.711 μ-law (PCMU)
    G711Pcmu,
    /// G.711 A-law (PCMA)
    G711Pcma,
}

impl CodecType {
    /// Get the codec name
    pub fn name(self) -> &'static str {
        match self {
            Self::G711Pcmu => "PCMU",
            Self::G711Pcma => "PCMA",
        }
    }

    /// Get supported sample rates
    pub fn supported_sample_rates(self) -> &'static [u32] {
        match self {
            Self::G711Pcmu | Self::G711Pcma => &[8000],
        }
    }
}

impl fmt::Display for CodecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Immutable, process-wide descriptor of a codec family
///
/// Definitions live in a static table (see [`crate::codecs::codec_find`]);
/// callers hold `&'static CodecDef` references and compare them by name.
#[derive(Debug, PartialEq, Eq)]
pub struct CodecDef {
    /// Encoding name as it appears in `a=rtpmap` (case-sensitive)
    pub name: &'static str,
    /// Media kind
    pub kind: MediaKind,
    /// Default RTP clock rate
    pub clock_rate: u32,
    /// Default channel count
    pub channels: u8,
    /// Default packetization time in milliseconds
    pub ptime_ms: u32,
    /// Implementation backing this definition, if the build has one
    pub codec_type: Option<CodecType>,
}

impl CodecDef {
    /// Whether instances of this codec can be opened
    pub fn is_implemented(&self) -> bool {
        match self.codec_type {
            #[cfg(feature = "g711")]
            Some(CodecType::G711Pcmu | CodecType::G711Pcma) => true,
            _ => false,
        }
    }

    /// Samples per channel in one default-sized frame
    pub fn default_frame_size(&self) -> usize {
        (self.clock_rate / 1000 * self.ptime_ms) as usize
    }
}

impl fmt::Display for CodecDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.clock_rate)
    }
}

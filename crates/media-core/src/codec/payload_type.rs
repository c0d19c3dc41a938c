//! RTP payload type descriptor
//!
//! One entry of a negotiated codec list, as produced by the SDP layer from an
//! `a=rtpmap`/`a=fmtp` pair.

use std::fmt;

use rtprelay_codec_core::{CodecDef, RfcPayloadType};

/// Payload type number not assigned yet
pub const PAYLOAD_TYPE_UNASSIGNED: i32 = -1;
/// First number of the dynamic range (RFC 3551)
pub const DYNAMIC_PAYLOAD_TYPE_MIN: i32 = 96;
/// Last number of the dynamic range (RFC 3551)
pub const DYNAMIC_PAYLOAD_TYPE_MAX: i32 = 127;

/// A negotiated RTP payload type
#[derive(Debug, Clone, PartialEq)]
pub struct RtpPayloadType {
    /// Payload type number, [`PAYLOAD_TYPE_UNASSIGNED`] until allocated
    pub payload_type: i32,
    /// `NAME/rate[/params]` exactly as in `a=rtpmap`
    pub encoding_with_params: String,
    /// Encoding name; two entries are the same codec if these match
    pub encoding: String,
    /// Encoding parameters (audio channel count), empty if absent
    pub encoding_parameters: String,
    /// Format parameters from `a=fmtp`, empty if absent
    pub format_parameters: String,
    /// RTP clock rate
    pub clock_rate: u32,
    /// Codec definition, resolved lazily
    pub codec_def: Option<&'static CodecDef>,
}

impl RtpPayloadType {
    /// Create a payload type with no encoding or format parameters
    pub fn new(payload_type: i32, encoding: impl Into<String>, clock_rate: u32) -> Self {
        let encoding = encoding.into();
        Self {
            payload_type,
            encoding_with_params: format!("{}/{}", encoding, clock_rate),
            encoding,
            encoding_parameters: String::new(),
            format_parameters: String::new(),
            clock_rate,
            codec_def: None,
        }
    }

    /// Set encoding parameters, updating `encoding_with_params` to match
    pub fn with_encoding_parameters(mut self, params: impl Into<String>) -> Self {
        self.encoding_parameters = params.into();
        self.encoding_with_params = if self.encoding_parameters.is_empty() {
            format!("{}/{}", self.encoding, self.clock_rate)
        } else {
            format!(
                "{}/{}/{}",
                self.encoding, self.clock_rate, self.encoding_parameters
            )
        };
        self
    }

    /// Set format parameters
    pub fn with_format_parameters(mut self, fmtp: impl Into<String>) -> Self {
        self.format_parameters = fmtp.into();
        self
    }

    /// Build from a canonical RFC entry; dynamic-only codecs come back
    /// unassigned
    pub fn from_rfc(rfc: &RfcPayloadType) -> Self {
        let number = rfc
            .payload_type
            .map_or(PAYLOAD_TYPE_UNASSIGNED, i32::from);
        Self::new(number, rfc.encoding, rfc.clock_rate)
            .with_encoding_parameters(rfc.encoding_parameters)
    }

    /// Whether the number lies in the dynamic range
    pub fn is_dynamic(&self) -> bool {
        (DYNAMIC_PAYLOAD_TYPE_MIN..=DYNAMIC_PAYLOAD_TYPE_MAX).contains(&self.payload_type)
    }

    /// Whether this and `other` are the same codec
    pub fn same_codec(&self, other: &RtpPayloadType) -> bool {
        self.encoding == other.encoding
    }
}

impl fmt::Display for RtpPayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.payload_type, self.encoding_with_params)
    }
}

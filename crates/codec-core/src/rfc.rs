//! RFC 3551 payload type defaults
//!
//! Static payload type assignments from RFC 3551 plus the canonical
//! `rtpmap` parameters of codecs that only ever use dynamic numbers. The
//! negotiation layer uses these to synthesize a payload type for a codec the
//! remote side never offered.

/// Canonical payload type description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RfcPayloadType {
    /// Static payload type number, `None` for dynamic-only codecs
    pub payload_type: Option<u8>,
    /// Encoding name
    pub encoding: &'static str,
    /// RTP clock rate
    pub clock_rate: u32,
    /// Encoding parameters (channel count for audio), empty if none
    pub encoding_parameters: &'static str,
}

impl RfcPayloadType {
    /// `NAME/rate[/params]` as used in `a=rtpmap`
    pub fn encoding_with_params(&self) -> String {
        if self.encoding_parameters.is_empty() {
            format!("{}/{}", self.encoding, self.clock_rate)
        } else {
            format!(
                "{}/{}/{}",
                self.encoding, self.clock_rate, self.encoding_parameters
            )
        }
    }
}

const fn rfc(
    payload_type: Option<u8>,
    encoding: &'static str,
    clock_rate: u32,
    encoding_parameters: &'static str,
) -> RfcPayloadType {
    RfcPayloadType {
        payload_type,
        encoding,
        clock_rate,
        encoding_parameters,
    }
}

static RFC_TYPES: &[RfcPayloadType] = &[
    rfc(Some(0), "PCMU", 8000, ""),
    rfc(Some(3), "GSM", 8000, ""),
    rfc(Some(4), "G723", 8000, ""),
    rfc(Some(5), "DVI4", 8000, ""),
    rfc(Some(6), "DVI4", 16000, ""),
    rfc(Some(7), "LPC", 8000, ""),
    rfc(Some(8), "PCMA", 8000, ""),
    rfc(Some(9), "G722", 8000, ""),
    rfc(Some(10), "L16", 44100, "2"),
    rfc(Some(11), "L16", 44100, ""),
    rfc(Some(12), "QCELP", 8000, ""),
    rfc(Some(13), "CN", 8000, ""),
    rfc(Some(14), "MPA", 90000, ""),
    rfc(Some(15), "G728", 8000, ""),
    rfc(Some(16), "DVI4", 11025, ""),
    rfc(Some(17), "DVI4", 22050, ""),
    rfc(Some(18), "G729", 8000, ""),
    rfc(Some(25), "CelB", 90000, ""),
    rfc(Some(26), "JPEG", 90000, ""),
    rfc(Some(28), "nv", 90000, ""),
    rfc(Some(31), "H261", 90000, ""),
    rfc(Some(32), "MPV", 90000, ""),
    rfc(Some(33), "MP2T", 90000, ""),
    rfc(Some(34), "H263", 90000, ""),
    // dynamic-only codecs: canonical parameters, no number
    rfc(None, "opus", 48000, "2"),
    rfc(None, "speex", 16000, ""),
    rfc(None, "iLBC", 8000, ""),
    rfc(None, "AMR", 8000, ""),
    rfc(None, "AMR-WB", 16000, ""),
    rfc(None, "telephone-event", 8000, ""),
];

/// Default payload type for an encoding name
///
/// For names with several static assignments (DVI4, L16) the first, lowest
/// numbered one is returned.
pub fn rtp_get_rfc_codec(encoding: &str) -> Option<&'static RfcPayloadType> {
    RFC_TYPES.iter().find(|pt| pt.encoding == encoding)
}

/// Static payload type assigned to `payload_type`, if any
pub fn rtp_get_rfc_payload_type(payload_type: u8) -> Option<&'static RfcPayloadType> {
    RFC_TYPES
        .iter()
        .find(|pt| pt.payload_type == Some(payload_type))
}

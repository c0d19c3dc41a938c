//! Codec policy configuration
//!
//! The per-call codec flags the signalling layer hands to negotiation:
//! which codecs to strip, which stripped ones to offer anyway, and which
//! ones the receiving side must accept for transcoding.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Strip entry that matches every codec
pub const CODEC_STRIP_ALL: &str = "all";

/// Codec policy of one negotiation pass
///
/// Names are SDP encoding names and match case-sensitively.
///
/// ```
/// use rtprelay_media_core::CodecPolicy;
///
/// let policy = CodecPolicy::from_json(r#"{ "strip": ["all"], "offer": ["PCMU"] }"#)?;
/// assert!(policy.strips("G729"));
/// assert!(policy.transcode.is_empty());
/// # Ok::<(), rtprelay_media_core::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecPolicy {
    /// Codecs removed from the incoming list; `"all"` removes everything
    pub strip: HashSet<String>,
    /// Stripped codecs to put back, in order
    pub offer: Vec<String>,
    /// Codecs the receiving side must accept even if the sink lacks them
    pub transcode: Vec<String>,
}

impl CodecPolicy {
    /// Parse a policy from JSON; missing fields are empty
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add names to the strip set
    pub fn with_strip<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip.extend(names.into_iter().map(Into::into));
        self
    }

    /// Strip every codec
    pub fn with_strip_all(mut self) -> Self {
        self.strip.insert(CODEC_STRIP_ALL.to_string());
        self
    }

    /// Append names to the offer list
    pub fn with_offer<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.offer.extend(names.into_iter().map(Into::into));
        self
    }

    /// Append names to the transcode list
    pub fn with_transcode<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transcode.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether any codec is stripped at all
    pub fn is_stripping(&self) -> bool {
        !self.strip.is_empty()
    }

    /// Whether `encoding` is stripped
    pub fn strips(&self, encoding: &str) -> bool {
        self.strip.contains(CODEC_STRIP_ALL) || self.strip.contains(encoding)
    }
}

//! Codec list reconciliation
//!
//! Turns a freshly parsed payload type list plus the call's codec policy
//! into the registry content of both directions: what the receiving stream
//! accepts and what its sink offers back.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::engine::CodecEngine;
use super::payload_type::RtpPayloadType;
use crate::config::CodecPolicy;
use crate::error::{Error, Result};
use crate::media::CallMedia;

/// Outcome counts of one reconciliation pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NegotiationSummary {
    /// Entries registered straight from the incoming list
    pub accepted: usize,
    /// Entries stripped and never restored
    pub stripped: usize,
    /// Stripped entries restored by the offer or transcode lists
    pub restored: usize,
    /// Payload types synthesized for transcoding
    pub added: usize,
    /// Entries shadowed by an earlier one with the same number, and
    /// transcode requests that could not be honoured
    pub skipped: usize,
}

/// Stripped entries by encoding name
type RemovedCodecs = HashMap<String, Vec<RtpPayloadType>>;

/// Register `pt` on the receive side of `media` and the send side of
/// `other_media`
///
/// If the number is already taken the existing entry wins and is what the
/// sink gets a copy of. Returns whether `pt` itself was registered.
fn register_payload_type(
    media: &mut CallMedia,
    other_media: &mut CallMedia,
    pt: RtpPayloadType,
) -> bool {
    let is_new = media.codecs().get(pt.payload_type).is_none();
    let entry = media.codecs_mut().add_recv(pt);
    other_media.codecs_mut().add_send(entry);
    is_new
}

/// Put every stripped entry for `name` back into negotiation
///
/// Returns the number of entries restored, `None` if nothing was stripped
/// under that name.
fn revert_codec_strip(
    removed: &mut RemovedCodecs,
    name: &str,
    media: &mut CallMedia,
    other_media: &mut CallMedia,
) -> Option<usize> {
    let bucket = removed.remove(name)?;
    debug!("Restoring codec '{}' from stripped codecs", name);
    Some(
        bucket
            .into_iter()
            .map(|pt| register_payload_type(media, other_media, pt))
            .filter(|registered| *registered)
            .count(),
    )
}

/// Synthesize a payload type for `name` on the receive side of `media`
///
/// The new entry is never offered to the sink: the far end did not list it.
fn codec_add_payload_type(
    name: &str,
    media: &mut CallMedia,
    engine: &dyn CodecEngine,
) -> Result<i32> {
    let Some(def) = engine.codec_find(name) else {
        return Err(Error::unsupported_codec(name));
    };
    let Some(mut pt) = engine.rfc_payload_type(name) else {
        return Err(Error::unsupported_codec(name));
    };

    let number = media
        .codecs()
        .allocate_payload_type(pt.payload_type)
        .ok_or_else(|| Error::payload_types_exhausted(name))?;

    pt.payload_type = number;
    pt.codec_def = Some(def);
    if !pt.is_dynamic() {
        debug!("Keeping static payload type {} for '{}'", number, name);
    }
    media.codecs_mut().add_recv(pt);
    Ok(number)
}

/// Reconcile an incoming payload type list into `media` (receive side) and
/// `other_media` (send side)
///
/// Consumes `types`. Stripped entries are held aside for the duration of the
/// call so the offer and transcode lists can restore them with their
/// original parameters; whatever is left over is discarded on return.
pub fn codec_rtp_payload_types(
    media: &mut CallMedia,
    other_media: &mut CallMedia,
    types: Vec<RtpPayloadType>,
    policy: &CodecPolicy,
    engine: &dyn CodecEngine,
) -> NegotiationSummary {
    let mut summary = NegotiationSummary::default();
    let mut removed = RemovedCodecs::new();
    let stripping = policy.is_stripping();

    media.codecs_mut().clear();
    other_media.codecs_mut().clear_send();

    for pt in types {
        if stripping && policy.strips(&pt.encoding) {
            debug!("Stripping codec '{}'", pt.encoding);
            removed.entry(pt.encoding.clone()).or_default().push(pt);
            continue;
        }
        if register_payload_type(media, other_media, pt) {
            summary.accepted += 1;
        } else {
            summary.skipped += 1;
        }
    }

    for name in &policy.offer {
        if let Some(restored) = revert_codec_strip(&mut removed, name, media, other_media) {
            summary.restored += restored;
        }
    }

    for name in &policy.transcode {
        if let Some(restored) = revert_codec_strip(&mut removed, name, media, other_media) {
            summary.restored += restored;
            continue;
        }
        if media.codecs().contains_codec(name) {
            debug!("Codec '{}' already present", name);
            continue;
        }

        match codec_add_payload_type(name, media, engine) {
            Ok(number) => {
                debug!("Adding codec '{}' as payload type {} for transcoding", name, number);
                summary.added += 1;
            }
            Err(e) => {
                warn!("Not adding codec '{}' for transcoding: {}", name, e);
                summary.skipped += 1;
            }
        }
    }

    summary.stripped = removed.values().map(Vec::len).sum();
    summary
}

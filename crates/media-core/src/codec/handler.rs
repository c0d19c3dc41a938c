//! Codec handlers and the per-stream handler table
//!
//! Every payload type a stream receives gets a [`CodecHandler`] deciding
//! whether its packets are forwarded unchanged or transcoded into the sink's
//! preferred codec. Handlers are shared through `Arc` between the table and
//! the stream's dispatch cache, and are only ever reconfigured in place, so a
//! cached reference always sees the current behaviour.
//!
//! Locking contract (provided by the caller's per-call lock):
//! - [`codec_handlers_update`] and [`CodecHandlers::clear`] need exclusive
//!   access to the stream (`&mut`)
//! - [`CodecHandlers::get`] needs shared access only (`&`)

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwapOption;
use bytes::Bytes;
use parking_lot::Mutex;
use rtprelay_codec_core::utils::resample_linear;
use rtprelay_codec_core::{AudioCodec, CodecError};
use tracing::{debug, info, trace, warn};

use super::engine::CodecEngine;
use super::packet::CodecPacket;
use super::payload_type::{RtpPayloadType, PAYLOAD_TYPE_UNASSIGNED};
use crate::error::{Error, Result};
use crate::media::CallMedia;

/// Process-wide handler for unknown payload types. Forwards unchanged.
static CODEC_HANDLER_STUB: LazyLock<Arc<CodecHandler>> =
    LazyLock::new(|| Arc::new(CodecHandler::new(PAYLOAD_TYPE_UNASSIGNED)));

/// The shared stub handler
pub fn codec_handler_stub() -> Arc<CodecHandler> {
    Arc::clone(&CODEC_HANDLER_STUB)
}

/// Observable behaviour of a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Forward packets unchanged
    Passthrough,
    /// Decode and re-encode into another codec
    Transcode,
}

enum HandlerFunc {
    Passthrough,
    Transcode(Transcoder),
}

/// Decoder/encoder pair owned by a transcoding handler
struct Transcoder {
    decoder: Box<dyn AudioCodec>,
    encoder: Box<dyn AudioCodec>,
    source_rate: u32,
    dest_rate: u32,
    dest_payload_type: i32,
    dest_encoding: String,
}

impl Transcoder {
    /// Open a decoder for `source` and an encoder for `dest`
    ///
    /// Whatever was opened is closed again if the other side fails.
    fn open(
        source: &RtpPayloadType,
        dest: &RtpPayloadType,
        engine: &dyn CodecEngine,
    ) -> Result<Self> {
        let source_def = source
            .codec_def
            .ok_or_else(|| Error::unsupported_codec(source.encoding.as_str()))?;
        let dest_def = dest
            .codec_def
            .ok_or_else(|| Error::unsupported_codec(dest.encoding.as_str()))?;

        let decoder = engine.open_decoder(source_def, source.clock_rate)?;
        let encoder = engine.open_encoder(dest_def, dest.clock_rate)?;

        Ok(Self {
            decoder,
            encoder,
            source_rate: source.clock_rate,
            dest_rate: dest.clock_rate,
            dest_payload_type: dest.payload_type,
            dest_encoding: dest.encoding.clone(),
        })
    }

    fn transcode(&mut self, payload: &[u8], out: &mut VecDeque<CodecPacket>) -> usize {
        let samples = match self.decoder.decode(payload) {
            Ok(samples) => samples,
            Err(e) => {
                log_packet_error(&e, "decode", payload.len());
                return 0;
            }
        };

        let samples = if self.source_rate != self.dest_rate {
            resample_linear(&samples, self.source_rate, self.dest_rate)
        } else {
            samples
        };

        match self.encoder.encode(&samples) {
            Ok(encoded) if encoded.is_empty() => 0,
            Ok(encoded) => {
                out.push_back(
                    CodecPacket::new(Bytes::from(encoded)).with_payload_type(self.dest_payload_type),
                );
                1
            }
            Err(e) => {
                log_packet_error(&e, "encode", payload.len());
                0
            }
        }
    }
}

/// Per-packet failures are routine; anything else points at a broken codec
fn log_packet_error(err: &CodecError, stage: &str, len: usize) {
    if err.is_recoverable() {
        debug!("Failed to {} packet ({} bytes): {}", stage, len, err);
    } else {
        warn!("Failed to {} packet ({} bytes): {}", stage, len, err);
    }
}

/// Handler for one received payload type number
pub struct CodecHandler {
    payload_type: i32,
    func: Mutex<HandlerFunc>,
}

impl CodecHandler {
    fn new(payload_type: i32) -> Self {
        Self {
            payload_type,
            func: Mutex::new(HandlerFunc::Passthrough),
        }
    }

    /// Payload type number this handler guards, negative for the stub
    pub fn payload_type(&self) -> i32 {
        self.payload_type
    }

    /// Whether this is the shared stub handler
    pub fn is_stub(&self) -> bool {
        self.payload_type < 0
    }

    /// Current behaviour
    pub fn kind(&self) -> HandlerKind {
        match *self.func.lock() {
            HandlerFunc::Passthrough => HandlerKind::Passthrough,
            HandlerFunc::Transcode(_) => HandlerKind::Transcode,
        }
    }

    /// Destination encoding and payload type number when transcoding
    pub fn transcode_target(&self) -> Option<(String, i32)> {
        match &*self.func.lock() {
            HandlerFunc::Passthrough => None,
            HandlerFunc::Transcode(t) => Some((t.dest_encoding.clone(), t.dest_payload_type)),
        }
    }

    /// Run one received payload through the handler
    ///
    /// Appends the resulting packets to `out` and returns how many were
    /// added. Passthrough always yields exactly one packet sharing the input
    /// bytes; transcoding yields zero or more.
    pub fn process(&self, payload: &Bytes, out: &mut VecDeque<CodecPacket>) -> usize {
        if self.is_stub() {
            out.push_back(CodecPacket::new(payload.clone()));
            return 1;
        }

        match &mut *self.func.lock() {
            HandlerFunc::Passthrough => {
                out.push_back(CodecPacket::new(payload.clone()));
                1
            }
            HandlerFunc::Transcode(transcoder) => transcoder.transcode(payload, out),
        }
    }

    /// Switch to passthrough, closing any held codecs
    fn make_stub(&self) {
        *self.func.lock() = HandlerFunc::Passthrough;
    }

    /// Switch to transcoding `source` into `dest`
    ///
    /// Falls back to passthrough if either codec cannot be opened. Returns
    /// whether the handler ended up transcoding.
    fn make_transcoder(
        &self,
        source: &RtpPayloadType,
        dest: &RtpPayloadType,
        engine: &dyn CodecEngine,
    ) -> bool {
        let mut func = self.func.lock();

        // close the previous decoder before opening a new one
        *func = HandlerFunc::Passthrough;

        match Transcoder::open(source, dest, engine) {
            Ok(transcoder) => {
                *func = HandlerFunc::Transcode(transcoder);
                debug!(
                    "Created transcode context for '{}' -> '{}'",
                    source.encoding, dest.encoding
                );
                true
            }
            Err(e) => {
                warn!(
                    "Cannot transcode '{}' -> '{}': {}",
                    source.encoding, dest.encoding, e
                );
                false
            }
        }
    }
}

impl std::fmt::Debug for CodecHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecHandler")
            .field("payload_type", &self.payload_type)
            .field("kind", &self.kind())
            .finish()
    }
}

/// Handler table of one receiving stream, with its dispatch cache
#[derive(Default)]
pub struct CodecHandlers {
    handlers: HashMap<i32, Arc<CodecHandler>>,
    /// Most recently used handler
    cache: ArcSwapOption<CodecHandler>,
}

impl CodecHandlers {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler for `payload_type`
    ///
    /// Returns the stub handler for negative or unknown numbers. The cached
    /// handler is used whenever its number matches, without touching the
    /// table; a table hit replaces the cached handler.
    pub fn get(&self, payload_type: i32) -> Arc<CodecHandler> {
        if payload_type < 0 {
            return codec_handler_stub();
        }

        let cached = self.cache.load();
        if let Some(cached) = &*cached {
            if cached.payload_type == payload_type {
                return Arc::clone(cached);
            }
        }

        match self.handlers.get(&payload_type) {
            Some(handler) => {
                self.cache.store(Some(Arc::clone(handler)));
                Arc::clone(handler)
            }
            None => codec_handler_stub(),
        }
    }

    /// Existing handler for `pt`, or a new passthrough one
    fn get_or_create(&mut self, pt: &RtpPayloadType) -> Arc<CodecHandler> {
        let handler = self.handlers.entry(pt.payload_type).or_insert_with(|| {
            debug!("Creating codec handler for {}", pt.encoding);
            Arc::new(CodecHandler::new(pt.payload_type))
        });
        Arc::clone(handler)
    }

    /// Number of handlers in the table, stale ones included
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Destroy every handler and forget the cached one
    pub fn clear(&mut self) {
        self.cache.store(None);
        self.handlers.clear();
    }
}

impl std::fmt::Debug for CodecHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut numbers: Vec<&i32> = self.handlers.keys().collect();
        numbers.sort();
        f.debug_struct("CodecHandlers")
            .field("payload_types", &numbers)
            .finish()
    }
}

/// Rebuild the handler table of `receiver` against the capabilities of
/// `sink`
///
/// Every payload type `receiver` accepts that `sink` does not know is
/// transcoded into the first codec of `sink`'s send preferences the engine
/// can resolve. Everything else is forwarded unchanged. The receiver is
/// marked as needing transcoding as soon as one codec lacks sink support,
/// even if its transcoder then fails to open. Handlers of payload
/// types that disappeared from the receive preferences stay in the table
/// until the stream is torn down.
///
/// Call must hold exclusive access to both streams.
pub fn codec_handlers_update(
    receiver: &mut CallMedia,
    sink: &mut CallMedia,
    engine: &dyn CodecEngine,
) {
    receiver.set_transcoding(false);

    let mut pref_dest_codec: Option<RtpPayloadType> = None;
    for pt in sink.codecs_mut().prefs_send_mut() {
        if pt.codec_def.is_none() {
            pt.codec_def = engine.codec_find(&pt.encoding);
        }
        if pt.codec_def.is_none() {
            // not supported, next
            continue;
        }
        debug!("Default sink codec is {}", pt.encoding);
        pref_dest_codec = Some(pt.clone());
        break;
    }

    if pref_dest_codec.is_none() && !sink.codecs().prefs_send().is_empty() {
        info!(
            "No supported codec in the preferences of {}, forwarding {} without transcoding",
            sink.label(),
            receiver.label()
        );
    }

    let numbers = receiver.codecs().prefs_recv_numbers().to_vec();
    let mut transcoding = false;

    for number in numbers {
        let Some(pt) = receiver.codecs_mut().get_mut(number) else {
            continue;
        };
        if pt.codec_def.is_none() {
            pt.codec_def = engine.codec_find(&pt.encoding);
        }
        let pt = pt.clone();

        let handler = receiver.codec_handlers_mut().get_or_create(&pt);

        let Some(dest) = pref_dest_codec.as_ref() else {
            debug!("No known/supported sink codec for {}", pt.encoding);
            handler.make_stub();
            continue;
        };

        if sink.codecs().contains_codec(&pt.encoding) {
            debug!("Sink supports codec {}", pt.encoding);
            handler.make_stub();
            continue;
        }

        debug!("Sink does not support codec {}", pt.encoding);
        transcoding = true;
        if !handler.make_transcoder(&pt, dest, engine) {
            trace!("Forwarding {} without transcoding", pt.encoding);
        }
    }

    receiver.set_transcoding(transcoding);
}

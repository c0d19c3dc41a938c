//! Per-stream codec state
//!
//! A [`CallMedia`] is one direction-pair endpoint of a call: it receives
//! packets, which are dispatched through its handler table and sent on by
//! the paired stream (its sink).

use std::sync::Arc;

use crate::codec::handler::{CodecHandler, CodecHandlers};
use crate::codec::payload_type::RtpPayloadType;
use crate::codec::registry::PayloadTypeRegistry;

/// Codec state of one media stream
#[derive(Debug)]
pub struct CallMedia {
    label: String,
    codecs: PayloadTypeRegistry,
    codec_handlers: CodecHandlers,
    transcode: bool,
}

impl CallMedia {
    /// Create a stream with empty codec state. `label` only shows up in logs.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            codecs: PayloadTypeRegistry::new(),
            codec_handlers: CodecHandlers::new(),
            transcode: false,
        }
    }

    /// Stream label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Payload type registry
    pub fn codecs(&self) -> &PayloadTypeRegistry {
        &self.codecs
    }

    /// Mutable payload type registry
    pub fn codecs_mut(&mut self) -> &mut PayloadTypeRegistry {
        &mut self.codecs
    }

    /// Receive preferences in negotiation order
    pub fn codecs_prefs_recv(&self) -> impl Iterator<Item = &RtpPayloadType> + '_ {
        self.codecs.prefs_recv()
    }

    /// Send preferences in negotiation order
    pub fn codecs_prefs_send(&self) -> &[RtpPayloadType] {
        self.codecs.prefs_send()
    }

    /// Whether at least one received payload type is being transcoded
    pub fn needs_transcoding(&self) -> bool {
        self.transcode
    }

    pub(crate) fn set_transcoding(&mut self, transcode: bool) {
        self.transcode = transcode;
    }

    pub(crate) fn codec_handlers_mut(&mut self) -> &mut CodecHandlers {
        &mut self.codec_handlers
    }

    /// Handler for a received payload type number
    ///
    /// Only needs shared access; safe to call from any number of packet
    /// threads while nobody rebuilds the table.
    pub fn codec_handler_get(&self, payload_type: i32) -> Arc<CodecHandler> {
        self.codec_handlers.get(payload_type)
    }

    /// Tear down every handler, closing their codecs
    pub fn codec_handlers_free(&mut self) {
        self.codec_handlers.clear();
        self.transcode = false;
    }

    /// Number of handlers in the table, stale ones included
    pub fn handler_count(&self) -> usize {
        self.codec_handlers.len()
    }
}

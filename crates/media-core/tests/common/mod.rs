//! Shared helpers for the media-core integration tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rtprelay_codec_core::{self as codec_core, AudioCodec, CodecDef, CodecError, CodecInfo};
use rtprelay_media_core::{CodecEngine, RtpPayloadType};

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn pt(number: i32, name: &str) -> RtpPayloadType {
    RtpPayloadType::new(number, name, 8000)
}

#[derive(Debug, Default)]
pub struct Counters {
    pub decoders_opened: AtomicUsize,
    pub decoders_live: AtomicUsize,
    pub encoders_opened: AtomicUsize,
    pub encoders_live: AtomicUsize,
}

impl Counters {
    pub fn decoders_opened(&self) -> usize {
        self.decoders_opened.load(Ordering::SeqCst)
    }

    pub fn decoders_live(&self) -> usize {
        self.decoders_live.load(Ordering::SeqCst)
    }

    pub fn encoders_live(&self) -> usize {
        self.encoders_live.load(Ordering::SeqCst)
    }
}

/// Engine that knows every codec-core definition and can open any of them,
/// counting instances
///
/// Decoding maps each byte to one sample, encoding maps each sample back to
/// its low byte.
#[derive(Debug, Default)]
pub struct MockEngine {
    pub counters: Arc<Counters>,
    failing: HashSet<&'static str>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to open decoders and encoders for `name`
    pub fn failing(mut self, name: &'static str) -> Self {
        self.failing.insert(name);
        self
    }

    fn open(&self, def: &'static CodecDef, decoder: bool) -> codec_core::Result<Box<dyn AudioCodec>> {
        if self.failing.contains(def.name) {
            return Err(CodecError::initialization_failed(format!("{} refused", def.name)));
        }
        let (opened, live) = if decoder {
            (&self.counters.decoders_opened, &self.counters.decoders_live)
        } else {
            (&self.counters.encoders_opened, &self.counters.encoders_live)
        };
        opened.fetch_add(1, Ordering::SeqCst);
        live.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockCodec {
            def,
            counters: self.counters.clone(),
            decoder,
        }))
    }
}

impl CodecEngine for MockEngine {
    fn codec_find(&self, name: &str) -> Option<&'static CodecDef> {
        codec_core::codec_find(name)
    }

    fn rfc_payload_type(&self, name: &str) -> Option<RtpPayloadType> {
        codec_core::rtp_get_rfc_codec(name).map(RtpPayloadType::from_rfc)
    }

    fn open_decoder(
        &self,
        def: &'static CodecDef,
        _clock_rate: u32,
    ) -> codec_core::Result<Box<dyn AudioCodec>> {
        self.open(def, true)
    }

    fn open_encoder(
        &self,
        def: &'static CodecDef,
        _clock_rate: u32,
    ) -> codec_core::Result<Box<dyn AudioCodec>> {
        self.open(def, false)
    }
}

struct MockCodec {
    def: &'static CodecDef,
    counters: Arc<Counters>,
    decoder: bool,
}

impl AudioCodec for MockCodec {
    fn encode(&mut self, samples: &[i16]) -> codec_core::Result<Vec<u8>> {
        Ok(samples.iter().map(|s| *s as u8).collect())
    }

    fn decode(&mut self, data: &[u8]) -> codec_core::Result<Vec<i16>> {
        if data.is_empty() {
            return Err(CodecError::decoding_failed("empty payload"));
        }
        Ok(data.iter().map(|b| i16::from(*b)).collect())
    }

    fn info(&self) -> CodecInfo {
        CodecInfo {
            name: self.def.name,
            sample_rate: self.def.clock_rate,
            channels: self.def.channels,
            bitrate: 0,
            frame_size: self.def.default_frame_size(),
            payload_type: None,
        }
    }

    fn reset(&mut self) -> codec_core::Result<()> {
        Ok(())
    }

    fn frame_size(&self) -> usize {
        self.def.default_frame_size()
    }
}

impl Drop for MockCodec {
    fn drop(&mut self) {
        let live = if self.decoder {
            &self.counters.decoders_live
        } else {
            &self.counters.encoders_live
        };
        live.fetch_sub(1, Ordering::SeqCst);
    }
}

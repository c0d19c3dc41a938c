//! # Media-Core: codec negotiation and transcoding dispatch
//!
//! The part of the RTP relay that decides, per call and per direction, which
//! payload types each side accepts and what happens to a packet carrying
//! each of them.
//!
//! A call has two [`CallMedia`] streams. For each direction:
//!
//! 1. [`codec_rtp_payload_types`] reconciles the payload types parsed from
//!    SDP with the call's [`CodecPolicy`], filling the receiving stream's
//!    registry and the sink's send preferences.
//! 2. [`codec_handlers_update`] rebuilds the receiving stream's handler
//!    table: payload types the sink understands are forwarded, the others
//!    are transcoded into the sink's preferred codec.
//! 3. On the packet path, [`CallMedia::codec_handler_get`] returns the
//!    handler for a payload type number and [`CodecHandler::process`] turns
//!    one payload into zero or more [`CodecPacket`]s.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::VecDeque;
//! use bytes::Bytes;
//! use rtprelay_media_core::{
//!     codec_handlers_update, codec_rtp_payload_types, CallMedia, CodecCoreEngine, CodecPolicy,
//!     HandlerKind, RtpPayloadType,
//! };
//!
//! let engine = CodecCoreEngine::new();
//! let mut caller = CallMedia::new("caller");
//! let mut callee = CallMedia::new("callee");
//!
//! // the caller offers PCMU and PCMA
//! codec_rtp_payload_types(
//!     &mut caller,
//!     &mut callee,
//!     vec![RtpPayloadType::new(0, "PCMU", 8000), RtpPayloadType::new(8, "PCMA", 8000)],
//!     &CodecPolicy::default(),
//!     &engine,
//! );
//! // the callee answers with PCMU only
//! codec_rtp_payload_types(
//!     &mut callee,
//!     &mut caller,
//!     vec![RtpPayloadType::new(0, "PCMU", 8000)],
//!     &CodecPolicy::default(),
//!     &engine,
//! );
//!
//! codec_handlers_update(&mut caller, &mut callee, &engine);
//! let handler = caller.codec_handler_get(8);
//! assert_eq!(handler.kind(), HandlerKind::Transcode);
//!
//! let mut out = VecDeque::new();
//! handler.process(&Bytes::from(vec![0xD5; 160]), &mut out);
//! assert_eq!(out[0].payload_type(), Some(0));
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod config;
pub mod error;
pub mod media;

pub use codec::{
    codec_handler_stub, codec_handlers_update, codec_rtp_payload_types, CodecCoreEngine,
    CodecEngine, CodecHandler, CodecHandlers, CodecPacket, HandlerKind, NegotiationSummary,
    PacketFreeFn, PayloadTypeRegistry, RtpPayloadType, PAYLOAD_TYPE_UNASSIGNED,
};
pub use config::{CodecPolicy, CODEC_STRIP_ALL};
pub use error::{Error, Result};
pub use media::CallMedia;

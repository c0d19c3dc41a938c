//! Codec negotiation and packet dispatch
//!
//! - [`payload_type`]: one negotiated payload type
//! - [`registry`]: per-stream payload type registry and number allocation
//! - [`negotiation`]: reconciling an incoming list against the codec policy
//! - [`handler`]: handler table, dispatch cache and the rebuild step
//! - [`packet`]: packets handed to the I/O layer
//! - [`engine`]: the seam to the codec library

pub mod engine;
pub mod handler;
pub mod negotiation;
pub mod packet;
pub mod payload_type;
pub mod registry;

pub use engine::{CodecCoreEngine, CodecEngine};
pub use handler::{codec_handler_stub, codec_handlers_update, CodecHandler, CodecHandlers, HandlerKind};
pub use negotiation::{codec_rtp_payload_types, NegotiationSummary};
pub use packet::{CodecPacket, PacketFreeFn};
pub use payload_type::{
    RtpPayloadType, DYNAMIC_PAYLOAD_TYPE_MAX, DYNAMIC_PAYLOAD_TYPE_MIN, PAYLOAD_TYPE_UNASSIGNED,
};
pub use registry::PayloadTypeRegistry;

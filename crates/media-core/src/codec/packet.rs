//! Output packets produced by codec handlers

use std::fmt;

use bytes::Bytes;

/// Destructor run on a packet's payload once the I/O layer is done with it
pub type PacketFreeFn = Box<dyn FnOnce(Bytes) + Send>;

/// One outgoing RTP payload
///
/// The I/O layer consumes each packet exactly once. The optional destructor
/// runs exactly once too, either through [`CodecPacket::release`] or when the
/// packet is dropped.
pub struct CodecPacket {
    payload: Bytes,
    payload_type: Option<i32>,
    free_func: Option<PacketFreeFn>,
}

impl CodecPacket {
    /// Wrap a payload with no destructor
    pub fn new(payload: Bytes) -> Self {
        Self {
            payload,
            payload_type: None,
            free_func: None,
        }
    }

    /// Wrap a payload whose storage must be handed back through `free_func`
    pub fn with_free_func(payload: Bytes, free_func: PacketFreeFn) -> Self {
        Self {
            payload,
            payload_type: None,
            free_func: Some(free_func),
        }
    }

    /// Payload type number the packet must be sent with, when it differs
    /// from the one it was received with
    pub fn with_payload_type(mut self, payload_type: i32) -> Self {
        self.payload_type = Some(payload_type);
        self
    }

    /// Payload bytes
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Outgoing payload type number, `None` to keep the received one
    pub fn payload_type(&self) -> Option<i32> {
        self.payload_type
    }

    /// Whether a destructor is attached
    pub fn has_free_func(&self) -> bool {
        self.free_func.is_some()
    }

    /// Hand the packet back after transmission
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for CodecPacket {
    fn drop(&mut self) {
        if let Some(free_func) = self.free_func.take() {
            free_func(std::mem::take(&mut self.payload));
        }
    }
}

impl fmt::Debug for CodecPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecPacket")
            .field("len", &self.payload.len())
            .field("payload_type", &self.payload_type)
            .field("free_func", &self.free_func.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_plain_packet() {
        let packet = CodecPacket::new(Bytes::from_static(b"abc"));
        assert_eq!(packet.payload().as_ref(), b"abc");
        assert_eq!(packet.payload_type(), None);
        assert!(!packet.has_free_func());
        packet.release();
    }

    #[test]
    fn test_free_func_runs_once_on_release() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let packet = CodecPacket::with_free_func(
            Bytes::from_static(b"xyz"),
            Box::new(move |payload| {
                assert_eq!(payload.as_ref(), b"xyz");
                seen.fetch_add(1, Ordering::SeqCst);
            }),
        );
        assert!(packet.has_free_func());
        packet.release();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_free_func_runs_on_drop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        {
            let _packet = CodecPacket::with_free_func(
                Bytes::new(),
                Box::new(move |_| {
                    seen.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .with_payload_type(0);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

//! Per-stream payload type registry
//!
//! Holds the codec state of one stream:
//!
//! - the negotiated payload types, keyed by number
//! - an index from encoding name to the numbers using it
//! - the receive preferences (what this stream accepts, in negotiation order)
//! - the send preferences (what this stream offers when it is the sink of
//!   the opposite stream)
//!
//! Send preferences are always independent copies, never shared with the
//! receive side of any registry.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use super::payload_type::{RtpPayloadType, DYNAMIC_PAYLOAD_TYPE_MAX, DYNAMIC_PAYLOAD_TYPE_MIN};

/// Payload type registry of one stream
#[derive(Debug, Default)]
pub struct PayloadTypeRegistry {
    /// Negotiated payload types by number
    codecs: HashMap<i32, RtpPayloadType>,
    /// Encoding name -> payload type numbers. An empty list means the name is
    /// supported but its number in this direction is unknown.
    codec_names: HashMap<String, Vec<i32>>,
    /// Receive preferences, as numbers into `codecs`
    prefs_recv: Vec<i32>,
    /// Send preferences
    prefs_send: Vec<RtpPayloadType>,
}

impl PayloadTypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a payload type on the receive side
    ///
    /// If the number is already taken the offered entry is dropped and the
    /// existing one is returned unchanged.
    pub fn add_recv(&mut self, pt: RtpPayloadType) -> &RtpPayloadType {
        let number = pt.payload_type;
        match self.codecs.entry(number) {
            Entry::Occupied(existing) => {
                if existing.get().same_codec(&pt) {
                    debug!("Payload type {} ('{}') listed twice", number, pt.encoding);
                } else {
                    debug!(
                        "Payload type {} already registered as '{}', ignoring '{}'",
                        number,
                        existing.get().encoding,
                        pt.encoding
                    );
                }
                existing.into_mut()
            }
            Entry::Vacant(slot) => {
                self.codec_names
                    .entry(pt.encoding.clone())
                    .or_default()
                    .push(number);
                self.prefs_recv.push(number);
                slot.insert(pt)
            }
        }
    }

    /// Append a copy of `pt` to the send preferences
    ///
    /// Also makes sure the name index knows the codec, without a number, to
    /// record that this stream supports it.
    pub fn add_send(&mut self, pt: &RtpPayloadType) {
        self.prefs_send.push(pt.clone());
        self.codec_names.entry(pt.encoding.clone()).or_default();
    }

    /// Find a free payload type number, starting at `hint`
    ///
    /// A negative hint starts at 96. A taken number below 96 (an RFC
    /// assignment) moves the search to the dynamic range; running past 127
    /// means the range is exhausted and `None` is returned.
    pub fn allocate_payload_type(&self, hint: i32) -> Option<i32> {
        let mut number = if hint < 0 { DYNAMIC_PAYLOAD_TYPE_MIN } else { hint };

        loop {
            if !self.codecs.contains_key(&number) {
                return Some(number);
            }
            number += 1;
            if number < DYNAMIC_PAYLOAD_TYPE_MIN {
                number = DYNAMIC_PAYLOAD_TYPE_MIN;
            } else if number > DYNAMIC_PAYLOAD_TYPE_MAX {
                return None;
            }
        }
    }

    /// Drop all receive-side state: entries, name index and receive
    /// preferences
    pub fn clear(&mut self) {
        self.prefs_recv.clear();
        self.codecs.clear();
        self.codec_names.clear();
    }

    /// Drop the send preferences
    pub fn clear_send(&mut self) {
        self.prefs_send.clear();
    }

    /// Payload type registered under `number`
    pub fn get(&self, number: i32) -> Option<&RtpPayloadType> {
        self.codecs.get(&number)
    }

    /// Mutable access to the payload type registered under `number`
    pub fn get_mut(&mut self, number: i32) -> Option<&mut RtpPayloadType> {
        self.codecs.get_mut(&number)
    }

    /// Whether the name index knows this codec
    pub fn contains_codec(&self, encoding: &str) -> bool {
        self.codec_names.contains_key(encoding)
    }

    /// Numbers registered for `encoding` on the receive side
    pub fn payload_types_for(&self, encoding: &str) -> &[i32] {
        self.codec_names
            .get(encoding)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Receive preferences in negotiation order
    pub fn prefs_recv(&self) -> impl Iterator<Item = &RtpPayloadType> + '_ {
        self.prefs_recv
            .iter()
            .filter_map(move |number| self.codecs.get(number))
    }

    /// Numbers of the receive preferences in negotiation order
    pub fn prefs_recv_numbers(&self) -> &[i32] {
        &self.prefs_recv
    }

    /// Send preferences in negotiation order
    pub fn prefs_send(&self) -> &[RtpPayloadType] {
        &self.prefs_send
    }

    pub(crate) fn prefs_send_mut(&mut self) -> &mut [RtpPayloadType] {
        &mut self.prefs_send
    }

    /// Number of registered payload types
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Whether no payload type is registered
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pt(number: i32, name: &str) -> RtpPayloadType {
        RtpPayloadType::new(number, name, 8000)
    }

    #[test]
    fn test_add_recv_indexes_and_orders() {
        let mut registry = PayloadTypeRegistry::new();
        registry.add_recv(pt(8, "PCMA"));
        registry.add_recv(pt(0, "PCMU"));
        registry.add_recv(pt(101, "telephone-event"));

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.prefs_recv_numbers(), &[8, 0, 101]);
        let names: Vec<&str> = registry.prefs_recv().map(|p| p.encoding.as_str()).collect();
        assert_eq!(names, vec!["PCMA", "PCMU", "telephone-event"]);
        assert_eq!(registry.payload_types_for("PCMU"), &[0]);
    }

    #[test]
    fn test_collision_keeps_first_entry() {
        let mut registry = PayloadTypeRegistry::new();
        registry.add_recv(pt(96, "G729"));
        let kept = registry.add_recv(pt(96, "opus"));
        assert_eq!(kept.encoding, "G729");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.prefs_recv_numbers(), &[96]);
        assert!(!registry.contains_codec("opus"));
    }

    #[test]
    fn test_same_codec_under_two_numbers() {
        let mut registry = PayloadTypeRegistry::new();
        registry.add_recv(pt(96, "G729"));
        registry.add_recv(pt(18, "G729"));
        assert_eq!(registry.payload_types_for("G729"), &[96, 18]);
    }

    #[test]
    fn test_add_send_copies_and_declares_support() {
        let mut receiver = PayloadTypeRegistry::new();
        let mut sink = PayloadTypeRegistry::new();

        let entry = receiver.add_recv(pt(0, "PCMU"));
        sink.add_send(entry);

        sink.prefs_send_mut()[0].format_parameters = "x=1".to_string();
        assert_eq!(receiver.get(0).unwrap().format_parameters, "");

        assert!(sink.contains_codec("PCMU"));
        assert!(sink.payload_types_for("PCMU").is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_clear_keeps_send_side() {
        let mut registry = PayloadTypeRegistry::new();
        registry.add_recv(pt(0, "PCMU"));
        registry.add_send(&pt(8, "PCMA"));

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.prefs_recv_numbers().is_empty());
        assert!(!registry.contains_codec("PCMU"));
        assert_eq!(registry.prefs_send().len(), 1);

        registry.clear_send();
        assert!(registry.prefs_send().is_empty());
    }

    #[test]
    fn test_allocate_defaults_to_dynamic_range() {
        let mut registry = PayloadTypeRegistry::new();
        assert_eq!(registry.allocate_payload_type(-1), Some(96));
        registry.add_recv(pt(96, "G729"));
        registry.add_recv(pt(97, "opus"));
        assert_eq!(registry.allocate_payload_type(-1), Some(98));
    }

    #[test]
    fn test_allocate_keeps_free_rfc_number() {
        let registry = PayloadTypeRegistry::new();
        assert_eq!(registry.allocate_payload_type(18), Some(18));
    }

    #[test]
    fn test_allocate_taken_rfc_number_moves_to_dynamic() {
        let mut registry = PayloadTypeRegistry::new();
        registry.add_recv(pt(18, "X-OTHER"));
        assert_eq!(registry.allocate_payload_type(18), Some(96));
    }

    #[test]
    fn test_allocate_exhausted() {
        let mut registry = PayloadTypeRegistry::new();
        for number in DYNAMIC_PAYLOAD_TYPE_MIN..=DYNAMIC_PAYLOAD_TYPE_MAX {
            registry.add_recv(pt(number, &format!("X-{}", number)));
        }
        assert_eq!(registry.allocate_payload_type(-1), None);
        assert_eq!(registry.allocate_payload_type(120), None);

        // a free low number is still usable
        assert_eq!(registry.allocate_payload_type(0), Some(0));
        registry.add_recv(pt(0, "PCMU"));
        assert_eq!(registry.allocate_payload_type(0), None);
    }

    proptest! {
        #[test]
        fn prop_numbers_stay_unique(numbers in proptest::collection::vec(0i32..128, 0..64)) {
            let mut registry = PayloadTypeRegistry::new();
            for (i, number) in numbers.iter().enumerate() {
                registry.add_recv(pt(*number, &format!("X-{}", i)));
            }

            let mut seen = std::collections::HashSet::new();
            for entry in registry.prefs_recv() {
                prop_assert!(seen.insert(entry.payload_type));
            }
            prop_assert_eq!(seen.len(), registry.len());
        }

        #[test]
        fn prop_allocation_is_free_and_in_range(
            taken in proptest::collection::hash_set(0i32..128, 0..=100),
            hint in prop_oneof![Just(-1i32), 0i32..96],
        ) {
            let mut registry = PayloadTypeRegistry::new();
            for number in &taken {
                registry.add_recv(pt(*number, &format!("X-{}", number)));
            }

            let dynamic_full = (DYNAMIC_PAYLOAD_TYPE_MIN..=DYNAMIC_PAYLOAD_TYPE_MAX)
                .all(|number| taken.contains(&number));

            match registry.allocate_payload_type(hint) {
                Some(number) => {
                    prop_assert!(registry.get(number).is_none());
                    let allocated = RtpPayloadType::new(number, "X-NEW", 8000);
                    prop_assert!(number == hint || allocated.is_dynamic());
                }
                None => {
                    prop_assert!(dynamic_full);
                    prop_assert!(hint < 0 || taken.contains(&hint));
                }
            }
        }
    }
}

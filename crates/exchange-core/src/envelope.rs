//! Protocol-tagged message envelope.
//!
//! A [`ProtocolMsg`] is a read-only view over the bytes of exactly one
//! complete wire message. It borrows the caller's buffer and never copies;
//! if the bytes must outlive the call they were delivered in, the receiver
//! copies them.
//!
//! No framing validation happens here. Whether the bytes really hold one
//! well-formed message is up to the sender and the decoder.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;

use crate::protocol::{Itch, Ouch, Protocol, ProtocolTag};

/// View over one complete message framed in protocol `P`.
pub struct ProtocolMsg<'a, P: ProtocolTag> {
    bytes: &'a [u8],
    _protocol: PhantomData<P>,
}

/// One OUCH message.
pub type OuchMsg<'a> = ProtocolMsg<'a, Ouch>;

/// One ITCH message.
pub type ItchMsg<'a> = ProtocolMsg<'a, Itch>;

impl<'a, P: ProtocolTag> ProtocolMsg<'a, P> {
    /// Wrap an existing byte range.
    pub fn new(bytes: &'a [u8]) -> Self {
        ProtocolMsg {
            bytes,
            _protocol: PhantomData,
        }
    }

    /// The runtime protocol identifier for this message type.
    pub fn protocol(&self) -> Protocol {
        P::PROTOCOL
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// First byte of the message; for both OUCH and ITCH this is the
    /// message type tag.
    pub fn message_type(&self) -> Option<u8> {
        self.bytes.first().copied()
    }
}

impl<P: ProtocolTag> Clone for ProtocolMsg<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ProtocolTag> Copy for ProtocolMsg<'_, P> {}

impl<P: ProtocolTag> Index<usize> for ProtocolMsg<'_, P> {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.bytes[index]
    }
}

impl<'a, P: ProtocolTag> From<&'a [u8]> for ProtocolMsg<'a, P> {
    fn from(bytes: &'a [u8]) -> Self {
        ProtocolMsg::new(bytes)
    }
}

impl<'a, P: ProtocolTag, const N: usize> From<&'a [u8; N]> for ProtocolMsg<'a, P> {
    fn from(bytes: &'a [u8; N]) -> Self {
        ProtocolMsg::new(bytes)
    }
}

impl<'a, P: ProtocolTag> From<&'a Vec<u8>> for ProtocolMsg<'a, P> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        ProtocolMsg::new(bytes.as_slice())
    }
}

impl<P: ProtocolTag> AsRef<[u8]> for ProtocolMsg<'_, P> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<P: ProtocolTag> PartialEq for ProtocolMsg<'_, P> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<P: ProtocolTag> Eq for ProtocolMsg<'_, P> {}

impl<P: ProtocolTag> fmt::Debug for ProtocolMsg<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolMsg")
            .field("protocol", &P::PROTOCOL)
            .field("len", &self.bytes.len())
            .finish()
    }
}

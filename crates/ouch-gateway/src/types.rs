//! Shared types for plugging the gateway into a transport.
//!
//! A transport task typically owns the receiving half of an outbound
//! channel and writes whatever arrives to its socket. The gateway only sees
//! the sending half, wrapped in a [`ChannelSink`], which is postable for any
//! protocol.

use exchange_core::{DeliveryError, Post, ProtocolMsg, ProtocolTag};
use tokio::sync::mpsc;

/// Outbound messages from the exchange to one client, one message per item.
pub type OutboundTx = mpsc::UnboundedSender<Vec<u8>>;
pub type OutboundRx = mpsc::UnboundedReceiver<Vec<u8>>;

/// Postable target that copies each message into an outbound channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: OutboundTx,
}

impl ChannelSink {
    pub fn new(tx: OutboundTx) -> Self {
        ChannelSink { tx }
    }

    /// A sink plus the receiver the transport reads from.
    pub fn pair() -> (Self, OutboundRx) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelSink::new(tx), rx)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<P: ProtocolTag> Post<P> for ChannelSink {
    fn post(&mut self, msg: ProtocolMsg<'_, P>) -> Result<(), DeliveryError> {
        self.tx
            .send(msg.as_bytes().to_vec())
            .map_err(|_| DeliveryError::Closed)
    }
}

//! Per-connection OUCH order-entry state machine.
//!
//! One [`Gateway`] exists per connection. Its only persistent state is the
//! last accepted sequence number (`user_ref_num`). Each inbound message is
//! processed to completion before the next one:
//!
//! 1. dispatch on the message type tag (only Enter Order is handled);
//! 2. decode the Enter Order, byte-exact, appendage included;
//! 3. drop it silently unless its sequence number is strictly greater
//!    than the last accepted one;
//! 4. record the new sequence number, whether or not the order is valid;
//! 5. validate the order fields;
//! 6. reply with Order Accepted (appendage echoed) or Rejected.
//!
//! Replies go to the client through [`post_msg`], so a misbehaving client
//! can never fail or stall the gateway.

use exchange_core::{post_msg, DeliveryError, Ouch, OuchMsg, Post};
use ouch_protocol::wire_types::WireInboundType;
use ouch_protocol::{
    decode_enter_order, encode_order_accepted, encode_rejected, EnterOrder, OrderAccepted,
    RejectReason, Rejected, Validator,
};
use tracing::{debug, trace, warn};

use crate::config::GatewayOptions;
use crate::error::GatewayError;

/// Replies carry no clock.
const REPLY_TIMESTAMP: u64 = 0;

/// Order reference numbers are not assigned.
const ORDER_REFERENCE_NUMBER: u64 = 0;

/// What happened to one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Order Accepted was sent.
    Accepted { seq: u32 },

    /// Rejected was sent.
    Rejected { seq: u32, reason: RejectReason },

    /// Sequence number not above `last`; nothing was sent.
    Dropped { seq: u32, last: u32 },

    /// Message type not handled; nothing was sent.
    Ignored { message_type: u8 },
}

/// OUCH order-entry gateway for one connection, replying to `C`.
#[derive(Debug)]
pub struct Gateway<C> {
    client: C,
    last_seq_num: u32,
    validator: Validator,
    out_buf: Vec<u8>,
}

impl<C: Post<Ouch>> Gateway<C> {
    pub fn new(client: C) -> Self {
        Gateway::with_options(client, &GatewayOptions::default())
    }

    pub fn with_options(client: C, options: &GatewayOptions) -> Self {
        Gateway {
            client,
            last_seq_num: 0,
            validator: options.validator(),
            out_buf: Vec::with_capacity(256),
        }
    }

    /// Last sequence number that passed the sequence check.
    pub fn last_seq_num(&self) -> u32 {
        self.last_seq_num
    }

    /// Process one inbound message.
    ///
    /// Returns an error only when the bytes are not a well-formed message;
    /// in that case no state changes and nothing is sent. Reporting the
    /// error is left to the caller.
    pub fn on_message(&mut self, msg: OuchMsg<'_>) -> Result<Outcome, GatewayError> {
        let result = self.dispatch(msg);
        if let Err(err) = &result {
            debug!(len = msg.len(), error = %err, "malformed inbound message");
        }
        result
    }

    fn dispatch(&mut self, msg: OuchMsg<'_>) -> Result<Outcome, GatewayError> {
        let tag = msg
            .message_type()
            .ok_or(ouch_protocol::ProtocolError::Empty)?;
        trace!(message_type = tag, len = msg.len(), "inbound");

        match WireInboundType::from_u8(tag) {
            Some(WireInboundType::EnterOrder) => {
                let order = decode_enter_order(msg.as_bytes())?;
                Ok(self.on_enter_order(&order))
            }
            None => {
                debug!(message_type = tag, "unhandled message type ignored");
                Ok(Outcome::Ignored { message_type: tag })
            }
        }
    }

    fn on_enter_order(&mut self, order: &EnterOrder<'_>) -> Outcome {
        let seq = order.user_ref_num;

        if seq <= self.last_seq_num {
            debug!(seq, last = self.last_seq_num, "stale sequence number, order dropped");
            return Outcome::Dropped {
                seq,
                last: self.last_seq_num,
            };
        }
        self.last_seq_num = seq;

        match self.validator.validate(order) {
            Ok(()) => {
                self.send_accepted(order);
                debug!(seq, "order accepted");
                Outcome::Accepted { seq }
            }
            Err(reason) => {
                self.send_rejected(order, reason);
                debug!(seq, ?reason, "order rejected");
                Outcome::Rejected { seq, reason }
            }
        }
    }

    fn send_accepted(&mut self, order: &EnterOrder<'_>) {
        let accepted = OrderAccepted::for_order(order, REPLY_TIMESTAMP, ORDER_REFERENCE_NUMBER);

        self.out_buf.clear();
        // The appendage came off the wire with a u16 length, so it fits.
        if let Err(err) = encode_order_accepted(&accepted, &mut self.out_buf) {
            warn!(seq = order.user_ref_num, error = %err, "failed to encode order accepted");
            return;
        }
        post_msg(&mut self.client, OuchMsg::new(&self.out_buf));
    }

    fn send_rejected(&mut self, order: &EnterOrder<'_>, reason: RejectReason) {
        let rejected = Rejected::for_order(order, REPLY_TIMESTAMP, reason);

        self.out_buf.clear();
        if let Err(err) = encode_rejected(&rejected, &mut self.out_buf) {
            warn!(seq = order.user_ref_num, error = %err, "failed to encode rejected");
            return;
        }
        post_msg(&mut self.client, OuchMsg::new(&self.out_buf));
    }
}

/// The gateway is itself postable: this is the handle a client posts
/// inbound messages to.
impl<C: Post<Ouch>> Post<Ouch> for Gateway<C> {
    fn post(&mut self, msg: OuchMsg<'_>) -> Result<(), DeliveryError> {
        self.on_message(msg)
            .map(|_| ())
            .map_err(|err| DeliveryError::Failed(err.to_string()))
    }
}

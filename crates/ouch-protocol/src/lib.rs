//! ouch-protocol
//!
//! Wire-level layouts and rules for OUCH order entry.
//!
//! This crate is responsible for turning OUCH messages
//! ([`EnterOrder`], [`OrderAccepted`], [`Rejected`]) into bytes and back
//! again, and for deciding whether an order's fields are legal.
//!
//! - [`wire_types`]   : tags, sizes, closed code sets
//! - [`messages`]     : message structs
//! - [`binary_codec`] : big-endian, byte-exact encode/decode
//! - [`validate`]     : field validation rules

pub mod wire_types;
pub mod messages;
pub mod binary_codec;
pub mod validate;

pub use binary_codec::{
    ProtocolError,
    decode_enter_order,
    encode_enter_order,
    decode_outbound,
    encode_outbound,
    decode_order_accepted,
    encode_order_accepted,
    decode_rejected,
    encode_rejected,
};

pub use messages::{EnterOrder, OrderAccepted, OutboundMessage, Rejected};
pub use validate::Validator;
pub use wire_types::{RejectReason, Side, TimeInForce};

//! Binary encoding/decoding for OUCH messages.
//!
//! This module converts between:
//! - raw binary messages (`&[u8]`)
//! - the structs in [`crate::messages`]
//!
//! Every multi-byte integer is big-endian, in both directions. Layouts are
//! packed, with no padding:
//!
//! ```text
//! EnterOrder (type='O', 47 + N bytes)
//! -----------------------------------
//! [0]      type 'O'
//! [1..5]   user_ref_num (u32)
//! [5]      side
//! [6..10]  quantity (u32)
//! [10..18] symbol (alpha, space padded)
//! [18..26] price (u64)
//! [26]     time_in_force
//! [27]     display
//! [28]     capacity
//! [29]     intermarket_sweep_eligibility
//! [30]     cross_type
//! [31..45] cl_ord_id (alpha)
//! [45..47] appendage_length N (u16)
//! [47..]   appendage (N bytes)
//!
//! OrderAccepted (type='A', 64 + N bytes)
//! --------------------------------------
//! [0]      type 'A'
//! [1..9]   timestamp (u64)
//! [9..13]  user_ref_num (u32)
//! [13]     side
//! [14..18] quantity (u32)
//! [18..26] symbol
//! [26..34] price (u64)
//! [34]     time_in_force
//! [35]     display
//! [36..44] order_reference_number (u64)
//! [44]     capacity
//! [45]     intermarket_sweep_eligibility
//! [46]     cross_type
//! [47]     order_state
//! [48..62] cl_ord_id
//! [62..64] appendage_length N (u16)
//! [64..]   appendage (N bytes)
//!
//! Rejected (type='J', 29 bytes)
//! -----------------------------
//! [0]      type 'J'
//! [1..9]   timestamp (u64)
//! [9..13]  user_ref_num (u32)
//! [13..15] reason (u16)
//! [15..29] cl_ord_id
//! ```
//!
//! NOTE: one message per buffer. The buffer length must match the layout
//! exactly (including the declared appendage); anything else is a framing
//! error, never silently truncated or padded.

use bytes::{Buf, BufMut};
use thiserror::Error;

use exchange_core::OuchMsg;

use crate::messages::{EnterOrder, OrderAccepted, OutboundMessage, Rejected};
use crate::wire_types::{
    RejectReason, WireInboundType, WireOutboundType, CL_ORD_ID_LEN, ENTER_ORDER_LEN,
    ORDER_ACCEPTED_LEN, REJECTED_LEN, SYMBOL_LEN,
};

/// Errors that can arise when encoding/decoding a binary message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Zero-length buffer.
    #[error("empty message")]
    Empty,

    /// Buffer too short for the fixed portion of the layout.
    #[error("buffer truncated: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// Buffer length disagrees with the declared appendage length.
    #[error("appendage length {declared} does not match {actual} trailing bytes")]
    AppendageMismatch { declared: u16, actual: usize },

    /// Buffer longer than a fixed-size layout.
    #[error("trailing bytes: expected {expected}, got {actual}")]
    TrailingBytes { expected: usize, actual: usize },

    /// Message type tag not valid where it was found.
    #[error("unexpected message type: {0:#04x}")]
    UnexpectedMessageType(u8),

    /// Appendage does not fit the u16 length field.
    #[error("appendage too long: {0} bytes")]
    AppendageTooLong(usize),

    /// Invalid value for a field with a closed code set.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),
}

// ============================================================================
// INBOUND: client → exchange
// ============================================================================

/// Decode one Enter Order message.
///
/// The buffer must hold exactly the fixed portion plus the declared
/// appendage.
pub fn decode_enter_order(buf: &[u8]) -> Result<EnterOrder<'_>, ProtocolError> {
    expect_type(buf, WireInboundType::EnterOrder as u8)?;
    expect_at_least(buf, ENTER_ORDER_LEN)?;

    let mut cur = &buf[1..ENTER_ORDER_LEN];

    let user_ref_num = cur.get_u32();
    let side = cur.get_u8();
    let quantity = cur.get_u32();
    let symbol = read_array::<SYMBOL_LEN>(&mut cur);
    let price = cur.get_u64();
    let time_in_force = cur.get_u8();
    let display = cur.get_u8();
    let capacity = cur.get_u8();
    let intermarket_sweep_eligibility = cur.get_u8();
    let cross_type = cur.get_u8();
    let cl_ord_id = read_array::<CL_ORD_ID_LEN>(&mut cur);
    let appendage_length = cur.get_u16();

    let appendage = split_appendage(buf, ENTER_ORDER_LEN, appendage_length)?;

    Ok(EnterOrder {
        user_ref_num,
        side,
        quantity,
        symbol,
        price,
        time_in_force,
        display,
        capacity,
        intermarket_sweep_eligibility,
        cross_type,
        cl_ord_id,
        appendage,
    })
}

/// Encode one Enter Order message, appending to `out`.
pub fn encode_enter_order(msg: &EnterOrder<'_>, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    let appendage_length = appendage_len(msg.appendage)?;

    out.reserve(ENTER_ORDER_LEN + msg.appendage.len());
    out.put_u8(WireInboundType::EnterOrder as u8);
    out.put_u32(msg.user_ref_num);
    out.put_u8(msg.side);
    out.put_u32(msg.quantity);
    out.put_slice(&msg.symbol);
    out.put_u64(msg.price);
    out.put_u8(msg.time_in_force);
    out.put_u8(msg.display);
    out.put_u8(msg.capacity);
    out.put_u8(msg.intermarket_sweep_eligibility);
    out.put_u8(msg.cross_type);
    out.put_slice(&msg.cl_ord_id);
    out.put_u16(appendage_length);
    out.put_slice(msg.appendage);

    Ok(())
}

impl<'a> TryFrom<OuchMsg<'a>> for EnterOrder<'a> {
    type Error = ProtocolError;

    fn try_from(msg: OuchMsg<'a>) -> Result<Self, Self::Error> {
        decode_enter_order(msg.as_bytes())
    }
}

// ============================================================================
// OUTBOUND: exchange → client
// ============================================================================

/// Encode one outbound message, appending to `out`.
pub fn encode_outbound(msg: &OutboundMessage<'_>, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    match msg {
        OutboundMessage::Accepted(a) => encode_order_accepted(a, out),
        OutboundMessage::Rejected(r) => encode_rejected(r, out),
    }
}

/// Decode one outbound message.
///
/// This is useful on the **client** side when reading from the exchange.
pub fn decode_outbound(buf: &[u8]) -> Result<OutboundMessage<'_>, ProtocolError> {
    let tag = *buf.first().ok_or(ProtocolError::Empty)?;
    let wire_type = WireOutboundType::from_u8(tag).ok_or(ProtocolError::UnexpectedMessageType(tag))?;

    match wire_type {
        WireOutboundType::Accepted => decode_order_accepted(buf).map(OutboundMessage::Accepted),
        WireOutboundType::Rejected => decode_rejected(buf).map(OutboundMessage::Rejected),
    }
}

/// Encode one Order Accepted message, appending to `out`.
pub fn encode_order_accepted(
    msg: &OrderAccepted<'_>,
    out: &mut Vec<u8>,
) -> Result<(), ProtocolError> {
    let appendage_length = appendage_len(msg.appendage)?;

    out.reserve(ORDER_ACCEPTED_LEN + msg.appendage.len());
    out.put_u8(WireOutboundType::Accepted as u8);
    out.put_u64(msg.timestamp);
    out.put_u32(msg.user_ref_num);
    out.put_u8(msg.side);
    out.put_u32(msg.quantity);
    out.put_slice(&msg.symbol);
    out.put_u64(msg.price);
    out.put_u8(msg.time_in_force);
    out.put_u8(msg.display);
    out.put_u64(msg.order_reference_number);
    out.put_u8(msg.capacity);
    out.put_u8(msg.intermarket_sweep_eligibility);
    out.put_u8(msg.cross_type);
    out.put_u8(msg.order_state);
    out.put_slice(&msg.cl_ord_id);
    out.put_u16(appendage_length);
    out.put_slice(msg.appendage);

    Ok(())
}

/// Decode one Order Accepted message.
pub fn decode_order_accepted(buf: &[u8]) -> Result<OrderAccepted<'_>, ProtocolError> {
    expect_type(buf, WireOutboundType::Accepted as u8)?;
    expect_at_least(buf, ORDER_ACCEPTED_LEN)?;

    let mut cur = &buf[1..ORDER_ACCEPTED_LEN];

    let timestamp = cur.get_u64();
    let user_ref_num = cur.get_u32();
    let side = cur.get_u8();
    let quantity = cur.get_u32();
    let symbol = read_array::<SYMBOL_LEN>(&mut cur);
    let price = cur.get_u64();
    let time_in_force = cur.get_u8();
    let display = cur.get_u8();
    let order_reference_number = cur.get_u64();
    let capacity = cur.get_u8();
    let intermarket_sweep_eligibility = cur.get_u8();
    let cross_type = cur.get_u8();
    let order_state = cur.get_u8();
    let cl_ord_id = read_array::<CL_ORD_ID_LEN>(&mut cur);
    let appendage_length = cur.get_u16();

    let appendage = split_appendage(buf, ORDER_ACCEPTED_LEN, appendage_length)?;

    Ok(OrderAccepted {
        timestamp,
        user_ref_num,
        side,
        quantity,
        symbol,
        price,
        time_in_force,
        display,
        order_reference_number,
        capacity,
        intermarket_sweep_eligibility,
        cross_type,
        order_state,
        cl_ord_id,
        appendage,
    })
}

/// Encode one Rejected message, appending to `out`.
pub fn encode_rejected(msg: &Rejected, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    out.reserve(REJECTED_LEN);
    out.put_u8(WireOutboundType::Rejected as u8);
    out.put_u64(msg.timestamp);
    out.put_u32(msg.user_ref_num);
    out.put_u16(msg.reason.code());
    out.put_slice(&msg.cl_ord_id);

    Ok(())
}

/// Decode one Rejected message.
pub fn decode_rejected(buf: &[u8]) -> Result<Rejected, ProtocolError> {
    expect_type(buf, WireOutboundType::Rejected as u8)?;
    expect_at_least(buf, REJECTED_LEN)?;
    if buf.len() > REJECTED_LEN {
        return Err(ProtocolError::TrailingBytes {
            expected: REJECTED_LEN,
            actual: buf.len(),
        });
    }

    let mut cur = &buf[1..REJECTED_LEN];

    let timestamp = cur.get_u64();
    let user_ref_num = cur.get_u32();
    let reason = RejectReason::from_u16(cur.get_u16())
        .ok_or(ProtocolError::InvalidField("reject reason"))?;
    let cl_ord_id = read_array::<CL_ORD_ID_LEN>(&mut cur);

    Ok(Rejected {
        timestamp,
        user_ref_num,
        reason,
        cl_ord_id,
    })
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn expect_type(buf: &[u8], tag: u8) -> Result<(), ProtocolError> {
    match buf.first() {
        None => Err(ProtocolError::Empty),
        Some(&t) if t == tag => Ok(()),
        Some(&t) => Err(ProtocolError::UnexpectedMessageType(t)),
    }
}

fn expect_at_least(buf: &[u8], len: usize) -> Result<(), ProtocolError> {
    if buf.len() < len {
        return Err(ProtocolError::Truncated {
            expected: len,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// The bytes after a fixed portion of `fixed_len`, which must be exactly
/// `declared` long.
fn split_appendage(buf: &[u8], fixed_len: usize, declared: u16) -> Result<&[u8], ProtocolError> {
    let trailing = &buf[fixed_len..];
    if trailing.len() != usize::from(declared) {
        return Err(ProtocolError::AppendageMismatch {
            declared,
            actual: trailing.len(),
        });
    }
    Ok(trailing)
}

fn appendage_len(appendage: &[u8]) -> Result<u16, ProtocolError> {
    u16::try_from(appendage.len()).map_err(|_| ProtocolError::AppendageTooLong(appendage.len()))
}

fn read_array<const N: usize>(cur: &mut &[u8]) -> [u8; N] {
    let mut arr = [0u8; N];
    cur.copy_to_slice(&mut arr);
    arr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire_types::{pad_alpha, trim_alpha, ORDER_STATE_LIVE};

    /// Enter Order for 1000 CSCO @ 33.3300, seq 42, with a 6-byte appendage.
    const CSCO_ORDER: [u8; 53] = [
        0x4f, 0x00, 0x00, 0x00, 0x2a, 0x42, 0x00, 0x00, 0x03, 0xe8, //
        0x43, 0x53, 0x43, 0x4f, 0x20, 0x20, 0x20, 0x20, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x05, 0x15, 0xf4, 0x00, 0x59, 0x52, 0x59, //
        0x4e, 0x4f, 0x72, 0x64, 0x65, 0x72, 0x20, 0x31, 0x20, 0x20, //
        0x20, 0x20, 0x20, 0x20, 0x20, 0x00, 0x06, 0x05, 0x05, 0x00, //
        0x00, 0x00, 0x64,
    ];

    fn sample_order(appendage: &[u8]) -> EnterOrder<'_> {
        EnterOrder {
            user_ref_num: 1000,
            side: b'B',
            quantity: 100,
            symbol: pad_alpha("YRYN").unwrap(),
            price: 1_500_000,
            time_in_force: b'0',
            display: b'Y',
            capacity: b'A',
            intermarket_sweep_eligibility: b'N',
            cross_type: b'N',
            cl_ord_id: pad_alpha("ORD-1").unwrap(),
            appendage,
        }
    }

    #[test]
    fn decodes_reference_enter_order() {
        let order = decode_enter_order(&CSCO_ORDER).unwrap();

        assert_eq!(order.user_ref_num, 42);
        assert_eq!(order.side, b'B');
        assert_eq!(order.quantity, 1000);
        assert_eq!(&order.symbol, b"CSCO    ");
        assert_eq!(order.price, 333_300);
        assert_eq!(order.time_in_force, 0);
        assert_eq!(order.display, b'Y');
        assert_eq!(order.capacity, b'R');
        assert_eq!(order.intermarket_sweep_eligibility, b'Y');
        assert_eq!(order.cross_type, b'N');
        assert_eq!(trim_alpha(&order.cl_ord_id), b"Order 1");
        assert_eq!(order.appendage, &[0x05, 0x05, 0x00, 0x00, 0x00, 0x64]);
    }

    #[test]
    fn encodes_enter_order_byte_exact() {
        let order = decode_enter_order(&CSCO_ORDER).unwrap();
        let mut out = Vec::new();
        encode_enter_order(&order, &mut out).unwrap();
        assert_eq!(out, CSCO_ORDER);
    }

    #[test]
    fn enter_order_from_envelope() {
        let order = EnterOrder::try_from(OuchMsg::new(&CSCO_ORDER)).unwrap();
        assert_eq!(order.user_ref_num, 42);
    }

    #[test]
    fn rejects_empty_and_wrong_type() {
        assert_eq!(decode_enter_order(&[]), Err(ProtocolError::Empty));
        assert_eq!(
            decode_enter_order(&[b'U', 0, 0]),
            Err(ProtocolError::UnexpectedMessageType(b'U'))
        );
    }

    #[test]
    fn rejects_truncated_fixed_portion() {
        let err = decode_enter_order(&CSCO_ORDER[..40]).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::Truncated {
                expected: ENTER_ORDER_LEN,
                actual: 40
            }
        );
    }

    #[test]
    fn rejects_short_appendage() {
        let err = decode_enter_order(&CSCO_ORDER[..50]).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::AppendageMismatch {
                declared: 6,
                actual: 3
            }
        );
    }

    #[test]
    fn rejects_extra_trailing_bytes() {
        let mut buf = CSCO_ORDER.to_vec();
        buf.push(0xff);
        let err = decode_enter_order(&buf).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::AppendageMismatch {
                declared: 6,
                actual: 7
            }
        );
    }

    #[test]
    fn multi_byte_fields_are_big_endian() {
        let order = sample_order(&[]);
        let mut out = Vec::new();
        encode_enter_order(&order, &mut out).unwrap();

        assert_eq!(out.len(), ENTER_ORDER_LEN);
        assert_eq!(&out[1..5], &1000u32.to_be_bytes());
        assert_eq!(&out[6..10], &100u32.to_be_bytes());
        assert_eq!(&out[18..26], &1_500_000u64.to_be_bytes());
        assert_eq!(&out[45..47], &[0, 0]);
    }

    #[test]
    fn accepted_layout_and_appendage() {
        let appendage = [1u8, 2, 3, 4, 5];
        let order = sample_order(&appendage);
        let accepted = OrderAccepted::for_order(&order, 0, 0);

        let mut out = Vec::new();
        encode_order_accepted(&accepted, &mut out).unwrap();

        assert_eq!(out.len(), ORDER_ACCEPTED_LEN + appendage.len());
        assert_eq!(out[0], b'A');
        assert_eq!(&out[9..13], &1000u32.to_be_bytes());
        assert_eq!(out[47], ORDER_STATE_LIVE);
        assert_eq!(&out[62..64], &5u16.to_be_bytes());
        assert_eq!(&out[ORDER_ACCEPTED_LEN..], &appendage);

        assert_eq!(decode_order_accepted(&out).unwrap(), accepted);
    }

    #[test]
    fn rejected_layout() {
        let order = sample_order(&[9, 9]);
        let rejected = Rejected::for_order(&order, 7, RejectReason::InvalidSide);

        let mut out = Vec::new();
        encode_rejected(&rejected, &mut out).unwrap();

        assert_eq!(out.len(), REJECTED_LEN);
        assert_eq!(out[0], b'J');
        assert_eq!(&out[1..9], &7u64.to_be_bytes());
        assert_eq!(&out[9..13], &1000u32.to_be_bytes());
        assert_eq!(&out[13..15], &[0x00, 0x09]);
        assert_eq!(&out[15..29], &order.cl_ord_id);

        assert_eq!(
            decode_outbound(&out).unwrap(),
            OutboundMessage::Rejected(rejected)
        );
    }

    #[test]
    fn rejected_with_unknown_reason_is_invalid() {
        let mut out = Vec::new();
        let order = sample_order(&[]);
        encode_rejected(&Rejected::for_order(&order, 0, RejectReason::Halted), &mut out).unwrap();
        out[13] = 0xff;
        assert_eq!(
            decode_rejected(&out),
            Err(ProtocolError::InvalidField("reject reason"))
        );
    }

    #[test]
    fn encode_outbound_dispatches_on_variant() {
        let order = decode_enter_order(&CSCO_ORDER).unwrap();
        let accepted = OrderAccepted::for_order(&order, 0, 0);
        let rejected = Rejected::for_order(&order, 0, RejectReason::InvalidPrice);

        let mut direct = Vec::new();
        encode_order_accepted(&accepted, &mut direct).unwrap();
        encode_rejected(&rejected, &mut direct).unwrap();

        let mut out = Vec::new();
        encode_outbound(&OutboundMessage::Accepted(accepted.clone()), &mut out).unwrap();
        encode_outbound(&OutboundMessage::Rejected(rejected.clone()), &mut out).unwrap();
        assert_eq!(out, direct);

        let (first, second) = out.split_at(ORDER_ACCEPTED_LEN + order.appendage.len());
        assert_eq!(decode_outbound(first).unwrap(), OutboundMessage::Accepted(accepted));
        assert_eq!(decode_outbound(second).unwrap(), OutboundMessage::Rejected(rejected));
    }

    #[test]
    fn decode_outbound_rejects_inbound_tags() {
        assert_eq!(
            decode_outbound(&CSCO_ORDER),
            Err(ProtocolError::UnexpectedMessageType(b'O'))
        );
        assert_eq!(decode_outbound(&[]), Err(ProtocolError::Empty));
    }
}

//! OUCH message structures.
//!
//! These mirror the wire layouts field for field, but they are plain Rust
//! structs: nothing here is ever reinterpreted from raw memory. Converting
//! to and from bytes is `binary_codec`'s job.
//!
//! Single-byte code fields (side, time in force, ...) are kept as raw bytes
//! so that a decoded message can carry values outside the closed sets;
//! deciding whether they are legal is `validate`'s job.
//!
//! The variable-length appendage is borrowed from the buffer it was
//! decoded from.

use crate::wire_types::{RejectReason, CL_ORD_ID_LEN, ORDER_STATE_LIVE, SYMBOL_LEN};

/// Enter Order (inbound, type `'O'`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterOrder<'a> {
    /// Client-assigned sequence reference, strictly increasing per connection.
    pub user_ref_num: u32,
    pub side: u8,
    pub quantity: u32,
    pub symbol: [u8; SYMBOL_LEN],
    pub price: u64,
    pub time_in_force: u8,
    pub display: u8,
    pub capacity: u8,
    pub intermarket_sweep_eligibility: u8,
    pub cross_type: u8,
    pub cl_ord_id: [u8; CL_ORD_ID_LEN],
    /// Trailing optional fields; its length goes on the wire as a u16.
    pub appendage: &'a [u8],
}

/// Order Accepted (outbound, type `'A'`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAccepted<'a> {
    pub timestamp: u64,
    pub user_ref_num: u32,
    pub side: u8,
    pub quantity: u32,
    pub symbol: [u8; SYMBOL_LEN],
    pub price: u64,
    pub time_in_force: u8,
    pub display: u8,
    pub order_reference_number: u64,
    pub capacity: u8,
    pub intermarket_sweep_eligibility: u8,
    pub cross_type: u8,
    pub order_state: u8,
    pub cl_ord_id: [u8; CL_ORD_ID_LEN],
    pub appendage: &'a [u8],
}

/// Rejected (outbound, type `'J'`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub timestamp: u64,
    pub user_ref_num: u32,
    pub reason: RejectReason,
    pub cl_ord_id: [u8; CL_ORD_ID_LEN],
}

/// Any message the exchange sends to an order-entry client.
///
/// Useful on the client side when reading replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage<'a> {
    Accepted(OrderAccepted<'a>),
    Rejected(Rejected),
}

impl<'a> OrderAccepted<'a> {
    /// Acknowledge `order`: every order field is echoed, the appendage is
    /// carried over unchanged, and the order is reported live.
    pub fn for_order(order: &EnterOrder<'a>, timestamp: u64, order_reference_number: u64) -> Self {
        OrderAccepted {
            timestamp,
            user_ref_num: order.user_ref_num,
            side: order.side,
            quantity: order.quantity,
            symbol: order.symbol,
            price: order.price,
            time_in_force: order.time_in_force,
            display: order.display,
            order_reference_number,
            capacity: order.capacity,
            intermarket_sweep_eligibility: order.intermarket_sweep_eligibility,
            cross_type: order.cross_type,
            order_state: ORDER_STATE_LIVE,
            cl_ord_id: order.cl_ord_id,
            appendage: order.appendage,
        }
    }
}

impl Rejected {
    /// Refuse `order` for `reason`. No appendage is carried.
    pub fn for_order(order: &EnterOrder<'_>, timestamp: u64, reason: RejectReason) -> Self {
        Rejected {
            timestamp,
            user_ref_num: order.user_ref_num,
            reason,
            cl_ord_id: order.cl_ord_id,
        }
    }
}

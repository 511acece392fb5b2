//! Low-level wire types and constants.
//!
//! This module defines:
//! - Message type tags for inbound and outbound messages.
//! - Fixed sizes of each layout.
//! - The closed code sets carried in single-byte / two-byte fields
//!   (side, time in force, reject reason).
//! - Helpers for space-padded alpha fields.
//!
//! The actual encode/decode logic lives in `binary_codec`.

use crate::binary_codec::ProtocolError;

/// Size of the fixed portion of an Enter Order message.
pub const ENTER_ORDER_LEN: usize = 47;

/// Size of the fixed portion of an Order Accepted message.
pub const ORDER_ACCEPTED_LEN: usize = 64;

/// Size of a Rejected message.
pub const REJECTED_LEN: usize = 29;

/// Width of the symbol field.
pub const SYMBOL_LEN: usize = 8;

/// Width of the client order id field.
pub const CL_ORD_ID_LEN: usize = 14;

/// Order state reported in Order Accepted: the order is live.
pub const ORDER_STATE_LIVE: u8 = b'L';

/// Inbound message types (client → exchange).
///
/// The tag is the first byte of every message.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WireInboundType {
    /// Enter a new order.
    EnterOrder = b'O',
}

impl WireInboundType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            b'O' => Some(WireInboundType::EnterOrder),
            _ => None,
        }
    }
}

/// Outbound message types (exchange → client).
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WireOutboundType {
    /// Order accepted and live.
    Accepted = b'A',

    /// Order refused.
    Rejected = b'J',
}

impl WireOutboundType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            b'A' => Some(WireOutboundType::Accepted),
            b'J' => Some(WireOutboundType::Rejected),
            _ => None,
        }
    }
}

/// Order side.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Buy = b'B',
    Sell = b'S',
    SellShort = b'T',
    SellShortExempt = b'E',
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Buy, Side::Sell, Side::SellShort, Side::SellShortExempt];

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            b'B' => Some(Side::Buy),
            b'S' => Some(Side::Sell),
            b'T' => Some(Side::SellShort),
            b'E' => Some(Side::SellShortExempt),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Time in force.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimeInForce {
    Day = b'0',
    ImmediateOrCancel = b'3',
    /// Good till extended hours.
    Gtx = b'5',
    /// Good till time.
    Gtt = b'6',
    AfterHours = b'E',
}

impl TimeInForce {
    pub const ALL: [TimeInForce; 5] = [
        TimeInForce::Day,
        TimeInForce::ImmediateOrCancel,
        TimeInForce::Gtx,
        TimeInForce::Gtt,
        TimeInForce::AfterHours,
    ];

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            b'0' => Some(TimeInForce::Day),
            b'3' => Some(TimeInForce::ImmediateOrCancel),
            b'5' => Some(TimeInForce::Gtx),
            b'6' => Some(TimeInForce::Gtt),
            b'E' => Some(TimeInForce::AfterHours),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Reason an order was refused, carried as a big-endian u16.
///
/// `Success` (0) means "not rejected" and never appears in a Rejected
/// message sent by the gateway.
#[repr(u16)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Success = 0x0000,
    QuoteUnavailable = 0x0001,
    DestinationClosed = 0x0002,
    InvalidDisplay = 0x0003,
    InvalidMaxFloor = 0x0004,
    InvalidPegType = 0x0005,
    FatFinger = 0x0006,
    Halted = 0x0007,
    IsoNotAllowed = 0x0008,
    InvalidSide = 0x0009,
    ProcessingError = 0x000A,
    CancelPending = 0x000B,
    FirmNotAuthorized = 0x000C,
    InvalidMinQuantity = 0x000D,
    NoClosingReferencePrice = 0x000E,
    Other = 0x000F,
    CancelNotAllowed = 0x0010,
    PeggingNotAllowed = 0x0011,
    CrossedMarket = 0x0012,
    InvalidQuantity = 0x0013,
    InvalidCrossOrder = 0x0014,
    ReplaceNotAllowed = 0x0015,
    RoutingNotAllowed = 0x0016,
    InvalidSymbol = 0x0017,
    Test = 0x0018,
    LateLocTooAggressive = 0x0019,
    RetailNotAllowed = 0x001A,
    InvalidMidpointPostOnlyPrice = 0x001B,
    InvalidDestination = 0x001C,
    InvalidPrice = 0x001D,
    SharesExceedThreshold = 0x001E,
    ExceedsMaximumAllowedNotionalValue = 0x001F,
}

impl RejectReason {
    pub fn from_u16(v: u16) -> Option<Self> {
        use RejectReason::*;
        let reason = match v {
            0x0000 => Success,
            0x0001 => QuoteUnavailable,
            0x0002 => DestinationClosed,
            0x0003 => InvalidDisplay,
            0x0004 => InvalidMaxFloor,
            0x0005 => InvalidPegType,
            0x0006 => FatFinger,
            0x0007 => Halted,
            0x0008 => IsoNotAllowed,
            0x0009 => InvalidSide,
            0x000A => ProcessingError,
            0x000B => CancelPending,
            0x000C => FirmNotAuthorized,
            0x000D => InvalidMinQuantity,
            0x000E => NoClosingReferencePrice,
            0x000F => Other,
            0x0010 => CancelNotAllowed,
            0x0011 => PeggingNotAllowed,
            0x0012 => CrossedMarket,
            0x0013 => InvalidQuantity,
            0x0014 => InvalidCrossOrder,
            0x0015 => ReplaceNotAllowed,
            0x0016 => RoutingNotAllowed,
            0x0017 => InvalidSymbol,
            0x0018 => Test,
            0x0019 => LateLocTooAggressive,
            0x001A => RetailNotAllowed,
            0x001B => InvalidMidpointPostOnlyPrice,
            0x001C => InvalidDestination,
            0x001D => InvalidPrice,
            0x001E => SharesExceedThreshold,
            0x001F => ExceedsMaximumAllowedNotionalValue,
            _ => return None,
        };
        Some(reason)
    }

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn is_success(self) -> bool {
        self == RejectReason::Success
    }
}

/// Left-justify `s` into a space-padded fixed-width alpha field.
pub fn pad_alpha<const N: usize>(s: &str) -> Result<[u8; N], ProtocolError> {
    let bytes = s.as_bytes();
    if bytes.len() > N || !s.is_ascii() {
        return Err(ProtocolError::InvalidField("alpha"));
    }
    let mut out = [b' '; N];
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(out)
}

/// Strip trailing padding (spaces and NULs) from an alpha field.
pub fn trim_alpha(field: &[u8]) -> &[u8] {
    let end = field
        .iter()
        .rposition(|&b| b != b' ' && b != 0)
        .map_or(0, |i| i + 1);
    &field[..end]
}

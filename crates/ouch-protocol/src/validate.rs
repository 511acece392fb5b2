//! Per-field legality rules for inbound orders.
//!
//! Each rule maps one raw field to `Ok(())` or the [`RejectReason`] that
//! goes back to the client.

use crate::messages::EnterOrder;
use crate::wire_types::{RejectReason, Side, TimeInForce};

pub fn validate_side(side: u8) -> Result<(), RejectReason> {
    match Side::from_u8(side) {
        Some(_) => Ok(()),
        None => Err(RejectReason::InvalidSide),
    }
}

/// There is no dedicated reject code for a bad time in force; it is
/// reported as `Other`, not `InvalidSide`, so a client can tell the two
/// apart.
pub fn validate_time_in_force(tif: u8) -> Result<(), RejectReason> {
    match TimeInForce::from_u8(tif) {
        Some(_) => Ok(()),
        None => Err(RejectReason::Other),
    }
}

/// Which rules an order is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Validator {
    /// Off by default: orders are accepted whatever their time in force.
    pub check_time_in_force: bool,
}

impl Validator {
    pub fn new() -> Self {
        Validator::default()
    }

    pub fn with_time_in_force(mut self, enabled: bool) -> Self {
        self.check_time_in_force = enabled;
        self
    }

    /// First failing rule wins.
    pub fn validate(&self, order: &EnterOrder<'_>) -> Result<(), RejectReason> {
        validate_side(order.side)?;
        if self.check_time_in_force {
            validate_time_in_force(order.time_in_force)?;
        }
        Ok(())
    }
}

//! Error types for the gateway.
//!
//! Per-order problems (stale sequence numbers, illegal fields) are not
//! errors: they end in a dropped message or a Rejected reply. The only
//! thing escalated to the caller is a message that cannot be framed.

use ouch_protocol::ProtocolError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The inbound bytes are not one well-formed message.
    #[error("framing error: {0}")]
    Framing(#[from] ProtocolError),
}

//! Protocol identifiers.
//!
//! Every message crossing the exchange boundary is tagged with the wire
//! protocol it is framed in. The tag exists twice:
//! - as a runtime value ([`Protocol`]), stored in account entries;
//! - as a zero-sized marker type ([`Ouch`], [`Itch`]), used as the type
//!   parameter of [`ProtocolMsg`](crate::ProtocolMsg) so that messages of
//!   different protocols can never be mixed up at compile time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wire protocols known to the exchange.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    /// Order entry (client <-> exchange).
    Ouch,

    /// Market data (exchange -> client).
    Itch,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Ouch => "OUCH",
            Protocol::Itch => "ITCH",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-level protocol tag.
///
/// Implemented only by the marker types below. The associated constant
/// links the marker back to its [`Protocol`] value.
pub trait ProtocolTag: Copy + fmt::Debug + Send + Sync + 'static {
    const PROTOCOL: Protocol;
}

/// Marker for the OUCH order-entry protocol.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Ouch;

/// Marker for the ITCH market-data protocol.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Itch;

impl ProtocolTag for Ouch {
    const PROTOCOL: Protocol = Protocol::Ouch;
}

impl ProtocolTag for Itch {
    const PROTOCOL: Protocol = Protocol::Itch;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_map_to_their_protocol() {
        assert_eq!(Ouch::PROTOCOL, Protocol::Ouch);
        assert_eq!(Itch::PROTOCOL, Protocol::Itch);
    }

    #[test]
    fn protocol_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Protocol::Ouch).unwrap(), "\"OUCH\"");
        let p: Protocol = serde_json::from_str("\"ITCH\"").unwrap();
        assert_eq!(p, Protocol::Itch);
        assert_eq!(Protocol::Itch.to_string(), "ITCH");
    }
}

//! exchange-core
//!
//! Transport-agnostic exchange front end:
//! - protocol tags (runtime + type level)
//! - protocol-tagged message envelopes
//! - the "postable" capability and best-effort dispatcher
//! - endpoints, accounts, settings contract
//! - the generic connection host (`Exchange<B>`)
//!
//! Nothing in here knows about wire layouts or sockets. Concrete protocols
//! live in their own crates and plug in as backends.

pub mod protocol;
pub mod envelope;
pub mod post;
pub mod account;
pub mod exchange;
pub mod error;

pub use protocol::{Itch, Ouch, Protocol, ProtocolTag};
pub use envelope::{ItchMsg, OuchMsg, ProtocolMsg};
pub use post::{assert_postable, post_msg, post_via, BoxedPost, Post, PostVia};
pub use account::{AccountEntry, AccountId, BasicExchangeSettings, Endpoint};
pub use exchange::{Connect, Exchange, ExchangeBackend, Subscribe};
pub use error::DeliveryError;

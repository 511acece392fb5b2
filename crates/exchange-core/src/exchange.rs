//! The connection host.
//!
//! [`Exchange`] is a thin generic front end over a backend.
//! Seen from outside, an exchange is a set of connections: a client hands
//! over something postable, and for two-way connections gets something
//! postable back. How the backend implements that is its own business.
//!
//! The host's only job is to make the capability contracts line up at
//! compile time:
//! - the client must be [`Post<P>`] for the protocol it connects with;
//! - the handle returned by [`Connect`] must be [`Post<P>`] as well;
//! - a backend that does not implement [`Connect`] / [`Subscribe`] for a
//!   protocol simply cannot be connected to with it.
//!
//! ```text
//!   client --(Post<P>)--> Exchange::connect --> backend.connect
//!   client <--(Post<P>)-- returned handle <------------'
//! ```
//!
//! Messages sent to the exchange are INBOUND, messages sent from it are
//! OUTBOUND.

use crate::account::{BasicExchangeSettings, Endpoint};
use crate::post::Post;
use crate::protocol::ProtocolTag;

/// A backend that can be hosted by [`Exchange`].
pub trait ExchangeBackend {
    type Settings: BasicExchangeSettings;

    fn from_settings(settings: &Self::Settings) -> Self;
}

/// Two-way connections in protocol `P` for clients of type `C`.
pub trait Connect<P: ProtocolTag, C: Post<P>> {
    /// Inbound side of the connection, handed back to the client.
    type Handle: Post<P>;

    fn connect(&mut self, endpoint: &Endpoint, client: C) -> Self::Handle;
}

/// One-way (outbound only) streams in protocol `P` for clients of type `C`.
pub trait Subscribe<P: ProtocolTag, C: Post<P>> {
    fn subscribe(&mut self, endpoint: &Endpoint, client: C);
}

/// Generic exchange front end over backend `B`.
#[derive(Debug)]
pub struct Exchange<B> {
    backend: B,
}

impl<B: ExchangeBackend> Exchange<B> {
    /// Build the backend from `settings`.
    pub fn new(settings: &B::Settings) -> Self {
        Exchange {
            backend: B::from_settings(settings),
        }
    }

    /// Simulate a two-way connection with the exchange.
    ///
    /// Data from the exchange is posted to `client`; the returned handle is
    /// what the client posts to.
    ///
    /// ```ignore
    /// let order_entry = exchange.connect::<Ouch, _>(
    ///     &Endpoint::new("foo:bar"),
    ///     |msg: OuchMsg<'_>| println!("{:?}", msg.as_bytes()),
    /// );
    /// ```
    pub fn connect<P, C>(&mut self, endpoint: &Endpoint, client: C) -> B::Handle
    where
        P: ProtocolTag,
        C: Post<P>,
        B: Connect<P, C>,
    {
        self.backend.connect(endpoint, client)
    }

    /// Subscribe `client` to an outbound stream of messages.
    pub fn subscribe<P, C>(&mut self, endpoint: &Endpoint, client: C)
    where
        P: ProtocolTag,
        C: Post<P>,
        B: Subscribe<P, C>,
    {
        self.backend.subscribe(endpoint, client)
    }
}

impl<B> Exchange<B> {
    /// Host an already-built backend.
    pub fn from_backend(backend: B) -> Self {
        Exchange { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

//! Outbound market-data fan-out.
//!
//! Every subscriber receives every published message. Delivery is
//! best-effort per subscriber: one failing subscriber never keeps the
//! message from the others.

use exchange_core::{post_msg, BoxedPost, Endpoint, Itch, ItchMsg, Post};
use tracing::trace;

struct Subscriber {
    endpoint: Endpoint,
    sink: BoxedPost<Itch>,
}

#[derive(Default)]
pub struct MarketDataFeed {
    subscribers: Vec<Subscriber>,
}

impl MarketDataFeed {
    pub fn new() -> Self {
        MarketDataFeed::default()
    }

    pub fn add<C: Post<Itch> + 'static>(&mut self, endpoint: Endpoint, client: C) {
        self.subscribers.push(Subscriber {
            endpoint,
            sink: BoxedPost::new(client),
        });
    }

    /// Deliver `msg` to every subscriber.
    pub fn publish(&mut self, msg: ItchMsg<'_>) {
        for sub in self.subscribers.iter_mut() {
            trace!(endpoint = %sub.endpoint, len = msg.len(), "publish");
            post_msg(&mut sub.sink, msg);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for MarketDataFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.subscribers.iter().map(|s| &s.endpoint))
            .finish()
    }
}

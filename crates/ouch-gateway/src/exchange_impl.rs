//! The gateway backend hosted by `exchange_core::Exchange`.
//!
//! - OUCH: two-way. `connect` registers an account entry and hands back a
//!   fresh [`Gateway`] for the connection.
//! - ITCH: one-way. `subscribe` registers an account entry and adds the
//!   client to the market-data fan-out.
//!
//! There is no OUCH subscribe and no ITCH connect; trying either does not
//! compile.

use exchange_core::{
    AccountEntry, Connect, Endpoint, ExchangeBackend, Itch, ItchMsg, Ouch, Post, Protocol,
    Subscribe,
};
use tracing::{info, warn};

use crate::config::{ExchangeSettings, GatewayOptions};
use crate::feed::MarketDataFeed;
use crate::gateway::Gateway;

#[derive(Debug)]
pub struct GatewayExchange {
    settings: ExchangeSettings,
    options: GatewayOptions,
    feed: MarketDataFeed,
}

impl GatewayExchange {
    /// Like [`ExchangeBackend::from_settings`], but refuses settings whose
    /// options do not parse instead of falling back to defaults.
    pub fn try_from_settings(settings: &ExchangeSettings) -> anyhow::Result<Self> {
        let options = settings.options()?;
        Ok(GatewayExchange::with_options(settings.clone(), options))
    }

    fn with_options(settings: ExchangeSettings, options: GatewayOptions) -> Self {
        GatewayExchange {
            settings,
            options,
            feed: MarketDataFeed::new(),
        }
    }

    /// Every registered connection slot, pre-registered ones first.
    pub fn accounts(&self) -> &[AccountEntry] {
        &self.settings.accounts
    }

    pub fn options(&self) -> &GatewayOptions {
        &self.options
    }

    /// Send one ITCH message to every subscriber.
    pub fn publish(&mut self, msg: ItchMsg<'_>) {
        self.feed.publish(msg);
    }

    pub fn subscriber_count(&self) -> usize {
        self.feed.len()
    }

    fn register(&mut self, protocol: Protocol, endpoint: &Endpoint) {
        self.settings
            .accounts
            .push(AccountEntry::anonymous(protocol, endpoint.clone()));
    }
}

impl ExchangeBackend for GatewayExchange {
    type Settings = ExchangeSettings;

    fn from_settings(settings: &ExchangeSettings) -> Self {
        let options = settings.options().unwrap_or_else(|err| {
            warn!(error = %err, "ignoring invalid json_options, using defaults");
            GatewayOptions::default()
        });
        GatewayExchange::with_options(settings.clone(), options)
    }
}

impl<C: Post<Ouch>> Connect<Ouch, C> for GatewayExchange {
    type Handle = Gateway<C>;

    fn connect(&mut self, endpoint: &Endpoint, client: C) -> Gateway<C> {
        self.register(Protocol::Ouch, endpoint);
        info!(%endpoint, protocol = %Protocol::Ouch, "order-entry connection established");
        Gateway::with_options(client, &self.options)
    }
}

impl<C: Post<Itch> + 'static> Subscribe<Itch, C> for GatewayExchange {
    fn subscribe(&mut self, endpoint: &Endpoint, client: C) {
        self.register(Protocol::Itch, endpoint);
        info!(%endpoint, protocol = %Protocol::Itch, "market-data subscriber added");
        self.feed.add(endpoint.clone(), client);
    }
}

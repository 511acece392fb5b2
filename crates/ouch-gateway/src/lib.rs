//! ouch-gateway
//!
//! OUCH order entry behind the generic exchange front end:
//! - [`gateway`]       : per-connection sequencing / validation / replies
//! - [`exchange_impl`] : the backend plugged into `exchange_core::Exchange`
//! - [`feed`]          : ITCH subscriber fan-out
//! - [`config`]        : settings and gateway options
//! - [`types`]         : channel sinks for transport tasks

pub mod config;
pub mod error;
pub mod exchange_impl;
pub mod feed;
pub mod gateway;
pub mod types;

pub use config::{ExchangeSettings, GatewayOptions};
pub use error::GatewayError;
pub use exchange_impl::GatewayExchange;
pub use feed::MarketDataFeed;
pub use gateway::{Gateway, Outcome};
pub use types::{ChannelSink, OutboundRx, OutboundTx};

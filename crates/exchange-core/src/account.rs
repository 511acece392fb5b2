//! Endpoints, accounts and the settings contract.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::protocol::Protocol;

/// Semi-opaque name for a communication endpoint.
///
/// Think "host:port" or a topic name. The exchange front end never parses
/// it; it is an identifier only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(name: impl Into<String>) -> Self {
        Endpoint(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Endpoint {
    fn from(s: &str) -> Self {
        Endpoint::new(s)
    }
}

impl From<String> for Endpoint {
    fn from(s: String) -> Self {
        Endpoint(s)
    }
}

/// Account identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u32);

impl AccountId {
    /// Connections that did not identify themselves.
    pub const ANONYMOUS: AccountId = AccountId(0);
}

/// One registered connection slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub account: AccountId,
    pub protocol: Protocol,
    pub endpoint: Endpoint,
}

impl AccountEntry {
    pub fn new(account: AccountId, protocol: Protocol, endpoint: Endpoint) -> Self {
        AccountEntry {
            account,
            protocol,
            endpoint,
        }
    }

    pub fn anonymous(protocol: Protocol, endpoint: Endpoint) -> Self {
        AccountEntry::new(AccountId::ANONYMOUS, protocol, endpoint)
    }
}

/// Minimum surface a settings object must provide to build an exchange.
///
/// Backends are free to require more from their own settings type.
pub trait BasicExchangeSettings {
    /// Accounts registered up front.
    fn accounts(&self) -> &[AccountEntry];

    /// Backend-specific options, as a JSON document. Empty means defaults.
    fn json_options(&self) -> &str;
}

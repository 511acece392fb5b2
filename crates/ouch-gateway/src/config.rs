//! Settings for the gateway exchange.
//!
//! Settings can be built in code, parsed from JSON, or loaded from the
//! environment:
//!
//! - `EXCHANGE_SETTINGS_FILE` (optional): path to a JSON settings document
//! - `EXCHANGE_JSON_OPTIONS`  (optional): overrides `json_options`
//!
//! ```json
//! {
//!   "accounts": [
//!     { "account": 0, "protocol": "OUCH", "endpoint": "foo:bar" }
//!   ],
//!   "json_options": "{\"enforce_time_in_force\": true}"
//! }
//! ```
//!
//! `json_options` stays an opaque string at the settings level; the gateway
//! parses it into [`GatewayOptions`].

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use exchange_core::{AccountEntry, BasicExchangeSettings};
use ouch_protocol::Validator;
use serde::{Deserialize, Serialize};

/// Accounts plus backend options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeSettings {
    /// Registered connection slots. Connect/subscribe append to this.
    pub accounts: Vec<AccountEntry>,

    /// JSON document parsed into [`GatewayOptions`]. Empty means defaults.
    pub json_options: String,
}

impl BasicExchangeSettings for ExchangeSettings {
    fn accounts(&self) -> &[AccountEntry] {
        &self.accounts
    }

    fn json_options(&self) -> &str {
        &self.json_options
    }
}

impl ExchangeSettings {
    /// Construct settings from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Result<Self> {
        let mut settings = match env::var("EXCHANGE_SETTINGS_FILE") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(options) = env::var("EXCHANGE_JSON_OPTIONS") {
            settings.json_options = options;
        }

        // Options must parse before anything connects.
        settings.options()?;

        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing settings file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid exchange settings")
    }

    /// Parse `json_options`.
    pub fn options(&self) -> Result<GatewayOptions> {
        GatewayOptions::from_json(&self.json_options)
    }
}

/// Gateway behaviour switches carried in `json_options`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayOptions {
    /// Reject orders whose time in force is outside the known set.
    pub enforce_time_in_force: bool,
}

impl GatewayOptions {
    pub fn from_json(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text).context("invalid gateway options")
    }

    pub fn validator(&self) -> Validator {
        Validator::new().with_time_in_force(self.enforce_time_in_force)
    }
}

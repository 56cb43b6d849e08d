//! Gateway configuration.
//!
//! Loaded from TOML. Every field has a default so a partial file (or none at
//! all, for mock runs) still produces a usable `GatewayConfig`.

use crate::domain::request::CallbackUrls;
use crate::error::{PxPayError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

pub const DEFAULT_PXPAY_URL: &str = "https://sec.paymentexpress.com/pxaccess/pxpay.aspx";

/// PxPay user id and shared key.
///
/// `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub user_id: String,
    pub key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("key", &"***")
            .finish()
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub url: String,
    pub user_id: String,
    pub key: String,
    pub return_url: String,
    pub cancel_url: String,
    pub timeout_secs: Option<u64>,
    /// Replaces the built-in currency set when present.
    pub supported_currencies: Option<BTreeMap<String, String>>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PXPAY_URL.to_string(),
            user_id: String::new(),
            key: String::new(),
            return_url: String::new(),
            cancel_url: String::new(),
            timeout_secs: None,
            supported_currencies: None,
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("url", &self.url)
            .field("user_id", &self.user_id)
            .field("key", &"***")
            .field("return_url", &self.return_url)
            .field("cancel_url", &self.cancel_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("supported_currencies", &self.supported_currencies())
            .finish()
    }
}

impl GatewayConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Currency code to display name.
    ///
    /// A `supported_currencies` table in the config replaces the built-in set
    /// entirely rather than extending it.
    pub fn supported_currencies(&self) -> BTreeMap<String, String> {
        match &self.supported_currencies {
            Some(configured) => configured.clone(),
            None => default_currencies(),
        }
    }

    pub fn ensure_supported_currency(&self, code: &str) -> Result<()> {
        if self.supported_currencies().contains_key(code) {
            Ok(())
        } else {
            Err(PxPayError::UnsupportedCurrency(code.to_string()))
        }
    }

    pub fn callback_urls(&self) -> CallbackUrls {
        CallbackUrls {
            success: self.return_url.clone(),
            fail: self.cancel_url.clone(),
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            user_id: self.user_id.clone(),
            key: self.key.clone(),
        }
    }
}

fn default_currencies() -> BTreeMap<String, String> {
    [
        ("NZD", "New Zealand Dollar"),
        ("USD", "United States Dollar"),
        ("GBP", "Great British Pound"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}
